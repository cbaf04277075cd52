use sandfall_engine::{mat_sand, mat_stone, Material, World};

#[test]
fn world_steps_and_renders() {
    let mut world = World::new(32, 24).unwrap_or_else(|_| panic!("world should build"));
    world.enable_perf_metrics(true);
    for x in 0..32 {
        world.set_particle(x, 0, mat_sand());
    }
    world.paint_circle(16, 20, 3, mat_stone());

    world.step();
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.particles_processed() > 0);

    world.render();
    assert_eq!(world.pixels_len(), 32 * 24);
    assert!(world.pixels().iter().all(|px| px >> 24 == 0xFF));
}

#[test]
fn advance_runs_fixed_ticks() {
    let mut world = World::with_settings_json(16, 16, r#"{ "fixedDt": 0.1, "maxStepsPerFrame": 4, "seed": 3 }"#)
        .unwrap_or_else(|_| panic!("world should build"));
    assert_eq!(world.advance(0.25), 2);
    assert_eq!(world.tick(), 2);
    // Backlog beyond maxStepsPerFrame is dropped
    assert_eq!(world.advance(5.0), 4);
    assert!(world.alpha() < 1.0);
}

#[test]
fn unknown_ids_paint_nothing() {
    let mut world = World::new(8, 8).unwrap_or_else(|_| panic!("world should build"));
    world.set_particle(1, 1, 0x4000);
    assert_eq!(world.particle_count(), 0);
    world.set_particle(1, 1, Material::Water.bits());
    assert_eq!(world.particle_count(), 1);
    world.clear();
    assert_eq!(world.particle_count(), 0);
}
