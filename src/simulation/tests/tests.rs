use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::domain::materials::ALL_MATERIALS;
use crate::domain::particle::Particle;

const DT: f32 = 1.0 / 30.0;

fn seeded(seed: u64) -> SimulationSettings {
    SimulationSettings { seed: Some(seed), ..SimulationSettings::default() }
}

fn material(sim: &Simulation, x: i32, y: i32) -> Option<Material> {
    sim.grid().get(x, y).map(|p| p.material)
}

fn grid_with_table(json: &str, width: u32, height: u32) -> Grid {
    let table = MaterialTable::from_bundle_json(json).expect("bundle should parse");
    Grid::with_table(width, height, Arc::new(table))
}

fn counts(grid: &Grid) -> Vec<usize> {
    ALL_MATERIALS.iter().map(|m| grid.count(*m)).collect()
}

/// Random mix of materials that never change type on their own.
fn stable_mix(width: u32, height: u32, seed: u64) -> Grid {
    let palette = [
        Material::Empty,
        Material::Empty,
        Material::Sand,
        Material::Water,
        Material::Stone,
        Material::Wood,
        Material::Gasoline,
        Material::Poison,
    ];
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let m = palette[rng.gen_range(0..palette.len())];
            grid.set_with(x, y, m, &mut rng);
        }
    }
    grid
}

fn assert_cells_consistent(grid: &Grid) {
    let table = grid.table();
    for p in grid.cells() {
        let props = table.props(p.material);
        assert_eq!(p.density, props.density, "{:?} carries foreign density", p.material);
        assert_eq!(p.flammability, props.flammability);
        assert_eq!(p.corrodibility, props.corrodibility);
        assert_eq!(p.dissolvability, props.dissolvability);
        assert_eq!(p.diffusibility, props.diffusibility);
    }
}

/// Random mix drawn from every material, fire and acid included.
fn every_material_mix(width: u32, height: u32, seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let m = ALL_MATERIALS[rng.gen_range(0..ALL_MATERIALS.len())];
            grid.set_with(x, y, m, &mut rng);
        }
    }
    grid
}

#[test]
fn sand_falls_one_cell_in_3x3() {
    let mut grid = Grid::new(3, 3);
    grid.set(1, 0, Material::Sand);
    let mut sim = Simulation::new(grid, seeded(7));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);

    assert_eq!(material(&sim, 1, 0), Some(Material::Empty));
    assert_eq!(material(&sim, 1, 1), Some(Material::Sand));
    assert_eq!(sim.grid().non_empty_count(), 1);
    assert_eq!(sim.tick(), 1);
}

#[test]
fn sand_on_the_floor_stays_put() {
    let mut grid = Grid::new(3, 3);
    grid.set(1, 2, Material::Sand);
    let mut sim = Simulation::new(grid, seeded(1));
    let pool = WorkerPool::serial().expect("pool");

    for _ in 0..5 {
        sim.update(DT, &pool);
    }
    assert_eq!(material(&sim, 1, 2), Some(Material::Sand));
    assert_eq!(sim.grid().get(1, 2).map(|p| p.velocity.y), Some(0.0));
}

#[test]
fn expired_fire_becomes_burning_smoke() {
    let mut grid = Grid::new(3, 3);
    grid.set(1, 1, Material::Fire);
    if let Some(p) = grid.get_mut(1, 1) {
        p.life_time = 0.0;
    }
    let mut sim = Simulation::new(grid, seeded(3));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);

    let cell = sim.grid().get(1, 1).copied().expect("in bounds");
    assert_eq!(cell.material, Material::Smoke);
    assert!(cell.burning);
    assert_eq!(sim.grid().non_empty_count(), 1);
}

#[test]
fn fire_next_to_water_goes_out() {
    // Water lighter than fire stays beside it instead of flowing in
    let mut grid = grid_with_table(
        r#"{ "materials": [
            { "key": "fire", "dissolvability": 1.0 },
            { "key": "water", "density": 1.0 }
        ] }"#,
        3,
        2,
    );
    grid.set(0, 0, Material::Water);
    grid.set(1, 0, Material::Fire);
    grid.set(2, 0, Material::Water);
    for x in 0..3 {
        grid.set(x, 1, Material::Stone);
    }
    let mut sim = Simulation::new(grid, seeded(5));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);

    let cell = sim.grid().get(1, 0).copied().expect("in bounds");
    assert_eq!(cell.material, Material::Smoke);
    assert!(!cell.burning);
}

#[test]
fn stone_only_grid_is_unchanged() {
    let mut grid = Grid::new(16, 16);
    for y in 0..16 {
        for x in 0..16 {
            grid.set(x, y, Material::Stone);
        }
    }
    let before: Vec<Particle> = grid.cells().to_vec();
    let mut sim = Simulation::new(grid, seeded(11));
    let pool = WorkerPool::new(4).expect("pool");

    for _ in 0..10 {
        sim.update(DT, &pool);
    }

    for (a, b) in before.iter().zip(sim.grid().cells()) {
        assert_eq!(a.material, b.material);
        assert_eq!(a.color, b.color);
    }
}

#[test]
fn wood_between_two_fires_ignites() {
    let mut grid = grid_with_table(r#"{ "materials": [ { "key": "wood", "flammability": 1.0 } ] }"#, 3, 3);
    grid.set(1, 1, Material::Wood);
    grid.set(0, 0, Material::Fire);
    grid.set(2, 2, Material::Fire);
    let mut sim = Simulation::new(grid, seeded(2));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);

    assert_eq!(material(&sim, 1, 1), Some(Material::Fire));
}

#[test]
fn wood_without_fire_never_burns() {
    let mut grid = Grid::new(8, 8);
    for x in 0..8 {
        grid.set(x, 7, Material::Wood);
    }
    let mut sim = Simulation::new(grid, seeded(2));
    let pool = WorkerPool::serial().expect("pool");
    for _ in 0..50 {
        sim.update(DT, &pool);
    }
    assert_eq!(sim.grid().count(Material::Wood), 8);
}

#[test]
fn salt_in_water_dissolves() {
    let mut grid = grid_with_table(r#"{ "materials": [ { "key": "salt", "dissolvability": 1.0 } ] }"#, 3, 2);
    grid.set(0, 1, Material::Water);
    grid.set(1, 1, Material::Salt);
    grid.set(2, 1, Material::Water);
    let mut sim = Simulation::new(grid, seeded(9));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);
    let salt = sim.grid().cells().iter().find(|p| p.material == Material::Salt).copied();
    assert_eq!(salt.map(|p| p.dying), Some(true));

    // Longest salt life is 2 s
    for _ in 0..90 {
        sim.update(DT, &pool);
    }
    assert_eq!(sim.grid().count(Material::Salt), 0);
    assert_eq!(sim.grid().count(Material::Water), 2);
}

#[test]
fn acid_eats_one_solid_per_tick() {
    let mut grid = grid_with_table(r#"{ "materials": [ { "key": "stone", "corrodibility": 1.0 } ] }"#, 3, 3);
    grid.set(1, 1, Material::Acid);
    for x in 0..3 {
        grid.set(x, 2, Material::Stone);
    }
    let mut sim = Simulation::new(grid, seeded(4));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);

    assert_eq!(sim.grid().count(Material::Stone), 2);
    let acid = sim.grid().cells().iter().find(|p| p.material == Material::Acid).copied();
    assert_eq!(acid.map(|p| p.dying), Some(true));
}

#[test]
fn smoke_rises() {
    let mut grid = Grid::new(1, 6);
    grid.set(0, 5, Material::Smoke);
    if let Some(p) = grid.get_mut(0, 5) {
        p.life_time = 10.0;
    }
    let mut sim = Simulation::new(grid, seeded(8));
    let pool = WorkerPool::serial().expect("pool");

    sim.update(DT, &pool);

    assert_eq!(material(&sim, 0, 4), Some(Material::Smoke));
    assert_eq!(material(&sim, 0, 5), Some(Material::Empty));
}

#[test]
fn worker_count_preserves_materials() {
    for workers in [1usize, 4] {
        let grid = stable_mix(64, 48, 99);
        let initial = counts(&grid);
        let mut sim = Simulation::new(grid, seeded(99));
        let pool = WorkerPool::new(workers).expect("pool");

        for _ in 0..30 {
            sim.update(DT, &pool);
        }

        assert_eq!(counts(sim.grid()), initial, "workers = {}", workers);
        assert_cells_consistent(sim.grid());
    }
}

#[test]
fn every_material_stays_consistent_on_narrow_bands() {
    // 16 and 17 columns over 4 workers give bands at the minimum width
    for (width, workers) in [(16u32, 4usize), (17, 4), (24, 6), (8, 2)] {
        for seed in 0..6u64 {
            let grid = every_material_mix(width, 24, seed);
            let mut sim = Simulation::new(grid, seeded(seed));
            let pool = WorkerPool::new(workers).expect("pool");

            for _ in 0..60 {
                sim.update(DT, &pool);
                assert_cells_consistent(sim.grid());
            }
            assert_eq!(sim.grid().size(), width as usize * 24);
        }
    }
}

#[test]
fn every_material_replays_exactly_on_narrow_bands() {
    let run = || {
        let mut sim = Simulation::new(every_material_mix(17, 20, 3), seeded(77));
        let pool = WorkerPool::new(4).expect("pool");
        for _ in 0..40 {
            sim.update(DT, &pool);
        }
        sim.into_grid().cells().iter().map(|p| (p.material, p.burning)).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn same_seed_and_workers_replay_exactly() {
    let run = || {
        let mut sim = Simulation::new(stable_mix(40, 30, 5), seeded(1234));
        let pool = WorkerPool::new(4).expect("pool");
        for _ in 0..20 {
            sim.update(DT, &pool);
        }
        sim.into_grid().cells().iter().map(|p| p.material).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn settled_columns_are_density_ordered() {
    let (w, h) = (8u32, 20u32);
    let mut grid = Grid::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let m = if y < h as i32 / 2 { Material::Sand } else { Material::Water };
            grid.set(x, y, m);
        }
    }
    let mut sim = Simulation::new(grid, seeded(17));
    let pool = WorkerPool::new(2).expect("pool");

    for _ in 0..300 {
        sim.update(DT, &pool);
    }

    let grid = sim.grid();
    for y in 0..h as i32 - 1 {
        for x in 0..w as i32 {
            let upper = grid.get(x, y).copied().expect("in bounds");
            let lower = grid.get(x, y + 1).copied().expect("in bounds");
            assert!(
                upper.density <= lower.density || upper.velocity.y != 0.0,
                "({}, {}) {:?} above {:?}",
                x,
                y,
                upper.material,
                lower.material
            );
        }
    }
}

#[test]
fn perf_stats_follow_the_toggle() {
    let mut grid = Grid::new(16, 16);
    grid.set(3, 3, Material::Sand);
    grid.set(8, 8, Material::Water);
    let mut sim = Simulation::new(grid, seeded(6));
    let pool = WorkerPool::new(2).expect("pool");

    sim.update(DT, &pool);
    assert_eq!(sim.get_perf_stats(), PerfStats::default());

    sim.enable_perf_metrics(true);
    sim.update(DT, &pool);
    let stats = sim.get_perf_stats();
    assert_eq!(stats.particles_processed(), 2);
    assert_eq!(stats.bands(), 2);
    assert_eq!(stats.workers(), 2);

    sim.enable_perf_metrics(false);
    assert_eq!(sim.get_perf_stats(), PerfStats::default());
}

#[test]
fn loading_materials_clears_and_swaps_table() {
    let mut sim = Simulation::with_size(8, 8, seeded(1)).expect("sim");
    sim.paint_circle(4, 4, 3, Material::Stone);
    assert!(sim.grid().non_empty_count() > 0);

    sim.load_materials(r#"{ "materials": [ { "key": "sand", "density": 300.0 } ] }"#)
        .expect("overrides apply");
    assert_eq!(sim.grid().non_empty_count(), 0);
    assert_eq!(sim.grid().table().props(Material::Sand).density, 300.0);

    assert!(sim.load_materials(r#"{ "materials": [ { "key": "lava" } ] }"#).is_err());
}

#[test]
fn gravity_setting_is_guarded() {
    let mut sim = Simulation::with_size(4, 4, seeded(1)).expect("sim");
    sim.set_gravity(9.0);
    assert_eq!(sim.settings().gravity, 9.0);
    sim.set_gravity(f32::NAN);
    assert_eq!(sim.settings().gravity, 9.0);
}
