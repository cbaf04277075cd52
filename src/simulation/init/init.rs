use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::core::grid::Grid;

use super::perf_stats::PerfStats;
use super::settings::SimulationSettings;
use super::Simulation;

pub(super) fn create_simulation(grid: Grid, mut settings: SimulationSettings) -> Simulation {
    settings.sanitize();

    let rng = match settings.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    log::debug!(
        "simulation {}x{}: gravity {}, dt {}, seed {:?}",
        grid.width(),
        grid.height(),
        settings.gravity,
        settings.fixed_dt,
        settings.seed
    );

    Simulation {
        grid,
        settings,
        rng,
        clock: 0,
        tick: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
