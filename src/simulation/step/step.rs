use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::bands::{self, Band};
use super::pool::WorkerPool;
use super::sweep::{self, BandStats, SweepParams};
use super::{PerfTimer, Simulation};

/// Next tick stamp. Cycles through 1..=255 so it never matches a fresh
/// particle's 0.
#[inline]
pub(super) fn next_clock(clock: u8) -> u8 {
    if clock == u8::MAX {
        1
    } else {
        clock + 1
    }
}

pub(super) fn update(sim: &mut Simulation, dt: f32, pool: &WorkerPool) {
    let perf_on = sim.perf_enabled;
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    sim.clock = next_clock(sim.clock);

    let width = sim.grid.width();
    let height = sim.grid.height();
    let count = bands::band_count(width, pool.workers());
    let offset = bands::draw_offset(width, count, &mut sim.rng);
    let all_bands = bands::partition(width, count, offset);
    let row_dirs: Vec<bool> = (0..height).map(|_| sim.rng.gen_bool(0.5)).collect();

    let params = SweepParams {
        row_dirs: &row_dirs,
        gravity: sim.settings.gravity,
        dt,
        clock: sim.clock,
    };

    let mut total = BandStats::default();
    let mut phase_ms = [0.0f64; 2];

    let table = Arc::clone(sim.grid.table());
    {
        let rng = &mut sim.rng;
        let shared = sim.grid.split_shared(&table);

        for (phase, even) in [true, false].into_iter().enumerate() {
            let timer = if perf_on { Some(PerfTimer::start()) } else { None };

            let tasks: Vec<(Band, u64)> = all_bands
                .iter()
                .filter(|b| b.is_even() == even)
                .map(|b| (*b, rng.gen::<u64>()))
                .collect();

            let results = pool.run(tasks, |(band, seed)| {
                let mut band_rng = SmallRng::seed_from_u64(seed);
                let (reach_min, reach_max) = band.reach();
                // Same-phase bands are a whole band apart, wider than twice
                // the halo, so these views are disjoint.
                let mut view = unsafe { shared.band(reach_min, reach_max) };
                sweep::sweep_band(&mut view, &band, &params, &mut band_rng)
            });

            for stats in &results {
                total.merge(stats);
            }
            if let Some(t) = timer {
                phase_ms[phase] = t.elapsed_ms();
            }
        }
    }

    sim.tick += 1;

    if let Some(t) = step_start {
        let perf = &mut sim.perf_stats;
        perf.step_ms = t.elapsed_ms();
        perf.even_phase_ms = phase_ms[0];
        perf.odd_phase_ms = phase_ms[1];
        perf.particles_processed = total.processed;
        perf.particles_moved = total.moved;
        perf.raycast_steps = total.raycast_steps;
        perf.expired = total.expired;
        perf.transitions = total.transitions;
        perf.bands = all_bands.len() as u32;
        perf.workers = pool.workers() as u32;
    }

    log::trace!(
        "tick {}: {} bands, {} processed, {} moved, {} expired",
        sim.tick,
        all_bands.len(),
        total.processed,
        total.moved,
        total.expired
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_skips_zero() {
        assert_eq!(next_clock(0), 1);
        assert_eq!(next_clock(1), 2);
        assert_eq!(next_clock(254), 255);
        assert_eq!(next_clock(255), 1);
    }
}
