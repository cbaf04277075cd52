//! Simulation - the tick engine
//!
//! `Simulation` owns the grid and advances it one tick per `update`. A tick
//! cuts the grid into vertical bands, runs every even band at once on the
//! worker pool, waits, then runs every odd band. Inside a band, cells that
//! fall are swept bottom-up and cells that rise are swept top-down.
//!
//! Brushes, image import and render extraction live next to the engine in
//! `commands/` and `render/`; `World` wraps all of it for JS.

use rand::rngs::SmallRng;

use crate::core::error::EngineResult;
use crate::core::grid::Grid;
use crate::domain::content::MaterialTable;
use crate::domain::materials::Material;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/pool.rs"]
mod pool;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/bands.rs"]
mod bands;
#[path = "step/sweep.rs"]
mod sweep;
#[path = "step/step.rs"]
mod step;
#[path = "step/timestep.rs"]
mod timestep;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/import.rs"]
mod import;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use commands::{brush_fill, erase_circle, paint_circle, SCATTER_FILL};
pub use facade::World;
pub use import::import_image;
pub use perf_stats::PerfStats;
pub use pool::WorkerPool;
pub use render_extract::extract_pixels;
pub use settings::{
    SimulationSettings, DEFAULT_FIXED_DT, DEFAULT_GRAVITY, DEFAULT_MAX_STEPS_PER_FRAME,
};
pub use timestep::FixedTimestep;

use perf_timer::PerfTimer;

pub struct Simulation {
    grid: Grid,
    settings: SimulationSettings,
    /// Master RNG: band offsets, row directions and per-band seeds
    rng: SmallRng,
    /// Stamp of the current tick, 1..=255
    clock: u8,
    tick: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Simulation {
    /// Take ownership of `grid`. Settings are sanitized first.
    pub fn new(grid: Grid, settings: SimulationSettings) -> Self {
        init::create_simulation(grid, settings)
    }

    /// Build an empty `width` x `height` world with the built-in materials.
    pub fn with_size(width: u32, height: u32, settings: SimulationSettings) -> EngineResult<Self> {
        let grid = Grid::create(width, height)?;
        Ok(Self::new(grid, settings))
    }

    /// Advance one tick of `dt` simulated seconds, spreading the bands over
    /// `pool`. Returns once every band of both phases is done.
    pub fn update(&mut self, dt: f32, pool: &WorkerPool) {
        step::update(self, dt, pool);
    }

    /// One tick of the configured fixed `dt`.
    pub fn step(&mut self, pool: &WorkerPool) {
        let dt = self.settings.fixed_dt;
        self.update(dt, pool);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        settings::set_gravity(self, gravity);
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Place one fresh particle. Out-of-bounds coordinates are ignored.
    pub fn set_particle(&mut self, x: i32, y: i32, material: Material) {
        self.grid.set_with(x, y, material, &mut self.rng);
    }

    /// Paint with the brush `material` prefers (solid or scattered).
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, material: Material) -> usize {
        let fill = brush_fill(material);
        paint_circle(&mut self.grid, cx, cy, radius, material, fill, &mut self.rng)
    }

    pub fn erase_circle(&mut self, cx: i32, cy: i32, radius: i32) -> usize {
        erase_circle(&mut self.grid, cx, cy, radius)
    }

    pub fn import_image(&mut self, pixels: &[u8], width: u32, height: u32, channels: u32) -> EngineResult<()> {
        import_image(&mut self.grid, pixels, width, height, channels, &mut self.rng)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Replace the material table with the built-in one plus `json`
    /// overrides. Clears the grid, since live particles carry the old
    /// parameters.
    pub fn load_materials(&mut self, json: &str) -> EngineResult<()> {
        let table = MaterialTable::from_bundle_json(json)?;
        self.grid.set_table(std::sync::Arc::new(table));
        self.clear();
        Ok(())
    }

    pub fn materials_manifest_json(&self) -> String {
        self.grid.table().manifest_json()
    }

    /// Fill `out` with one ABGR pixel per cell.
    pub fn render(&self, out: &mut Vec<u32>) {
        extract_pixels(&self.grid, out);
    }

}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
