use wasm_bindgen::prelude::*;

use crate::core::error::{EngineError, EngineResult};
use crate::domain::materials::{Material, MaterialBits};

use super::perf_stats::PerfStats;
use super::pool::WorkerPool;
use super::settings::SimulationSettings;
use super::timestep::FixedTimestep;
use super::Simulation;

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn material_or_empty(bits: MaterialBits) -> Material {
    Material::from_bits(bits).unwrap_or_else(|| {
        log::warn!("unknown material id {:#06x}, using empty", bits);
        Material::Empty
    })
}

/// The engine as seen from JS: simulation, worker pool, frame clock and
/// the pixel buffer the canvas copies from.
#[wasm_bindgen]
pub struct World {
    sim: Simulation,
    pool: WorkerPool,
    timestep: FixedTimestep,
    pixels: Vec<u32>,
}

impl World {
    pub fn build(width: u32, height: u32, settings: SimulationSettings) -> EngineResult<Self> {
        let pool = WorkerPool::new(settings.workers)?;
        let sim = Simulation::with_size(width, height, settings)?;
        let timestep = FixedTimestep::new(sim.settings().fixed_dt, sim.settings().max_steps_per_frame);
        log::info!("world {}x{} ready, {} workers", width, height, pool.workers());
        Ok(Self {
            sim,
            pool,
            timestep,
            pixels: Vec::new(),
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

#[wasm_bindgen]
impl World {
    /// Create a world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<World, JsValue> {
        World::build(width, height, SimulationSettings::default()).map_err(to_js)
    }

    /// Create a world from a `SimulationSettings` JSON object
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings_json(width: u32, height: u32, json: &str) -> Result<World, JsValue> {
        let settings = SimulationSettings::from_json(json).map_err(to_js)?;
        World::build(width, height, settings).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.sim.grid().width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.sim.grid().height() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.sim.tick() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.sim.grid().non_empty_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn workers(&self) -> u32 { self.pool.workers() as u32 }

    /// Interpolation factor between the last two ticks
    #[wasm_bindgen(getter)]
    pub fn alpha(&self) -> f32 { self.timestep.alpha() }

    pub fn settings_json(&self) -> String {
        self.sim.settings().to_json()
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.sim.enable_perf_metrics(enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.sim.get_perf_stats()
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.sim.set_gravity(gravity);
    }

    pub fn set_particle(&mut self, x: i32, y: i32, material: MaterialBits) {
        self.sim.set_particle(x, y, material_or_empty(material));
    }

    /// Brush stroke. Stone and wood paint solid circles, everything else
    /// scatters.
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: i32, material: MaterialBits) -> u32 {
        self.sim.paint_circle(cx, cy, radius, material_or_empty(material)) as u32
    }

    pub fn erase_circle(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.sim.erase_circle(cx, cy, radius) as u32
    }

    pub fn clear(&mut self) {
        self.sim.clear();
        self.timestep.reset();
    }

    /// Run exactly one tick
    pub fn step(&mut self) {
        self.sim.step(&self.pool);
    }

    /// Feed `elapsed` seconds of real time, run the ticks it buys and
    /// return how many ran.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let steps = self.timestep.push(elapsed);
        let dt = self.timestep.dt();
        for _ in 0..steps {
            self.sim.update(dt, &self.pool);
        }
        steps
    }

    /// Refresh the pixel buffer (one ABGR u32 per cell)
    pub fn render(&mut self) {
        self.sim.render(&mut self.pixels);
    }

    pub fn pixels_ptr(&self) -> *const u32 {
        self.pixels.as_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.pixels.len()
    }

    /// Quantize an image (1, 3 or 4 channels) into the grid
    pub fn import_image(&mut self, pixels: &[u8], width: u32, height: u32, channels: u32) -> Result<(), JsValue> {
        self.sim.import_image(pixels, width, height, channels).map_err(to_js)
    }

    /// Apply material overrides (`{ "materials": [...] }`) and clear the grid
    pub fn load_materials(&mut self, json: &str) -> Result<(), JsValue> {
        self.sim.load_materials(json).map_err(to_js)
    }

    pub fn materials_manifest_json(&self) -> String {
        self.sim.materials_manifest_json()
    }
}
