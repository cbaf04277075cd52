//! Sandfall Engine - multithreaded falling-sand simulation for WASM and native
//!
//! Architecture:
//! - core/       - grid storage, cell access, errors, logging
//! - domain/     - materials, particles, the material rule table
//! - systems/    - gravity physics and per-material behaviors
//! - simulation/ - tick engine, worker pool, brushes, rendering, JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (short paths used across the crate)
pub use self::core::grid;
pub use systems::behaviors;
pub use systems::physics;

use wasm_bindgen::prelude::*;

// Thread pool initialization for the browser
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    self::core::logging::init();
    log::info!("sandfall engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use self::core::error::{EngineError, EngineResult};
pub use self::core::grid::{CellAccess, Grid};
pub use domain::content::MaterialTable;
pub use domain::materials::Material;
pub use domain::particle::Particle;
pub use simulation::{FixedTimestep, PerfStats, Simulation, SimulationSettings, World, WorkerPool};

// Export material ids for JS
#[wasm_bindgen]
pub fn mat_empty() -> u16 { Material::Empty.bits() }
#[wasm_bindgen]
pub fn mat_sand() -> u16 { Material::Sand.bits() }
#[wasm_bindgen]
pub fn mat_water() -> u16 { Material::Water.bits() }
#[wasm_bindgen]
pub fn mat_stone() -> u16 { Material::Stone.bits() }
#[wasm_bindgen]
pub fn mat_wood() -> u16 { Material::Wood.bits() }
#[wasm_bindgen]
pub fn mat_smoke() -> u16 { Material::Smoke.bits() }
#[wasm_bindgen]
pub fn mat_fire() -> u16 { Material::Fire.bits() }
#[wasm_bindgen]
pub fn mat_salt() -> u16 { Material::Salt.bits() }
#[wasm_bindgen]
pub fn mat_acid() -> u16 { Material::Acid.bits() }
#[wasm_bindgen]
pub fn mat_gasoline() -> u16 { Material::Gasoline.bits() }
#[wasm_bindgen]
pub fn mat_virus() -> u16 { Material::Virus.bits() }
#[wasm_bindgen]
pub fn mat_poison() -> u16 { Material::Poison.bits() }
