use wasm_bindgen::prelude::*;

/// Snapshot of the last tick. All zeros while perf metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) even_phase_ms: f64,
    pub(super) odd_phase_ms: f64,
    pub(super) particles_processed: u32,
    pub(super) particles_moved: u32,
    pub(super) raycast_steps: u32,
    pub(super) expired: u32,
    pub(super) transitions: u32,
    pub(super) bands: u32,
    pub(super) workers: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn even_phase_ms(&self) -> f64 { self.even_phase_ms }
    #[wasm_bindgen(getter)]
    pub fn odd_phase_ms(&self) -> f64 { self.odd_phase_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_processed(&self) -> u32 { self.particles_processed }
    #[wasm_bindgen(getter)]
    pub fn particles_moved(&self) -> u32 { self.particles_moved }
    #[wasm_bindgen(getter)]
    pub fn raycast_steps(&self) -> u32 { self.raycast_steps }
    #[wasm_bindgen(getter)]
    pub fn expired(&self) -> u32 { self.expired }
    #[wasm_bindgen(getter)]
    pub fn transitions(&self) -> u32 { self.transitions }
    #[wasm_bindgen(getter)]
    pub fn bands(&self) -> u32 { self.bands }
    #[wasm_bindgen(getter)]
    pub fn workers(&self) -> u32 { self.workers }
}
