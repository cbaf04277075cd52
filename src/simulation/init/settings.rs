use serde::{Deserialize, Serialize};

use crate::core::error::EngineResult;

use super::perf_stats::PerfStats;
use super::Simulation;

pub const DEFAULT_GRAVITY: f32 = 4.0;
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 30.0;
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 8;

/// Engine configuration. Every field has a default, so `{}` is valid JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationSettings {
    /// Vertical velocity (cells per tick) gained per simulated second
    pub gravity: f32,
    /// Simulated seconds per tick
    pub fixed_dt: f32,
    /// Upper bound on ticks run for a single frame of real time
    pub max_steps_per_frame: u32,
    /// Worker threads; 0 picks the available parallelism
    pub workers: usize,
    /// Master RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            fixed_dt: DEFAULT_FIXED_DT,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            workers: 0,
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let mut settings: SimulationSettings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Replace non-finite or non-positive timing values with defaults.
    pub fn sanitize(&mut self) {
        if !self.gravity.is_finite() {
            log::warn!("gravity {} is not finite, using {}", self.gravity, DEFAULT_GRAVITY);
            self.gravity = DEFAULT_GRAVITY;
        }
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            log::warn!("fixedDt {} is invalid, using {}", self.fixed_dt, DEFAULT_FIXED_DT);
            self.fixed_dt = DEFAULT_FIXED_DT;
        }
        if self.max_steps_per_frame == 0 {
            self.max_steps_per_frame = 1;
        }
    }
}

pub(super) fn enable_perf_metrics(sim: &mut Simulation, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &Simulation) -> PerfStats {
    sim.perf_stats.clone()
}

pub(super) fn set_gravity(sim: &mut Simulation, gravity: f32) {
    if gravity.is_finite() {
        sim.settings.gravity = gravity;
    } else {
        log::warn!("ignoring non-finite gravity {}", gravity);
    }
}
