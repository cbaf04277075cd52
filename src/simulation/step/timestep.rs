//! Fixed timestep - turns real frame time into a whole number of ticks

use super::settings::DEFAULT_FIXED_DT;

/// Accumulates elapsed real time and hands it out in `dt`-sized ticks.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// A `dt` that is not a positive finite number falls back to
    /// `DEFAULT_FIXED_DT`.
    pub fn new(dt: f32, max_steps: u32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            log::warn!("fixed dt {} is invalid, using {}", dt, DEFAULT_FIXED_DT);
            DEFAULT_FIXED_DT
        };
        Self { dt, accumulator: 0.0, max_steps: max_steps.max(1) }
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add `elapsed` seconds and return how many ticks to run now. Time
    /// beyond `max_steps` ticks is dropped.
    pub fn push(&mut self, elapsed: f32) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        let mut steps = 0;
        while self.accumulator > self.dt && steps < self.max_steps {
            self.accumulator -= self.dt;
            steps += 1;
        }

        if self.accumulator > self.dt {
            let dropped = (self.accumulator / self.dt) as u32;
            log::warn!("falling behind, dropping {} ticks", dropped);
            self.accumulator %= self.dt;
        }
        steps
    }

    /// Fraction of a tick left in the accumulator, for interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
