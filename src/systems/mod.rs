//! Systems - physics and per-material behaviors

pub mod behaviors;
pub mod physics;
