//! Domain - materials, particles and the material rule table

pub mod color;
pub mod content;
pub mod materials;
pub mod particle;
