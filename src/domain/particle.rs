//! Particle - the value stored in every grid cell

use rand::Rng;

use super::color::vary_color;
use super::materials::{
    Material, MaterialProps, FLAG_BURNING, FLAG_MORTAL, FLAG_VARY_COLOR,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };
}

/// One cell's worth of state. Copied by value; there is no identity beyond
/// the cell that holds it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub material: Material,
    /// 0xRRGGBB
    pub color: u32,
    /// Cells per tick, +y is down.
    pub velocity: Velocity,
    /// Seconds left; only meaningful while `dying`.
    pub life_time: f32,
    pub density: f32,
    pub flammability: f32,
    pub dissolvability: f32,
    pub corrodibility: f32,
    pub diffusibility: f32,
    pub dying: bool,
    pub burning: bool,
    /// Tick stamp, compared against the engine clock so a particle is only
    /// processed once per tick. Fresh particles carry 0, which no tick uses.
    pub(crate) clock: u8,
}

impl Particle {
    pub const EMPTY: Particle = Particle {
        material: Material::Empty,
        color: 0x000000,
        velocity: Velocity::ZERO,
        life_time: 0.0,
        density: 0.0,
        flammability: 0.0,
        dissolvability: 0.0,
        corrodibility: 0.0,
        diffusibility: 0.0,
        dying: false,
        burning: false,
        clock: 0,
    };

    /// Build a fresh particle from its rule-table entry, drawing the
    /// randomized color and life time from `rng`.
    pub fn spawn<R: Rng + ?Sized>(material: Material, props: &MaterialProps, rng: &mut R) -> Self {
        if material == Material::Empty {
            return Particle::EMPTY;
        }

        let color = if props.has(FLAG_VARY_COLOR) {
            vary_color(props.color, rng)
        } else {
            props.color
        };

        let life_time = if props.life.spread > 0.0 {
            props.life.base + props.life.spread * rng.gen::<f32>()
        } else {
            props.life.base
        };

        Particle {
            material,
            color,
            velocity: Velocity::ZERO,
            life_time,
            density: props.density,
            flammability: props.flammability,
            dissolvability: props.dissolvability,
            corrodibility: props.corrodibility,
            diffusibility: props.diffusibility,
            dying: props.has(FLAG_MORTAL),
            burning: props.has(FLAG_BURNING),
            clock: 0,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.material == Material::Empty
    }
}

impl Default for Particle {
    fn default() -> Self {
        Particle::EMPTY
    }
}
