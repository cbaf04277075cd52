//! Behaviors - per-material rules
//!
//! A closed `match` over `Material` picks the rule; every rule is a plain
//! function over `UpdateContext`, generic over the cell accessor so it runs
//! the same on a whole `Grid` and on a band view.
//!
//! - powder.rs    - granular settling (sand, salt, virus)
//! - liquid.rs    - liquid settling (water, acid, gasoline, poison)
//! - gas.rs       - rising smoke
//! - energy.rs    - fire and things that catch fire (wood, gasoline)
//! - chemistry.rs - dissolving, corrosion and diffusion
//! - common.rs    - neighborhoods and the probability tests

mod chemistry;
mod common;
mod energy;
mod gas;
mod liquid;
mod powder;

pub use common::{burns, dissolves, extinguishes, NEIGHBORS_4, NEIGHBORS_8};

use rand::Rng;

use crate::core::grid::CellAccess;
use crate::domain::materials::Material;
use crate::domain::particle::Particle;

/// Update context passed to behaviors
pub struct UpdateContext<'a, G, R: ?Sized> {
    pub grid: &'a mut G,
    pub rng: &'a mut R,
    /// Current position of the particle being updated
    pub x: i32,
    pub y: i32,
    pub dt: f32,
    /// Tick stamp given to particles created during this update
    pub clock: u8,
    /// The particle already moved along its velocity this tick
    pub moved: bool,
    /// Cells swapped by settling
    pub swaps: u32,
    /// Cells whose material changed
    pub transitions: u32,
}

impl<'a, G: CellAccess, R: Rng + ?Sized> UpdateContext<'a, G, R> {
    pub fn new(grid: &'a mut G, rng: &'a mut R, x: i32, y: i32, dt: f32, clock: u8) -> Self {
        Self {
            grid,
            rng,
            x,
            y,
            dt,
            clock,
            moved: false,
            swaps: 0,
            transitions: 0,
        }
    }

    /// Copy of the particle being updated.
    #[inline]
    pub fn particle(&self) -> Option<Particle> {
        self.grid.cell(self.x, self.y).copied()
    }

    #[inline]
    pub fn particle_mut(&mut self) -> Option<&mut Particle> {
        self.grid.cell_mut(self.x, self.y)
    }

    /// Uniform draw in [0, 1) compared against `probability`.
    #[inline]
    pub fn roll(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }

    /// Swap into `(x + dx, y + dy)` if that cell is strictly less dense
    /// than `particle`. Follows the particle on success.
    #[inline]
    pub fn try_sink(&mut self, particle: &Particle, dx: i32, dy: i32) -> bool {
        let (tx, ty) = (self.x + dx, self.y + dy);
        if !self.grid.is_denser(particle, tx, ty) {
            return false;
        }
        if self.grid.swap_cells(self.x, self.y, tx, ty) {
            self.x = tx;
            self.y = ty;
            self.swaps += 1;
            true
        } else {
            false
        }
    }

    /// Replace the cell at `(x, y)` with a fresh particle of `material`,
    /// stamped so it is not updated again this tick.
    pub fn transform_at(&mut self, x: i32, y: i32, material: Material) -> Option<&mut Particle> {
        if !self.grid.spawn(x, y, material, &mut *self.rng) {
            return None;
        }
        self.transitions += 1;
        let clock = self.clock;
        let cell = self.grid.cell_mut(x, y)?;
        cell.clock = clock;
        Some(cell)
    }

    #[inline]
    pub fn transform(&mut self, material: Material) -> Option<&mut Particle> {
        self.transform_at(self.x, self.y, material)
    }

    pub fn clear_vertical_velocity(&mut self) {
        if let Some(p) = self.particle_mut() {
            p.velocity.y = 0.0;
        }
    }
}

/// Rules for particles handled in the bottom-up (gravity) sweep.
pub fn update_gravity_phase<G: CellAccess, R: Rng + ?Sized>(
    ctx: &mut UpdateContext<'_, G, R>,
    material: Material,
) {
    match material {
        Material::Sand | Material::Virus => powder::settle(ctx),
        Material::Salt => chemistry::salt(ctx),
        Material::Water => liquid::settle(ctx),
        Material::Acid => chemistry::acid(ctx),
        Material::Poison => chemistry::poison(ctx),
        Material::Gasoline => energy::gasoline(ctx),
        Material::Wood => energy::wood(ctx),
        Material::Smoke | Material::Fire | Material::Stone | Material::Empty => {}
    }
}

/// Rules for particles handled in the top-down (reverse) sweep.
pub fn update_reverse_phase<G: CellAccess, R: Rng + ?Sized>(
    ctx: &mut UpdateContext<'_, G, R>,
    material: Material,
) {
    match material {
        Material::Fire => energy::fire(ctx),
        Material::Smoke => gas::rise(ctx),
        _ => {}
    }
}

/// Count the particle's life down by `dt`. Returns true once a dying
/// particle runs out.
pub fn decay<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) -> bool {
    let dt = ctx.dt;
    match ctx.particle_mut() {
        Some(p) => {
            p.life_time -= dt;
            p.dying && p.life_time < 0.0
        }
        None => false,
    }
}

/// Life ran out: fire turns into burning smoke, anything else vanishes.
pub fn expire<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    let Some(p) = ctx.particle() else {
        return;
    };
    match p.material {
        Material::Fire => energy::smolder(ctx, &p),
        _ => {
            ctx.grid.erase(ctx.x, ctx.y);
            ctx.transitions += 1;
        }
    }
}
