//! Physics System - gravity integration and velocity raycasts
//!
//! Key concepts:
//! - Velocity is stored per particle in cells per tick and persists
//! - Gravity only accelerates a particle while the cell below is less dense
//! - Fractional velocities are rounded up or down at random each tick
//! - A Bresenham raycast finds the farthest reachable air cell; the particle
//!   swaps into it

use rand::Rng;

use crate::core::grid::CellAccess;

mod forces;
mod raycast;
mod types;

pub use forces::{accumulate_gravity, round_velocity, MAX_LATERAL_STEP, MAX_VELOCITY};
pub use raycast::raycast;
pub use types::MoveResult;

/// Gravity step for the particle at `(x, y)`.
///
/// Accelerates it if it can sink, then moves it along its (rounded)
/// velocity. Only call this for gravity-affected materials.
pub fn update_particle_physics<G: CellAccess, R: Rng + ?Sized>(
    grid: &mut G,
    x: i32,
    y: i32,
    gravity: f32,
    dt: f32,
    rng: &mut R,
) -> MoveResult {
    let Some(particle) = grid.cell(x, y).copied() else {
        return MoveResult::stay(x, y);
    };
    if particle.is_empty() {
        return MoveResult::stay(x, y);
    }

    let mut velocity = particle.velocity;
    if grid.is_denser(&particle, x, y + 1) {
        accumulate_gravity(&mut velocity, gravity, dt);
        if let Some(cell) = grid.cell_mut(x, y) {
            cell.velocity = velocity;
        }
    }

    let (dx, dy) = round_velocity(velocity, rng);
    let result = raycast(grid, x, y, dx, dy);
    if result.moved {
        grid.swap_cells(x, y, result.x, result.y);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::domain::materials::Material;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn resting_particle_gains_no_velocity() {
        let mut grid = Grid::new(1, 2);
        grid.set(0, 0, Material::Sand);
        grid.set(0, 1, Material::Stone);
        let mut rng = SmallRng::seed_from_u64(2);
        let r = update_particle_physics(&mut grid, 0, 0, 4.0, 1.0 / 30.0, &mut rng);
        assert!(!r.moved);
        assert_eq!(grid.get(0, 0).map(|p| p.velocity.y), Some(0.0));
    }

    #[test]
    fn fast_particle_falls_several_cells() {
        let mut grid = Grid::new(1, 10);
        grid.set(0, 0, Material::Sand);
        if let Some(p) = grid.get_mut(0, 0) {
            p.velocity.y = 4.0;
        }
        let mut rng = SmallRng::seed_from_u64(9);
        let r = update_particle_physics(&mut grid, 0, 0, 4.0, 1.0 / 30.0, &mut rng);
        assert!(r.moved);
        assert!(r.y >= 4 && r.y <= 5, "landed at {}", r.y);
        assert_eq!(grid.get(0, r.y).map(|p| p.material), Some(Material::Sand));
        assert_eq!(grid.get(0, 0).map(|p| p.material), Some(Material::Empty));
    }
}
