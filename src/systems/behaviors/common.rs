//! Shared helpers: neighborhoods and the probability tests
//!
//! Each test scans a fixed neighborhood, adds a random weight in
//! [0.5, 1.0) for every qualifying neighbor and succeeds if a uniform draw
//! falls below `property * total_weight`. More qualifying neighbors means
//! higher odds, without any neighbor being a sure thing on its own.

use rand::Rng;

use super::UpdateContext;
use crate::core::grid::CellAccess;

/// Cardinal neighbors
pub const NEIGHBORS_4: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Full Moore neighborhood
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const WEIGHT_MIN: f32 = 0.5;
const WEIGHT_MAX: f32 = 1.0;

#[inline]
fn weighted_test<G, R, F>(
    ctx: &mut UpdateContext<'_, G, R>,
    neighbors: &[(i32, i32)],
    property: f32,
    qualifies: F,
) -> bool
where
    G: CellAccess,
    R: Rng + ?Sized,
    F: Fn(&G, i32, i32) -> bool,
{
    if property <= 0.0 {
        return false;
    }

    let mut weight = 0.0f32;
    for &(dx, dy) in neighbors {
        if qualifies(ctx.grid, ctx.x + dx, ctx.y + dy) {
            weight += ctx.rng.gen_range(WEIGHT_MIN..WEIGHT_MAX);
        }
    }

    weight > 0.0 && ctx.roll(property * weight)
}

/// Catches fire from burning neighbors (8-neighborhood, `flammability`).
pub fn burns<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) -> bool {
    let Some(p) = ctx.particle() else {
        return false;
    };
    weighted_test(ctx, &NEIGHBORS_8, p.flammability, |g, x, y| g.is_burning(x, y))
}

/// Dissolved by solvent neighbors (8-neighborhood, `dissolvability`).
pub fn dissolves<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) -> bool {
    let Some(p) = ctx.particle() else {
        return false;
    };
    let me = p.material;
    weighted_test(ctx, &NEIGHBORS_8, p.dissolvability, |g, x, y| {
        g.is_solvent(x, y) && g.material_at(x, y) != Some(me)
    })
}

/// Put out by extinguishing neighbors (4-neighborhood, `dissolvability`).
pub fn extinguishes<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) -> bool {
    let Some(p) = ctx.particle() else {
        return false;
    };
    weighted_test(ctx, &NEIGHBORS_4, p.dissolvability, |g, x, y| g.is_extinguisher(x, y))
}
