//! Chemistry - salt dissolving, acid corrosion, poison diffusion

use rand::Rng;

use super::common::{dissolves, NEIGHBORS_8};
use super::{liquid, powder, UpdateContext};
use crate::core::grid::CellAccess;

/// Cells acid can eat into, checked in this order: beside it and below it.
const CORRODE_TARGETS: [(i32, i32); 5] = [(-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

fn mark_dying<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    if let Some(p) = ctx.particle_mut() {
        p.dying = true;
    }
}

/// Salt starts dying next to water, then behaves like any other powder.
pub(super) fn salt<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    let dying = ctx.particle().map_or(true, |p| p.dying);
    if !dying && dissolves(ctx) {
        mark_dying(ctx);
    }
    powder::settle(ctx);
}

/// Acid is diluted by water, eats at most one solid neighbor per tick (and
/// is used up doing so), then flows.
pub(super) fn acid<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    let dying = ctx.particle().map_or(true, |p| p.dying);
    if !dying && dissolves(ctx) {
        mark_dying(ctx);
    }

    for (dx, dy) in CORRODE_TARGETS {
        let (tx, ty) = (ctx.x + dx, ctx.y + dy);
        if !ctx.grid.is_solid(tx, ty) {
            continue;
        }
        let corrodibility = ctx.grid.cell(tx, ty).map_or(0.0, |p| p.corrodibility);
        if corrodibility > 0.0 && ctx.roll(corrodibility) {
            ctx.grid.erase(tx, ty);
            ctx.transitions += 1;
            mark_dying(ctx);
            break;
        }
    }

    liquid::settle(ctx);
}

/// Poison flows like a liquid and slowly mixes into other liquids around it.
pub(super) fn poison<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    liquid::settle(ctx);

    let Some(p) = ctx.particle() else {
        return;
    };
    if p.diffusibility <= 0.0 {
        return;
    }

    let (dx, dy) = NEIGHBORS_8[ctx.rng.gen_range(0..NEIGHBORS_8.len())];
    let (tx, ty) = (ctx.x + dx, ctx.y + dy);
    let mixes = ctx.grid.is_liquid(tx, ty) && ctx.grid.material_at(tx, ty) != Some(p.material);
    if mixes && ctx.roll(p.diffusibility) && ctx.grid.swap_cells(ctx.x, ctx.y, tx, ty) {
        ctx.x = tx;
        ctx.y = ty;
        ctx.swaps += 1;
    }
}
