//! Powder settling - sand, salt, virus
//!
//! Falling is done by the physics raycast. When a grain did not move this
//! tick it tries to sink straight down, then down-left, then down-right.
//! A grain that finds nowhere to go loses its vertical speed.

use rand::Rng;

use super::UpdateContext;
use crate::core::grid::CellAccess;

pub(super) const POWDER_TARGETS: [(i32, i32); 3] = [(0, 1), (-1, 1), (1, 1)];

pub(super) fn settle<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    if ctx.moved {
        return;
    }
    let Some(p) = ctx.particle() else {
        return;
    };
    for (dx, dy) in POWDER_TARGETS {
        if ctx.try_sink(&p, dx, dy) {
            return;
        }
    }
    ctx.clear_vertical_velocity();
}
