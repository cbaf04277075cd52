//! Liquid settling - water, acid, gasoline, poison
//!
//! Same as powder, plus sideways flow into less dense neighbors when
//! nothing below is free.

use rand::Rng;

use super::powder::POWDER_TARGETS;
use super::UpdateContext;
use crate::core::grid::CellAccess;

const FLOW_TARGETS: [(i32, i32); 2] = [(-1, 0), (1, 0)];

pub(super) fn settle<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    if ctx.moved {
        return;
    }
    let Some(p) = ctx.particle() else {
        return;
    };
    for (dx, dy) in POWDER_TARGETS.into_iter().chain(FLOW_TARGETS) {
        if ctx.try_sink(&p, dx, dy) {
            return;
        }
    }
    ctx.clear_vertical_velocity();
}
