//! GasBehavior - rising smoke
//!
//! Mirror image of liquid settling: up, up-left, up-right, then sideways,
//! always into strictly less dense cells. Smoke that was lit by a dying
//! fire keeps `burning` for a while and can still ignite its neighbors.

use rand::Rng;

use super::UpdateContext;
use crate::core::grid::CellAccess;

const RISE_TARGETS: [(i32, i32); 5] = [(0, -1), (-1, -1), (1, -1), (-1, 0), (1, 0)];

/// Burning smoke cools once its life drops below a random threshold in
/// [0, COOL_THRESHOLD).
const COOL_THRESHOLD: f32 = 1.0;

pub(super) fn rise<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    let Some(p) = ctx.particle() else {
        return;
    };

    if p.burning {
        let threshold = ctx.rng.gen_range(0.0..COOL_THRESHOLD);
        if p.life_time < threshold {
            if let Some(cell) = ctx.particle_mut() {
                cell.burning = false;
            }
        }
    }

    for (dx, dy) in RISE_TARGETS {
        if ctx.try_sink(&p, dx, dy) {
            return;
        }
    }
}
