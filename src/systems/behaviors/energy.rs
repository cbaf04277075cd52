//! EnergyBehavior - fire and the things it feeds on
//!
//! Ignition is pulled, not pushed: a flammable particle checks its own
//! neighborhood for burning cells and turns itself into fire. Fire never
//! writes to its neighbors.

use rand::Rng;

use super::common::{burns, extinguishes};
use super::{liquid, UpdateContext};
use crate::core::grid::CellAccess;
use crate::domain::materials::Material;
use crate::domain::particle::Particle;

/// Fire turns to smoke once its life drops below a random threshold in
/// [0, SMOKE_THRESHOLD).
const SMOKE_THRESHOLD: f32 = 0.1;

/// Share of a fire's leftover life handed to the smoke it becomes.
const LEFTOVER_LIFE_SHARE: f32 = 0.5;

pub(super) fn fire<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    let Some(p) = ctx.particle() else {
        return;
    };

    if extinguishes(ctx) {
        if let Some(smoke) = ctx.transform(Material::Smoke) {
            smoke.burning = false;
        }
        return;
    }

    let threshold = ctx.rng.gen_range(0.0..SMOKE_THRESHOLD);
    if p.life_time < threshold {
        smolder(ctx, &p);
    }
}

/// Replace a fire with smoke that is still burning.
pub(super) fn smolder<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>, fire: &Particle) {
    let leftover = fire.life_time.max(0.0) * LEFTOVER_LIFE_SHARE;
    if let Some(smoke) = ctx.transform(Material::Smoke) {
        smoke.burning = true;
        smoke.life_time += leftover;
    }
}

pub(super) fn wood<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    if burns(ctx) {
        ctx.transform(Material::Fire);
    }
}

pub(super) fn gasoline<G: CellAccess, R: Rng + ?Sized>(ctx: &mut UpdateContext<'_, G, R>) {
    if burns(ctx) {
        ctx.transform(Material::Fire);
        return;
    }
    liquid::settle(ctx);
}
