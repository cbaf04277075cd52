use rand::Rng;

use crate::domain::particle::Velocity;

/// Velocity cap, cells per tick on either axis.
pub const MAX_VELOCITY: f32 = 16.0;

/// Horizontal reach of a single raycast. A particle may still inspect its
/// neighbors after moving, and the band halo only covers one move plus one
/// neighbor.
pub const MAX_LATERAL_STEP: i32 = 1;

/// Integrate gravity into the vertical velocity.
#[inline(always)]
pub fn accumulate_gravity(velocity: &mut Velocity, gravity: f32, dt: f32) {
    velocity.y = (velocity.y + gravity * dt).clamp(-MAX_VELOCITY, MAX_VELOCITY);
}

/// Turn a fractional velocity into whole-cell offsets. Each axis rounds up
/// or down with equal probability, so a slow grain still creeps forward
/// every other tick.
#[inline]
pub fn round_velocity<R: Rng + ?Sized>(velocity: Velocity, rng: &mut R) -> (i32, i32) {
    let round = |v: f32, rng: &mut R| -> i32 {
        if !v.is_finite() {
            return 0;
        }
        let v = v.clamp(-MAX_VELOCITY, MAX_VELOCITY);
        if rng.gen_bool(0.5) {
            v.ceil() as i32
        } else {
            v.floor() as i32
        }
    };
    let dx = round(velocity.x, rng).clamp(-MAX_LATERAL_STEP, MAX_LATERAL_STEP);
    let dy = round(velocity.y, rng);
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn gravity_is_capped() {
        let mut v = Velocity { x: 0.0, y: MAX_VELOCITY - 0.01 };
        accumulate_gravity(&mut v, 4.0, 1.0);
        assert_eq!(v.y, MAX_VELOCITY);
    }

    #[test]
    fn rounding_brackets_velocity() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..64 {
            let (dx, dy) = round_velocity(Velocity { x: 0.0, y: 2.4 }, &mut rng);
            assert_eq!(dx, 0);
            assert!(dy == 2 || dy == 3);
        }
    }

    #[test]
    fn lateral_offset_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(5);
        let (dx, _) = round_velocity(Velocity { x: -7.5, y: 0.0 }, &mut rng);
        assert_eq!(dx, -MAX_LATERAL_STEP);
    }
}
