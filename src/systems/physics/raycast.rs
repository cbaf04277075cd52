use crate::core::grid::CellAccess;

use super::types::MoveResult;

/// Cap for raycast steps; offsets are already clamped by the velocity cap,
/// this only guards against a runaway loop.
const MAX_RAYCAST_STEPS: u32 = 64;

/// Bresenham raycast from `(x, y)` towards `(x + dx, y + dy)`.
///
/// Walks cell by cell and stops on the last cell before the first one that
/// is not air (or lies outside the grid). The start cell itself is never
/// tested. Positions are not precise enough to need anything smarter.
pub fn raycast<G: CellAccess + ?Sized>(grid: &G, x: i32, y: i32, dx: i32, dy: i32) -> MoveResult {
    if dx == 0 && dy == 0 {
        return MoveResult::stay(x, y);
    }

    let (x1, y1) = (x + dx, y + dy);
    let adx = dx.abs();
    let ady = -dy.abs();
    let sx = if dx > 0 { 1 } else { -1 };
    let sy = if dy > 0 { 1 } else { -1 };
    let mut error = adx + ady;

    let (mut cx, mut cy) = (x, y);
    let (mut last_x, mut last_y) = (x, y);
    let mut steps = 0u32;

    while (cx, cy) != (x1, y1) && steps < MAX_RAYCAST_STEPS {
        let e2 = 2 * error;
        if e2 >= ady {
            error += ady;
            cx += sx;
        }
        if e2 <= adx {
            error += adx;
            cy += sy;
        }
        steps += 1;

        if !grid.is_air(cx, cy) {
            return MoveResult {
                x: last_x,
                y: last_y,
                moved: (last_x, last_y) != (x, y),
                collided: true,
                steps,
            };
        }

        last_x = cx;
        last_y = cy;
    }

    MoveResult {
        x: last_x,
        y: last_y,
        moved: (last_x, last_y) != (x, y),
        collided: false,
        steps,
    }
}
