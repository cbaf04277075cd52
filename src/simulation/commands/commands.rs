use rand::Rng;

use crate::core::grid::Grid;
use crate::domain::materials::Material;
use crate::domain::particle::Particle;

/// Fill probability of the loose-material brush.
pub const SCATTER_FILL: f32 = 0.1;

/// Brush fill for `material`: solid materials paint every cell, loose ones
/// scatter.
#[inline]
pub fn brush_fill(material: Material) -> f32 {
    if material.prefers_solid_brush() {
        1.0
    } else {
        SCATTER_FILL
    }
}

#[inline]
fn for_each_in_circle(cx: i32, cy: i32, radius: i32, mut f: impl FnMut(i32, i32)) {
    let r2 = radius * radius;
    for dy in -radius..radius {
        for dx in -radius..radius {
            if dx * dx + dy * dy < r2 {
                f(cx + dx, cy + dy);
            }
        }
    }
}

/// Paint `material` into the circle around (cx, cy). Each cell is written
/// with probability `fill`; cells outside the grid are skipped. Returns the
/// number of cells written.
pub fn paint_circle<R: Rng + ?Sized>(
    grid: &mut Grid,
    cx: i32,
    cy: i32,
    radius: i32,
    material: Material,
    fill: f32,
    rng: &mut R,
) -> usize {
    if radius <= 0 || fill <= 0.0 {
        return 0;
    }
    let mut written = 0;
    for_each_in_circle(cx, cy, radius, |x, y| {
        if !grid.in_bounds(x, y) {
            return;
        }
        if fill >= 1.0 || rng.gen::<f32>() < fill {
            grid.set_with(x, y, material, rng);
            written += 1;
        }
    });
    written
}

/// Empty every cell in the circle around (cx, cy).
pub fn erase_circle(grid: &mut Grid, cx: i32, cy: i32, radius: i32) -> usize {
    if radius <= 0 {
        return 0;
    }
    let mut erased = 0;
    for_each_in_circle(cx, cy, radius, |x, y| {
        if let Some(p) = grid.get_mut(x, y) {
            if !p.is_empty() {
                *p = Particle::EMPTY;
                erased += 1;
            }
        }
    });
    erased
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn solid_brush_fills_open_disc() {
        let mut grid = Grid::new(10, 10);
        let mut rng = SmallRng::seed_from_u64(3);
        let n = paint_circle(&mut grid, 5, 5, 2, Material::Stone, 1.0, &mut rng);
        // dx, dy in -2..2 with dx²+dy² < 4
        assert_eq!(n, 9);
        assert_eq!(grid.count(Material::Stone), 9);
        assert_eq!(grid.get(5, 3).map(|p| p.material), Some(Material::Empty));
        assert_eq!(grid.get(4, 4).map(|p| p.material), Some(Material::Stone));
    }

    #[test]
    fn brush_clips_at_edges() {
        let mut grid = Grid::new(4, 4);
        let mut rng = SmallRng::seed_from_u64(3);
        let n = paint_circle(&mut grid, 0, 0, 3, Material::Wood, 1.0, &mut rng);
        assert_eq!(n, grid.count(Material::Wood));
        assert!(n > 0);
    }

    #[test]
    fn erase_clears_painted_cells() {
        let mut grid = Grid::new(10, 10);
        let mut rng = SmallRng::seed_from_u64(9);
        paint_circle(&mut grid, 5, 5, 3, Material::Sand, 1.0, &mut rng);
        let painted = grid.non_empty_count();
        assert_eq!(erase_circle(&mut grid, 5, 5, 3), painted);
        assert_eq!(grid.non_empty_count(), 0);
    }

    #[test]
    fn brush_choice_follows_material() {
        assert_eq!(brush_fill(Material::Stone), 1.0);
        assert_eq!(brush_fill(Material::Sand), SCATTER_FILL);
    }
}
