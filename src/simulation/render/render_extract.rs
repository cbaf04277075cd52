#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::grid::Grid;
use crate::domain::color::to_abgr;
use crate::domain::particle::Particle;

/// Write one ABGR pixel per cell into `out`, row-major. `out` is resized
/// to the grid size.
pub fn extract_pixels(grid: &Grid, out: &mut Vec<u32>) {
    let width = grid.width() as usize;
    out.resize(grid.size(), 0);
    if width == 0 {
        return;
    }

    let cells = grid.cells();

    #[cfg(feature = "parallel")]
    {
        out.par_chunks_mut(width)
            .zip(cells.par_chunks(width))
            .for_each(|(dst, src)| fill_row(dst, src));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (dst, src) in out.chunks_mut(width).zip(cells.chunks(width)) {
            fill_row(dst, src);
        }
    }
}

#[inline]
fn fill_row(dst: &mut [u32], src: &[Particle]) {
    for (px, cell) in dst.iter_mut().zip(src) {
        *px = to_abgr(cell.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::materials::Material;

    #[test]
    fn empty_is_opaque_black_and_rows_are_in_order() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 1, Material::Water);
        if let Some(p) = grid.get_mut(2, 1) {
            p.color = 0x112233;
        }
        let mut out = Vec::new();
        extract_pixels(&grid, &mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], 0xFF00_0000);
        assert_eq!(out[5], 0xFF33_2211);
    }
}
