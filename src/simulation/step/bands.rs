//! Band partition - vertical column strips processed in two phases
//!
//! The grid is cut into an even number of bands. Even bands run at the same
//! time, then odd bands. A cell moves at most one column per update and then
//! looks at its neighbors, so a band reaches `HALO` columns past each edge.
//! Every band is at least `MIN_BAND_WIDTH` columns wide, which keeps the
//! reaches of two same-phase bands apart.
//!
//! The cut positions shift by a random offset every tick; without it
//! particles would pile up along fixed seams.

use rand::Rng;

pub(crate) const MIN_BAND_WIDTH: u32 = 4;

/// Columns one band may touch outside its own range, on either side.
pub(crate) const HALO: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Band {
    pub index: usize,
    /// First owned column
    pub start: u32,
    /// One past the last owned column
    pub end: u32,
}

impl Band {
    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.index % 2 == 0
    }

    /// Inclusive column range this band may read and write.
    #[inline]
    pub fn reach(&self) -> (i32, i32) {
        (self.start as i32 - HALO, self.end as i32 - 1 + HALO)
    }
}

/// Number of bands for `workers` threads on a grid `width` columns wide:
/// the worker count rounded up to even, reduced until every band is wide
/// enough. Falls back to a single band on narrow grids.
pub(crate) fn band_count(width: u32, workers: usize) -> usize {
    let mut count = workers.max(1);
    if count % 2 == 1 {
        count += 1;
    }
    while count >= 2 && (width as usize / count) < MIN_BAND_WIDTH as usize {
        count -= 2;
    }
    count.max(1)
}

/// Random shift of the band cuts, in `0..=base_width - MIN_BAND_WIDTH`.
pub(crate) fn draw_offset<R: Rng + ?Sized>(width: u32, count: usize, rng: &mut R) -> u32 {
    if count <= 1 {
        return 0;
    }
    let base = width / count as u32;
    rng.gen_range(0..=base - MIN_BAND_WIDTH)
}

/// Cut `width` columns into `count` bands shifted by `offset`. The first
/// band absorbs the offset, the last band runs to the right edge.
pub(crate) fn partition(width: u32, count: usize, offset: u32) -> Vec<Band> {
    if count <= 1 || width == 0 {
        return vec![Band { index: 0, start: 0, end: width }];
    }

    let base = width / count as u32;
    (0..count)
        .map(|i| {
            let start = if i == 0 { 0 } else { offset + i as u32 * base };
            let end = if i + 1 == count { width } else { offset + (i as u32 + 1) * base };
            Band { index: i, start, end }
        })
        .collect()
}
