//! Shared cell buffer for concurrently running column bands
//!
//! During a tick the grid is split into vertical bands. Bands of the same
//! phase are processed at the same time, each through its own `BandView`.
//! A view may read and write its own columns plus a halo on each side;
//! same-phase bands are always separated by a band wider than two halos, so
//! two live views never reach the same cell.

use std::marker::PhantomData;

use super::indexing::flat_index;
use super::CellAccess;
use crate::domain::content::MaterialTable;
use crate::domain::particle::Particle;

/// Raw handle to the grid's cells, shared by the band tasks of one phase.
pub struct SharedCells<'g> {
    ptr: *mut Particle,
    len: usize,
    width: u32,
    height: u32,
    table: &'g MaterialTable,
    _marker: PhantomData<&'g mut [Particle]>,
}

// SAFETY: the only way to touch the cells is through `BandView`s, whose
// creation is `unsafe` and requires disjoint reachable column ranges.
unsafe impl Send for SharedCells<'_> {}
unsafe impl Sync for SharedCells<'_> {}

impl<'g> SharedCells<'g> {
    pub(crate) fn new(cells: &'g mut [Particle], width: u32, height: u32, table: &'g MaterialTable) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self {
            ptr: cells.as_mut_ptr(),
            len: cells.len(),
            width,
            height,
            table,
            _marker: PhantomData,
        }
    }

    /// View over columns `reach_min..=reach_max` (clamped to the grid).
    ///
    /// # Safety
    ///
    /// No other view alive at the same time may reach any of these columns.
    pub(crate) unsafe fn band(&self, reach_min: i32, reach_max: i32) -> BandView<'_> {
        BandView {
            ptr: self.ptr,
            len: self.len,
            width: self.width,
            height: self.height,
            table: self.table,
            reach_min: reach_min.max(0),
            reach_max: reach_max.min(self.width as i32 - 1),
            _marker: PhantomData,
        }
    }
}

/// One worker's window onto the grid.
pub struct BandView<'a> {
    ptr: *mut Particle,
    len: usize,
    width: u32,
    height: u32,
    table: &'a MaterialTable,
    reach_min: i32,
    reach_max: i32,
    _marker: PhantomData<&'a mut [Particle]>,
}

unsafe impl Send for BandView<'_> {}

impl BandView<'_> {
    #[inline(always)]
    fn checked_index(&self, x: i32, y: i32) -> Option<usize> {
        let idx = flat_index(self.width, self.height, x, y)?;
        if x < self.reach_min || x > self.reach_max {
            debug_assert!(
                false,
                "band access at column {} outside reach {}..={}",
                x,
                self.reach_min,
                self.reach_max
            );
            return None;
        }
        debug_assert!(idx < self.len);
        Some(idx)
    }
}

impl CellAccess for BandView<'_> {
    #[inline(always)]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    fn table(&self) -> &MaterialTable {
        self.table
    }

    #[inline]
    fn cell(&self, x: i32, y: i32) -> Option<&Particle> {
        let idx = self.checked_index(x, y)?;
        // SAFETY: idx is in bounds and inside this view's exclusive reach.
        Some(unsafe { &*self.ptr.add(idx) })
    }

    #[inline]
    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        let idx = self.checked_index(x, y)?;
        // SAFETY: as above; `&mut self` keeps the returned borrow unique.
        Some(unsafe { &mut *self.ptr.add(idx) })
    }

    #[inline]
    fn swap_cells(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let (Some(a), Some(b)) = (self.checked_index(x1, y1), self.checked_index(x2, y2)) else {
            return false;
        };
        if a != b {
            // SAFETY: both indices are valid and inside this view's reach.
            unsafe { std::ptr::swap(self.ptr.add(a), self.ptr.add(b)) };
        }
        true
    }
}
