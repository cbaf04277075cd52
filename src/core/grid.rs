//! Grid - flat row-major particle storage
//!
//! One `Particle` per cell, `(0, 0)` top-left, `+y` down. The grid carries a
//! shared handle to the material rule table so it can build particles and
//! answer category queries on its own.

use std::sync::Arc;

use rand::Rng;

use crate::core::error::{EngineError, EngineResult};
use crate::domain::content::MaterialTable;
use crate::domain::materials::{Material, MaterialBits};
use crate::domain::particle::Particle;

mod access;
mod indexing;
mod shared;

pub use access::CellAccess;
pub use shared::{BandView, SharedCells};

/// Largest accepted side length for `Grid::create`.
pub const MAX_DIMENSION: u32 = 1 << 14;

pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Particle>,
    table: Arc<MaterialTable>,
}

impl Grid {
    /// Empty grid with the built-in material table.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_table(width, height, Arc::new(MaterialTable::builtin()))
    }

    pub fn with_table(width: u32, height: u32, table: Arc<MaterialTable>) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Particle::EMPTY; size],
            table,
        }
    }

    /// Fallible constructor: rejects zero or oversized dimensions and
    /// reports allocation failure instead of aborting.
    pub fn create(width: u32, height: u32) -> EngineResult<Self> {
        Self::create_with_table(width, height, Arc::new(MaterialTable::builtin()))
    }

    pub fn create_with_table(width: u32, height: u32, table: Arc<MaterialTable>) -> EngineResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        let size = width as usize * height as usize;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|_| EngineError::Allocation { cells: size })?;
        cells.resize(size, Particle::EMPTY);

        log::debug!("grid created {}x{} ({} cells)", width, height, size);
        Ok(Self { width, height, cells, table })
    }

    // === Cell access ===

    /// `None` when `(x, y)` is out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Particle> {
        let idx = self.index(x, y)?;
        self.cells.get(idx)
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        let idx = self.index(x, y)?;
        self.cells.get_mut(idx)
    }

    /// Place a fresh `material` particle at `(x, y)`, drawing its color and
    /// life time from the thread-local RNG. Silent no-op out of bounds.
    pub fn set(&mut self, x: i32, y: i32, material: Material) {
        self.set_with(x, y, material, &mut rand::thread_rng());
    }

    pub fn set_with<R: Rng + ?Sized>(&mut self, x: i32, y: i32, material: Material, rng: &mut R) {
        self.spawn(x, y, material, rng);
    }

    /// Place a particle from a raw material id. Ids that are not a known
    /// material produce the default (empty) particle.
    pub fn set_raw(&mut self, x: i32, y: i32, bits: MaterialBits) {
        let material = Material::from_bits(bits).unwrap_or_else(|| {
            log::warn!("unknown material id {:#06x}, placing empty", bits);
            Material::Empty
        });
        self.set(x, y, material);
    }

    /// Exchange two cells. Silent no-op if either is out of bounds.
    #[inline]
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.swap_cells(x1, y1, x2, y2);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Particle::EMPTY);
    }

    // === Bulk access ===

    #[inline]
    pub fn cells(&self) -> &[Particle] {
        &self.cells
    }

    #[inline]
    pub fn table(&self) -> &Arc<MaterialTable> {
        &self.table
    }

    /// Swap in a new rule table. Existing particles keep the parameters they
    /// were created with.
    pub fn set_table(&mut self, table: Arc<MaterialTable>) {
        self.table = table;
    }

    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|p| p.material == material).count()
    }

    pub fn non_empty_count(&self) -> usize {
        self.cells.iter().filter(|p| !p.is_empty()).count()
    }

    /// Raw band handle over the cells. The returned value keeps the grid
    /// mutably borrowed for as long as it lives.
    pub(crate) fn split_shared<'g>(&'g mut self, table: &'g MaterialTable) -> SharedCells<'g> {
        SharedCells::new(&mut self.cells, self.width, self.height, table)
    }
}

impl CellAccess for Grid {
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
        &self.table
    }

    #[inline]
    fn cell(&self, x: i32, y: i32) -> Option<&Particle> {
        self.get(x, y)
    }

    #[inline]
    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        self.get_mut(x, y)
    }

    #[inline]
    fn swap_cells(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        match (self.index(x1, y1), self.index(x2, y2)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }
}
