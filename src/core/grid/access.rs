//! Cell access shared by the whole grid and by per-band views
//!
//! Rules are written against `CellAccess` so the same code runs on a `Grid`
//! (serial use, tests, commands) and on a `BandView` (one worker's slice of
//! columns during a parallel tick). All coordinates are signed: anything
//! outside the grid is simply "not there".

use rand::Rng;

use crate::domain::content::MaterialTable;
use crate::domain::materials::Material;
use crate::domain::particle::Particle;

pub trait CellAccess {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn table(&self) -> &MaterialTable;

    /// `None` when `(x, y)` is out of bounds.
    fn cell(&self, x: i32, y: i32) -> Option<&Particle>;
    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle>;

    /// Exchange two cells. Returns false (and does nothing) if either
    /// coordinate is out of bounds.
    fn swap_cells(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool;

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i32 && y < self.height() as i32
    }

    #[inline]
    fn material_at(&self, x: i32, y: i32) -> Option<Material> {
        self.cell(x, y).map(|p| p.material)
    }

    /// Replace the cell with a fresh particle. Returns false out of bounds.
    fn spawn<R: Rng + ?Sized>(&mut self, x: i32, y: i32, material: Material, rng: &mut R) -> bool
    where
        Self: Sized,
    {
        if !self.in_bounds(x, y) {
            return false;
        }
        let particle = self.table().spawn(material, rng);
        match self.cell_mut(x, y) {
            Some(cell) => {
                *cell = particle;
                true
            }
            None => false,
        }
    }

    #[inline]
    fn erase(&mut self, x: i32, y: i32) -> bool {
        match self.cell_mut(x, y) {
            Some(cell) => {
                *cell = Particle::EMPTY;
                true
            }
            None => false,
        }
    }

    // === Category predicates (false out of bounds) ===

    #[inline]
    fn is_air(&self, x: i32, y: i32) -> bool {
        match self.cell(x, y) {
            Some(p) => p.material == Material::Empty || p.material.in_set(self.table().masks().air),
            None => false,
        }
    }

    #[inline]
    fn is_liquid(&self, x: i32, y: i32) -> bool {
        self.cell(x, y)
            .map_or(false, |p| p.material.in_set(self.table().masks().liquid))
    }

    #[inline]
    fn is_solid(&self, x: i32, y: i32) -> bool {
        self.cell(x, y)
            .map_or(false, |p| p.material.in_set(self.table().masks().solid))
    }

    #[inline]
    fn is_extinguisher(&self, x: i32, y: i32) -> bool {
        self.cell(x, y)
            .map_or(false, |p| p.material.in_set(self.table().masks().extinguisher))
    }

    #[inline]
    fn is_solvent(&self, x: i32, y: i32) -> bool {
        self.cell(x, y)
            .map_or(false, |p| p.material.in_set(self.table().masks().solvent))
    }

    #[inline]
    fn is_burning(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(false, |p| p.burning)
    }

    /// True iff `(x, y)` is in bounds and strictly less dense than
    /// `candidate`, i.e. `candidate` may sink into it.
    #[inline]
    fn is_denser(&self, candidate: &Particle, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(false, |p| p.density < candidate.density)
    }
}
