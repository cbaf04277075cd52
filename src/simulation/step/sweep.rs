//! Per-band sweeps
//!
//! A band first walks its rows bottom-up for everything that falls, then
//! top-down for everything that rises. Inside a row the column order follows
//! the row's direction, drawn once per tick for the whole grid.

use rand::Rng;

use crate::behaviors::{self, UpdateContext};
use crate::core::grid::CellAccess;
use crate::domain::materials::Material;
use crate::physics;

use super::bands::Band;

/// Per-tick values shared by every band.
pub(crate) struct SweepParams<'a> {
    /// `true`: left to right
    pub row_dirs: &'a [bool],
    pub gravity: f32,
    pub dt: f32,
    pub clock: u8,
}

/// What one band did this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BandStats {
    pub processed: u32,
    pub moved: u32,
    pub raycast_steps: u32,
    pub expired: u32,
    pub transitions: u32,
}

impl BandStats {
    pub fn merge(&mut self, other: &BandStats) {
        self.processed += other.processed;
        self.moved += other.moved;
        self.raycast_steps += other.raycast_steps;
        self.expired += other.expired;
        self.transitions += other.transitions;
    }
}

#[inline]
fn for_each_column(band: &Band, left_to_right: bool, mut f: impl FnMut(i32)) {
    if left_to_right {
        for x in band.start..band.end {
            f(x as i32);
        }
    } else {
        for x in (band.start..band.end).rev() {
            f(x as i32);
        }
    }
}

pub(crate) fn sweep_band<G: CellAccess, R: Rng + ?Sized>(
    grid: &mut G,
    band: &Band,
    params: &SweepParams<'_>,
    rng: &mut R,
) -> BandStats {
    let mut stats = BandStats::default();
    let height = grid.height() as i32;

    for y in (0..height).rev() {
        let dir = params.row_dirs.get(y as usize).copied().unwrap_or(true);
        for_each_column(band, dir, |x| update_falling(grid, x, y, params, rng, &mut stats));
    }

    for y in 0..height {
        let dir = params.row_dirs.get(y as usize).copied().unwrap_or(true);
        for_each_column(band, dir, |x| update_rising(grid, x, y, params, rng, &mut stats));
    }

    stats
}

/// Claim the cell for this tick. Returns the material if it should be
/// updated by the sweep (`reverse` selects which one).
#[inline]
fn claim<G: CellAccess>(grid: &mut G, x: i32, y: i32, clock: u8, reverse: bool) -> Option<Material> {
    let reverse_mask = grid.table().masks().reverse;
    let cell = grid.cell_mut(x, y)?;
    if cell.is_empty() || cell.clock == clock || cell.material.in_set(reverse_mask) != reverse {
        return None;
    }
    cell.clock = clock;
    Some(cell.material)
}

fn update_falling<G: CellAccess, R: Rng + ?Sized>(
    grid: &mut G,
    x: i32,
    y: i32,
    params: &SweepParams<'_>,
    rng: &mut R,
    stats: &mut BandStats,
) {
    let Some(material) = claim(grid, x, y, params.clock, false) else {
        return;
    };
    stats.processed += 1;

    let masks = *grid.table().masks();
    let (mut px, mut py, mut moved) = (x, y, false);

    if material.in_set(masks.gravity) {
        let r = physics::update_particle_physics(grid, x, y, params.gravity, params.dt, rng);
        stats.raycast_steps += r.steps;
        if r.moved {
            stats.moved += 1;
            moved = true;
            px = r.x;
            py = r.y;
        }
    }

    let mut ctx = UpdateContext::new(grid, rng, px, py, params.dt, params.clock);
    ctx.moved = moved;

    if material.in_set(masks.decays) && behaviors::decay(&mut ctx) {
        behaviors::expire(&mut ctx);
        stats.expired += 1;
        stats.transitions += ctx.transitions;
        return;
    }

    behaviors::update_gravity_phase(&mut ctx, material);
    stats.moved += ctx.swaps.min(1);
    stats.transitions += ctx.transitions;
}

fn update_rising<G: CellAccess, R: Rng + ?Sized>(
    grid: &mut G,
    x: i32,
    y: i32,
    params: &SweepParams<'_>,
    rng: &mut R,
    stats: &mut BandStats,
) {
    let Some(material) = claim(grid, x, y, params.clock, true) else {
        return;
    };
    stats.processed += 1;

    let decays = material.in_set(grid.table().masks().decays);
    let mut ctx = UpdateContext::new(grid, rng, x, y, params.dt, params.clock);

    if decays && behaviors::decay(&mut ctx) {
        behaviors::expire(&mut ctx);
        stats.expired += 1;
        stats.transitions += ctx.transitions;
        return;
    }

    behaviors::update_reverse_phase(&mut ctx, material);
    stats.moved += ctx.swaps.min(1);
    stats.transitions += ctx.transitions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::domain::materials::Material;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn params(rows: &[bool]) -> SweepParams<'_> {
        SweepParams { row_dirs: rows, gravity: 4.0, dt: 1.0 / 30.0, clock: 1 }
    }

    #[test]
    fn particle_is_updated_once_per_sweep() {
        // Water flowing right along the scan direction would keep going if
        // it were picked up again in the next column.
        let mut grid = Grid::new(3, 1);
        grid.set(0, 0, Material::Water);
        let rows = vec![true; 1];
        let band = Band { index: 0, start: 0, end: 3 };
        let mut rng = SmallRng::seed_from_u64(6);
        let stats = sweep_band(&mut grid, &band, &params(&rows), &mut rng);

        assert_eq!(stats.processed, 1);
        assert_eq!(grid.get(1, 0).map(|p| p.material), Some(Material::Water));
        assert_eq!(grid.get(2, 0).map(|p| p.material), Some(Material::Empty));
    }

    #[test]
    fn falling_grain_is_not_settled_in_the_same_tick() {
        let mut grid = Grid::new(1, 12);
        grid.set(0, 0, Material::Sand);
        if let Some(p) = grid.get_mut(0, 0) {
            p.velocity.y = 2.0;
        }
        let rows = vec![true; 12];
        let band = Band { index: 0, start: 0, end: 1 };
        let mut rng = SmallRng::seed_from_u64(6);
        sweep_band(&mut grid, &band, &params(&rows), &mut rng);

        let y = (0..12).find(|&y| grid.get(0, y).map(|p| p.material) == Some(Material::Sand));
        assert!(matches!(y, Some(2) | Some(3)), "sand at {:?}", y);
    }

    #[test]
    fn stale_clock_is_skipped() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Material::Sand);
        if let Some(p) = grid.get_mut(0, 0) {
            p.clock = 1;
        }
        let rows = vec![true; 2];
        let band = Band { index: 0, start: 0, end: 2 };
        let mut rng = SmallRng::seed_from_u64(6);
        let stats = sweep_band(&mut grid, &band, &params(&rows), &mut rng);
        assert_eq!(stats.processed, 0);
        assert_eq!(grid.get(0, 0).map(|p| p.material), Some(Material::Sand));
    }
}
