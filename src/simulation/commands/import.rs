//! Image import - quantize a picture into materials
//!
//! The image is resampled to the grid size by nearest neighbor; each pixel
//! becomes the palette material whose base color is closest to it.

use rand::Rng;

use crate::core::error::{EngineError, EngineResult};
use crate::core::grid::Grid;
use crate::domain::color::pack_rgb;

/// Overwrite every cell of `grid` from `pixels` (row-major, `channels`
/// bytes per pixel: 1 = gray, 3 = RGB, 4 = RGBA with alpha ignored).
pub fn import_image<R: Rng + ?Sized>(
    grid: &mut Grid,
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    rng: &mut R,
) -> EngineResult<()> {
    if !matches!(channels, 1 | 3 | 4) {
        return Err(EngineError::InvalidImage(format!("unsupported channel count {}", channels)));
    }
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidImage(format!("empty image {}x{}", width, height)));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| {
            EngineError::InvalidImage(format!("{}x{}x{} image is too large", width, height, channels))
        })?;
    if pixels.len() < expected {
        return Err(EngineError::InvalidImage(format!(
            "{}x{}x{} image needs {} bytes, got {}",
            width,
            height,
            channels,
            expected,
            pixels.len()
        )));
    }

    let table = std::sync::Arc::clone(grid.table());
    let (gw, gh) = (grid.width(), grid.height());
    let channels = channels as usize;

    for y in 0..gh {
        let sy = (y as u64 * height as u64 / gh as u64) as usize;
        for x in 0..gw {
            let sx = (x as u64 * width as u64 / gw as u64) as usize;
            let at = (sy * width as usize + sx) * channels;
            let color = match channels {
                1 => pack_rgb(pixels[at], pixels[at], pixels[at]),
                _ => pack_rgb(pixels[at], pixels[at + 1], pixels[at + 2]),
            };
            grid.set_with(x as i32, y as i32, table.nearest_material(color), rng);
        }
    }

    log::info!("imported {}x{} image into {}x{} grid", width, height, gw, gh);
    Ok(())
}
