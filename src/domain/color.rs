//! Color helpers - per-particle jitter and palette matching
//!
//! Colors are packed 0xRRGGBB. The jitter works in HSL space so a material
//! keeps its hue while individual grains get darker or paler.

use rand::Rng;

#[inline]
pub fn rgb(color: u32) -> (u8, u8, u8) {
    (((color >> 16) & 0xFF) as u8, ((color >> 8) & 0xFF) as u8, (color & 0xFF) as u8)
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// 0xRRGGBB -> ABGR (0xAABBGGRR) with opaque alpha, the byte order canvas
/// `ImageData` expects on little-endian targets.
#[inline]
pub fn to_abgr(color: u32) -> u32 {
    let (r, g, b) = rgb(color);
    0xFF00_0000 | ((b as u32) << 16) | ((g as u32) << 8) | r as u32
}

/// Hue in degrees, saturation and lightness in [0, 1].
pub fn to_hsl(color: u32) -> (f32, f32, f32) {
    let (r, g, b) = rgb(color);
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d <= f32::EPSILON {
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

pub fn from_hsl(h: f32, s: f32, l: f32) -> u32 {
    if s <= 0.0 {
        let v = (l * 255.0).round().clamp(0.0, 255.0) as u8;
        return pack_rgb(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    let channel = |t: f32| {
        let mut t = t;
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    pack_rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// Saturation drops by up to 0.2, lightness moves by up to ±0.1.
pub fn vary_color<R: Rng + ?Sized>(color: u32, rng: &mut R) -> u32 {
    let (h, s, l) = to_hsl(color);
    let s = (s + rng.gen_range(-0.2..=0.0f32)).clamp(0.0, 1.0);
    let l = (l + rng.gen_range(-0.1..=0.1f32)).clamp(0.0, 1.0);
    from_hsl(h, s, l)
}

/// "Red mean" weighted RGB distance, a cheap perceptual approximation.
pub fn red_mean_distance(a: u32, b: u32) -> f64 {
    let (r1, g1, b1) = rgb(a);
    let (r2, g2, b2) = rgb(b);

    let rmean = (r1 as i64 + r2 as i64) / 2;
    let dr = r1 as i64 - r2 as i64;
    let dg = g1 as i64 - g2 as i64;
    let db = b1 as i64 - b2 as i64;

    let rcomp = ((512 + rmean) * dr * dr) >> 8;
    let gcomp = 4 * dg * dg;
    let bcomp = ((767 - rmean) * db * db) >> 8;

    ((rcomp + gcomp + bcomp) as f64).sqrt()
}
