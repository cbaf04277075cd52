//! Material Definitions
//!
//! Every non-empty material is a single bit, so membership in a category is
//! one AND against a mask. `Empty` is the zero sentinel and never belongs to
//! a category mask.
//!
//! The per-material parameters live in `MATERIAL_DATA`, indexed by
//! `Material::index()`. The runtime rule table (`content::MaterialTable`)
//! starts from this data and may be overridden by a JSON bundle.

use serde::{Deserialize, Serialize};

pub type MaterialBits = u16;
pub type MaterialFlags = u16;

#[repr(u16)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Empty = 0,
    Sand = 1 << 0,
    Water = 1 << 1,
    Stone = 1 << 2,
    Wood = 1 << 3,
    Smoke = 1 << 4,
    Fire = 1 << 5,
    Salt = 1 << 6,
    Acid = 1 << 7,
    Gasoline = 1 << 8,
    Virus = 1 << 9,
    Poison = 1 << 10,
}

pub const MATERIAL_COUNT: usize = 12;

/// All materials in table order (`ALL_MATERIALS[m.index()] == m`).
pub const ALL_MATERIALS: [Material; MATERIAL_COUNT] = [
    Material::Empty,
    Material::Sand,
    Material::Water,
    Material::Stone,
    Material::Wood,
    Material::Smoke,
    Material::Fire,
    Material::Salt,
    Material::Acid,
    Material::Gasoline,
    Material::Virus,
    Material::Poison,
];

impl Material {
    #[inline(always)]
    pub const fn bits(self) -> MaterialBits {
        self as MaterialBits
    }

    /// Dense table index: 0 for `Empty`, bit position + 1 otherwise.
    #[inline(always)]
    pub const fn index(self) -> usize {
        let bits = self.bits();
        if bits == 0 {
            0
        } else {
            bits.trailing_zeros() as usize + 1
        }
    }

    #[inline(always)]
    pub const fn in_set(self, set: MaterialBits) -> bool {
        self.bits() & set != 0
    }

    /// Decode a raw material id. Anything that is not exactly one known bit
    /// (or zero) is rejected.
    pub fn from_bits(bits: MaterialBits) -> Option<Self> {
        if bits == 0 {
            return Some(Material::Empty);
        }
        if !bits.is_power_of_two() {
            return None;
        }
        ALL_MATERIALS.get(bits.trailing_zeros() as usize + 1).copied()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ALL_MATERIALS.get(index).copied()
    }

    pub const fn key(self) -> &'static str {
        match self {
            Material::Empty => "empty",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Stone => "stone",
            Material::Wood => "wood",
            Material::Smoke => "smoke",
            Material::Fire => "fire",
            Material::Salt => "salt",
            Material::Acid => "acid",
            Material::Gasoline => "gasoline",
            Material::Virus => "virus",
            Material::Poison => "poison",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_MATERIALS.iter().copied().find(|m| m.key() == key)
    }

    /// Stone and wood are drawn as solid discs; loose materials look better
    /// sprinkled.
    pub const fn prefers_solid_brush(self) -> bool {
        self.in_set(SOLID_BRUSH)
    }
}

/// Brush hint only, not a rule-table category.
pub const SOLID_BRUSH: MaterialBits = Material::Stone.bits() | Material::Wood.bits();

// ============================================================================
// RULE FLAGS
// ============================================================================

pub const FLAG_NONE: MaterialFlags = 0;
pub const FLAG_SOLID: MaterialFlags = 1 << 0;
pub const FLAG_LIQUID: MaterialFlags = 1 << 1;
pub const FLAG_AIR: MaterialFlags = 1 << 2;
/// Pulled down by gravity (raycast movement).
pub const FLAG_GRAVITY: MaterialFlags = 1 << 3;
/// Processed in the top-down sweep instead of the bottom-up one.
pub const FLAG_REVERSE: MaterialFlags = 1 << 4;
/// Puts out fire.
pub const FLAG_EXTINGUISHER: MaterialFlags = 1 << 5;
/// Dissolves salt and acid.
pub const FLAG_SOLVENT: MaterialFlags = 1 << 6;
/// Life time counts down every tick.
pub const FLAG_DECAYS: MaterialFlags = 1 << 7;
/// Born with `dying` set.
pub const FLAG_MORTAL: MaterialFlags = 1 << 8;
/// Born with `burning` set.
pub const FLAG_BURNING: MaterialFlags = 1 << 9;
/// Base color gets an HSL jitter per particle.
pub const FLAG_VARY_COLOR: MaterialFlags = 1 << 10;
/// Candidate for image-import quantization.
pub const FLAG_PALETTE: MaterialFlags = 1 << 11;

/// Randomized life time: `base + spread * U[0, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeSpan {
    pub base: f32,
    pub spread: f32,
}

impl LifeSpan {
    pub const NONE: LifeSpan = LifeSpan { base: 0.0, spread: 0.0 };

    pub const fn new(base: f32, spread: f32) -> Self {
        LifeSpan { base, spread }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialProps {
    /// 0xRRGGBB
    pub color: u32,
    pub density: f32,
    pub flammability: f32,
    pub dissolvability: f32,
    pub corrodibility: f32,
    pub diffusibility: f32,
    pub life: LifeSpan,
    pub flags: MaterialFlags,
}

impl MaterialProps {
    pub const EMPTY: MaterialProps = MaterialProps {
        color: 0x000000,
        density: 0.0,
        flammability: 0.0,
        dissolvability: 0.0,
        corrodibility: 0.0,
        diffusibility: 0.0,
        life: LifeSpan::NONE,
        flags: FLAG_NONE,
    };

    #[inline(always)]
    pub const fn has(&self, flag: MaterialFlags) -> bool {
        self.flags & flag != 0
    }
}

const BASE: MaterialProps = MaterialProps::EMPTY;

pub static MATERIAL_DATA: [MaterialProps; MATERIAL_COUNT] = [
    // 0: Empty
    MaterialProps { flags: FLAG_PALETTE, ..BASE },
    // 1: Sand
    MaterialProps {
        color: 0xFFD700,
        density: 100.0,
        corrodibility: 0.01,
        flags: FLAG_SOLID | FLAG_GRAVITY | FLAG_VARY_COLOR | FLAG_PALETTE,
        ..BASE
    },
    // 2: Water
    MaterialProps {
        color: 0x0000FF,
        density: 50.0,
        flags: FLAG_LIQUID | FLAG_GRAVITY | FLAG_EXTINGUISHER | FLAG_SOLVENT | FLAG_PALETTE,
        ..BASE
    },
    // 3: Stone
    MaterialProps {
        color: 0x7F7F7F,
        density: 500.0,
        flags: FLAG_SOLID | FLAG_VARY_COLOR | FLAG_PALETTE,
        ..BASE
    },
    // 4: Wood
    MaterialProps {
        color: 0x362312,
        density: 200.0,
        flammability: 0.025,
        corrodibility: 0.05,
        flags: FLAG_SOLID | FLAG_VARY_COLOR | FLAG_PALETTE,
        ..BASE
    },
    // 5: Smoke
    MaterialProps {
        color: 0x888888,
        density: 1.0,
        life: LifeSpan::new(0.05, 2.0),
        flags: FLAG_AIR | FLAG_REVERSE | FLAG_DECAYS | FLAG_MORTAL | FLAG_VARY_COLOR,
        ..BASE
    },
    // 6: Fire
    MaterialProps {
        color: 0xFF4500,
        density: 2.0,
        dissolvability: 0.5,
        life: LifeSpan::new(0.2, 0.1),
        flags: FLAG_AIR | FLAG_REVERSE | FLAG_DECAYS | FLAG_MORTAL | FLAG_BURNING | FLAG_VARY_COLOR,
        ..BASE
    },
    // 7: Salt
    MaterialProps {
        color: 0xF2F2F2,
        density: 100.0,
        dissolvability: 0.05,
        corrodibility: 0.15,
        life: LifeSpan::new(0.5, 1.5),
        flags: FLAG_SOLID | FLAG_GRAVITY | FLAG_DECAYS | FLAG_VARY_COLOR,
        ..BASE
    },
    // 8: Acid
    MaterialProps {
        color: 0x7FFF00,
        density: 60.0,
        dissolvability: 0.005,
        life: LifeSpan::new(5.0, 5.0),
        flags: FLAG_LIQUID | FLAG_GRAVITY | FLAG_DECAYS,
        ..BASE
    },
    // 9: Gasoline
    MaterialProps {
        color: 0xE3C565,
        density: 25.0,
        flammability: 0.04,
        flags: FLAG_LIQUID | FLAG_GRAVITY,
        ..BASE
    },
    // 10: Virus
    MaterialProps {
        color: 0x9400D3,
        density: 90.0,
        corrodibility: 0.1,
        life: LifeSpan::new(2.0, 3.0),
        flags: FLAG_SOLID | FLAG_GRAVITY | FLAG_DECAYS | FLAG_MORTAL | FLAG_VARY_COLOR,
        ..BASE
    },
    // 11: Poison
    MaterialProps {
        color: 0x00A86B,
        density: 55.0,
        diffusibility: 0.2,
        flags: FLAG_LIQUID | FLAG_GRAVITY,
        ..BASE
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_table_order() {
        for (i, m) in ALL_MATERIALS.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(Material::from_index(i), Some(*m));
        }
    }

    #[test]
    fn from_bits_rejects_unknown_and_composite_ids() {
        assert_eq!(Material::from_bits(0), Some(Material::Empty));
        assert_eq!(Material::from_bits(Material::Acid.bits()), Some(Material::Acid));
        assert_eq!(Material::from_bits(Material::Sand.bits() | Material::Water.bits()), None);
        assert_eq!(Material::from_bits(1 << 11), None);
        assert_eq!(Material::from_bits(1 << 15), None);
    }

    #[test]
    fn keys_round_trip() {
        for m in ALL_MATERIALS {
            assert_eq!(Material::from_key(m.key()), Some(m));
        }
        assert_eq!(Material::from_key("lava"), None);
    }

    #[test]
    fn every_material_has_exactly_one_phase() {
        for m in ALL_MATERIALS.iter().skip(1) {
            let props = &MATERIAL_DATA[m.index()];
            let phases = [FLAG_SOLID, FLAG_LIQUID, FLAG_AIR]
                .iter()
                .filter(|f| props.has(**f))
                .count();
            assert_eq!(phases, 1, "{:?}", m);
        }
    }
}
