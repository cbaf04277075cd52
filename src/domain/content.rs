use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::core::error::{EngineError, EngineResult};
use crate::domain::color::red_mean_distance;
use crate::domain::materials::{
    LifeSpan, Material, MaterialBits, MaterialFlags, MaterialProps, ALL_MATERIALS,
    FLAG_AIR, FLAG_BURNING, FLAG_DECAYS, FLAG_EXTINGUISHER, FLAG_GRAVITY, FLAG_LIQUID,
    FLAG_MORTAL, FLAG_PALETTE, FLAG_REVERSE, FLAG_SOLID, FLAG_SOLVENT, FLAG_VARY_COLOR,
    MATERIAL_COUNT, MATERIAL_DATA,
};
use crate::domain::particle::Particle;

/// Category memberships as material bitmasks, derived from the rule flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryMasks {
    pub solid: MaterialBits,
    pub liquid: MaterialBits,
    pub air: MaterialBits,
    pub gravity: MaterialBits,
    pub reverse: MaterialBits,
    pub extinguisher: MaterialBits,
    pub solvent: MaterialBits,
    pub decays: MaterialBits,
}

impl CategoryMasks {
    fn from_props(props: &[MaterialProps; MATERIAL_COUNT]) -> Self {
        let mut masks = CategoryMasks::default();
        // Empty stays out of every mask.
        for material in ALL_MATERIALS.iter().skip(1) {
            let p = &props[material.index()];
            let bits = material.bits();
            let add = |flag: MaterialFlags, mask: &mut MaterialBits| {
                if p.has(flag) {
                    *mask |= bits;
                }
            };
            add(FLAG_SOLID, &mut masks.solid);
            add(FLAG_LIQUID, &mut masks.liquid);
            add(FLAG_AIR, &mut masks.air);
            add(FLAG_GRAVITY, &mut masks.gravity);
            add(FLAG_REVERSE, &mut masks.reverse);
            add(FLAG_EXTINGUISHER, &mut masks.extinguisher);
            add(FLAG_SOLVENT, &mut masks.solvent);
            add(FLAG_DECAYS, &mut masks.decays);
        }
        masks
    }
}

/// The material rule table: per-material parameters and category masks.
///
/// Read-only during a tick and shared across bands through an `Arc`.
#[derive(Clone, Debug)]
pub struct MaterialTable {
    props: [MaterialProps; MATERIAL_COUNT],
    masks: CategoryMasks,
}

impl MaterialTable {
    pub fn builtin() -> Self {
        Self::from_props(MATERIAL_DATA)
    }

    fn from_props(props: [MaterialProps; MATERIAL_COUNT]) -> Self {
        let masks = CategoryMasks::from_props(&props);
        Self { props, masks }
    }

    /// Built-in table with the overrides of a JSON bundle applied.
    pub fn from_bundle_json(json: &str) -> EngineResult<Self> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        Self::from_bundle(bundle)
    }

    fn from_bundle(bundle: BundleRoot) -> EngineResult<Self> {
        let mut props = MATERIAL_DATA;

        for entry in bundle.materials.into_iter() {
            let material = Material::from_key(&entry.key)
                .ok_or_else(|| EngineError::UnknownMaterial(entry.key.clone()))?;
            if material == Material::Empty {
                return Err(EngineError::InvalidMaterial {
                    key: entry.key,
                    reason: "empty is a sentinel and cannot be overridden".to_string(),
                });
            }

            let p = &mut props[material.index()];
            if let Some(color) = entry.color {
                p.color = color & 0x00FF_FFFF;
            }
            if let Some(v) = entry.density {
                p.density = check_param(&entry.key, "density", v)?;
            }
            if let Some(v) = entry.flammability {
                p.flammability = check_param(&entry.key, "flammability", v)?;
            }
            if let Some(v) = entry.dissolvability {
                p.dissolvability = check_param(&entry.key, "dissolvability", v)?;
            }
            if let Some(v) = entry.corrodibility {
                p.corrodibility = check_param(&entry.key, "corrodibility", v)?;
            }
            if let Some(v) = entry.diffusibility {
                p.diffusibility = check_param(&entry.key, "diffusibility", v)?;
            }
            if let Some(life) = entry.life_time {
                p.life = LifeSpan::new(
                    check_param(&entry.key, "lifeTime.base", life.base)?,
                    check_param(&entry.key, "lifeTime.spread", life.spread)?,
                );
            }
            if let Some(flags) = entry.flags {
                p.flags = flags.apply(p.flags);
            }

            log::debug!("material '{}' overridden by bundle", entry.key);
        }

        let table = Self::from_props(props);
        log::info!("material table loaded ({} materials)", MATERIAL_COUNT);
        Ok(table)
    }

    #[inline(always)]
    pub fn props(&self, material: Material) -> &MaterialProps {
        &self.props[material.index()]
    }

    #[inline(always)]
    pub fn masks(&self) -> &CategoryMasks {
        &self.masks
    }

    /// Fresh particle of `material` with randomized color and life time.
    #[inline]
    pub fn spawn<R: Rng + ?Sized>(&self, material: Material, rng: &mut R) -> Particle {
        Particle::spawn(material, self.props(material), rng)
    }

    /// Materials eligible for image quantization with their base colors.
    pub fn palette(&self) -> impl Iterator<Item = (Material, u32)> + '_ {
        ALL_MATERIALS
            .iter()
            .copied()
            .filter(move |m| self.props(*m).has(FLAG_PALETTE))
            .map(move |m| (m, self.props(m).color))
    }

    /// Closest palette material to an 0xRRGGBB color.
    pub fn nearest_material(&self, color: u32) -> Material {
        let mut best = Material::Empty;
        let mut best_distance = f64::INFINITY;
        for (material, base) in self.palette() {
            let distance = red_mean_distance(color, base);
            if distance < best_distance {
                best_distance = distance;
                best = material;
            }
        }
        best
    }

    pub fn manifest_json(&self) -> String {
        let materials: Vec<ManifestMaterial> = ALL_MATERIALS
            .iter()
            .map(|m| {
                let p = self.props(*m);
                ManifestMaterial {
                    id: m.bits(),
                    key: m.key(),
                    color: p.color,
                    density: p.density,
                    hidden: *m == Material::Empty,
                    solid_brush: m.prefers_solid_brush(),
                }
            })
            .collect();
        let out = Manifest { format_version: 1, materials };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_param(key: &str, name: &str, value: f32) -> EngineResult<f32> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidMaterial {
            key: key.to_string(),
            reason: format!("{} must be a finite non-negative number, got {}", name, value),
        });
    }
    Ok(value)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    format_version: u32,
    materials: Vec<ManifestMaterial>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestMaterial {
    id: MaterialBits,
    key: &'static str,
    color: u32,
    density: f32,
    hidden: bool,
    solid_brush: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    #[serde(default)]
    materials: Vec<BundleMaterial>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleMaterial {
    key: String,
    #[serde(default)]
    color: Option<u32>,
    #[serde(default)]
    density: Option<f32>,
    #[serde(default)]
    flammability: Option<f32>,
    #[serde(default)]
    dissolvability: Option<f32>,
    #[serde(default)]
    corrodibility: Option<f32>,
    #[serde(default)]
    diffusibility: Option<f32>,
    #[serde(default)]
    life_time: Option<LifeSpan>,
    #[serde(default)]
    flags: Option<BundleMaterialFlags>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleMaterialFlags {
    solid: Option<bool>,
    liquid: Option<bool>,
    air: Option<bool>,
    gravity: Option<bool>,
    reverse: Option<bool>,
    extinguisher: Option<bool>,
    solvent: Option<bool>,
    decays: Option<bool>,
    mortal: Option<bool>,
    burning: Option<bool>,
    vary_color: Option<bool>,
    palette: Option<bool>,
}

impl BundleMaterialFlags {
    fn apply(&self, mut flags: MaterialFlags) -> MaterialFlags {
        let overrides = [
            (self.solid, FLAG_SOLID),
            (self.liquid, FLAG_LIQUID),
            (self.air, FLAG_AIR),
            (self.gravity, FLAG_GRAVITY),
            (self.reverse, FLAG_REVERSE),
            (self.extinguisher, FLAG_EXTINGUISHER),
            (self.solvent, FLAG_SOLVENT),
            (self.decays, FLAG_DECAYS),
            (self.mortal, FLAG_MORTAL),
            (self.burning, FLAG_BURNING),
            (self.vary_color, FLAG_VARY_COLOR),
            (self.palette, FLAG_PALETTE),
        ];
        for (value, flag) in overrides {
            match value {
                Some(true) => flags |= flag,
                Some(false) => flags &= !flag,
                None => {}
            }
        }
        flags
    }
}
