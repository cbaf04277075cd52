use sandfall_engine::domain::materials::{MATERIAL_COUNT, FLAG_SOLVENT};
use sandfall_engine::{EngineError, Material, MaterialTable};

#[test]
fn bundle_overrides_only_named_fields() {
    let json = r#"{
        "materials": [
            { "key": "wood", "flammability": 1.0 },
            { "key": "acid", "color": 65280, "lifeTime": { "base": 1.0, "spread": 0.0 } }
        ]
    }"#;
    let table = MaterialTable::from_bundle_json(json).expect("bundle should parse");
    let builtin = MaterialTable::builtin();

    let wood = table.props(Material::Wood);
    assert_eq!(wood.flammability, 1.0);
    assert_eq!(wood.density, builtin.props(Material::Wood).density);

    let acid = table.props(Material::Acid);
    assert_eq!(acid.color, 0x00FF00);
    assert_eq!(acid.life.base, 1.0);
    assert_eq!(acid.density, builtin.props(Material::Acid).density);

    assert_eq!(table.props(Material::Sand), builtin.props(Material::Sand));
}

#[test]
fn flag_overrides_rebuild_category_masks() {
    let json = r#"{ "materials": [ { "key": "gasoline", "flags": { "solvent": true } } ] }"#;
    let table = MaterialTable::from_bundle_json(json).expect("bundle should parse");
    assert!(table.props(Material::Gasoline).has(FLAG_SOLVENT));
    assert!(Material::Gasoline.in_set(table.masks().solvent));
    assert!(!Material::Gasoline.in_set(MaterialTable::builtin().masks().solvent));
}

#[test]
fn bad_bundles_are_rejected() {
    let unknown = MaterialTable::from_bundle_json(r#"{ "materials": [ { "key": "lava" } ] }"#);
    assert!(matches!(unknown, Err(EngineError::UnknownMaterial(k)) if k == "lava"));

    let empty = MaterialTable::from_bundle_json(r#"{ "materials": [ { "key": "empty", "density": 3.0 } ] }"#);
    assert!(matches!(empty, Err(EngineError::InvalidMaterial { .. })));

    let negative = MaterialTable::from_bundle_json(r#"{ "materials": [ { "key": "sand", "density": -1.0 } ] }"#);
    assert!(matches!(negative, Err(EngineError::InvalidMaterial { .. })));

    assert!(matches!(MaterialTable::from_bundle_json("{ nope"), Err(EngineError::Json(_))));
}

#[test]
fn manifest_lists_every_material() {
    let manifest: serde_json::Value =
        serde_json::from_str(&MaterialTable::builtin().manifest_json()).expect("manifest is JSON");
    let materials = manifest["materials"].as_array().expect("materials array");
    assert_eq!(materials.len(), MATERIAL_COUNT);
    assert!(materials.iter().any(|m| m["key"] == "stone" && m["solidBrush"] == true));
}
