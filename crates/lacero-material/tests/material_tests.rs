//! Integration tests for lacero-material.

use lacero_material::{PaperDatabase, PaperProperties};
use lacero_types::{LaceroError, TearConfig};

fn sample() -> PaperProperties {
    PaperProperties {
        name: "test_bond".into(),
        grammage: 75.0,
        density: 4.0,
        stiffness: 30.0,
        bending_stiffness: 0.015,
        damping: 0.05,
        fracture_threshold: 0.02,
        tear_resistance: 0.4,
        fiber_direction: [0.0, 1.0],
        fiber_anisotropy: 0.5,
    }
}

// ─── PaperProperties Tests ────────────────────────────────────

#[test]
fn apply_overwrites_material_constants_only() {
    let base = TearConfig {
        width: 2.0,
        subdivisions: 9,
        grab_radius: 0.3,
        ..Default::default()
    };
    let config = sample().config_from(base.clone());

    assert_eq!(config.density, 4.0);
    assert_eq!(config.stiffness, 30.0);
    assert_eq!(config.fracture_threshold, 0.02);
    assert_eq!(config.fiber_direction, [0.0, 1.0]);
    assert_eq!(config.fiber_anisotropy, 0.5);
    assert_eq!(config.width, base.width);
    assert_eq!(config.subdivisions, base.subdivisions);
    assert_eq!(config.grab_radius, base.grab_radius);
    assert!(config.validate().is_ok());
}

#[test]
fn grain_sensitivity() {
    assert!(sample().is_grain_sensitive());
    let mut flat = sample();
    flat.fiber_anisotropy = 0.1;
    assert!(!flat.is_grain_sensitive());
}

#[test]
fn invalid_preset_is_rejected() {
    let mut bad = sample();
    bad.fiber_anisotropy = 1.5;
    assert!(matches!(bad.validate(), Err(LaceroError::InvalidConfig(_))));

    let mut unnamed = sample();
    unnamed.name = "  ".into();
    assert!(unnamed.validate().is_err());
}

#[test]
fn preset_from_toml() {
    let source = r#"
        name = "onion_skin"
        grammage = 30.0
        density = 1.8
        stiffness = 15.0
        bending_stiffness = 0.005
        damping = 0.06
        fracture_threshold = 0.004
        tear_resistance = 0.3
        fiber_direction = [1.0, 0.0]
        fiber_anisotropy = 0.2
    "#;
    let props = PaperProperties::from_toml_str(source).unwrap();
    assert_eq!(props.name, "onion_skin");
    assert!(PaperProperties::from_toml_str("name = 3").is_err());
}

// ─── PaperDatabase Tests ──────────────────────────────────────

#[test]
fn default_database_has_four_stocks() {
    let db = PaperDatabase::with_defaults();
    assert_eq!(db.len(), 4);
    assert_eq!(
        db.names(),
        vec!["calendar_stock", "cardstock", "newsprint", "tissue"]
    );
}

#[test]
fn every_preset_is_valid() {
    for props in PaperDatabase::default().iter() {
        assert!(props.validate().is_ok(), "{} is invalid", props.name);
    }
}

#[test]
fn calendar_stock_matches_defaults() {
    let db = PaperDatabase::with_defaults();
    let config = db
        .get("calendar_stock")
        .unwrap()
        .config_from(TearConfig::default());
    assert_eq!(config, TearConfig::default());
}

#[test]
fn heavier_stock_is_harder_to_tear() {
    let db = PaperDatabase::with_defaults();
    let tissue = db.get("tissue").unwrap();
    let card = db.get("cardstock").unwrap();
    assert!(card.fracture_threshold > tissue.fracture_threshold);
    assert!(card.density > tissue.density);
}

#[test]
fn unknown_material_lists_alternatives() {
    let db = PaperDatabase::with_defaults();
    let err = db.lookup("vellum").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("vellum"));
    assert!(message.contains("newsprint"));
}

#[test]
fn register_overwrites() {
    let mut db = PaperDatabase::empty();
    assert!(db.is_empty());
    db.register(sample());
    let mut heavier = sample();
    heavier.density = 9.0;
    db.register(heavier);
    assert_eq!(db.len(), 1);
    assert_eq!(db.get("test_bond").unwrap().density, 9.0);
}

#[test]
fn preset_serializes() {
    let json = serde_json::to_string(&sample()).unwrap();
    let back: PaperProperties = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample());
}
