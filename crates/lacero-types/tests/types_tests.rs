//! Integration tests for lacero-types.

use lacero_types::{EdgeKey, LaceroError, TearConfig, TriangleId, VertexId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn vertex_id_index() {
    let id = VertexId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn triangle_id_index() {
    let id = TriangleId(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn edge_key_is_order_independent() {
    let a = EdgeKey::new(VertexId(9), VertexId(3));
    let b = EdgeKey::new(VertexId(3), VertexId(9));
    assert_eq!(a, b);
    assert_eq!(a.lo(), VertexId(3));
    assert_eq!(a.hi(), VertexId(9));
}

#[test]
fn edge_key_other_endpoint() {
    let key = EdgeKey::new(VertexId(1), VertexId(2));
    assert_eq!(key.other(VertexId(1)), Some(VertexId(2)));
    assert_eq!(key.other(VertexId(2)), Some(VertexId(1)));
    assert_eq!(key.other(VertexId(5)), None);
    assert!(key.contains(VertexId(2)));
}

#[test]
fn ids_are_serializable() {
    let id = VertexId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: VertexId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = LaceroError::InvalidMesh("edge with three triangles".into());
    assert!(err.to_string().contains("three triangles"));
}

#[test]
fn unknown_material_display() {
    let err = LaceroError::UnknownMaterial {
        name: "vellum".into(),
        available: "newsprint, tissue".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("vellum"));
    assert!(msg.contains("newsprint"));
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    assert!(TearConfig::default().validate().is_ok());
    assert!(TearConfig::coarse().validate().is_ok());
    assert!(TearConfig::fine().validate().is_ok());
}

#[test]
fn rows_follow_aspect_ratio() {
    let config = TearConfig {
        width: 1.0,
        height: 2.0,
        subdivisions: 5,
        ..Default::default()
    };
    assert_eq!(config.cols(), 5);
    assert_eq!(config.rows(), 10);
}

#[test]
fn rows_never_zero() {
    let config = TearConfig {
        width: 10.0,
        height: 0.1,
        subdivisions: 2,
        ..Default::default()
    };
    assert_eq!(config.rows(), 1);
}

#[test]
fn validate_rejects_bad_anisotropy() {
    let config = TearConfig {
        fiber_anisotropy: 1.5,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_non_unit_fiber() {
    let config = TearConfig {
        fiber_direction: [2.0, 0.0],
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_zero_subdivisions() {
    let config = TearConfig {
        subdivisions: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_nan() {
    let config = TearConfig {
        stiffness: f32::NAN,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn toml_round_trip() {
    let config = TearConfig::coarse();
    let text = config.to_toml_string().unwrap();
    let recovered = TearConfig::from_toml_str(&text).unwrap();
    assert_eq!(recovered, config);
}

#[test]
fn toml_optional_fields_default() {
    let text = r#"
        width = 1.0
        height = 1.0
        subdivisions = 4
        stiffness = 40.0
        bending_stiffness = 0.0
        damping = 0.05
        density = 2.0
        fracture_threshold = 0.05
        tear_resistance = 0.0
        fiber_direction = [0.0, 1.0]
        fiber_anisotropy = 0.0
        grab_radius = 0.2
        grab_stiffness = 10.0
    "#;
    let config = TearConfig::from_toml_str(text).unwrap();
    assert_eq!(config.subdivisions, 4);
    assert!((config.detach_fraction - 0.5).abs() < 1e-6);
    assert!(config.tear_width > 0.0);
}

#[test]
fn toml_invalid_is_rejected() {
    let err = TearConfig::from_toml_str("width = \"wide\"").unwrap_err();
    assert!(matches!(err, LaceroError::Serialization(_)));
}
