#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_matches_constants() {
    let config = EngineConfig::default();
    assert_eq!(config.background, "#fff");
    assert_eq!(config.highlight, "#1976d2");
    assert_eq!(config.eraser_radius, 16.0);
    assert_eq!(config.hit_slop, 10.0);
    assert_eq!(config.hit_policy, HitPolicy::TypePriority);
    assert_eq!(config.default_color, "#222");
    assert_eq!(config.default_thickness, 5.0);
    assert_eq!(config.default_font_size, 16.0);
    assert_eq!(config.default_shape, ShapeTool::Rect);
}

#[test]
fn from_json_empty_object_is_default() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn from_json_overrides_fields() {
    let config = EngineConfig::from_json(
        r##"{ "eraser_radius": 24, "hit_policy": "topmost", "default_shape": "circle", "default_color": "#e53935" }"##,
    )
    .unwrap();
    assert_eq!(config.eraser_radius, 24.0);
    assert_eq!(config.hit_policy, HitPolicy::Topmost);
    assert_eq!(config.default_shape, ShapeTool::Circle);
    assert_eq!(config.default_color, "#e53935");
    assert_eq!(config.hit_slop, 10.0);
}

#[test]
fn from_json_clamps_style_defaults() {
    let config = EngineConfig::from_json(r#"{ "default_font_size": 100, "default_thickness": 0 }"#).unwrap();
    assert_eq!(config.default_font_size, 48.0);
    assert_eq!(config.default_thickness, 1.0);
}

#[test]
fn from_json_rejects_non_positive_radius() {
    let err = EngineConfig::from_json(r#"{ "eraser_radius": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "eraser_radius", .. }));
}

#[test]
fn from_json_rejects_negative_slop() {
    let err = EngineConfig::from_json(r#"{ "hit_slop": -1 }"#).unwrap_err();
    assert!(err.to_string().starts_with("invalid hit_slop"));
}

#[test]
fn from_json_malformed_is_parse_error() {
    let err = EngineConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_unknown_policy_is_parse_error() {
    let err = EngineConfig::from_json(r#"{ "hit_policy": "random" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
