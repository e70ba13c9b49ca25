//! Engine configuration: colors, tolerances, hit policy, and style defaults.
//!
//! Every field has a default, so hosts only need to supply what they change.
//! Out-of-range style defaults are normalized into their legal ranges rather
//! than rejected; only values that would make hit-testing meaningless
//! (non-positive radii) are errors.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    BACKGROUND_COLOR, DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_THICKNESS, ERASER_RADIUS, HIGHLIGHT_COLOR,
    HIT_SLOP, TEXT_COLOR, TEXT_FONT_FAMILY,
};
use crate::doc::clamp_font_size;
use crate::hit::HitPolicy;
use crate::input::{ShapeTool, clamp_thickness};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fill color of the cleared surface.
    pub background: String,
    /// Stroke color of selected objects and the text placement outline.
    pub highlight: String,
    pub text_color: String,
    pub font_family: String,
    pub eraser_radius: f64,
    /// Tolerance for picking lines.
    pub hit_slop: f64,
    pub hit_policy: HitPolicy,
    pub default_color: String,
    pub default_thickness: f64,
    pub default_font_size: f64,
    pub default_shape: ShapeTool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR.to_owned(),
            highlight: HIGHLIGHT_COLOR.to_owned(),
            text_color: TEXT_COLOR.to_owned(),
            font_family: TEXT_FONT_FAMILY.to_owned(),
            eraser_radius: ERASER_RADIUS,
            hit_slop: HIT_SLOP,
            hit_policy: HitPolicy::default(),
            default_color: DEFAULT_COLOR.to_owned(),
            default_thickness: DEFAULT_THICKNESS,
            default_font_size: DEFAULT_FONT_SIZE,
            default_shape: ShapeTool::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config object, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON and `Invalid` when a tolerance is
    /// not a positive finite number.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validated()
    }

    /// Check tolerances and normalize style defaults into range.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when `eraser_radius` or `hit_slop` is not a positive
    /// finite number.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        ensure_positive("eraser_radius", self.eraser_radius)?;
        ensure_positive("hit_slop", self.hit_slop)?;
        self.default_thickness = clamp_thickness(self.default_thickness);
        self.default_font_size = clamp_font_size(self.default_font_size);
        Ok(self)
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("expected a positive number, got {value}") })
    }
}
