//! Shared numeric constants and default style values.

// ── Hit-testing ─────────────────────────────────────────────────

/// Slop around line segments, in surface units.
pub const HIT_SLOP: f64 = 10.0;

/// Radius of the eraser brush, in surface units.
pub const ERASER_RADIUS: f64 = 16.0;

// ── Style limits ────────────────────────────────────────────────

/// Smallest font size a text box may carry.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Largest font size a text box may carry.
pub const MAX_FONT_SIZE: f64 = 48.0;

/// Thinnest stroke the thickness control produces.
pub const MIN_THICKNESS: f64 = 1.0;

/// Thickest stroke the thickness control produces.
pub const MAX_THICKNESS: f64 = 24.0;

// ── Defaults ────────────────────────────────────────────────────

pub const DEFAULT_COLOR: &str = "#222";
pub const DEFAULT_THICKNESS: f64 = 5.0;
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Width substituted for a text box drawn with zero width.
pub const DEFAULT_TEXT_WIDTH: f64 = 80.0;

/// Height substituted for a text box drawn with zero height.
pub const DEFAULT_TEXT_HEIGHT: f64 = 40.0;

// ── Rendering ───────────────────────────────────────────────────

pub const BACKGROUND_COLOR: &str = "#fff";

/// Stroke color for selected objects and the text placement outline.
pub const HIGHLIGHT_COLOR: &str = "#1976d2";

pub const TEXT_COLOR: &str = "#222";
pub const TEXT_FONT_FAMILY: &str = "Arial";

/// Outline width of text boxes and the text placement preview.
pub const TEXT_OUTLINE_WIDTH: f64 = 2.0;

/// Inset between a text box outline and its text.
pub const TEXT_PADDING: f64 = 4.0;

/// Extra spacing added to the font size to get the line height.
pub const TEXT_LINE_GAP: f64 = 4.0;

/// Gap between a text box's bottom edge and the font-size control.
pub const FONT_CONTROL_OFFSET: f64 = 10.0;
