//! Input model: tools, active style, input events, and the gesture state.
//!
//! `Tool` and `Style` capture what the surrounding UI has chosen. `UiState`
//! is the persistent interaction state the renderer reads (tool, style,
//! selection, additive mode). `InputState` is the gesture currently in
//! flight between pointer-down and pointer-up; it is also the transient
//! placement preview, and it is never part of the scene.
//!
//! `InputEvent` is the single entry point through which hosts deliver
//! pointer, touch, keyboard, resize, and text-entry events to the engine.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::consts::{MAX_THICKNESS, MIN_THICKNESS};
use crate::doc::{ObjectId, Shape};
use crate::geom::{Bounds, Point};
use crate::selection::Selection;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pick, move, and delete objects.
    Select,
    /// Freehand strokes.
    #[default]
    Draw,
    /// Place the shape chosen by [`ShapeTool`].
    Shapes,
    /// Drag out a text box, then type into it.
    Text,
    /// Reserved; has no gesture.
    Image,
    /// Remove everything under the brush.
    Eraser,
}

/// Shape placed by the Shapes tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTool {
    #[default]
    #[serde(alias = "square")]
    Rect,
    Circle,
    Triangle,
    Line,
}

impl ShapeTool {
    /// Geometry for a shape dragged from `anchor` to `current`.
    ///
    /// Rects keep a signed size, circles are centered on the anchor with the
    /// drag length as radius, triangles use the larger axis extent as size,
    /// and lines run from anchor to current.
    #[must_use]
    pub fn build(self, anchor: Point, current: Point, color: &str, thickness: f64) -> Shape {
        let color = color.to_owned();
        match self {
            Self::Rect => Shape::Rect {
                x: anchor.x,
                y: anchor.y,
                width: current.x - anchor.x,
                height: current.y - anchor.y,
                color,
                thickness,
            },
            Self::Circle => Shape::Circle { x: anchor.x, y: anchor.y, radius: anchor.distance(current), color, thickness },
            Self::Triangle => Shape::Triangle {
                x: anchor.x,
                y: anchor.y,
                size: (current.x - anchor.x).abs().max((current.y - anchor.y).abs()),
                color,
                thickness,
            },
            Self::Line => Shape::Line { x1: anchor.x, y1: anchor.y, x2: current.x, y2: current.y, color, thickness },
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key, named as the browser reports it (e.g. `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    /// Whether this key deletes the selection.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Del")
    }

    /// Whether this key toggles additive selection while held.
    #[must_use]
    pub fn is_additive_modifier(&self) -> bool {
        self.0 == "Control"
    }
}

/// Clamp a stroke thickness into the supported range.
#[must_use]
pub fn clamp_thickness(thickness: f64) -> f64 {
    if thickness.is_nan() {
        return MIN_THICKNESS;
    }
    thickness.clamp(MIN_THICKNESS, MAX_THICKNESS)
}

/// Style values owned by the surrounding UI and read at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: String,
    pub thickness: f64,
    pub font_size: f64,
    pub shape: ShapeTool,
}

impl Style {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            color: config.default_color.clone(),
            thickness: config.default_thickness,
            font_size: config.default_font_size,
            shape: config.default_shape,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Persistent interaction state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    pub style: Style,
    pub selection: Selection,
    /// True while the additive-selection modifier key is held.
    pub additive: bool,
    /// Placed text box waiting for the host's text entry to finish. Kept
    /// apart from the gesture state so a click that ends text entry does
    /// not lose it.
    pub pending_text: Option<Bounds>,
}

/// The gesture in flight. Each variant carries what the matching
/// pointer-up (or text submission) needs to commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Freehand stroke being captured with the style from gesture start.
    Drawing { points: Vec<Point>, color: String, thickness: f64 },
    /// Shape being dragged out from `anchor`.
    PlacingShape { kind: ShapeTool, anchor: Point, current: Point },
    /// Text box being dragged out from `anchor`.
    PlacingText { anchor: Point, current: Point, font_size: f64 },
    /// Active selected object following the pointer.
    DraggingObject {
        id: ObjectId,
        /// Pointer position minus the object's anchor at pointer-down.
        offset: Point,
    },
    /// Eraser held down.
    Erasing,
}

/// Events delivered to [`crate::engine::EngineCore::handle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        point: Point,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        point: Point,
        /// Whether the primary button is currently held.
        #[serde(default = "held")]
        primary_held: bool,
    },
    PointerUp {
        point: Point,
        #[serde(default)]
        button: Button,
    },
    /// Pointer left the drawing surface.
    PointerLeave,
    TouchStart { point: Point },
    TouchMove { point: Point },
    /// Touch lifted or cancelled.
    TouchEnd,
    KeyDown { key: Key },
    KeyUp { key: Key },
    Resize { width: f64, height: f64 },
    /// The text-entry region lost focus with this content.
    TextSubmitted { text: String },
}

fn held() -> bool {
    true
}
