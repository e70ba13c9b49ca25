//! Document model: drawable shapes and the ordered scene that owns them.
//!
//! `Shape` is the closed set of things that can be on the board. The scene
//! wraps each shape with a stable [`ObjectId`] and keeps them in insertion
//! order, which is also paint order (earlier objects are drawn beneath later
//! ones).
//!
//! The store operations address objects by position, as the gesture layer
//! and the hit tester do. Positions shift when objects are removed; anything
//! that must survive a removal (the selection) holds ids instead.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::geom::Point;

/// Unique identifier for a scene object.
pub type ObjectId = Uuid;

/// Errors raised by scene mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("index {index} out of range for scene of {len} objects")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Discriminant of a [`Shape`], used for hit priority and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Stroke,
    Rect,
    Circle,
    Triangle,
    Line,
    Text,
}

/// A drawable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Freehand polyline.
    Stroke { points: Vec<Point>, color: String, thickness: f64 },
    /// Rectangle anchored at `(x, y)`; negative sizes extend left/up.
    Rect { x: f64, y: f64, width: f64, height: f64, color: String, thickness: f64 },
    /// Circle centered at `(x, y)`.
    Circle { x: f64, y: f64, radius: f64, color: String, thickness: f64 },
    /// Apex-up isosceles triangle anchored at `(x, y)`.
    Triangle { x: f64, y: f64, size: f64, color: String, thickness: f64 },
    /// Straight segment.
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: String, thickness: f64 },
    /// Boxed, word-wrapped text.
    Text { x: f64, y: f64, width: f64, height: f64, text: String, font_size: f64 },
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Stroke { .. } => ShapeKind::Stroke,
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Triangle { .. } => ShapeKind::Triangle,
            Self::Line { .. } => ShapeKind::Line,
            Self::Text { .. } => ShapeKind::Text,
        }
    }

    /// Reference point used for drag offsets: the first stroke point, the
    /// rect/text corner, the circle center, the triangle anchor, or the
    /// line's first endpoint.
    #[must_use]
    pub fn anchor(&self) -> Point {
        match self {
            Self::Stroke { points, .. } => points.first().copied().unwrap_or_default(),
            Self::Rect { x, y, .. }
            | Self::Circle { x, y, .. }
            | Self::Triangle { x, y, .. }
            | Self::Text { x, y, .. } => Point::new(*x, *y),
            Self::Line { x1, y1, .. } => Point::new(*x1, *y1),
        }
    }

    /// Copy of this shape with its anchor moved to `to`, dimensions unchanged.
    ///
    /// Lines and strokes translate every point by the same delta.
    #[must_use]
    pub fn moved_to(&self, to: Point) -> Shape {
        let from = self.anchor();
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let mut moved = self.clone();
        match &mut moved {
            Self::Stroke { points, .. } => {
                for p in points.iter_mut() {
                    *p = p.offset(dx, dy);
                }
            }
            Self::Rect { x, y, .. }
            | Self::Circle { x, y, .. }
            | Self::Triangle { x, y, .. }
            | Self::Text { x, y, .. } => {
                *x = to.x;
                *y = to.y;
            }
            Self::Line { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
        }
        moved
    }

    /// Copy of this text box with a new (clamped) font size. `None` for
    /// every other kind.
    #[must_use]
    pub fn with_font_size(&self, size: f64) -> Option<Shape> {
        match self {
            Self::Text { x, y, width, height, text, .. } => Some(Self::Text {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
                text: text.clone(),
                font_size: clamp_font_size(size),
            }),
            _ => None,
        }
    }
}

/// Clamp a font size into the supported range.
#[must_use]
pub fn clamp_font_size(size: f64) -> f64 {
    if size.is_nan() {
        return MIN_FONT_SIZE;
    }
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// A shape as stored in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub shape: Shape,
}

/// Ordered collection of scene objects. Index order is paint order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Append a shape on top of everything else and return its new id.
    pub fn append(&mut self, shape: Shape) -> ObjectId {
        let id = Uuid::new_v4();
        self.objects.push(SceneObject { id, shape });
        id
    }

    /// Replace the shape at `index`, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn replace_at(&mut self, index: usize, shape: Shape) -> Result<(), SceneError> {
        let len = self.objects.len();
        let Some(slot) = self.objects.get_mut(index) else {
            return Err(SceneError::IndexOutOfRange { index, len });
        };
        slot.shape = shape;
        Ok(())
    }

    /// Remove every object matching `pred`; returns how many were removed.
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&SceneObject) -> bool,
    {
        let before = self.objects.len();
        self.objects.retain(|obj| !pred(obj));
        before - self.objects.len()
    }

    /// Remove the objects at the given positions; out-of-range positions are
    /// ignored. Returns how many were removed.
    pub fn remove_indices(&mut self, indices: &HashSet<usize>) -> usize {
        let before = self.objects.len();
        let mut position = 0;
        self.objects.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        before - self.objects.len()
    }

    /// Object at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Position of the object with `id`, if present.
    #[must_use]
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|obj| obj.id == *id)
    }

    /// Object with `id`, if present.
    #[must_use]
    pub fn get_by_id(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.id == *id)
    }

    /// Objects in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, SceneObject> {
        self.objects.iter()
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
