//! Hit-testing: maps a pointer position to scene objects.
//!
//! Selection picks at most one object. Under the default
//! [`HitPolicy::TypePriority`] the kinds are searched in a fixed order
//! (rect, circle, triangle, line, text) and the earliest-painted match of the
//! first kind with any match wins, so a rect anywhere under the pointer beats
//! a circle painted above it. [`HitPolicy::Topmost`] instead returns the
//! last-painted match. Strokes are never picked for selection.
//!
//! Erasing is independent of priority: every object under the brush matches.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::doc::{Scene, Shape, ShapeKind};
use crate::geom::{self, Point};

/// Kinds in selection priority order.
const PRIORITY: [ShapeKind; 5] = [
    ShapeKind::Rect,
    ShapeKind::Circle,
    ShapeKind::Triangle,
    ShapeKind::Line,
    ShapeKind::Text,
];

/// How overlapping candidates are ranked by [`hit_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Fixed kind order first, then lowest index.
    #[default]
    TypePriority,
    /// Highest index (visually on top) first.
    Topmost,
}

/// Whether `p` falls inside the pickable region of `shape`.
///
/// `slop` is the line tolerance. Strokes have no pickable region.
#[must_use]
pub fn contains(shape: &Shape, p: Point, slop: f64) -> bool {
    match shape {
        Shape::Rect { x, y, width, height, .. } | Shape::Text { x, y, width, height, .. } => {
            geom::point_in_rect(p, *x, *y, *width, *height)
        }
        Shape::Circle { x, y, radius, .. } => geom::point_in_circle(p, Point::new(*x, *y), *radius),
        Shape::Triangle { x, y, size, .. } => geom::point_in_axis_box(p, Point::new(*x, *y), *size),
        Shape::Line { x1, y1, x2, y2, .. } => {
            geom::point_near_segment(p, Point::new(*x1, *y1), Point::new(*x2, *y2), slop)
        }
        Shape::Stroke { .. } => false,
    }
}

/// Index of the object selected by a click at `p`, if any.
#[must_use]
pub fn hit_test(scene: &Scene, p: Point, policy: HitPolicy, slop: f64) -> Option<usize> {
    match policy {
        HitPolicy::TypePriority => PRIORITY.iter().find_map(|kind| {
            scene
                .iter()
                .position(|obj| obj.shape.kind() == *kind && contains(&obj.shape, p, slop))
        }),
        HitPolicy::Topmost => scene.iter().rposition(|obj| contains(&obj.shape, p, slop)),
    }
}

/// Whether the eraser brush at `p` touches `shape`.
#[must_use]
pub fn erase_hits(shape: &Shape, p: Point, radius: f64, slop: f64) -> bool {
    match shape {
        Shape::Stroke { points, .. } => geom::polyline_within(p, points, radius),
        other => contains(other, p, slop),
    }
}

/// Indices of every object the eraser brush at `p` touches, in paint order.
#[must_use]
pub fn hit_test_erase(scene: &Scene, p: Point, radius: f64, slop: f64) -> Vec<usize> {
    scene
        .iter()
        .enumerate()
        .filter(|(_, obj)| erase_hits(&obj.shape, p, radius, slop))
        .map(|(i, _)| i)
        .collect()
}
