//! Geometry primitives: points, containment, and segment distance.
//!
//! Everything here is a pure function over plain values. Hit-testing and the
//! eraser build on these predicates; none of them know about the scene.
//!
//! Degenerate regions (zero width, height, radius, or length) never contain a
//! point, so zero-area objects stay in the scene but cannot be picked.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle with non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangle spanned by two corners, in either order.
#[must_use]
pub fn normalize_rect(a: Point, b: Point) -> Bounds {
    Bounds {
        x: a.x.min(b.x),
        y: a.y.min(b.y),
        width: (b.x - a.x).abs(),
        height: (b.y - a.y).abs(),
    }
}

/// Whether `p` lies inside the rectangle at `(x, y)` with signed size `(w, h)`.
///
/// Bounds are inclusive. A negative size extends left/up from the anchor.
#[must_use]
pub fn point_in_rect(p: Point, x: f64, y: f64, w: f64, h: f64) -> bool {
    if w == 0.0 || h == 0.0 {
        return false;
    }
    let (left, right) = if w < 0.0 { (x + w, x) } else { (x, x + w) };
    let (top, bottom) = if h < 0.0 { (y + h, y) } else { (y, y + h) };
    p.x >= left && p.x <= right && p.y >= top && p.y <= bottom
}

/// Whether `p` lies within `radius` of `center`.
#[must_use]
pub fn point_in_circle(p: Point, center: Point, radius: f64) -> bool {
    radius > 0.0 && p.distance(center) <= radius
}

/// Whether `p` lies inside the square of half-width `half` around `center`.
///
/// Triangles are picked through this box rather than their outline; the box
/// always covers the drawn triangle.
#[must_use]
pub fn point_in_axis_box(p: Point, center: Point, half: f64) -> bool {
    half > 0.0
        && p.x >= center.x - half
        && p.x <= center.x + half
        && p.y >= center.y - half
        && p.y <= center.y + half
}

/// Whether `p` is within `threshold` of the segment from `a` to `b`.
///
/// Requires both a perpendicular distance to the infinite line below
/// `threshold` and a position inside the segment's bounding box grown by
/// `threshold`.
#[must_use]
pub fn point_near_segment(p: Point, a: Point, b: Point, threshold: f64) -> bool {
    let len = a.distance(b);
    if len == 0.0 {
        return false;
    }
    let cross = (b.y - a.y) * p.x - (b.x - a.x) * p.y + b.x * a.y - b.y * a.x;
    let perpendicular = cross.abs() / len;
    perpendicular < threshold
        && p.x >= a.x.min(b.x) - threshold
        && p.x <= a.x.max(b.x) + threshold
        && p.y >= a.y.min(b.y) - threshold
        && p.y <= a.y.max(b.y) + threshold
}

/// Shortest distance from `p` to the finite segment from `a` to `b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Whether any part of the polyline through `points` lies strictly within
/// `radius` of `p`.
#[must_use]
pub fn polyline_within(p: Point, points: &[Point], radius: f64) -> bool {
    match points {
        [] => false,
        [only] => p.distance(*only) < radius,
        _ => points
            .windows(2)
            .any(|pair| distance_to_segment(p, pair[0], pair[1]) < radius),
    }
}
