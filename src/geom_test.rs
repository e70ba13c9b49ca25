#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_new_stores_coordinates() {
    let p = pt(3.0, -4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, -4.0);
}

#[test]
fn point_offset_translates() {
    assert_eq!(pt(1.0, 2.0).offset(10.0, -5.0), pt(11.0, -3.0));
}

#[test]
fn point_distance_is_euclidean() {
    assert_eq!(pt(0.0, 0.0).distance(pt(3.0, 4.0)), 5.0);
}

// =============================================================
// normalize_rect
// =============================================================

#[test]
fn normalize_rect_is_order_independent() {
    let forward = normalize_rect(pt(10.0, 10.0), pt(110.0, 50.0));
    let backward = normalize_rect(pt(110.0, 50.0), pt(10.0, 10.0));
    assert_eq!(forward, backward);
    assert_eq!(forward, Bounds { x: 10.0, y: 10.0, width: 100.0, height: 40.0 });
}

#[test]
fn normalize_rect_mixed_corners() {
    let b = normalize_rect(pt(50.0, 0.0), pt(0.0, 30.0));
    assert_eq!(b, Bounds { x: 0.0, y: 0.0, width: 50.0, height: 30.0 });
}

// =============================================================
// point_in_rect
// =============================================================

#[test]
fn rect_contains_interior_and_edges() {
    assert!(point_in_rect(pt(25.0, 25.0), 0.0, 0.0, 50.0, 50.0));
    assert!(point_in_rect(pt(0.0, 0.0), 0.0, 0.0, 50.0, 50.0));
    assert!(point_in_rect(pt(50.0, 50.0), 0.0, 0.0, 50.0, 50.0));
}

#[test]
fn rect_excludes_outside() {
    assert!(!point_in_rect(pt(51.0, 25.0), 0.0, 0.0, 50.0, 50.0));
    assert!(!point_in_rect(pt(25.0, -0.5), 0.0, 0.0, 50.0, 50.0));
}

#[test]
fn rect_negative_size_extends_from_anchor() {
    assert!(point_in_rect(pt(-25.0, -10.0), 0.0, 0.0, -50.0, -20.0));
    assert!(!point_in_rect(pt(25.0, 10.0), 0.0, 0.0, -50.0, -20.0));
}

#[test]
fn rect_zero_size_contains_nothing() {
    assert!(!point_in_rect(pt(0.0, 0.0), 0.0, 0.0, 0.0, 10.0));
    assert!(!point_in_rect(pt(0.0, 0.0), 0.0, 0.0, 10.0, 0.0));
}

// =============================================================
// point_in_circle / point_in_axis_box
// =============================================================

#[test]
fn circle_contains_within_radius() {
    assert!(point_in_circle(pt(25.0, 25.0), pt(25.0, 25.0), 40.0));
    assert!(point_in_circle(pt(65.0, 25.0), pt(25.0, 25.0), 40.0));
    assert!(!point_in_circle(pt(66.0, 25.0), pt(25.0, 25.0), 40.0));
}

#[test]
fn circle_zero_radius_contains_nothing() {
    assert!(!point_in_circle(pt(5.0, 5.0), pt(5.0, 5.0), 0.0));
}

#[test]
fn axis_box_covers_square_around_center() {
    let c = pt(100.0, 100.0);
    assert!(point_in_axis_box(pt(70.0, 130.0), c, 30.0));
    assert!(point_in_axis_box(pt(130.0, 70.0), c, 30.0));
    assert!(!point_in_axis_box(pt(131.0, 100.0), c, 30.0));
}

#[test]
fn axis_box_zero_half_contains_nothing() {
    assert!(!point_in_axis_box(pt(1.0, 1.0), pt(1.0, 1.0), 0.0));
}

// =============================================================
// point_near_segment
// =============================================================

#[test]
fn near_segment_within_threshold() {
    let a = pt(0.0, 0.0);
    let b = pt(100.0, 0.0);
    assert!(point_near_segment(pt(50.0, 9.0), a, b, 10.0));
    assert!(point_near_segment(pt(50.0, -9.0), a, b, 10.0));
}

#[test]
fn near_segment_threshold_is_strict() {
    assert!(!point_near_segment(pt(50.0, 10.0), pt(0.0, 0.0), pt(100.0, 0.0), 10.0));
}

#[test]
fn near_segment_outside_expanded_box() {
    // On the infinite line but past the end by more than the threshold.
    assert!(!point_near_segment(pt(111.0, 0.0), pt(0.0, 0.0), pt(100.0, 0.0), 10.0));
    assert!(point_near_segment(pt(109.0, 0.0), pt(0.0, 0.0), pt(100.0, 0.0), 10.0));
}

#[test]
fn near_segment_diagonal() {
    assert!(point_near_segment(pt(52.0, 48.0), pt(0.0, 0.0), pt(100.0, 100.0), 10.0));
    assert!(!point_near_segment(pt(70.0, 30.0), pt(0.0, 0.0), pt(100.0, 100.0), 10.0));
}

#[test]
fn near_segment_zero_length_never_matches() {
    assert!(!point_near_segment(pt(5.0, 5.0), pt(5.0, 5.0), pt(5.0, 5.0), 10.0));
}

// =============================================================
// distance_to_segment / polyline_within
// =============================================================

#[test]
fn segment_distance_projects_inside() {
    assert_eq!(distance_to_segment(pt(50.0, 7.0), pt(0.0, 0.0), pt(100.0, 0.0)), 7.0);
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    assert_eq!(distance_to_segment(pt(-3.0, 4.0), pt(0.0, 0.0), pt(100.0, 0.0)), 5.0);
    assert_eq!(distance_to_segment(pt(103.0, 4.0), pt(0.0, 0.0), pt(100.0, 0.0)), 5.0);
}

#[test]
fn segment_distance_degenerate_is_point_distance() {
    assert_eq!(distance_to_segment(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0)), 5.0);
}

#[test]
fn polyline_within_mid_segment() {
    let points = [pt(0.0, 0.0), pt(100.0, 0.0)];
    assert!(polyline_within(pt(50.0, 0.0), &points, 16.0));
    assert!(!polyline_within(pt(50.0, 16.0), &points, 16.0));
}

#[test]
fn polyline_within_single_point() {
    assert!(polyline_within(pt(1.0, 1.0), &[pt(0.0, 0.0)], 16.0));
    assert!(!polyline_within(pt(20.0, 0.0), &[pt(0.0, 0.0)], 16.0));
}

#[test]
fn polyline_within_empty_is_false() {
    assert!(!polyline_within(pt(0.0, 0.0), &[], 16.0));
}
