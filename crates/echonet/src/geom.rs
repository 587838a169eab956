//! Planar predicates shared by every generation stage.
//!
//! All functions are pure. Callers are responsible for excluding edge pairs that share an
//! endpoint before asking whether two segments cross.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        distance(self, other)
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Strict counter-clockwise orientation of `a -> b -> c`. Collinear triples are not CCW.
fn ccw(a: Point, b: Point, c: Point) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Returns true when segment `p1p2` crosses segment `p3p4`.
///
/// Uses the strict orientation test: the endpoints of each segment must lie on opposite sides
/// of the other. Collinear segments never cross. Touching configurations (an endpoint exactly
/// on the other segment) are decided by orientation and are not symmetric in general.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    ccw(p1, p3, p4) != ccw(p2, p3, p4) && ccw(p1, p2, p3) != ccw(p1, p2, p4)
}

/// Euclidean distance from `point` to the closest point of segment `start..end`.
pub fn distance_point_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return distance(point, start);
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / len2).clamp(0.0, 1.0);
    distance(point, Point::new(start.x + t * dx, start.y + t * dy))
}

/// Angle in degrees between `vertex -> arm_a` and `vertex -> arm_b`.
///
/// Degenerate arms (zero length) report 180 so they never trip a minimum-angle check.
pub fn angle_degrees(vertex: Point, arm_a: Point, arm_b: Point) -> f64 {
    let (v1x, v1y) = (arm_a.x - vertex.x, arm_a.y - vertex.y);
    let (v2x, v2y) = (arm_b.x - vertex.x, arm_b.y - vertex.y);
    let len1 = (v1x * v1x + v1y * v1y).sqrt();
    let len2 = (v2x * v2x + v2y * v2y).sqrt();
    if len1 == 0.0 || len2 == 0.0 {
        return 180.0;
    }
    let cos = ((v1x * v2x + v1y * v2y) / (len1 * len2)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn crossing_diagonals_intersect() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(100.0, 100.0),
            p(100.0, 0.0),
            p(0.0, 100.0)
        ));
    }

    #[test]
    fn parallel_and_disjoint_segments_do_not_intersect() {
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(100.0, 0.0),
            p(0.0, 10.0),
            p(100.0, 10.0)
        ));
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(10.0, 10.0),
            p(20.0, 0.0),
            p(30.0, -10.0)
        ));
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(20.0, 0.0),
            p(30.0, 0.0)
        ));
    }

    #[test]
    fn intersection_is_symmetric() {
        let (a, b, c, d) = (p(3.0, 1.0), p(40.0, 70.0), p(-5.0, 60.0), p(80.0, 2.0));
        let expected = segments_intersect(a, b, c, d);
        assert!(expected);
        assert_eq!(segments_intersect(c, d, a, b), expected);
        assert_eq!(segments_intersect(b, a, d, c), expected);
    }

    #[test]
    fn point_to_segment_clamps_to_endpoints() {
        let (s, e) = (p(0.0, 0.0), p(10.0, 0.0));
        assert_eq!(distance_point_to_segment(p(5.0, 3.0), s, e), 3.0);
        assert_eq!(distance_point_to_segment(p(-3.0, 4.0), s, e), 5.0);
        assert_eq!(distance_point_to_segment(p(13.0, -4.0), s, e), 5.0);
    }

    #[test]
    fn point_to_degenerate_segment_is_point_distance() {
        let s = p(1.0, 1.0);
        assert_eq!(distance_point_to_segment(p(4.0, 5.0), s, s), 5.0);
    }

    #[test]
    fn angle_between_arms() {
        let o = p(0.0, 0.0);
        assert!((angle_degrees(o, p(1.0, 0.0), p(0.0, 5.0)) - 90.0).abs() < 1e-9);
        assert!((angle_degrees(o, p(1.0, 0.0), p(-2.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!(angle_degrees(o, p(1.0, 0.0), p(3.0, 0.0)).abs() < 1e-6);
    }

    #[test]
    fn angle_with_zero_length_arm_is_straight() {
        let o = p(2.0, 2.0);
        assert_eq!(angle_degrees(o, o, p(5.0, 5.0)), 180.0);
        assert!(!angle_degrees(o, p(5.0, 5.0), o).is_nan());
    }
}
