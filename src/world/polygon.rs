//! Segment and polygon primitives for the region model.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// A line segment defined by its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2D {
    /// Start point of the segment.
    pub start: Point2D,
    /// End point of the segment.
    pub end: Point2D,
}

impl Segment2D {
    /// Create a new segment from two points.
    #[inline]
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Point along the segment at parameter t (0 = start, 1 = end).
    #[inline]
    pub fn point_at(&self, t: f32) -> Point2D {
        self.start + (self.end - self.start) * t
    }

    /// Distance from a point to the closest point on this segment.
    pub fn distance_to_point(&self, point: Point2D) -> f32 {
        let dir = self.end - self.start;
        let len_sq = dir.dot(dir);
        if len_sq <= f32::EPSILON {
            return self.start.distance(point);
        }
        let t = ((point - self.start).dot(dir) / len_sq).clamp(0.0, 1.0);
        self.point_at(t).distance(point)
    }
}

/// A simple polygon given by its vertices in order.
///
/// Winding direction does not matter; containment uses even-odd ray
/// crossing. Polygons are not required to be convex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon2D {
    vertices: Vec<Point2D>,
}

impl Polygon2D {
    /// Create a polygon from vertices in order.
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle between two corner points.
    pub fn rectangle(min: Point2D, max: Point2D) -> Self {
        Self::new(vec![
            Point2D::new(min.x, min.y),
            Point2D::new(max.x, min.y),
            Point2D::new(max.x, max.y),
            Point2D::new(min.x, max.y),
        ])
    }

    /// Polygon vertices in order.
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Iterate over the boundary segments, closing the loop.
    pub fn segments(&self) -> impl Iterator<Item = Segment2D> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment2D::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Even-odd point containment test.
    pub fn contains(&self, point: Point2D) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Minimum distance from a point to the polygon boundary.
    ///
    /// Returns `f32::INFINITY` for a polygon with no vertices.
    pub fn distance_to_boundary(&self, point: Point2D) -> f32 {
        self.segments()
            .map(|s| s.distance_to_point(point))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(f32::INFINITY)
    }

    /// Axis-aligned bounding box as (min, max) corners.
    ///
    /// Returns a degenerate box at the origin for an empty polygon.
    pub fn bounding_box(&self) -> (Point2D, Point2D) {
        let mut min = Point2D::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point2D::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        if min.x.is_infinite() {
            (Point2D::ZERO, Point2D::ZERO)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_distance_to_point() {
        let s = Segment2D::new(Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0));

        // Perpendicular projection inside the segment
        assert_relative_eq!(s.distance_to_point(Point2D::new(2.0, 3.0)), 3.0, epsilon = 1e-6);
        // Beyond the end, distance is to the endpoint
        assert_relative_eq!(s.distance_to_point(Point2D::new(7.0, 4.0)), 5.0, epsilon = 1e-6);
        // Degenerate segment
        let d = Segment2D::new(Point2D::new(1.0, 1.0), Point2D::new(1.0, 1.0));
        assert_relative_eq!(d.distance_to_point(Point2D::new(4.0, 5.0)), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rectangle_contains() {
        let poly = Polygon2D::rectangle(Point2D::new(0.0, 0.0), Point2D::new(4.0, 3.0));

        assert!(poly.contains(Point2D::new(2.0, 1.5)));
        assert!(!poly.contains(Point2D::new(-1.0, 1.5)));
        assert!(!poly.contains(Point2D::new(2.0, 3.5)));
    }

    #[test]
    fn test_concave_contains() {
        // L-shape: 4x4 square with the top-right 2x2 quadrant removed
        let poly = Polygon2D::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 2.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(2.0, 4.0),
            Point2D::new(0.0, 4.0),
        ]);

        assert!(poly.contains(Point2D::new(1.0, 3.0)));
        assert!(poly.contains(Point2D::new(3.0, 1.0)));
        assert!(!poly.contains(Point2D::new(3.0, 3.0)));
    }

    #[test]
    fn test_distance_to_boundary() {
        let poly = Polygon2D::rectangle(Point2D::new(0.0, 0.0), Point2D::new(4.0, 4.0));
        assert_relative_eq!(
            poly.distance_to_boundary(Point2D::new(2.0, 1.0)),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_bounding_box() {
        let poly = Polygon2D::new(vec![
            Point2D::new(1.0, 2.0),
            Point2D::new(-1.0, 0.5),
            Point2D::new(3.0, -2.0),
        ]);
        let (min, max) = poly.bounding_box();
        assert_eq!(min, Point2D::new(-1.0, -2.0));
        assert_eq!(max, Point2D::new(3.0, 2.0));
    }

    #[test]
    fn test_segments_close_the_loop() {
        let poly = Polygon2D::rectangle(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0));
        let segments: Vec<_> = poly.segments().collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3].end, segments[0].start);
    }
}
