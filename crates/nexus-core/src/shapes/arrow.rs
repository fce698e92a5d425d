//! Arrow shape (straight line with an arrowhead).

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id, point_in_triangle, point_to_segment_dist};
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

fn default_head_size() -> f64 {
    15.0
}

/// A free-standing arrow. Unlike a connector, its endpoints are fixed
/// canvas coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Size of the arrowhead.
    #[serde(default = "default_head_size")]
    pub head_size: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: new_shape_id(),
            start,
            end,
            head_size: default_head_size(),
            style: ShapeStyle::default(),
        }
    }

    /// Create an arrow with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, start: Point, end: Point) -> Self {
        Self {
            id: id.into(),
            ..Self::new(start, end)
        }
    }

    /// Get the direction vector (normalized).
    pub fn direction(&self) -> Vec2 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(dx / len, dy / len)
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The arrowhead triangle as (tip, left wing, right wing).
    fn head_points(&self) -> (Point, Point, Point) {
        let dir = self.direction();
        let perp = Vec2::new(-dir.y, dir.x);
        let back = Point::new(
            self.end.x - dir.x * self.head_size,
            self.end.y - dir.y * self.head_size,
        );
        let left = Point::new(
            back.x + perp.x * self.head_size * 0.5,
            back.y + perp.y * self.head_size * 0.5,
        );
        let right = Point::new(
            back.x - perp.x * self.head_size * 0.5,
            back.y - perp.y * self.head_size * 0.5,
        );
        (self.end, left, right)
    }
}

impl ShapeTrait for Arrow {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let (tip, left, right) = self.head_points();
        let mut min_x = self.start.x.min(tip.x).min(left.x).min(right.x);
        let mut min_y = self.start.y.min(tip.y).min(left.y).min(right.y);
        let mut max_x = self.start.x.max(tip.x).max(left.x).max(right.x);
        let mut max_y = self.start.y.max(tip.y).max(left.y).max(right.y);
        min_x = min_x.min(self.end.x);
        min_y = min_y.min(self.end.y);
        max_x = max_x.max(self.end.x);
        max_y = max_y.max(self.end.y);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if point_to_segment_dist(point, self.start, self.end)
            <= tolerance + self.style.stroke_width / 2.0
        {
            return true;
        }
        let (tip, left, right) = self.head_points();
        point_in_triangle(point, tip, left, right)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.start == self.end {
            return path;
        }

        path.move_to(self.start);
        path.line_to(self.end);

        let (tip, left, right) = self.head_points();
        path.move_to(tip);
        path.line_to(left);
        path.move_to(tip);
        path.line_to(right);

        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
        let scale = affine.as_coeffs();
        self.head_size *= (scale[0].abs() + scale[3].abs()) / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_creation() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!((arrow.length() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_direction() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let dir = arrow.direction();
        assert!((dir.x - 1.0).abs() < f64::EPSILON);
        assert!(dir.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_shaft() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(arrow.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(!arrow.hit_test(Point::new(50.0, 30.0), 5.0));
    }

    #[test]
    fn test_hit_test_head() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(arrow.hit_test(Point::new(100.0, 0.0), 1.0));
    }
}
