//! Star shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

fn default_points() -> u32 {
    5
}

fn default_inner_ratio() -> f64 {
    0.5
}

/// A star polygon inscribed in its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box.
    pub height: f64,
    /// Number of star points.
    #[serde(default = "default_points")]
    pub points: u32,
    /// Inner radius as a fraction of the outer radius.
    #[serde(default = "default_inner_ratio")]
    pub inner_ratio: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Star {
    /// Create a new five-pointed star.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: new_shape_id(),
            position,
            width,
            height,
            points: default_points(),
            inner_ratio: default_inner_ratio(),
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create a star with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, width, height)
        }
    }

    fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Alternating outer and inner vertices, starting at the top point.
    pub fn vertices(&self) -> Vec<Point> {
        let center = self.center();
        let outer_rx = self.width / 2.0;
        let outer_ry = self.height / 2.0;
        let n = self.points.max(3) as usize;

        let mut pts = Vec::with_capacity(n * 2);
        for i in 0..n * 2 {
            let angle = -PI / 2.0 + (i as f64) * PI / (n as f64);
            let ratio = if i % 2 == 0 { 1.0 } else { self.inner_ratio };
            pts.push(Point::new(
                center.x + angle.cos() * outer_rx * ratio,
                center.y + angle.sin() * outer_ry * ratio,
            ));
        }
        pts
    }
}

impl ShapeTrait for Star {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Bounding box with tolerance; exact star-polygon containment is
        // not worth the cost for selection.
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        let pts = self.vertices();
        let mut path = BezPath::new();
        if let Some(first) = pts.first() {
            path.move_to(*first);
            for p in &pts[1..] {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.position = affine * self.position;
        let scale = affine.as_coeffs();
        self.width *= scale[0].abs();
        self.height *= scale[3].abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_vertices() {
        let star = Star::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let pts = star.vertices();
        assert_eq!(pts.len(), 10);
        // First vertex is the top point.
        assert!((pts[0].x - 50.0).abs() < 1e-9);
        assert!(pts[0].y.abs() < 1e-9);
    }

    #[test]
    fn test_star_path_closed() {
        let star = Star::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let path = star.to_path();
        assert!(!path.elements().is_empty());
    }

    #[test]
    fn test_hit_test() {
        let star = Star::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(star.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(!star.hit_test(Point::new(200.0, 50.0), 0.0));
    }
}
