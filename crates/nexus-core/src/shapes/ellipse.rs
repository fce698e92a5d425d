//! Ellipse shape (circles are ellipses with equal radii).

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An ellipse shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: new_shape_id(),
            center,
            radius_x,
            radius_y,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create an ellipse with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: id.into(),
            ..Self::new(center, radius_x, radius_y)
        }
    }

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Create an ellipse inscribed in a rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }

    /// Normalized distance of a point from the center (1.0 = on the rim).
    fn normalized_dist(&self, point: Point) -> f64 {
        if self.radius_x < f64::EPSILON || self.radius_y < f64::EPSILON {
            return f64::INFINITY;
        }
        let dx = (point.x - self.center.x) / self.radius_x;
        let dy = (point.y - self.center.y) / self.radius_y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = self.normalized_dist(point);
        // Tolerance in normalized units, relative to the smaller radius.
        let tol = tolerance / self.radius_x.min(self.radius_y).max(f64::EPSILON);
        if self.style.fill_color.is_some() {
            dist <= 1.0 + tol
        } else {
            let stroke = self.style.stroke_width / 2.0
                / self.radius_x.min(self.radius_y).max(f64::EPSILON);
            (dist - 1.0).abs() <= tol + stroke
        }
    }

    fn to_path(&self) -> BezPath {
        KurboEllipse::new(self.center, kurbo::Vec2::new(self.radius_x, self.radius_y), 0.0)
            .to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.center = affine * self.center;
        let scale = affine.as_coeffs();
        self.radius_x *= scale[0].abs();
        self.radius_y *= scale[3].abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn test_circle() {
        let circle = Ellipse::circle(Point::new(50.0, 50.0), 25.0);
        assert!((circle.radius_x - circle.radius_y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(100.0, 100.0), 50.0, 30.0);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 70.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 150.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_filled() {
        let mut ellipse = Ellipse::circle(Point::new(0.0, 0.0), 10.0);
        ellipse.style.fill_color = Some(SerializableColor::white());
        assert!(ellipse.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(ellipse.hit_test(Point::new(9.0, 0.0), 0.0));
        assert!(!ellipse.hit_test(Point::new(15.0, 0.0), 0.0));
    }

    #[test]
    fn test_hit_test_outline() {
        let ellipse = Ellipse::circle(Point::new(0.0, 0.0), 10.0);
        // Rim hits, center misses when unfilled.
        assert!(ellipse.hit_test(Point::new(10.0, 0.0), 1.0));
        assert!(!ellipse.hit_test(Point::new(0.0, 0.0), 1.0));
    }
}
