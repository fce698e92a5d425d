//! Triangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id, point_in_triangle, point_to_segment_dist};
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// An isosceles triangle inscribed in its bounding box, apex at the top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box.
    pub height: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Triangle {
    /// Create a new triangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: new_shape_id(),
            position,
            width,
            height,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create a triangle with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, width, height)
        }
    }

    /// The three vertices: apex, bottom-right, bottom-left.
    pub fn vertices(&self) -> [Point; 3] {
        [
            Point::new(self.position.x + self.width / 2.0, self.position.y),
            Point::new(self.position.x + self.width, self.position.y + self.height),
            Point::new(self.position.x, self.position.y + self.height),
        ]
    }
}

impl ShapeTrait for Triangle {
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
        let [a, b, c] = self.vertices();
        if self.style.fill_color.is_some() && point_in_triangle(point, a, b, c) {
            return true;
        }
        let reach = tolerance + self.style.stroke_width / 2.0;
        point_to_segment_dist(point, a, b) <= reach
            || point_to_segment_dist(point, b, c) <= reach
            || point_to_segment_dist(point, c, a) <= reach
    }

    fn to_path(&self) -> BezPath {
        let [a, b, c] = self.vertices();
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();
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
