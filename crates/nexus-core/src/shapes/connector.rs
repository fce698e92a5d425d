//! Connector shape.
//!
//! A connector has no geometry of its own: its endpoints are recomputed
//! each render from the live positions of the two shapes it references.
//! If either endpoint shape is missing the connector resolves to nothing
//! and renders as absent. A dangling connector is valid transient state
//! (e.g. during a delete-then-undo sequence), never an error.

use super::{Shape, ShapeId, ShapeStyle, new_shape_id};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A connector between two shapes, optionally bent through a
/// user-dragged control point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub(crate) id: ShapeId,
    /// Id of the shape the connector starts at.
    pub from_shape_id: ShapeId,
    /// Id of the shape the connector ends at.
    pub to_shape_id: ShapeId,
    /// Optional curvature control point in canvas coordinates.
    #[serde(default)]
    pub control: Option<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Connector {
    /// Create a connector between two shape ids.
    pub fn new(from_shape_id: impl Into<ShapeId>, to_shape_id: impl Into<ShapeId>) -> Self {
        Self {
            id: new_shape_id(),
            from_shape_id: from_shape_id.into(),
            to_shape_id: to_shape_id.into(),
            control: None,
            style: ShapeStyle::default(),
        }
    }

    /// Create a connector with a caller-supplied id.
    pub fn with_id(
        id: impl Into<ShapeId>,
        from_shape_id: impl Into<ShapeId>,
        to_shape_id: impl Into<ShapeId>,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(from_shape_id, to_shape_id)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this connector references the given shape id.
    pub fn references(&self, shape_id: &str) -> bool {
        self.from_shape_id == shape_id || self.to_shape_id == shape_id
    }

    /// Compute geometry from the two resolved endpoint shapes
    /// (center-to-center).
    pub fn geometry(&self, from: &Shape, to: &Shape) -> ConnectorGeometry {
        ConnectorGeometry {
            start: from.bounds().center(),
            end: to.bounds().center(),
            control: self.control,
        }
    }
}

/// Resolved connector endpoints for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorGeometry {
    pub start: Point,
    pub end: Point,
    pub control: Option<Point>,
}

impl ConnectorGeometry {
    /// Build the drawable path: a quadratic curve through the control
    /// point, or a straight segment without one.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        match self.control {
            Some(control) => path.quad_to(control, self.end),
            None => path.line_to(self.end),
        }
        path
    }

    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::from_points(self.start, self.end);
        if let Some(c) = self.control {
            rect = rect.union_pt(c);
        }
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;

    #[test]
    fn test_geometry_center_to_center() {
        let a = Shape::Rectangle(Rectangle::with_id("a", Point::new(0.0, 0.0), 10.0, 10.0));
        let b = Shape::Rectangle(Rectangle::with_id("b", Point::new(100.0, 0.0), 10.0, 10.0));
        let conn = Connector::new("a", "b");

        let geo = conn.geometry(&a, &b);
        assert_eq!(geo.start, Point::new(5.0, 5.0));
        assert_eq!(geo.end, Point::new(105.0, 5.0));
        assert!(geo.control.is_none());
    }

    #[test]
    fn test_references() {
        let conn = Connector::new("a", "b");
        assert!(conn.references("a"));
        assert!(conn.references("b"));
        assert!(!conn.references("c"));
    }

    #[test]
    fn test_path_with_control_point() {
        let geo = ConnectorGeometry {
            start: Point::new(0.0, 0.0),
            end: Point::new(100.0, 0.0),
            control: Some(Point::new(50.0, 40.0)),
        };
        let path = geo.to_path();
        assert_eq!(path.elements().len(), 2);
        assert!(geo.bounds().contains(Point::new(50.0, 20.0)));
    }
}
