//! Canvas document: the ordered shape sequence plus canvas background.
//!
//! Transient UI state (selection, tool mode, draw settings) lives on the
//! store, not here; only the document is persisted.

use crate::shapes::{Connector, ConnectorGeometry, SerializableColor, Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Current tool mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolMode {
    #[default]
    Select,
    Draw,
    Erase,
}

/// Canvas background pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundPattern {
    #[default]
    Solid,
    Dots,
    Grid,
    Lines,
}

/// Draw-tool settings applied to newly drawn shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSettings {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
        }
    }
}

fn default_background() -> SerializableColor {
    SerializableColor::white()
}

/// A canvas document: shapes in paint order plus background styling.
///
/// Order is paint order, back to front; appending places a shape
/// front-most. All mutation goes through the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes, keyed by id.
    shapes: HashMap<ShapeId, Shape>,
    /// Paint order of shape ids (back to front).
    order: Vec<ShapeId>,
    /// Background color.
    #[serde(default = "default_background")]
    pub background_color: SerializableColor,
    /// Background pattern.
    #[serde(default)]
    pub background_pattern: BackgroundPattern,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            order: Vec::new(),
            background_color: default_background(),
            background_pattern: BackgroundPattern::default(),
        }
    }

    /// Append a shape at the front of the paint order.
    pub(crate) fn insert_shape(&mut self, shape: Shape) {
        let id = shape.id().to_string();
        self.order.push(id.clone());
        self.shapes.insert(id, shape);
    }

    /// Remove a shape. Returns the removed shape, if any.
    pub(crate) fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        self.order.retain(|shape_id| shape_id != id);
        self.shapes.remove(id)
    }

    pub(crate) fn get_shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// Get a shape by id.
    pub fn get_shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Whether a shape with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Shapes in paint order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shape ids in paint order (back to front).
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Resolve a connector's geometry against the current document.
    ///
    /// Returns None when the id is not a connector or when either
    /// endpoint shape is missing, in which case the connector renders
    /// as absent.
    pub fn connector_geometry(&self, id: &str) -> Option<ConnectorGeometry> {
        let connector = self.get_shape(id)?.as_connector()?;
        self.resolve_connector(connector)
    }

    fn resolve_connector(&self, connector: &Connector) -> Option<ConnectorGeometry> {
        let from = self.get_shape(&connector.from_shape_id)?;
        let to = self.get_shape(&connector.to_shape_id)?;
        Some(connector.geometry(from, to))
    }

    /// Get the bounding box of all shapes. Connectors contribute their
    /// resolved geometry; dangling connectors contribute nothing.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for shape in self.shapes.values() {
            let bounds = match shape {
                Shape::Connector(c) => match self.resolve_connector(c) {
                    Some(geo) => geo.bounds(),
                    None => continue,
                },
                other => other.bounds(),
            };
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Find shapes at a point, front to back (selection priority).
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<&ShapeId> {
        self.order
            .iter()
            .rev()
            .filter(|id| {
                self.shapes
                    .get(*id)
                    .map(|s| s.hit_test(point, tolerance))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Bring a shape to the front (topmost). Unknown ids are ignored.
    pub(crate) fn bring_to_front(&mut self, id: &str) {
        if self.shapes.contains_key(id) {
            self.order.retain(|shape_id| shape_id != id);
            self.order.push(id.to_string());
        }
    }

    /// Send a shape to the back (bottommost). Unknown ids are ignored.
    pub(crate) fn send_to_back(&mut self, id: &str) {
        if self.shapes.contains_key(id) {
            self.order.retain(|shape_id| shape_id != id);
            self.order.insert(0, id.to_string());
        }
    }

    /// Move a shape one layer forward. Returns true if it moved.
    pub(crate) fn bring_forward(&mut self, id: &str) -> bool {
        if let Some(pos) = self.order.iter().position(|shape_id| shape_id == id) {
            if pos < self.order.len() - 1 {
                self.order.swap(pos, pos + 1);
                return true;
            }
        }
        false
    }

    /// Move a shape one layer backward. Returns true if it moved.
    pub(crate) fn send_backward(&mut self, id: &str) -> bool {
        if let Some(pos) = self.order.iter().position(|shape_id| shape_id == id) {
            if pos > 0 {
                self.order.swap(pos, pos - 1);
                return true;
            }
        }
        false
    }

    /// Clone the shape state for a history snapshot.
    pub(crate) fn snapshot_parts(&self) -> (HashMap<ShapeId, Shape>, Vec<ShapeId>) {
        (self.shapes.clone(), self.order.clone())
    }

    /// Restore shape state from a history snapshot, leaving background
    /// and identity untouched.
    pub(crate) fn restore_parts(&mut self, shapes: HashMap<ShapeId, Shape>, order: Vec<ShapeId>) {
        self.shapes = shapes;
        self.order = order;
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Connector, Rectangle, SerializableColor};

    fn rect(id: &str, x: f64, y: f64) -> Shape {
        let mut r = Rectangle::with_id(id, Point::new(x, y), 100.0, 100.0);
        r.style.fill_color = Some(SerializableColor::white());
        Shape::Rectangle(r)
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(!doc.id.is_empty());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut doc = Document::new();
        doc.insert_shape(rect("1", 0.0, 0.0));
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape("1").is_some());

        let removed = doc.remove_shape("1");
        assert!(removed.is_some());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_paint_order() {
        let mut doc = Document::new();
        doc.insert_shape(rect("1", 0.0, 0.0));
        doc.insert_shape(rect("2", 50.0, 50.0));
        assert_eq!(doc.order(), ["1".to_string(), "2".to_string()]);

        doc.bring_to_front("1");
        assert_eq!(doc.order(), ["2".to_string(), "1".to_string()]);

        doc.send_to_back("1");
        assert_eq!(doc.order(), ["1".to_string(), "2".to_string()]);

        assert!(doc.bring_forward("1"));
        assert!(!doc.bring_forward("1")); // already front-most
        assert!(doc.send_backward("1"));
        assert!(!doc.send_backward("1")); // already back-most
    }

    #[test]
    fn test_shapes_at_point_front_first() {
        let mut doc = Document::new();
        doc.insert_shape(rect("1", 0.0, 0.0));
        doc.insert_shape(rect("2", 50.0, 50.0));

        let hits = doc.shapes_at_point(Point::new(75.0, 75.0), 0.0);
        assert_eq!(hits, [&"2".to_string(), &"1".to_string()]);

        let hits = doc.shapes_at_point(Point::new(25.0, 25.0), 0.0);
        assert_eq!(hits, [&"1".to_string()]);
    }

    #[test]
    fn test_connector_geometry_dangling() {
        let mut doc = Document::new();
        doc.insert_shape(rect("1", 0.0, 0.0));
        doc.insert_shape(Shape::Connector(Connector::with_id("c", "1", "2")));

        // "2" does not exist: the connector resolves to nothing.
        assert!(doc.connector_geometry("c").is_none());

        doc.insert_shape(rect("2", 200.0, 0.0));
        let geo = doc.connector_geometry("c").unwrap();
        assert_eq!(geo.start, Point::new(50.0, 50.0));
        assert_eq!(geo.end, Point::new(250.0, 50.0));
    }

    #[test]
    fn test_bounds_union_over_shapes() {
        let mut doc = Document::new();
        assert!(doc.bounds().is_none());

        doc.insert_shape(rect("1", 0.0, 0.0));
        doc.insert_shape(rect("2", 300.0, 200.0));

        let bounds = doc.bounds().unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn test_bounds_skip_dangling_connector() {
        let mut doc = Document::new();
        doc.insert_shape(rect("1", 0.0, 0.0));
        doc.insert_shape(Shape::Connector(Connector::with_id("c", "1", "gone")));

        // The dangling connector contributes nothing.
        assert_eq!(doc.bounds().unwrap(), Rect::new(0.0, 0.0, 100.0, 100.0));

        // Once resolvable, its center-to-center span widens the union.
        doc.insert_shape(rect("gone", 500.0, 0.0));
        let bounds = doc.bounds().unwrap();
        assert!(bounds.x1 >= 550.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new();
        doc.insert_shape(rect("1", 0.0, 0.0));
        doc.background_color = SerializableColor::new(240, 240, 240, 255);
        doc.background_pattern = BackgroundPattern::Dots;

        let json = doc.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();

        assert_eq!(loaded.id, doc.id);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.order(), doc.order());
        assert_eq!(loaded.background_pattern, BackgroundPattern::Dots);
    }
}
