//! Checklist shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

fn default_font_size() -> f64 {
    16.0
}

/// One row of a checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable id so rows can be toggled while the list is edited.
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: super::new_shape_id(),
            text: text.into(),
            checked: false,
        }
    }
}

/// A checklist: a vertical stack of checkbox rows. Width and height are
/// derived from the items by the auto-size pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Derived width.
    #[serde(default)]
    pub width: f64,
    /// Derived height.
    #[serde(default)]
    pub height: f64,
    /// The rows, in display order.
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    /// Font size in canvas units.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Checklist {
    /// Inner padding around the rows.
    pub const PADDING: f64 = 8.0;

    /// Width reserved for the checkbox glyph in each row.
    pub const CHECKBOX_WIDTH: f64 = 22.0;

    /// Create a checklist with the given rows.
    pub fn new(position: Point, items: Vec<ChecklistItem>) -> Self {
        Self {
            id: new_shape_id(),
            position,
            width: 0.0,
            height: 0.0,
            items,
            font_size: default_font_size(),
            style: ShapeStyle::default(),
        }
    }

    /// Create a checklist with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, items: Vec<ChecklistItem>) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, items)
        }
    }

    /// Append a row. Returns the new row's id.
    pub fn add_item(&mut self, text: impl Into<String>) -> String {
        let item = ChecklistItem::new(text);
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Toggle a row's checked state. Unknown item ids are ignored.
    pub fn toggle_item(&mut self, item_id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.checked = !item.checked;
        }
    }

    /// Remove a row. Unknown item ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|i| i.id != item_id);
    }

    /// Height of one row at the current font size.
    pub fn row_height(&self) -> f64 {
        self.font_size * 1.5
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width.max(Self::CHECKBOX_WIDTH),
            self.position.y + self.height.max(self.row_height()),
        )
    }
}

impl ShapeTrait for Checklist {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_rect().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
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
        self.font_size *= (scale[0].abs() + scale[3].abs()) / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_item() {
        let mut list = Checklist::new(
            Point::ZERO,
            vec![ChecklistItem::new("one"), ChecklistItem::new("two")],
        );
        let item_id = list.items[0].id.clone();

        assert!(!list.items[0].checked);
        list.toggle_item(&item_id);
        assert!(list.items[0].checked);
        assert!(!list.items[1].checked);

        // Unknown row id is ignored.
        list.toggle_item("missing");
        assert!(list.items[0].checked);
    }

    #[test]
    fn test_add_and_remove_item() {
        let mut list = Checklist::new(Point::ZERO, Vec::new());
        let id = list.add_item("buy milk");
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, id);

        list.remove_item(&id);
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_item_ids_unique() {
        let a = ChecklistItem::new("a");
        let b = ChecklistItem::new("b");
        assert_ne!(a.id, b.id);
    }
}
