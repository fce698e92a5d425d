//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font style variants, mirroring the CSS `font-style`/`font-weight` pair
/// the client sends as a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// Text decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

fn default_font_family() -> String {
    "Inter".to_string()
}

fn default_font_size() -> f64 {
    Text::DEFAULT_FONT_SIZE
}

/// A text shape.
///
/// Width and height are derived from content by the auto-size pass and
/// overwritten on every content/font change; manual resize is not honored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Position (top-left corner of the text bounding box).
    pub position: Point,
    /// Derived width of the laid-out text.
    #[serde(default)]
    pub width: f64,
    /// Derived height of the laid-out text.
    #[serde(default)]
    pub height: f64,
    /// The text content.
    pub content: String,
    /// Font family name as the renderer resolves it.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Font size in canvas units.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: TextAlign,
    /// Font style.
    #[serde(default)]
    pub font_style: FontStyle,
    /// Text decoration.
    #[serde(default)]
    pub text_decoration: TextDecoration,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text shape. Size starts at zero and is filled in by
    /// the first auto-size pass.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: new_shape_id(),
            position,
            width: 0.0,
            height: 0.0,
            content,
            font_family: default_font_family(),
            font_size: Self::DEFAULT_FONT_SIZE,
            align: TextAlign::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create a text shape with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, content: String) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, content)
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the text content.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        // Guard against a not-yet-measured shape so selection still works.
        let width = self.width.max(20.0);
        let height = self.height.max(self.font_size * 1.2);
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Text has no vector path of its own; expose the bounding box for
        // selection rendering.
        let bounds = self.bounds();
        let mut path = BezPath::new();
        path.move_to(Point::new(bounds.x0, bounds.y0));
        path.line_to(Point::new(bounds.x1, bounds.y0));
        path.line_to(Point::new(bounds.x1, bounds.y1));
        path.line_to(Point::new(bounds.x0, bounds.y1));
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
        // Uniform scale adjusts the font size; layout re-derives the rest.
        let coeffs = affine.as_coeffs();
        let scale = (coeffs[0].abs() + coeffs[3].abs()) / 2.0;
        if (scale - 1.0).abs() > 0.01 {
            self.font_size *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = Text::new(Point::new(100.0, 100.0), "Hello".to_string());
        assert_eq!(text.content(), "Hello");
        assert!((text.font_size - Text::DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_with_font_size() {
        let text = Text::new(Point::ZERO, "Test".to_string()).with_font_size(32.0);
        assert!((text.font_size - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmeasured_bounds_nonzero() {
        let text = Text::new(Point::new(100.0, 100.0), "Hi".to_string());
        let bounds = text.bounds();
        assert!(bounds.width() > 0.0);
        assert!(bounds.height() > 0.0);
    }

    #[test]
    fn test_hit_test() {
        let mut text = Text::new(Point::new(100.0, 100.0), "Hello World".to_string());
        text.width = 120.0;
        text.height = 24.0;
        assert!(text.hit_test(Point::new(150.0, 110.0), 0.0));
        assert!(!text.hit_test(Point::new(0.0, 0.0), 0.0));
    }

    #[test]
    fn test_defaults_survive_old_documents() {
        // A document written before align/decoration existed.
        let json = r#"{
            "id": "t1",
            "position": {"x": 0.0, "y": 0.0},
            "content": "old",
            "style": {
                "stroke_color": {"r": 0, "g": 0, "b": 0, "a": 255},
                "stroke_width": 2.0,
                "fill_color": null
            }
        }"#;
        let text: Text = serde_json::from_str(json).unwrap();
        assert_eq!(text.align, TextAlign::Left);
        assert_eq!(text.text_decoration, TextDecoration::None);
        assert_eq!(text.font_family, "Inter");
    }
}
