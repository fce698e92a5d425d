//! Sticky note shape.

use super::text::{FontStyle, TextAlign, TextDecoration};
use super::{SerializableColor, Shadow, ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

fn default_width() -> f64 {
    StickyNote::DEFAULT_WIDTH
}

fn default_font_size() -> f64 {
    16.0
}

/// A sticky note: a fixed-width colored card whose height grows with its
/// text content (derived by the auto-size pass).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickyNote {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Card width. Fixed at creation; not content-derived.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Derived card height.
    #[serde(default)]
    pub height: f64,
    /// The note text.
    pub content: String,
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

impl StickyNote {
    /// Default card width.
    pub const DEFAULT_WIDTH: f64 = 160.0;

    /// Inner padding around the text.
    pub const PADDING: f64 = 12.0;

    /// Create a new sticky note with the classic yellow fill.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: new_shape_id(),
            position,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_WIDTH,
            content,
            font_size: default_font_size(),
            align: TextAlign::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            rotation: 0.0,
            style: ShapeStyle {
                fill_color: Some(SerializableColor::new(255, 235, 130, 255)),
                shadow: Some(Shadow::default()),
                ..ShapeStyle::default()
            },
        }
    }

    /// Create a sticky note with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, content: String) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, content)
        }
    }

    /// Get the card as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height.max(Self::PADDING * 2.0),
        )
    }
}

impl ShapeTrait for StickyNote {
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
        self.width *= scale[0].abs();
        self.font_size *= (scale[0].abs() + scale[3].abs()) / 2.0;
    }
}
