//! Image shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An image placed on the canvas.
///
/// `src` is whatever the renderer can load: a URL or a `data:` URI.
/// Named `ImageShape` to avoid clashing with renderer image types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageShape {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Image source (URL or data URI).
    pub src: String,
    /// Natural image width in pixels.
    #[serde(default)]
    pub natural_width: u32,
    /// Natural image height in pixels.
    #[serde(default)]
    pub natural_height: u32,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties (stroke used for an optional border).
    pub style: ShapeStyle,
}

impl ImageShape {
    /// Create an image shape from a source reference and its natural size.
    pub fn new(position: Point, src: impl Into<String>, natural_width: u32, natural_height: u32) -> Self {
        Self {
            id: new_shape_id(),
            position,
            width: natural_width as f64,
            height: natural_height as f64,
            src: src.into(),
            natural_width,
            natural_height,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Create an image shape with a caller-supplied id.
    pub fn with_id(
        id: impl Into<ShapeId>,
        position: Point,
        src: impl Into<String>,
        natural_width: u32,
        natural_height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, src, natural_width, natural_height)
        }
    }

    /// Create an image shape by embedding raw bytes as a `data:` URI.
    pub fn from_bytes(
        position: Point,
        data: &[u8],
        mime_type: &str,
        natural_width: u32,
        natural_height: u32,
    ) -> Self {
        use base64::{Engine, engine::general_purpose::STANDARD};

        let src = format!("data:{};base64,{}", mime_type, STANDARD.encode(data));
        Self::new(position, src, natural_width, natural_height)
    }

    /// Set specific display dimensions.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Scale to fit within max dimensions while preserving aspect ratio.
    pub fn fit_within(mut self, max_width: f64, max_height: f64) -> Self {
        if self.natural_height == 0 {
            return self;
        }
        let aspect = self.natural_width as f64 / self.natural_height as f64;
        let target_aspect = max_width / max_height;

        if aspect > target_aspect {
            self.width = max_width;
            self.height = max_width / aspect;
        } else {
            self.height = max_height;
            self.width = max_height * aspect;
        }

        self
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for ImageShape {
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
        self.height *= scale[3].abs();
    }
}
