//! Shape definitions for the canvas.

mod arrow;
mod checklist;
mod connector;
mod ellipse;
mod image;
mod rectangle;
mod star;
mod sticky_note;
mod table;
mod text;
mod triangle;

pub use arrow::Arrow;
pub use checklist::{Checklist, ChecklistItem};
pub use connector::{Connector, ConnectorGeometry};
pub use ellipse::Ellipse;
pub use image::ImageShape;
pub use rectangle::Rectangle;
pub use star::Star;
pub use sticky_note::StickyNote;
pub use table::{Table, TableCell};
pub use text::{FontStyle, Text, TextAlign, TextDecoration};
pub use triangle::Triangle;

use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
///
/// Ids are plain strings on the wire; constructors generate a UUID but
/// callers may supply any unique, non-empty id of their own.
pub type ShapeId = String;

/// Generate a fresh shape id.
pub fn new_shape_id() -> ShapeId {
    Uuid::new_v4().to_string()
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS-style hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    /// Web clients send colors in this form.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?.trim();
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Drop shadow applied behind a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: SerializableColor,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: SerializableColor::new(0, 0, 0, 64),
            blur: 8.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

/// Style properties shared by all shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Optional drop shadow.
    #[serde(default)]
    pub shadow: Option<Shadow>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the stroke color with opacity applied.
    pub fn stroke_with_opacity(&self) -> Color {
        let rgba = self.stroke().to_rgba8();
        let alpha = (rgba.a as f64 * self.opacity) as u8;
        Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Get the fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.fill_color.map(|c| {
            let rgba = Color::from(c).to_rgba8();
            let alpha = (rgba.a as f64 * self.opacity) as u8;
            Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
        })
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
            shadow: None,
            opacity: 1.0,
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Test whether a point lies inside the triangle (a, b, c).
pub fn point_in_triangle(point: Point, a: Point, b: Point, c: Point) -> bool {
    fn sign(p1: Point, p2: Point, p3: Point) -> f64 {
        (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
    }

    let d1 = sign(point, a, b);
    let d2 = sign(point, b, c);
    let d3 = sign(point, c, a);

    let has_neg = (d1 < 0.0) || (d2 < 0.0) || (d3 < 0.0);
    let has_pos = (d1 > 0.0) || (d2 > 0.0) || (d3 > 0.0);

    !(has_neg && has_pos)
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &str;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Apply a transform to this shape.
    fn transform(&mut self, affine: Affine);
}

/// Discriminant for the shape union, matching the serialized `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Triangle,
    Star,
    Arrow,
    Text,
    StickyNote,
    Table,
    Checklist,
    Connector,
    Image,
}

impl ShapeKind {
    /// The serialized tag name, as the renderer resolves it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
            ShapeKind::StickyNote => "stickyNote",
            ShapeKind::Table => "table",
            ShapeKind::Checklist => "checklist",
            ShapeKind::Connector => "connector",
            ShapeKind::Image => "image",
        }
    }
}

/// Closed union over all shape kinds.
///
/// Adding a kind is a compile-time-checked change: every dispatch below
/// must handle it, and documents serialized before the kind existed still
/// deserialize (new fields are optional with safe defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Triangle(Triangle),
    Star(Star),
    Arrow(Arrow),
    Text(Text),
    StickyNote(StickyNote),
    Table(Table),
    Checklist(Checklist),
    Connector(Connector),
    Image(ImageShape),
}

impl Shape {
    pub fn id(&self) -> &str {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Star(s) => s.id(),
            Shape::Arrow(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::StickyNote(s) => s.id(),
            Shape::Table(s) => s.id(),
            Shape::Checklist(s) => s.id(),
            Shape::Connector(s) => s.id(),
            Shape::Image(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Star(_) => ShapeKind::Star,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Text(_) => ShapeKind::Text,
            Shape::StickyNote(_) => ShapeKind::StickyNote,
            Shape::Table(_) => ShapeKind::Table,
            Shape::Checklist(_) => ShapeKind::Checklist,
            Shape::Connector(_) => ShapeKind::Connector,
            Shape::Image(_) => ShapeKind::Image,
        }
    }

    /// Bounding box in world coordinates.
    ///
    /// Connectors have no independent geometry; their bounds are empty
    /// here and resolved against the document instead.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Star(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::StickyNote(s) => s.bounds(),
            Shape::Table(s) => s.bounds(),
            Shape::Checklist(s) => s.bounds(),
            Shape::Connector(_) => Rect::ZERO,
            Shape::Image(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Ellipse(s) => s.hit_test(point, tolerance),
            Shape::Triangle(s) => s.hit_test(point, tolerance),
            Shape::Star(s) => s.hit_test(point, tolerance),
            Shape::Arrow(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
            Shape::StickyNote(s) => s.hit_test(point, tolerance),
            Shape::Table(s) => s.hit_test(point, tolerance),
            Shape::Checklist(s) => s.hit_test(point, tolerance),
            Shape::Connector(_) => false,
            Shape::Image(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Ellipse(s) => s.to_path(),
            Shape::Triangle(s) => s.to_path(),
            Shape::Star(s) => s.to_path(),
            Shape::Arrow(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
            Shape::StickyNote(s) => s.to_path(),
            Shape::Table(s) => s.to_path(),
            Shape::Checklist(s) => s.to_path(),
            Shape::Connector(_) => BezPath::new(),
            Shape::Image(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Triangle(s) => s.style(),
            Shape::Star(s) => s.style(),
            Shape::Arrow(s) => s.style(),
            Shape::Text(s) => s.style(),
            Shape::StickyNote(s) => s.style(),
            Shape::Table(s) => s.style(),
            Shape::Checklist(s) => s.style(),
            Shape::Connector(s) => &s.style,
            Shape::Image(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Triangle(s) => s.style_mut(),
            Shape::Star(s) => s.style_mut(),
            Shape::Arrow(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
            Shape::StickyNote(s) => s.style_mut(),
            Shape::Table(s) => s.style_mut(),
            Shape::Checklist(s) => s.style_mut(),
            Shape::Connector(s) => &mut s.style,
            Shape::Image(s) => s.style_mut(),
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            Shape::Rectangle(s) => s.transform(affine),
            Shape::Ellipse(s) => s.transform(affine),
            Shape::Triangle(s) => s.transform(affine),
            Shape::Star(s) => s.transform(affine),
            Shape::Arrow(s) => s.transform(affine),
            Shape::Text(s) => s.transform(affine),
            Shape::StickyNote(s) => s.transform(affine),
            Shape::Table(s) => s.transform(affine),
            Shape::Checklist(s) => s.transform(affine),
            Shape::Connector(_) => {}
            Shape::Image(s) => s.transform(affine),
        }
    }

    /// Whether this kind derives its size from content.
    ///
    /// Manual resize is only honored for kinds where this is false; the
    /// auto-size pass overwrites width/height for the others.
    pub fn is_auto_sized(&self) -> bool {
        matches!(
            self,
            Shape::Text(_) | Shape::StickyNote(_) | Shape::Table(_) | Shape::Checklist(_)
        )
    }

    /// Get the rotation angle in degrees (0 for kinds that don't rotate).
    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Rectangle(s) => s.rotation,
            Shape::Ellipse(s) => s.rotation,
            Shape::Triangle(s) => s.rotation,
            Shape::Star(s) => s.rotation,
            Shape::Text(s) => s.rotation,
            Shape::StickyNote(s) => s.rotation,
            Shape::Image(s) => s.rotation,
            _ => 0.0,
        }
    }

    /// Set the rotation angle in degrees (no-op for kinds that don't rotate).
    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Shape::Rectangle(s) => s.rotation = rotation,
            Shape::Ellipse(s) => s.rotation = rotation,
            Shape::Triangle(s) => s.rotation = rotation,
            Shape::Star(s) => s.rotation = rotation,
            Shape::Text(s) => s.rotation = rotation,
            Shape::StickyNote(s) => s.rotation = rotation,
            Shape::Image(s) => s.rotation = rotation,
            _ => {}
        }
    }

    /// Check if this shape is a connector.
    pub fn is_connector(&self) -> bool {
        matches!(self, Shape::Connector(_))
    }

    /// Get the connector if this shape is one.
    pub fn as_connector(&self) -> Option<&Connector> {
        match self {
            Shape::Connector(c) => Some(c),
            _ => None,
        }
    }

    /// Give this shape a new unique id. Only the store may call this,
    /// on a detached clone: re-keying a shape that is already in a
    /// document would desynchronize the shape map and paint order.
    pub(crate) fn regenerate_id(&mut self) {
        let new_id = new_shape_id();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Ellipse(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
            Shape::Star(s) => s.id = new_id,
            Shape::Arrow(s) => s.id = new_id,
            Shape::Text(s) => s.id = new_id,
            Shape::StickyNote(s) => s.id = new_id,
            Shape::Table(s) => s.id = new_id,
            Shape::Checklist(s) => s.id = new_id,
            Shape::Connector(s) => s.id = new_id,
            Shape::Image(s) => s.id = new_id,
        }
    }
}
