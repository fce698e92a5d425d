//! Table shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, new_shape_id};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

fn default_font_size() -> f64 {
    14.0
}

/// One table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub text: String,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A table: a grid of text cells with independent per-column widths and
/// per-row heights.
///
/// Column widths and row heights only grow to fit their widest/tallest
/// cell content; shrinking is not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Cell contents, row-major.
    pub cells: Vec<Vec<TableCell>>,
    /// Per-column widths. Same length as each row of `cells`.
    pub column_widths: Vec<f64>,
    /// Per-row heights. Same length as `cells`.
    pub row_heights: Vec<f64>,
    /// Font size in canvas units.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Table {
    /// Minimum column width.
    pub const MIN_COLUMN_WIDTH: f64 = 80.0;

    /// Minimum row height.
    pub const MIN_ROW_HEIGHT: f64 = 32.0;

    /// Inner cell padding.
    pub const CELL_PADDING: f64 = 8.0;

    /// Create an empty table of the given dimensions.
    pub fn new(position: Point, rows: usize, columns: usize) -> Self {
        Self {
            id: new_shape_id(),
            position,
            cells: vec![vec![TableCell::default(); columns]; rows],
            column_widths: vec![Self::MIN_COLUMN_WIDTH; columns],
            row_heights: vec![Self::MIN_ROW_HEIGHT; rows],
            font_size: default_font_size(),
            style: ShapeStyle::default(),
        }
    }

    /// Create a table with a caller-supplied id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, rows: usize, columns: usize) -> Self {
        Self {
            id: id.into(),
            ..Self::new(position, rows, columns)
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Get a cell. Out-of-range indices return None.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Set a cell's text. Out-of-range indices are ignored.
    pub fn set_cell_text(&mut self, row: usize, col: usize, text: impl Into<String>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            cell.text = text.into();
        }
    }

    /// Append an empty row.
    pub fn add_row(&mut self) {
        let cols = self.columns();
        self.cells.push(vec![TableCell::default(); cols]);
        self.row_heights.push(Self::MIN_ROW_HEIGHT);
    }

    /// Append an empty column.
    pub fn add_column(&mut self) {
        for row in &mut self.cells {
            row.push(TableCell::default());
        }
        self.column_widths.push(Self::MIN_COLUMN_WIDTH);
    }

    /// Width of a column. Columns the width array does not cover (a
    /// document written by another client can ship mismatched arrays)
    /// report the minimum width.
    pub fn column_width(&self, col: usize) -> f64 {
        self.column_widths
            .get(col)
            .copied()
            .unwrap_or(Self::MIN_COLUMN_WIDTH)
    }

    /// Height of a row. Rows the height array does not cover report
    /// the minimum height.
    pub fn row_height(&self, row: usize) -> f64 {
        self.row_heights
            .get(row)
            .copied()
            .unwrap_or(Self::MIN_ROW_HEIGHT)
    }

    /// Grow a column to at least `width`. Never shrinks; indices
    /// outside the cell grid are ignored. Pads a short width array up
    /// to the grid first.
    pub fn ensure_column_width(&mut self, col: usize, width: f64) {
        let columns = self.columns();
        if col >= columns {
            return;
        }
        if self.column_widths.len() < columns {
            self.column_widths.resize(columns, Self::MIN_COLUMN_WIDTH);
        }
        if let Some(w) = self.column_widths.get_mut(col) {
            if width > *w {
                *w = width;
            }
        }
    }

    /// Grow a row to at least `height`. Never shrinks; indices outside
    /// the cell grid are ignored. Pads a short height array up to the
    /// grid first.
    pub fn ensure_row_height(&mut self, row: usize, height: f64) {
        let rows = self.rows();
        if row >= rows {
            return;
        }
        if self.row_heights.len() < rows {
            self.row_heights.resize(rows, Self::MIN_ROW_HEIGHT);
        }
        if let Some(h) = self.row_heights.get_mut(row) {
            if height > *h {
                *h = height;
            }
        }
    }

    /// Total table width.
    pub fn width(&self) -> f64 {
        (0..self.columns()).map(|col| self.column_width(col)).sum()
    }

    /// Total table height.
    pub fn height(&self) -> f64 {
        (0..self.rows()).map(|row| self.row_height(row)).sum()
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width(),
            self.position.y + self.height(),
        )
    }
}

impl ShapeTrait for Table {
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
        // Outer frame plus interior grid lines.
        let mut path = self.as_rect().to_path(0.1);

        let mut x = self.position.x;
        for col in 0..self.columns().saturating_sub(1) {
            x += self.column_width(col);
            path.move_to(Point::new(x, self.position.y));
            path.line_to(Point::new(x, self.position.y + self.height()));
        }

        let mut y = self.position.y;
        for row in 0..self.rows().saturating_sub(1) {
            y += self.row_height(row);
            path.move_to(Point::new(self.position.x, y));
            path.line_to(Point::new(self.position.x + self.width(), y));
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
        for w in &mut self.column_widths {
            *w *= scale[0].abs();
        }
        for h in &mut self.row_heights {
            *h *= scale[3].abs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_creation() {
        let table = Table::new(Point::ZERO, 2, 3);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 3);
        assert!((table.width() - 3.0 * Table::MIN_COLUMN_WIDTH).abs() < f64::EPSILON);
        assert!((table.height() - 2.0 * Table::MIN_ROW_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_cell_text() {
        let mut table = Table::new(Point::ZERO, 2, 2);
        table.set_cell_text(0, 1, "hello");
        assert_eq!(table.cell(0, 1).unwrap().text, "hello");

        // Out of range is a no-op.
        table.set_cell_text(5, 5, "nope");
        assert!(table.cell(5, 5).is_none());
    }

    #[test]
    fn test_columns_grow_monotonically() {
        let mut table = Table::new(Point::ZERO, 1, 1);
        table.ensure_column_width(0, 200.0);
        assert!((table.column_widths[0] - 200.0).abs() < f64::EPSILON);

        // Smaller request never shrinks.
        table.ensure_column_width(0, 100.0);
        assert!((table.column_widths[0] - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mismatched_size_arrays_are_tolerated() {
        let mut table = Table::new(Point::ZERO, 2, 2);
        table.column_widths = vec![100.0];
        table.row_heights = Vec::new();

        // Uncovered entries report the minimums.
        assert!((table.column_width(1) - Table::MIN_COLUMN_WIDTH).abs() < f64::EPSILON);
        assert!((table.row_height(0) - Table::MIN_ROW_HEIGHT).abs() < f64::EPSILON);
        assert!((table.width() - (100.0 + Table::MIN_COLUMN_WIDTH)).abs() < f64::EPSILON);
        assert!((table.height() - 2.0 * Table::MIN_ROW_HEIGHT).abs() < f64::EPSILON);

        // Grid lines still build without the arrays covering the grid.
        assert!(!table.to_path().elements().is_empty());

        // Growing an uncovered entry pads the array first.
        table.ensure_column_width(1, 150.0);
        assert_eq!(table.column_widths.len(), 2);
        assert!((table.column_widths[1] - 150.0).abs() < f64::EPSILON);

        table.ensure_row_height(1, 60.0);
        assert_eq!(table.row_heights.len(), 2);
        assert!((table.row_heights[0] - Table::MIN_ROW_HEIGHT).abs() < f64::EPSILON);
        assert!((table.row_heights[1] - 60.0).abs() < f64::EPSILON);

        // Indices outside the grid stay ignored.
        table.ensure_column_width(5, 400.0);
        assert_eq!(table.column_widths.len(), 2);
    }

    #[test]
    fn test_add_row_and_column() {
        let mut table = Table::new(Point::ZERO, 1, 1);
        table.add_row();
        table.add_column();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 2);
        assert_eq!(table.row_heights.len(), 2);
        assert_eq!(table.column_widths.len(), 2);
    }
}
