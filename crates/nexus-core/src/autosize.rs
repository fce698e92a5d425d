//! Content-driven auto-sizing for text-bearing shapes.
//!
//! Text, sticky notes, tables and checklists derive their size from
//! their content; stored width/height are a cache of the last
//! measurement, not an authority. Measurement lives behind the
//! [`TextMeasurer`] trait because real extents come from whatever text
//! engine the embedding frontend runs; the core ships an approximate
//! fallback good enough for layout without one.

use crate::shapes::{Checklist, Shape, StickyNote, Table};
use crate::store::DocumentStore;
use kurbo::Size;

/// Differences below this threshold (in canvas units) are measurement
/// noise and must not trigger a resize.
pub const SIZE_EPSILON: f64 = 1.0;

/// Line height as a multiple of font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Family used for shapes that do not carry their own font setting.
const DEFAULT_FONT: &str = "Inter";

/// Measures text extents for a given font.
pub trait TextMeasurer {
    /// Extents of a single line of text at the given font size.
    /// Multi-line handling is the caller's concern.
    fn measure(&self, text: &str, font_family: &str, font_size: f64) -> Size;
}

/// Character-count heuristic measurer.
///
/// Assumes an average glyph advance of a bit over half the font size,
/// which tracks common UI fonts closely enough for box sizing. Swap in
/// a real measurer when a text engine is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasurer;

impl TextMeasurer for ApproxTextMeasurer {
    fn measure(&self, text: &str, _font_family: &str, font_size: f64) -> Size {
        let width = text.chars().count() as f64 * font_size * 0.55;
        Size::new(width, font_size * LINE_HEIGHT_FACTOR)
    }
}

/// Measure multi-line content: widest line by longest, one line-height
/// per line. Empty content still occupies one line.
fn measure_block(measurer: &dyn TextMeasurer, text: &str, font_family: &str, font_size: f64) -> Size {
    let mut width: f64 = 0.0;
    let mut lines = 0usize;
    for line in text.lines() {
        width = width.max(measurer.measure(line, font_family, font_size).width);
        lines += 1;
    }
    let lines = lines.max(1);
    Size::new(width, lines as f64 * font_size * LINE_HEIGHT_FACTOR)
}

fn differs(current: f64, target: f64) -> bool {
    (current - target).abs() > SIZE_EPSILON
}

/// Re-measure the shape's content and sync its cached size.
///
/// Applied as a live update: sizing runs on every keystroke and must
/// not flood the undo stack. Sub-epsilon differences leave the shape
/// untouched, so echoing a measurement back never loops. Shapes that
/// are not auto-sized, and missing ids, are no-ops. Returns whether
/// the shape's size changed.
pub fn sync_auto_size(store: &mut DocumentStore, measurer: &dyn TextMeasurer, id: &str) -> bool {
    let Some(shape) = store.document().get_shape(id) else {
        return false;
    };
    if !shape.is_auto_sized() {
        return false;
    }

    let mut changed = false;
    store.update_shape_live(id, |shape| match shape {
        Shape::Text(text) => {
            let size = measure_block(measurer, &text.content, &text.font_family, text.font_size);
            if differs(text.width, size.width) {
                text.width = size.width;
                changed = true;
            }
            if differs(text.height, size.height) {
                text.height = size.height;
                changed = true;
            }
        }
        Shape::StickyNote(note) => {
            // Width is fixed; only height follows content.
            let size = measure_block(measurer, &note.content, DEFAULT_FONT, note.font_size);
            let target = size.height + 2.0 * StickyNote::PADDING;
            if differs(note.height, target) {
                note.height = target;
                changed = true;
            }
        }
        Shape::Checklist(list) => {
            let mut width: f64 = 0.0;
            for item in &list.items {
                width = width.max(
                    measurer
                        .measure(&item.text, DEFAULT_FONT, list.font_size)
                        .width,
                );
            }
            let target_width = width + Checklist::CHECKBOX_WIDTH + 2.0 * Checklist::PADDING;
            let target_height =
                list.items.len().max(1) as f64 * list.row_height() + 2.0 * Checklist::PADDING;
            if differs(list.width, target_width) {
                list.width = target_width;
                changed = true;
            }
            if differs(list.height, target_height) {
                list.height = target_height;
                changed = true;
            }
        }
        Shape::Table(tbl) => {
            // Tracks (per column, per row) the widest/tallest content,
            // and only ever grows. Shrinking is an explicit user
            // resize, not an auto-size concern.
            for row in 0..tbl.rows() {
                for col in 0..tbl.columns() {
                    let Some(cell) = tbl.cell(row, col) else { continue };
                    let size = measure_block(measurer, &cell.text, DEFAULT_FONT, tbl.font_size);
                    let want_w = size.width + 2.0 * Table::CELL_PADDING;
                    let want_h = size.height + 2.0 * Table::CELL_PADDING;
                    if want_w > tbl.column_width(col) + SIZE_EPSILON {
                        tbl.ensure_column_width(col, want_w);
                        changed = true;
                    }
                    if want_h > tbl.row_height(row) + SIZE_EPSILON {
                        tbl.ensure_row_height(row, want_h);
                        changed = true;
                    }
                }
            }
        }
        _ => {}
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Table, Text};
    use kurbo::Point;

    fn text_store(content: &str) -> DocumentStore {
        let mut store = DocumentStore::new();
        store.add_shape(Shape::Text(Text::with_id(
            "t",
            Point::ZERO,
            content.to_string(),
        )));
        store
    }

    #[test]
    fn test_text_size_follows_content() {
        let mut store = text_store("hello");
        assert!(sync_auto_size(&mut store, &ApproxTextMeasurer, "t"));

        let Shape::Text(text) = store.document().get_shape("t").unwrap() else {
            panic!("not text");
        };
        assert!((text.width - 5.0 * 20.0 * 0.55).abs() < 1e-9);
        assert!((text.height - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_sub_epsilon_is_noop() {
        let mut store = text_store("hello");
        sync_auto_size(&mut store, &ApproxTextMeasurer, "t");

        // Nudge the cached size by less than epsilon; re-sync must not
        // touch it.
        store.update_shape_live("t", |s| {
            if let Shape::Text(t) = s {
                t.width += 0.5;
            }
        });
        assert!(!sync_auto_size(&mut store, &ApproxTextMeasurer, "t"));
    }

    #[test]
    fn test_sync_never_grows_history() {
        let mut store = text_store("hello");
        let depth = store.history_depth();
        for _ in 0..10 {
            sync_auto_size(&mut store, &ApproxTextMeasurer, "t");
        }
        assert_eq!(store.history_depth(), depth);
    }

    #[test]
    fn test_multiline_height() {
        let mut store = text_store("a\nbb\nccc");
        sync_auto_size(&mut store, &ApproxTextMeasurer, "t");

        let Shape::Text(text) = store.document().get_shape("t").unwrap() else {
            panic!("not text");
        };
        assert!((text.height - 3.0 * 24.0).abs() < 1e-9);
        // Width follows the widest line.
        assert!((text.width - 3.0 * 20.0 * 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_table_columns_never_shrink() {
        let mut store = DocumentStore::new();
        let mut tbl = Table::with_id("tbl", Point::ZERO, 2, 2);
        tbl.set_cell_text(0, 0, "a very long cell content string");
        store.add_shape(Shape::Table(tbl));

        sync_auto_size(&mut store, &ApproxTextMeasurer, "tbl");
        let grown = {
            let Shape::Table(t) = store.document().get_shape("tbl").unwrap() else {
                panic!("not table");
            };
            assert!(t.column_widths[0] > Table::MIN_COLUMN_WIDTH);
            t.column_widths[0]
        };

        // Replace with shorter content: the column keeps its width.
        store.update_shape_live("tbl", |s| {
            if let Shape::Table(t) = s {
                t.set_cell_text(0, 0, "x");
            }
        });
        assert!(!sync_auto_size(&mut store, &ApproxTextMeasurer, "tbl"));
        let Shape::Table(t) = store.document().get_shape("tbl").unwrap() else {
            panic!("not table");
        };
        assert!((t.column_widths[0] - grown).abs() < 1e-9);
    }

    #[test]
    fn test_table_with_short_size_arrays_from_foreign_document() {
        // Another client can save a table whose width/height arrays do
        // not cover the cell grid; syncing such a document must pad
        // the arrays rather than panic.
        let json = r#"{
            "id": "doc",
            "name": "Imported",
            "shapes": {
                "tbl": {
                    "type": "table",
                    "id": "tbl",
                    "position": {"x": 0.0, "y": 0.0},
                    "cells": [[
                        {"text": "a"},
                        {"text": "a much longer cell content string"}
                    ]],
                    "column_widths": [80.0],
                    "row_heights": [],
                    "style": {
                        "stroke_color": {"r": 0, "g": 0, "b": 0, "a": 255},
                        "stroke_width": 2.0,
                        "fill_color": null
                    }
                }
            },
            "order": ["tbl"]
        }"#;
        let doc = crate::document::Document::from_json(json).unwrap();
        let mut store = DocumentStore::with_document(doc);

        assert!(sync_auto_size(&mut store, &ApproxTextMeasurer, "tbl"));

        let Shape::Table(t) = store.document().get_shape("tbl").unwrap() else {
            panic!("not table");
        };
        assert_eq!(t.column_widths.len(), 2);
        assert!(t.column_width(1) > Table::MIN_COLUMN_WIDTH);
        // The uncovered row still reports the minimum height.
        assert!((t.row_height(0) - Table::MIN_ROW_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_auto_sized_shape_is_noop() {
        let mut store = DocumentStore::new();
        store.add_shape(Shape::Rectangle(crate::shapes::Rectangle::with_id(
            "r",
            Point::ZERO,
            10.0,
            10.0,
        )));
        assert!(!sync_auto_size(&mut store, &ApproxTextMeasurer, "r"));
        assert!(!sync_auto_size(&mut store, &ApproxTextMeasurer, "missing"));
    }

    #[test]
    fn test_sticky_note_width_fixed() {
        let mut store = DocumentStore::new();
        store.add_shape(Shape::StickyNote(crate::shapes::StickyNote::with_id(
            "n",
            Point::ZERO,
            "line one\nline two\nline three".to_string(),
        )));
        sync_auto_size(&mut store, &ApproxTextMeasurer, "n");

        let Shape::StickyNote(note) = store.document().get_shape("n").unwrap() else {
            panic!("not a note");
        };
        assert!((note.width - StickyNote::DEFAULT_WIDTH).abs() < 1e-9);
        assert!((note.height - (3.0 * 16.0 * 1.2 + 24.0)).abs() < 1e-9);
    }
}
