//! Snapshot-based undo/redo history.
//!
//! Entries are whole copies of the shape state (map + paint order), not
//! operation deltas. Typical documents hold tens to low hundreds of
//! shapes, so the copy cost is acceptable; the depth cap bounds memory.

use crate::document::Document;
use crate::shapes::{Shape, ShapeId};
use std::collections::{HashMap, VecDeque};

/// Default maximum number of undo states to keep.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// A full snapshot of the shape state at one point in time.
///
/// Owned exclusively by the history; never aliased by the live document.
#[derive(Debug, Clone)]
struct Snapshot {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl Snapshot {
    fn of(document: &Document) -> Self {
        let (shapes, order) = document.snapshot_parts();
        Self { shapes, order }
    }

    fn restore_into(self, document: &mut Document) {
        document.restore_parts(self.shapes, self.order);
    }
}

/// Undo/redo stacks over document snapshots.
///
/// `past` holds prior states oldest-first; `future` holds undone states
/// nearest-undo-first. Operations on empty stacks are no-ops, never
/// errors.
#[derive(Debug)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    /// Create a history with the given depth cap. A cap of zero disables
    /// undo entirely.
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_depth,
        }
    }

    /// Record the pre-mutation state. Call before applying a committed
    /// mutation; any new edit invalidates the redo stack.
    pub fn record(&mut self, document: &Document) {
        self.future.clear();
        if self.max_depth == 0 {
            return;
        }
        self.past.push_back(Snapshot::of(document));
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
    }

    /// Undo the last committed change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        match self.past.pop_back() {
            Some(snapshot) => {
                self.future.push(Snapshot::of(document));
                snapshot.restore_into(document);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        match self.future.pop() {
            Some(snapshot) => {
                self.past.push_back(Snapshot::of(document));
                snapshot.restore_into(document);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable states currently held.
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    /// The configured depth cap.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop all history (e.g. after loading a different document).
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn doc_with(ids: &[&str]) -> Document {
        let mut doc = Document::new();
        for id in ids {
            doc.insert_shape(Shape::Rectangle(Rectangle::with_id(
                *id,
                Point::ZERO,
                10.0,
                10.0,
            )));
        }
        doc
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut doc = doc_with(&[]);
        let mut history = History::default();

        history.record(&doc);
        doc.insert_shape(Shape::Rectangle(Rectangle::with_id(
            "1",
            Point::ZERO,
            10.0,
            10.0,
        )));

        assert!(history.undo(&mut doc));
        assert!(doc.is_empty());
        assert!(history.can_redo());

        assert!(history.redo(&mut doc));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut doc = doc_with(&["1"]);
        let mut history = History::default();

        assert!(!history.can_undo());
        assert!(!history.undo(&mut doc));
        assert!(!history.can_redo());
        assert!(!history.redo(&mut doc));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut doc = doc_with(&[]);
        let mut history = History::default();

        history.record(&doc);
        doc.insert_shape(Shape::Rectangle(Rectangle::with_id(
            "1",
            Point::ZERO,
            10.0,
            10.0,
        )));

        assert!(history.undo(&mut doc));
        assert!(history.can_redo());

        history.record(&doc);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_cap_evicts_oldest() {
        let mut doc = doc_with(&[]);
        let mut history = History::new(3);

        for i in 0..10 {
            history.record(&doc);
            doc.insert_shape(Shape::Rectangle(Rectangle::with_id(
                format!("{i}"),
                Point::ZERO,
                10.0,
                10.0,
            )));
        }

        assert_eq!(history.depth(), 3);

        // Only the three most recent states are reachable.
        assert!(history.undo(&mut doc));
        assert!(history.undo(&mut doc));
        assert!(history.undo(&mut doc));
        assert!(!history.undo(&mut doc));
        assert_eq!(doc.len(), 7);
    }

    #[test]
    fn test_zero_cap_disables_undo() {
        let mut doc = doc_with(&[]);
        let mut history = History::new(0);

        history.record(&doc);
        doc.insert_shape(Shape::Rectangle(Rectangle::with_id(
            "1",
            Point::ZERO,
            10.0,
            10.0,
        )));

        assert!(!history.can_undo());
        assert!(!history.undo(&mut doc));
        assert_eq!(doc.len(), 1);
    }
}
