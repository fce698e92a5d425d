//! Document store: the single mutation surface over a canvas document.
//!
//! Every operation is a total function over the current state. An id
//! that matches nothing is a silent no-op, never an error: UI events
//! arrive out of order (a blur can fire after a delete) and the store
//! absorbs them.
//!
//! Mutations classify themselves as **live** or **committed**. Live
//! updates (drag ticks, keystrokes) never touch history; committed
//! updates (drag end, blur) push a pre-mutation snapshot and clear the
//! redo stack. The split is two distinct entry points so call sites
//! cannot get it wrong silently.

use crate::document::{BackgroundPattern, Document, DrawSettings, ToolMode};
use crate::history::{DEFAULT_HISTORY_DEPTH, History};
use crate::shapes::{SerializableColor, Shape, ShapeId};
use kurbo::Affine;
use log::{debug, warn};

/// Offset applied to a duplicated shape so it does not cover the
/// original.
const DUPLICATE_OFFSET: f64 = 10.0;

/// Owns one canvas document, its transient UI state, and its history.
///
/// Constructed per canvas view and dropped with it; there is no global
/// instance.
#[derive(Debug)]
pub struct DocumentStore {
    document: Document,
    history: History,
    selection: Option<ShapeId>,
    mode: ToolMode,
    draw_settings: DrawSettings,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create a store over a new empty document.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create a store over an existing (e.g. loaded) document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            history: History::default(),
            selection: None,
            mode: ToolMode::default(),
            draw_settings: DrawSettings::default(),
        }
    }

    /// Set the undo depth cap (default 50).
    pub fn with_history_depth(mut self, max_depth: usize) -> Self {
        self.history = History::new(max_depth);
        self
    }

    /// The current document (read-only; mutate through the store).
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the document wholesale (e.g. after a remote load),
    /// resetting history and selection.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        self.selection = None;
    }

    // --- committed mutations ---------------------------------------

    /// Append a shape at the front of the paint order.
    ///
    /// The shape must carry a non-empty id unique within the document;
    /// otherwise the call is a logged no-op. Returns whether the shape
    /// was added.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        let id = shape.id();
        if id.is_empty() {
            warn!("add_shape rejected: empty id");
            return false;
        }
        if self.document.contains(id) {
            warn!("add_shape rejected: duplicate id {id}");
            return false;
        }
        self.history.record(&self.document);
        self.document.insert_shape(shape);
        true
    }

    /// Apply a committed mutation to the shape with the given id.
    ///
    /// Pushes a pre-mutation snapshot and clears the redo stack, then
    /// runs the closure on the shape. A missing id leaves document and
    /// history untouched. Returns whether a shape was updated.
    pub fn update_shape(&mut self, id: &str, f: impl FnOnce(&mut Shape)) -> bool {
        if !self.document.contains(id) {
            debug!("update_shape: no shape with id {id}");
            return false;
        }
        self.history.record(&self.document);
        if let Some(shape) = self.document.get_shape_mut(id) {
            f(shape);
        }
        true
    }

    /// Apply a live mutation to the shape with the given id.
    ///
    /// Identical to [`update_shape`](Self::update_shape) but never
    /// touches history. Use for continuous interactions (drag ticks,
    /// typing) so the undo stack holds interaction boundaries, not
    /// every intermediate frame.
    pub fn update_shape_live(&mut self, id: &str, f: impl FnOnce(&mut Shape)) -> bool {
        match self.document.get_shape_mut(id) {
            Some(shape) => {
                f(shape);
                true
            }
            None => {
                debug!("update_shape_live: no shape with id {id}");
                false
            }
        }
    }

    /// Duplicate a shape: a committed add of a clone with a fresh id,
    /// offset slightly so the copy is visible. Returns the new id, or
    /// None when the source id matches nothing. Connectors keep their
    /// original endpoint references.
    pub fn duplicate_shape(&mut self, id: &str) -> Option<ShapeId> {
        let mut copy = self.document.get_shape(id)?.clone();
        copy.regenerate_id();
        copy.transform(Affine::translate((DUPLICATE_OFFSET, DUPLICATE_OFFSET)));
        let new_id = copy.id().to_string();

        self.history.record(&self.document);
        self.document.insert_shape(copy);
        Some(new_id)
    }

    /// Delete a shape, clearing selection if it was selected.
    /// A missing id is a complete no-op. Returns whether a shape was
    /// deleted.
    pub fn delete_shape(&mut self, id: &str) -> bool {
        if !self.document.contains(id) {
            debug!("delete_shape: no shape with id {id}");
            return false;
        }
        self.history.record(&self.document);
        self.document.remove_shape(id);
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        true
    }

    /// Bring a shape to the front of the paint order.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        if !self.document.contains(id) || self.document.order().last().map(String::as_str) == Some(id)
        {
            return false;
        }
        self.history.record(&self.document);
        self.document.bring_to_front(id);
        true
    }

    /// Send a shape to the back of the paint order.
    pub fn send_to_back(&mut self, id: &str) -> bool {
        if !self.document.contains(id)
            || self.document.order().first().map(String::as_str) == Some(id)
        {
            return false;
        }
        self.history.record(&self.document);
        self.document.send_to_back(id);
        true
    }

    /// Move a shape one layer forward.
    pub fn bring_forward(&mut self, id: &str) -> bool {
        if !self.document.contains(id) || self.document.order().last().map(String::as_str) == Some(id)
        {
            return false;
        }
        self.history.record(&self.document);
        self.document.bring_forward(id)
    }

    /// Move a shape one layer backward.
    pub fn send_backward(&mut self, id: &str) -> bool {
        if !self.document.contains(id)
            || self.document.order().first().map(String::as_str) == Some(id)
        {
            return false;
        }
        self.history.record(&self.document);
        self.document.send_backward(id)
    }

    // --- transient state (never part of history) --------------------

    /// Set the current selection. Selecting an id that matches nothing
    /// clears the selection.
    pub fn select_shape(&mut self, id: Option<&str>) {
        self.selection = match id {
            Some(id) if self.document.contains(id) => Some(id.to_string()),
            Some(id) => {
                debug!("select_shape: no shape with id {id}");
                None
            }
            None => None,
        };
    }

    /// The currently selected shape id, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Switch the tool mode.
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Set the draw-tool stroke color.
    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.draw_settings.stroke_color = color;
    }

    /// Set the draw-tool stroke width.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.draw_settings.stroke_width = width;
    }

    pub fn draw_settings(&self) -> &DrawSettings {
        &self.draw_settings
    }

    /// Set the canvas background color.
    pub fn set_background_color(&mut self, color: SerializableColor) {
        self.document.background_color = color;
    }

    /// Set the canvas background pattern.
    pub fn set_background_pattern(&mut self, pattern: BackgroundPattern) {
        self.document.background_pattern = pattern;
    }

    // --- history -----------------------------------------------------

    /// Undo the last committed change. Clears selection.
    /// Returns true if undo was performed.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document);
        if undone {
            self.selection = None;
        }
        undone
    }

    /// Redo the last undone change. Clears selection.
    /// Returns true if redo was performed.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document);
        if redone {
            self.selection = None;
        }
        redone
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undoable states currently held.
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }
}
