//! Nexus Core Library
//!
//! Platform-agnostic canvas document model for the Nexus whiteboard:
//! the shape catalog, the document store that owns all mutations, the
//! snapshot-based undo/redo history, and the persistence adapter.
//!
//! Rendering, networking, and authentication live in other crates; this
//! crate only produces data a retained-mode renderer can consume (ordered
//! shapes with `bounds`/`to_path`) and consumes a text-measurement
//! primitive for auto-sized shapes.

pub mod autosize;
pub mod document;
pub mod history;
pub mod shapes;
pub mod storage;
pub mod store;

pub use autosize::{ApproxTextMeasurer, TextMeasurer, sync_auto_size, SIZE_EPSILON};
pub use document::{BackgroundPattern, Document, DrawSettings, ToolMode};
pub use history::{History, DEFAULT_HISTORY_DEPTH};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeStyle, SerializableColor};
pub use storage::{AutoSaveManager, FileStorage, MemoryStorage, Storage, StorageError};
pub use store::DocumentStore;
