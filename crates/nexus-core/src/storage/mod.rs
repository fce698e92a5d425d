//! Persistence adapters for canvas documents.
//!
//! The [`Storage`] trait is the seam between the document model and
//! whatever actually holds bytes: memory for tests, the filesystem for
//! desktop builds, a remote document service behind the same trait
//! shape elsewhere. Operations are async so a network-backed
//! implementation fits without changing callers.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS, LOCAL_CACHE_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::Document;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future used by the storage trait, so backends stay object
/// safe and callers need no executor-specific types.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A document storage backend.
///
/// Loading an id that was never saved yields
/// [`StorageError::NotFound`]; deleting one is fine.
pub trait Storage: Send + Sync {
    /// Persist a document under the given id.
    fn save(&self, id: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the document saved under the given id.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Document>>;

    /// Remove the document saved under the given id.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Ids of all saved documents.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Whether a document is saved under the given id.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Minimal polling executor for storage tests. The backends under test
/// never actually suspend, so a no-op waker is enough.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
