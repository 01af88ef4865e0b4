//! Record store adapter over the `todos` document collection.
//!
//! The store is the authoritative persisted copy of the board. Documents are
//! addressed by a store-generated [`DocHandle`]; the numeric todo `id` is an
//! ordinary field that the store allocates from a persisted counter.

pub mod collection;
pub mod file;
pub mod memory;
pub mod retry;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

pub use collection::Collection;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use retry::{RetryPolicy, with_retry};

/// Store-level document key, distinct from the todo's `id` field
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocHandle(pub String);

impl fmt::Display for DocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as returned by a query: its handle plus the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub handle: DocHandle,
    pub todo: Todo,
}

/// How a failed store call should be treated by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Worth retrying: contention or an interrupted call
    Transient,
    /// Retrying will not help; surface it
    Permanent,
    /// The addressed document does not exist; callers treat this as a no-op
    NotFound,
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store busy: {0}")]
    Busy(String),
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("collection {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize collection {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("document not found: {0}")]
    DocumentNotFound(DocHandle),
    /// The id or handle counter has no values left
    #[error("{0} counter exhausted")]
    Exhausted(&'static str),
}

impl StoreError {
    pub fn class(&self) -> ErrorClass {
        match self {
            StoreError::Busy(_) => ErrorClass::Transient,
            StoreError::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::Interrupted
                | std::io::ErrorKind::WouldBlock
                | std::io::ErrorKind::TimedOut => ErrorClass::Transient,
                _ => ErrorClass::Permanent,
            },
            StoreError::Corrupt { .. } | StoreError::Encode { .. } => ErrorClass::Permanent,
            StoreError::Exhausted(_) => ErrorClass::Permanent,
            StoreError::DocumentNotFound(_) => ErrorClass::NotFound,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.class() == ErrorClass::Transient
    }
}

/// Create/query/update/delete primitives over a single collection.
pub trait TodoStore {
    /// Insert a new document. The store allocates the todo `id`.
    fn create(&mut self, new: &NewTodo) -> Result<Document, StoreError>;

    /// Every document, ordered by `id` ascending
    fn list_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// Documents whose `id` field equals `id` (zero or more)
    fn find_by_id(&self, id: TodoId) -> Result<Vec<Document>, StoreError>;

    /// Merge `patch` into the document and stamp `updateddate`.
    /// Returns the merged record.
    fn update(&mut self, handle: &DocHandle, patch: &TodoPatch) -> Result<Todo, StoreError>;

    /// Remove the document
    fn delete(&mut self, handle: &DocHandle) -> Result<(), StoreError>;
}

impl<T: TodoStore + ?Sized> TodoStore for Box<T> {
    fn create(&mut self, new: &NewTodo) -> Result<Document, StoreError> {
        (**self).create(new)
    }

    fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        (**self).list_all()
    }

    fn find_by_id(&self, id: TodoId) -> Result<Vec<Document>, StoreError> {
        (**self).find_by_id(id)
    }

    fn update(&mut self, handle: &DocHandle, patch: &TodoPatch) -> Result<Todo, StoreError> {
        (**self).update(handle, patch)
    }

    fn delete(&mut self, handle: &DocHandle) -> Result<(), StoreError> {
        (**self).delete(handle)
    }
}

/// Timestamp the store writes into `updateddate`
pub(crate) fn server_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
