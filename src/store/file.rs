use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{Collection, DocHandle, Document, StoreError, TodoStore};
use crate::io::atomic::atomic_write;
use crate::io::lock::{BoardLock, LockError};
use crate::model::{NewTodo, StoreConfig, Todo, TodoId, TodoPatch};

/// A collection persisted as `<board_dir>/<collection>.json`.
///
/// Every call goes back to disk, so writes made by another process are
/// visible to the next query. Writes hold the board lock across the
/// read-modify-write cycle.
#[derive(Debug, Clone)]
pub struct FileStore {
    board_dir: PathBuf,
    path: PathBuf,
    lock_timeout: Duration,
}

impl FileStore {
    pub fn open(board_dir: &Path, config: &StoreConfig) -> Self {
        FileStore {
            board_dir: board_dir.to_path_buf(),
            path: board_dir.join(format!("{}.json", config.collection)),
            lock_timeout: config.lock_timeout(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Collection, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Collection::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(Collection::default());
        }
        let mut collection: Collection =
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        collection.normalize();
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let mut content =
            serde_json::to_string_pretty(collection).map_err(|source| StoreError::Encode {
                path: self.path.clone(),
                source,
            })?;
        content.push('\n');
        atomic_write(&self.path, content.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Locked read-modify-write. The collection is only saved if `f` succeeds.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut Collection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _lock = BoardLock::acquire(&self.board_dir, self.lock_timeout).map_err(|e| match e {
            LockError::Timeout { path } => {
                StoreError::Busy(format!("{} is held by another process", path.display()))
            }
            LockError::Open { path, source } => StoreError::Io { path, source },
        })?;
        let mut collection = self.load()?;
        let value = f(&mut collection)?;
        self.save(&collection)?;
        Ok(value)
    }
}

impl TodoStore for FileStore {
    fn create(&mut self, new: &NewTodo) -> Result<Document, StoreError> {
        let doc = self.write(|c| c.insert(new))?;
        tracing::debug!(handle = %doc.handle, id = %doc.todo.id, "created document");
        Ok(doc)
    }

    fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = self.load()?.sorted();
        tracing::debug!(count = todos.len(), "listed collection");
        Ok(todos)
    }

    fn find_by_id(&self, id: TodoId) -> Result<Vec<Document>, StoreError> {
        let docs = self.load()?.matching(id);
        tracing::debug!(%id, matches = docs.len(), "queried by id");
        Ok(docs)
    }

    fn update(&mut self, handle: &DocHandle, patch: &TodoPatch) -> Result<Todo, StoreError> {
        let todo = self.write(|c| c.merge(handle, patch))?;
        tracing::debug!(%handle, "updated document");
        Ok(todo)
    }

    fn delete(&mut self, handle: &DocHandle) -> Result<(), StoreError> {
        self.write(|c| c.remove(handle))?;
        tracing::debug!(%handle, "deleted document");
        Ok(())
    }
}
