use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{DocHandle, Document, StoreError, server_timestamp};
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

/// The documents of one collection plus its counters.
///
/// This is the serialized shape of `<collection>.json`. Documents keep
/// insertion order; `list_all` sorts by `id` regardless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Next todo id to hand out. Never decreases, so ids are not reused.
    #[serde(default = "first_counter")]
    pub next_id: u64,
    /// Next document handle number
    #[serde(default = "first_counter")]
    pub next_doc: u64,
    #[serde(default)]
    pub documents: IndexMap<DocHandle, Todo>,
}

fn first_counter() -> u64 {
    1
}

impl Default for Collection {
    fn default() -> Self {
        Collection {
            next_id: 1,
            next_doc: 1,
            documents: IndexMap::new(),
        }
    }
}

impl Collection {
    /// Repair counters that lag behind the stored documents (hand-edited files).
    /// Counters saturate; `insert` refuses to hand out a saturated value.
    pub fn normalize(&mut self) {
        let max_id = self.documents.values().map(|t| t.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id.saturating_add(1));
        let max_doc = self
            .documents
            .keys()
            .filter_map(|h| h.0.strip_prefix('d')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.next_doc = self.next_doc.max(max_doc.saturating_add(1));
    }

    pub fn insert(&mut self, new: &NewTodo) -> Result<Document, StoreError> {
        let following_doc = self
            .next_doc
            .checked_add(1)
            .ok_or(StoreError::Exhausted("document handle"))?;
        let following_id = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::Exhausted("id"))?;
        let handle = DocHandle(format!("d{}", self.next_doc));
        let todo = Todo {
            id: TodoId(self.next_id),
            title: new.title.clone(),
            progress: new.progress,
            detail: new.detail.clone(),
            createddate: new.createddate.clone(),
            updateddate: String::new(),
        };
        self.next_doc = following_doc;
        self.next_id = following_id;
        self.documents.insert(handle.clone(), todo.clone());
        Ok(Document { handle, todo })
    }

    pub fn sorted(&self) -> Vec<Todo> {
        let mut todos: Vec<Todo> = self.documents.values().cloned().collect();
        // stable: equal ids keep insertion order
        todos.sort_by_key(|t| t.id);
        todos
    }

    pub fn matching(&self, id: TodoId) -> Vec<Document> {
        self.documents
            .iter()
            .filter(|(_, todo)| todo.id == id)
            .map(|(handle, todo)| Document {
                handle: handle.clone(),
                todo: todo.clone(),
            })
            .collect()
    }

    pub fn merge(&mut self, handle: &DocHandle, patch: &TodoPatch) -> Result<Todo, StoreError> {
        let todo = self
            .documents
            .get_mut(handle)
            .ok_or_else(|| StoreError::DocumentNotFound(handle.clone()))?;
        patch.apply(todo);
        todo.updateddate = server_timestamp();
        Ok(todo.clone())
    }

    pub fn remove(&mut self, handle: &DocHandle) -> Result<(), StoreError> {
        self.documents
            .shift_remove(handle)
            .map(|_| ())
            .ok_or_else(|| StoreError::DocumentNotFound(handle.clone()))
    }
}
