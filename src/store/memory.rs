use std::cell::RefCell;
use std::collections::VecDeque;

use super::{Collection, DocHandle, Document, StoreError, TodoStore};
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

/// In-process collection with scripted failures, for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: Collection,
    faults: RefCell<VecDeque<Option<StoreError>>>,
    calls: RefCell<Vec<&'static str>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed documents directly, bypassing id allocation.
    /// Duplicate ids are allowed, which lets tests model legacy data.
    pub fn with_documents(todos: Vec<Todo>) -> Self {
        let mut collection = Collection::default();
        for todo in todos {
            let handle = DocHandle(format!("d{}", collection.next_doc));
            collection.next_doc += 1;
            collection.documents.insert(handle, todo);
        }
        collection.normalize();
        MemoryStore {
            collection,
            ..Default::default()
        }
    }

    /// Make the next store call fail with `err`. Faults queue up in order.
    pub fn inject_fault(&self, err: StoreError) {
        self.inject_fault_after(0, err);
    }

    /// Let `passes` more calls succeed, then fail the one after with `err`
    pub fn inject_fault_after(&self, passes: usize, err: StoreError) {
        let mut faults = self.faults.borrow_mut();
        faults.extend(std::iter::repeat_with(|| None).take(passes));
        faults.push_back(Some(err));
    }

    /// Names of the store calls made so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Raw view of the stored documents, in insertion order
    pub fn documents(&self) -> Vec<Todo> {
        self.collection.documents.values().cloned().collect()
    }

    fn enter(&self, op: &'static str) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(op);
        match self.faults.borrow_mut().pop_front() {
            Some(Some(err)) => Err(err),
            _ => Ok(()),
        }
    }
}

impl TodoStore for MemoryStore {
    fn create(&mut self, new: &NewTodo) -> Result<Document, StoreError> {
        self.enter("create")?;
        self.collection.insert(new)
    }

    fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        self.enter("list_all")?;
        Ok(self.collection.sorted())
    }

    fn find_by_id(&self, id: TodoId) -> Result<Vec<Document>, StoreError> {
        self.enter("find_by_id")?;
        Ok(self.collection.matching(id))
    }

    fn update(&mut self, handle: &DocHandle, patch: &TodoPatch) -> Result<Todo, StoreError> {
        self.enter("update")?;
        self.collection.merge(handle, patch)
    }

    fn delete(&mut self, handle: &DocHandle) -> Result<(), StoreError> {
        self.enter("delete")?;
        self.collection.remove(handle)
    }
}
