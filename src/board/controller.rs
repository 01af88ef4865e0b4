use std::fmt::Write as _;

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

use super::clock::{Clock, SystemClock};
use super::state::{AppState, FormMode, ListView};
use crate::model::{BoardConfig, FieldChange, NewTodo, NewTodoDraft, Progress, Todo, TodoId, TodoPatch};
use crate::ops::todo_ops;
use crate::store::{ErrorClass, RetryPolicy, StoreError, TodoStore, with_retry};

/// Error type for controller operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("not editing a todo")]
    NotEditing,
    #[error("todo {0} is not in the list")]
    UnknownTodo(TodoId),
    #[error("invalid date format {0:?}")]
    DateFormat(String),
}

/// Result of submitting the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The store acknowledged the edit; this is the merged record
    Saved(Todo),
    /// No stored document carries this id any more; nothing was written
    Missing(TodoId),
}

/// Settings the controller takes from board config
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub date_format: String,
    pub retry: RetryPolicy,
}

impl ControllerSettings {
    pub fn from_config(config: &BoardConfig) -> Self {
        ControllerSettings {
            date_format: config.ui.date_format.clone(),
            retry: RetryPolicy::from_config(&config.store.retry),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

/// Owns the session state and turns form/table events into store calls.
///
/// Every write waits for the store to acknowledge it before the local
/// list changes. A failed write leaves the list as it was and records
/// the error in [`AppState::last_error`].
pub struct Controller<S: TodoStore> {
    store: S,
    state: AppState,
    settings: ControllerSettings,
    clock: Box<dyn Clock>,
}

impl<S: TodoStore> Controller<S> {
    pub fn new(store: S, settings: ControllerSettings) -> Self {
        Self::with_clock(store, settings, Box::new(SystemClock))
    }

    pub fn with_clock(store: S, settings: ControllerSettings, clock: Box<dyn Clock>) -> Self {
        Controller {
            store,
            state: AppState::default(),
            settings,
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Initial load
    // -----------------------------------------------------------------------

    /// Replace the list in full with the store's contents, ordered by id
    pub fn load(&mut self) -> Result<usize, BoardError> {
        let store = &self.store;
        let result = with_retry(&self.settings.retry, "list_all", || store.list_all());
        let todos = self.settle(result)?;
        tracing::info!(count = todos.len(), "loaded todos");
        self.state.todos = todos;
        Ok(self.state.todos.len())
    }

    // -----------------------------------------------------------------------
    // Create form
    // -----------------------------------------------------------------------

    pub fn update_draft(&mut self, change: FieldChange) {
        self.state.draft_new.apply(change);
    }

    /// Persist the create-form draft, then append it locally.
    ///
    /// On success the draft and the filter value are cleared. The form
    /// stays in create mode either way.
    pub fn submit_create(&mut self) -> Result<Todo, BoardError> {
        let new = match self.build_new_todo() {
            Ok(new) => new,
            Err(e) => return Err(self.fail(e)),
        };

        let store = &mut self.store;
        let result = with_retry(&self.settings.retry, "create", || store.create(&new));
        let doc = self.settle(result)?;

        tracing::info!(id = %doc.todo.id, handle = %doc.handle, "created todo");
        self.state.todos.push(doc.todo.clone());
        self.state.draft_new = NewTodoDraft::default();
        self.state.filter_value = None;
        Ok(doc.todo)
    }

    fn build_new_todo(&self) -> Result<NewTodo, BoardError> {
        let draft = &self.state.draft_new;
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(BoardError::MissingField("title"));
        }
        let progress = draft.progress.ok_or(BoardError::MissingField("progress"))?;
        Ok(NewTodo {
            title: title.to_string(),
            progress,
            detail: draft.detail.clone(),
            createddate: format_date(self.clock.now(), &self.settings.date_format)?,
        })
    }

    // -----------------------------------------------------------------------
    // Edit form
    // -----------------------------------------------------------------------

    /// Copy a row into the edit draft and switch to edit mode
    pub fn begin_edit(&mut self, id: TodoId) -> Result<(), BoardError> {
        let todo = match todo_ops::find_by_id(&self.state.todos, id) {
            Some(todo) => todo.clone(),
            None => return Err(self.fail(BoardError::UnknownTodo(id))),
        };
        self.state.draft_edit = Some(todo);
        self.state.form_mode = FormMode::Edit;
        Ok(())
    }

    /// Merge one changed field into the edit draft
    pub fn edit_field(&mut self, change: FieldChange) -> Result<(), BoardError> {
        match self.state.draft_edit.as_mut() {
            Some(draft) => {
                draft.apply(change);
                Ok(())
            }
            None => Err(self.fail(BoardError::NotEditing)),
        }
    }

    /// Leave edit mode without writing anything
    pub fn cancel_edit(&mut self) {
        self.state.draft_edit = None;
        self.state.form_mode = FormMode::Create;
    }

    /// Write the edit draft to every stored document with its id, then
    /// replace the local entry with the store's merged record.
    ///
    /// A failure keeps the form in edit mode so the user can retry.
    pub fn submit_edit(&mut self) -> Result<EditOutcome, BoardError> {
        let draft = match self.state.draft_edit.clone() {
            Some(draft) => draft,
            None => return Err(self.fail(BoardError::NotEditing)),
        };
        if draft.title.trim().is_empty() {
            return Err(self.fail(BoardError::MissingField("title")));
        }
        let id = draft.id;
        let patch = TodoPatch::from_todo(&draft);

        let store = &self.store;
        let result = with_retry(&self.settings.retry, "find_by_id", || store.find_by_id(id));
        let docs = self.settle(result)?;

        let mut merged: Option<Todo> = None;
        for doc in &docs {
            let store = &mut self.store;
            let result = with_retry(&self.settings.retry, "update", || {
                store.update(&doc.handle, &patch)
            });
            match result {
                Ok(todo) => merged = Some(todo),
                Err(e) if e.class() == ErrorClass::NotFound => {
                    tracing::debug!(handle = %doc.handle, "document vanished before update");
                }
                Err(e) => return Err(self.fail(e.into())),
            }
        }

        self.cancel_edit();
        self.state.last_error = None;
        match merged {
            Some(todo) => {
                todo_ops::replace_by_id(&mut self.state.todos, id, &todo);
                tracing::info!(%id, "updated todo");
                Ok(EditOutcome::Saved(todo))
            }
            None => {
                tracing::info!(%id, "edited todo no longer stored");
                Ok(EditOutcome::Missing(id))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Delete every stored document with this id, then drop it from the list.
    /// Returns the number of stored documents removed; an unknown id is a no-op.
    pub fn delete(&mut self, id: TodoId) -> Result<usize, BoardError> {
        let store = &self.store;
        let result = with_retry(&self.settings.retry, "find_by_id", || store.find_by_id(id));
        let docs = self.settle(result)?;

        let mut removed = 0;
        for doc in &docs {
            let store = &mut self.store;
            match with_retry(&self.settings.retry, "delete", || store.delete(&doc.handle)) {
                Ok(()) => removed += 1,
                Err(e) if e.class() == ErrorClass::NotFound => {}
                Err(e) => {
                    // documents already deleted stay deleted; the list is
                    // reconciled on the next delete of this id or reload
                    return Err(self.fail(e.into()));
                }
            }
        }

        let dropped = todo_ops::remove_by_id(&mut self.state.todos, id);
        if self.state.draft_edit.as_ref().is_some_and(|d| d.id == id) {
            self.cancel_edit();
        }
        tracing::info!(%id, removed, dropped, "deleted todo");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Filter control
    // -----------------------------------------------------------------------

    /// Select a filter option and switch to the filtered table
    pub fn set_filter(&mut self, progress: Progress) {
        self.state.filter_value = Some(progress);
        self.state.list_view = ListView::Filtered;
    }

    // -----------------------------------------------------------------------
    // Error bookkeeping
    // -----------------------------------------------------------------------

    fn settle<T>(&mut self, result: Result<T, StoreError>) -> Result<T, BoardError> {
        match result {
            Ok(value) => {
                self.state.last_error = None;
                Ok(value)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    fn fail(&mut self, err: BoardError) -> BoardError {
        tracing::warn!("{err}");
        self.state.last_error = Some(err.to_string());
        err
    }
}

/// Format `now` with a strftime pattern, rejecting patterns chrono can't render
pub fn format_date(now: NaiveDateTime, pattern: &str) -> Result<String, BoardError> {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(BoardError::DateFormat(pattern.to_string()));
    }
    let mut out = String::new();
    write!(out, "{}", now.format_with_items(items.into_iter()))
        .map_err(|_| BoardError::DateFormat(pattern.to_string()))?;
    Ok(out)
}
