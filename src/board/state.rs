use crate::model::{NewTodoDraft, Progress, Todo};
use crate::ops::todo_ops;

/// Which form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Which table is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListView {
    #[default]
    Unfiltered,
    Filtered,
}

/// Session state for one board.
///
/// Readable by anyone holding a reference; only the controller writes it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(super) todos: Vec<Todo>,
    pub(super) draft_new: NewTodoDraft,
    pub(super) draft_edit: Option<Todo>,
    pub(super) form_mode: FormMode,
    pub(super) list_view: ListView,
    pub(super) filter_value: Option<Progress>,
    pub(super) last_error: Option<String>,
}

impl AppState {
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn draft_new(&self) -> &NewTodoDraft {
        &self.draft_new
    }

    /// The todo being edited, while in edit mode
    pub fn draft_edit(&self) -> Option<&Todo> {
        self.draft_edit.as_ref()
    }

    pub fn form_mode(&self) -> FormMode {
        self.form_mode
    }

    pub fn is_editing(&self) -> bool {
        self.form_mode == FormMode::Edit
    }

    pub fn list_view(&self) -> ListView {
        self.list_view
    }

    pub fn is_filtering(&self) -> bool {
        self.list_view == ListView::Filtered
    }

    pub fn filter_value(&self) -> Option<Progress> {
        self.filter_value
    }

    /// Message from the most recent failed operation, cleared on the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Rows of whichever table is showing
    pub fn visible_todos(&self) -> Vec<&Todo> {
        match self.list_view {
            ListView::Unfiltered => self.todos.iter().collect(),
            ListView::Filtered => todo_ops::filter_by_progress(&self.todos, self.filter_value),
        }
    }
}
