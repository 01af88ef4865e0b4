use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric todo identifier, unique within a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(TodoId)
    }
}

/// Progress status. Stored and displayed as its label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progress {
    #[serde(rename = "not started")]
    NotStarted,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl Progress {
    /// Every option, in the order the filter control lists them
    pub const ALL: [Progress; 3] = [Progress::NotStarted, Progress::InProgress, Progress::Done];

    pub fn label(self) -> &'static str {
        match self {
            Progress::NotStarted => "not started",
            Progress::InProgress => "in progress",
            Progress::Done => "done",
        }
    }

    /// Parse a label, accepting `-`/`_` in place of the space
    pub fn from_label(s: &str) -> Option<Progress> {
        let norm = s.trim().to_lowercase().replace(['-', '_'], " ");
        Progress::ALL.into_iter().find(|p| p.label() == norm)
    }

    /// Next option, wrapping around
    pub fn next(self) -> Progress {
        let idx = Progress::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Progress::ALL[(idx + 1) % Progress::ALL.len()]
    }

    /// Previous option, wrapping around
    pub fn prev(self) -> Progress {
        let idx = Progress::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Progress::ALL[(idx + Progress::ALL.len() - 1) % Progress::ALL.len()]
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single todo record, as stored in the `todos` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub progress: Progress,
    #[serde(default)]
    pub detail: String,
    /// Formatted at creation time with the board's date format
    #[serde(default)]
    pub createddate: String,
    /// RFC 3339 timestamp assigned by the store on update; empty until then
    #[serde(default)]
    pub updateddate: String,
}

/// Fields captured by the create form. `id` and dates are assigned on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodoDraft {
    pub title: String,
    pub progress: Option<Progress>,
    pub detail: String,
}

/// What the store receives for an insert: everything but the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub progress: Progress,
    pub detail: String,
    pub createddate: String,
}

/// Edited fields merged into a stored document. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub progress: Option<Progress>,
    pub detail: Option<String>,
}

impl TodoPatch {
    /// A patch carrying every user-editable field of `todo`
    pub fn from_todo(todo: &Todo) -> Self {
        TodoPatch {
            title: Some(todo.title.clone()),
            progress: Some(todo.progress),
            detail: Some(todo.detail.clone()),
        }
    }

    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(progress) = self.progress {
            todo.progress = progress;
        }
        if let Some(detail) = &self.detail {
            todo.detail = detail.clone();
        }
    }
}

/// A single form field change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title(String),
    Progress(Progress),
    Detail(String),
}

impl NewTodoDraft {
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Title(t) => self.title = t,
            FieldChange::Progress(p) => self.progress = Some(p),
            FieldChange::Detail(d) => self.detail = d,
        }
    }
}

impl Todo {
    /// Shallow merge of one field; the rest is retained
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Title(t) => self.title = t,
            FieldChange::Progress(p) => self.progress = p,
            FieldChange::Detail(d) => self.detail = d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_serializes_as_label() {
        let json = serde_json::to_string(&Progress::InProgress).unwrap();
        assert_eq!(json, "\"in progress\"");
        let back: Progress = serde_json::from_str("\"not started\"").unwrap();
        assert_eq!(back, Progress::NotStarted);
    }

    #[test]
    fn progress_from_label_is_lenient() {
        assert_eq!(Progress::from_label("done"), Some(Progress::Done));
        assert_eq!(Progress::from_label("In-Progress"), Some(Progress::InProgress));
        assert_eq!(Progress::from_label("not_started"), Some(Progress::NotStarted));
        assert_eq!(Progress::from_label("later"), None);
    }

    #[test]
    fn progress_cycles() {
        assert_eq!(Progress::Done.next(), Progress::NotStarted);
        assert_eq!(Progress::NotStarted.prev(), Progress::Done);
        assert_eq!(Progress::NotStarted.next(), Progress::InProgress);
    }

    #[test]
    fn todo_id_parses_with_hash() {
        assert_eq!("#12".parse::<TodoId>().unwrap(), TodoId(12));
        assert_eq!(" 3 ".parse::<TodoId>().unwrap(), TodoId(3));
        assert!("x".parse::<TodoId>().is_err());
    }

    #[test]
    fn todo_missing_dates_default_to_empty() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":1,"title":"a","progress":"done"}"#).unwrap();
        assert_eq!(todo.createddate, "");
        assert_eq!(todo.updateddate, "");
        assert_eq!(todo.detail, "");
    }

    #[test]
    fn patch_leaves_unset_fields() {
        let mut todo = Todo {
            id: TodoId(1),
            title: "Buy milk".into(),
            progress: Progress::NotStarted,
            detail: "2%".into(),
            createddate: "2026年10月16日".into(),
            updateddate: String::new(),
        };
        TodoPatch {
            progress: Some(Progress::Done),
            ..Default::default()
        }
        .apply(&mut todo);
        assert_eq!(todo.progress, Progress::Done);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.detail, "2%");
    }
}
