use crate::model::{Progress, Todo, TodoId};

// ---------------------------------------------------------------------------
// Local mirror edits
// ---------------------------------------------------------------------------

/// Replace every entry with this `id` by `replacement`. Returns how many were replaced.
pub fn replace_by_id(todos: &mut [Todo], id: TodoId, replacement: &Todo) -> usize {
    let mut replaced = 0;
    for todo in todos.iter_mut().filter(|t| t.id == id) {
        *todo = replacement.clone();
        replaced += 1;
    }
    replaced
}

/// Drop every entry with this `id` in a single pass. Returns how many were removed.
pub fn remove_by_id(todos: &mut Vec<Todo>, id: TodoId) -> usize {
    let before = todos.len();
    todos.retain(|t| t.id != id);
    before - todos.len()
}

pub fn find_by_id(todos: &[Todo], id: TodoId) -> Option<&Todo> {
    todos.iter().find(|t| t.id == id)
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The filtered table's rows: exact match on progress, list order kept.
/// No filter value matches nothing.
pub fn filter_by_progress(todos: &[Todo], filter: Option<Progress>) -> Vec<&Todo> {
    match filter {
        Some(progress) => todos.iter().filter(|t| t.progress == progress).collect(),
        None => Vec::new(),
    }
}

/// Per-status totals, in filter option order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl ProgressCounts {
    pub fn get(&self, progress: Progress) -> usize {
        match progress {
            Progress::NotStarted => self.not_started,
            Progress::InProgress => self.in_progress,
            Progress::Done => self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.done
    }
}

pub fn progress_counts(todos: &[Todo]) -> ProgressCounts {
    let mut counts = ProgressCounts::default();
    for todo in todos {
        match todo.progress {
            Progress::NotStarted => counts.not_started += 1,
            Progress::InProgress => counts.in_progress += 1,
            Progress::Done => counts.done += 1,
        }
    }
    counts
}
