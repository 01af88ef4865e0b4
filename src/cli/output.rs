use serde::Serialize;

use crate::model::{Progress, Todo};
use crate::ops::todo_ops::ProgressCounts;
use crate::store::Document;
use crate::util::unicode::{display_width, fit_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoListJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    pub todos: Vec<&'a Todo>,
}

#[derive(Serialize)]
pub struct DocumentJson<'a> {
    pub handle: &'a str,
    #[serde(flatten)]
    pub todo: &'a Todo,
}

#[derive(Serialize)]
pub struct ProgressOptionJson {
    pub label: Progress,
    pub count: usize,
}

pub fn document_to_json(doc: &Document) -> DocumentJson<'_> {
    DocumentJson {
        handle: &doc.handle.0,
        todo: &doc.todo,
    }
}

pub fn progress_options_json(counts: &ProgressCounts) -> Vec<ProgressOptionJson> {
    Progress::ALL
        .into_iter()
        .map(|label| ProgressOptionJson {
            label,
            count: counts.get(label),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const HEADERS: [&str; 6] = ["ID", "TITLE", "PROGRESS", "DETAIL", "CREATED", "UPDATED"];
const MAX_CELL: usize = 40;

fn row_cells(todo: &Todo) -> [String; 6] {
    [
        format!("#{}", todo.id),
        todo.title.clone(),
        todo.progress.label().to_string(),
        todo.detail.clone(),
        todo.createddate.clone(),
        todo.updateddate.clone(),
    ]
}

/// Format todos as an aligned table with a header row.
/// Cells wider than 40 columns are truncated.
pub fn format_todo_table(todos: &[&Todo]) -> Vec<String> {
    let rows: Vec<[String; 6]> = todos.iter().map(|t| row_cells(t)).collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell).min(MAX_CELL));
        }
    }

    let render = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| fit_to_width(cell, w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(&HEADERS)];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(render(&cells));
    }
    lines
}

/// Format one stored document as a detail block
pub fn format_document(doc: &Document) -> Vec<String> {
    let todo = &doc.todo;
    let mut lines = vec![
        format!("#{} {}", todo.id, todo.title),
        format!("progress: {}", todo.progress),
    ];
    if !todo.detail.is_empty() {
        lines.push(format!("detail: {}", todo.detail));
    }
    if !todo.createddate.is_empty() {
        lines.push(format!("created: {}", todo.createddate));
    }
    if !todo.updateddate.is_empty() {
        lines.push(format!("updated: {}", todo.updateddate));
    }
    lines.push(format!("document: {}", doc.handle));
    lines
}

/// Format the filter options with how many todos have each
pub fn format_progress_options(counts: &ProgressCounts) -> Vec<String> {
    Progress::ALL
        .into_iter()
        .map(|p| format!("{:<12} {}", p.label(), counts.get(p)))
        .collect()
}

/// Parse a progress label given on the command line
pub fn parse_progress(s: &str) -> Result<Progress, String> {
    Progress::from_label(s).ok_or_else(|| {
        format!(
            "unknown progress '{}' (expected: {})",
            s,
            Progress::ALL.map(Progress::label).join(", ")
        )
    })
}
