use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Todo;
use crate::tui::app::{App, Focus};
use crate::util::unicode::{display_width, fit_to_width};

const ID_W: usize = 5;
const PROGRESS_W: usize = 11;
const UPDATED_W: usize = 20;
const GAP: &str = "  ";

/// Column widths for a given terminal width. Dates are dropped first when narrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    title: usize,
    detail: usize,
    created: usize,
    updated: usize,
}

fn layout_columns(width: usize, created_w: usize) -> Columns {
    // id, progress, and two gaps around them are always shown
    let fixed = 1 + ID_W + GAP.len() + PROGRESS_W + GAP.len();
    let mut created = created_w;
    let mut updated = UPDATED_W;
    let dates = |c: usize, u: usize| {
        (if c > 0 { c + GAP.len() } else { 0 }) + (if u > 0 { u + GAP.len() } else { 0 })
    };
    // title and detail need at least 24 cells between them
    if width < fixed + dates(created, updated) + 24 {
        updated = 0;
    }
    if width < fixed + dates(created, updated) + 24 {
        created = 0;
    }
    let flex = width
        .saturating_sub(fixed + dates(created, updated))
        .saturating_sub(GAP.len());
    let title = (flex * 3 / 5).max(1);
    let detail = flex.saturating_sub(title);
    Columns {
        title,
        detail,
        created,
        updated,
    }
}

/// Render the todo table, or the filtered table when a filter is active
pub fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    let rows_h = height.saturating_sub(1);

    // Keep the cursor row on screen
    app.clamp_cursor();
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if rows_h > 0 && app.cursor >= app.scroll_offset + rows_h {
        app.scroll_offset = app.cursor + 1 - rows_h;
    }

    let app = &*app;
    let todos = app.visible_todos();
    let created_w = todos
        .iter()
        .map(|t| display_width(&t.createddate))
        .max()
        .unwrap_or(0)
        .max("CREATED".len());
    let cols = layout_columns(area.width as usize, created_w);

    let mut lines: Vec<Line> = Vec::new();
    let header_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    lines.push(Line::from(Span::styled(
        row_text(&cols, ["ID", "TITLE", "PROGRESS", "DETAIL", "CREATED", "UPDATED"]),
        header_style,
    )));

    if todos.is_empty() {
        let state = app.controller.state();
        let msg = match (state.is_filtering(), state.filter_value()) {
            (false, _) => " No todos yet".to_string(),
            (true, Some(p)) => format!(" No todos marked \"{}\"", p),
            (true, None) => " No filter selected".to_string(),
        };
        lines.push(Line::from(Span::styled(
            msg,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let table_focused = app.focus == Focus::Table;
    for (i, todo) in todos.iter().enumerate().skip(app.scroll_offset).take(rows_h) {
        let is_cursor = table_focused && i == app.cursor;
        lines.push(todo_line(app, &cols, todo, is_cursor, area.width as usize));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn row_text(cols: &Columns, cells: [&str; 6]) -> String {
    let [id, title, progress, detail, created, updated] = cells;
    let mut out = format!(
        " {}{GAP}{}{GAP}{}{GAP}{}",
        fit_to_width(id, ID_W),
        fit_to_width(title, cols.title),
        fit_to_width(progress, PROGRESS_W),
        fit_to_width(detail, cols.detail),
    );
    if cols.created > 0 {
        out.push_str(GAP);
        out.push_str(&fit_to_width(created, cols.created));
    }
    if cols.updated > 0 {
        out.push_str(GAP);
        out.push_str(&fit_to_width(updated, cols.updated));
    }
    out
}

fn todo_line<'a>(app: &App, cols: &Columns, todo: &Todo, is_cursor: bool, width: usize) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let text = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let id = format!("#{}", todo.id);

    let mut spans = vec![
        Span::styled(format!(" {}{GAP}", fit_to_width(&id, ID_W)), dim),
        Span::styled(format!("{}{GAP}", fit_to_width(&todo.title, cols.title)), text),
        Span::styled(
            format!("{}{GAP}", fit_to_width(todo.progress.label(), PROGRESS_W)),
            Style::default()
                .fg(app.theme.progress_color(todo.progress))
                .bg(bg),
        ),
        Span::styled(fit_to_width(&todo.detail, cols.detail), text),
    ];
    if cols.created > 0 {
        spans.push(Span::styled(
            format!("{GAP}{}", fit_to_width(&todo.createddate, cols.created)),
            dim,
        ));
    }
    if cols.updated > 0 {
        spans.push(Span::styled(
            format!("{GAP}{}", fit_to_width(&todo.updateddate, cols.updated)),
            dim,
        ));
    }

    // Pad to full width for cursor
    if is_cursor {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if content_width < width {
            spans.push(Span::styled(
                " ".repeat(width - content_width),
                Style::default().bg(bg),
            ));
        }
    }

    Line::from(spans)
}
