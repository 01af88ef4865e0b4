use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::util::unicode::{byte_offset_to_display_col, display_width, truncate_to_width};

const LABEL_W: usize = 10;

/// Render the create form, or the edit form while a todo is being edited
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.controller.state().draft_edit();

    let (title, border_color) = match editing {
        Some(todo) => (format!(" Edit #{} ", todo.id), app.theme.highlight),
        None => (" New todo ".to_string(), app.theme.dim),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    let value_w = (inner.width as usize).saturating_sub(LABEL_W);

    let progress_value = match app.field_progress() {
        Some(p) => Span::styled(
            format!("\u{25C2} {} \u{25B8}", p.label()),
            Style::default().fg(app.theme.progress_color(p)).bg(bg),
        ),
        None => Span::styled(
            "\u{25C2} choose \u{25B8}",
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    };

    let lines = vec![
        field_line(app, Focus::Title, "Title", text_value(app, Focus::Title, value_w)),
        field_line(app, Focus::Progress, "Progress", progress_value),
        field_line(app, Focus::Detail, "Detail", text_value(app, Focus::Detail, value_w)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        area,
    );

    // Terminal cursor inside the focused text field
    if app.focus.is_text_field() && app.confirm_delete.is_none() {
        let row = if app.focus == Focus::Title { 0 } else { 2 };
        let text = app.field_text(app.focus);
        let col = byte_offset_to_display_col(text, app.text_cursor).min(value_w);
        frame.set_cursor_position(Position::new(
            inner.x + (LABEL_W + col) as u16,
            inner.y + row,
        ));
    }
}

fn text_value<'a>(app: &'a App, field: Focus, width: usize) -> Span<'a> {
    let text = app.field_text(field);
    let shown = if display_width(text) > width {
        truncate_to_width(text, width)
    } else {
        text.to_string()
    };
    Span::styled(shown, Style::default().fg(app.theme.text_bright).bg(app.theme.background))
}

fn field_line<'a>(app: &'a App, field: Focus, label: &str, value: Span<'a>) -> Line<'a> {
    let focused = app.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    };
    let marker = if focused { "\u{25B8}" } else { " " };
    Line::from(vec![
        Span::styled(format!("{}{:<w$}", marker, label, w = LABEL_W - 1), label_style),
        value,
    ])
}
