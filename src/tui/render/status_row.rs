use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::TodoId;
use crate::ops::todo_ops;
use crate::tui::app::{App, Focus};
use crate::util::unicode::truncate_to_width;

fn key_hints(app: &App) -> &'static str {
    match app.focus {
        Focus::Title | Focus::Detail if app.controller.state().is_editing() => {
            "Enter save  Esc cancel  Tab next  Ctrl-Q quit"
        }
        Focus::Title | Focus::Detail => "Enter add  Tab next  Ctrl-Q quit",
        Focus::Progress => "\u{2190}/\u{2192} choose  Enter submit  Tab next",
        Focus::Filter => "\u{2190}/\u{2192} or 1-3 filter  Tab next  q quit",
        Focus::Table => "e edit  d delete  j/k move  Tab next  q quit",
    }
}

fn confirm_text(app: &App, id: TodoId) -> String {
    match todo_ops::find_by_id(app.controller.state().todos(), id) {
        Some(todo) => format!("delete #{} \"{}\"? (y/n)", id, todo.title),
        None => format!("delete #{}? (y/n)", id),
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (text, style) = if let Some(id) = app.confirm_delete {
        (
            confirm_text(app, id),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    } else if let Some(msg) = &app.status_message {
        (msg.clone(), Style::default().fg(app.theme.green).bg(bg))
    } else if let Some(err) = app.controller.state().last_error() {
        (
            format!("error: {}", err),
            Style::default().fg(app.theme.red).bg(bg),
        )
    } else if app.show_key_hints {
        (
            key_hints(app).to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        )
    } else {
        (String::new(), Style::default().bg(bg))
    };

    let line = Line::from(Span::styled(
        format!(" {}", truncate_to_width(&text, width.saturating_sub(1))),
        style,
    ));
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
