pub mod filter_select;
pub mod form;
pub mod status_row;
pub mod table;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;
use crate::util::unicode::display_width;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | form | filter | table | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(5), // form: border + 3 fields
            Constraint::Length(1), // filter control
            Constraint::Min(1),    // table
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    form::render_form(frame, app, chunks[1]);
    filter_select::render_filter_select(frame, app, chunks[2]);
    table::render_table(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);
}

/// Board name on the left, current form mode on the right
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let name = format!(" {}", app.board_name);
    let mode = match app.controller.state().draft_edit() {
        Some(todo) => format!("editing #{} ", todo.id),
        None => "new todo ".to_string(),
    };

    let mut spans = vec![Span::styled(
        name.clone(),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let used = display_width(&name) + display_width(&mode);
    let width = area.width as usize;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(mode, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::model::TodoId;

    #[test]
    fn full_screen_shows_every_region() {
        let mut app = app_with_todos(sample_todos());
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.starts_with(" Chores"));
        assert!(out.contains("new todo"));
        assert!(out.contains("Title"));
        assert!(out.contains("Filter"));
        assert!(out.contains("Buy milk"));
    }

    #[test]
    fn header_shows_edit_mode() {
        let mut app = app_with_todos(sample_todos());
        app.controller.begin_edit(TodoId(3)).unwrap();
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.lines().next().unwrap().ends_with("editing #3"));
    }
}
