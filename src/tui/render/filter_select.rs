use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Progress;
use crate::ops::todo_ops::progress_counts;
use crate::tui::app::{App, Focus};

/// Render the filter control: every progress option with its count,
/// the selected one highlighted
pub fn render_filter_select(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let state = app.controller.state();
    let focused = app.focus == Focus::Filter;
    let counts = progress_counts(state.todos());
    let selected = if state.is_filtering() {
        state.filter_value()
    } else {
        None
    };

    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let marker = if focused { "\u{25B8}" } else { " " };

    let mut spans = vec![Span::styled(format!("{}Filter   ", marker), label_style)];
    for (i, p) in Progress::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().bg(bg)));
        }
        let text = format!(" {} {} ", p.label(), counts.get(p));
        let style = if selected == Some(p) {
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.progress_color(p))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.progress_color(p)).bg(bg)
        };
        spans.push(Span::styled(text, style));
    }

    // The filtered view with no value selected matches nothing
    if state.is_filtering() && selected.is_none() {
        spans.push(Span::styled(
            "  (pick a filter)",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else if !state.is_filtering() {
        spans.push(Span::styled(
            "  showing all",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldChange;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_filter_select(frame, app, area)
        })
    }

    #[test]
    fn lists_options_with_counts() {
        let app = app_with_todos(sample_todos());
        let out = render(&app);
        assert!(out.contains("not started 1"));
        assert!(out.contains("in progress 1"));
        assert!(out.contains("done 1"));
        assert!(out.contains("showing all"));
    }

    #[test]
    fn cleared_filter_value_prompts_for_a_pick() {
        let mut app = app_with_todos(sample_todos());
        app.controller.set_filter(Progress::Done);
        assert!(!render(&app).contains("pick a filter"));

        app.controller
            .update_draft(FieldChange::Title("New".into()));
        app.controller
            .update_draft(FieldChange::Progress(Progress::Done));
        app.controller.submit_create().unwrap();
        let out = render(&app);
        assert!(out.contains("pick a filter"));
        assert!(out.contains("done 2"));
    }
}
