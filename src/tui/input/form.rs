use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::board::EditOutcome;
use crate::model::{FieldChange, Progress};
use crate::tui::app::{App, Focus};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

pub(super) fn handle_text_field(app: &mut App, key: KeyEvent) {
    let field = app.focus;
    let mut text = app.field_text(field).to_string();
    let mut cursor = app.text_cursor.min(text.len());

    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            submit_form(app);
            return;
        }
        (_, KeyCode::Up) => {
            app.set_focus(field.prev());
            return;
        }
        (_, KeyCode::Down) => {
            app.set_focus(field.next());
            return;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let start = word_boundary_left(&text, cursor);
            text.replace_range(start..cursor, "");
            cursor = start;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            text.clear();
            cursor = 0;
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            text.insert(cursor, c);
            cursor += c.len_utf8();
        }
        (_, KeyCode::Backspace) => {
            let Some(start) = prev_grapheme_boundary(&text, cursor) else {
                return;
            };
            text.replace_range(start..cursor, "");
            cursor = start;
        }
        (_, KeyCode::Delete) => {
            let Some(end) = next_grapheme_boundary(&text, cursor) else {
                return;
            };
            text.replace_range(cursor..end, "");
        }
        (_, KeyCode::Left) => {
            app.text_cursor = prev_grapheme_boundary(&text, cursor).unwrap_or(0);
            return;
        }
        (_, KeyCode::Right) => {
            app.text_cursor = next_grapheme_boundary(&text, cursor).unwrap_or(text.len());
            return;
        }
        (_, KeyCode::Home) => {
            app.text_cursor = 0;
            return;
        }
        (_, KeyCode::End) => {
            app.text_cursor = text.len();
            return;
        }
        _ => return,
    }

    let change = match field {
        Focus::Detail => FieldChange::Detail(text),
        _ => FieldChange::Title(text),
    };
    apply_change(app, change);
    app.text_cursor = cursor;
}

pub(super) fn handle_progress_field(app: &mut App, key: KeyEvent) {
    let current = app.field_progress();
    let chosen = match key.code {
        KeyCode::Right | KeyCode::Char(' ') => current.map_or(Progress::ALL[0], Progress::next),
        KeyCode::Left => current.map_or(Progress::ALL[0], Progress::prev),
        KeyCode::Char(c @ '1'..='3') => Progress::ALL[(c as usize) - ('1' as usize)],
        KeyCode::Enter => {
            submit_form(app);
            return;
        }
        KeyCode::Up => {
            app.set_focus(Focus::Progress.prev());
            return;
        }
        KeyCode::Down => {
            app.set_focus(Focus::Progress.next());
            return;
        }
        _ => return,
    };
    apply_change(app, FieldChange::Progress(chosen));
}

/// Merge a field change into whichever draft the form is showing
fn apply_change(app: &mut App, change: FieldChange) {
    if app.controller.state().is_editing() {
        if let Err(e) = app.controller.edit_field(change) {
            tracing::warn!("{e}");
        }
    } else {
        app.controller.update_draft(change);
    }
}

/// Submit the create form or the edit form. Failures stay in `last_error`.
pub(super) fn submit_form(app: &mut App) {
    if app.controller.state().is_editing() {
        match app.controller.submit_edit() {
            Ok(EditOutcome::Saved(todo)) => {
                app.status_message = Some(format!("saved #{}", todo.id));
                app.set_focus(Focus::Table);
            }
            Ok(EditOutcome::Missing(id)) => {
                app.status_message = Some(format!("#{} no longer exists", id));
                app.set_focus(Focus::Table);
            }
            Err(_) => {}
        }
    } else if let Ok(todo) = app.controller.submit_create() {
        app.status_message = Some(format!("added #{}", todo.id));
        app.set_focus(Focus::Title);
    }
    app.clamp_cursor();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn insert_and_backspace_by_grapheme() {
        let mut app = empty_app();
        for c in "牛乳e\u{0301}".chars() {
            handle_text_field(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.field_text(Focus::Title), "牛乳e\u{0301}");
        handle_text_field(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.field_text(Focus::Title), "牛乳");
        assert_eq!(app.text_cursor, "牛乳".len());
    }

    #[test]
    fn insert_in_middle() {
        let mut app = empty_app();
        for c in "ac".chars() {
            handle_text_field(&mut app, key(KeyCode::Char(c)));
        }
        handle_text_field(&mut app, key(KeyCode::Left));
        handle_text_field(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.field_text(Focus::Title), "abc");
        assert_eq!(app.text_cursor, 2);
    }

    #[test]
    fn ctrl_w_deletes_word() {
        let mut app = empty_app();
        for c in "buy whole milk".chars() {
            handle_text_field(&mut app, key(KeyCode::Char(c)));
        }
        handle_text_field(
            &mut app,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.field_text(Focus::Title), "buy whole ");
    }

    #[test]
    fn progress_field_cycles_and_selects_by_number() {
        let mut app = empty_app();
        app.set_focus(Focus::Progress);
        assert_eq!(app.field_progress(), None);
        handle_progress_field(&mut app, key(KeyCode::Right));
        assert_eq!(app.field_progress(), Some(Progress::NotStarted));
        handle_progress_field(&mut app, key(KeyCode::Right));
        assert_eq!(app.field_progress(), Some(Progress::InProgress));
        handle_progress_field(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.field_progress(), Some(Progress::Done));
    }

    #[test]
    fn detail_field_edits_detail() {
        let mut app = empty_app();
        app.set_focus(Focus::Detail);
        handle_text_field(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.controller.state().draft_new().detail, "x");
        assert_eq!(app.controller.state().draft_new().title, "");
    }
}
