mod confirm;
mod filter;
mod form;
mod table;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use confirm::handle_confirm;
use filter::handle_filter;
use form::{handle_progress_field, handle_text_field, submit_form};
use table::handle_table;

/// Handle a key event for whichever control has focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    // Delete confirmation intercepts all input
    if app.confirm_delete.is_some() {
        handle_confirm(app, key);
        return;
    }

    if handle_global(app, key) {
        return;
    }

    match app.focus {
        Focus::Title | Focus::Detail => handle_text_field(app, key),
        Focus::Progress => handle_progress_field(app, key),
        Focus::Filter => handle_filter(app, key),
        Focus::Table => handle_table(app, key),
    }
}

/// Keys that work regardless of focus. Returns true if the key was consumed.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Tab) => {
            let next = app.focus.next();
            app.set_focus(next);
        }
        (_, KeyCode::BackTab) => {
            let prev = app.focus.prev();
            app.set_focus(prev);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => submit_form(app),
        (_, KeyCode::Esc) if app.controller.state().is_editing() => {
            app.controller.cancel_edit();
            app.set_focus(app.focus);
            app.status_message = Some("edit cancelled".into());
        }
        _ => return false,
    }
    true
}
