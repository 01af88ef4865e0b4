use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let Some(id) = app.confirm_delete.take() else {
                return;
            };
            let was_editing = app.controller.state().is_editing();
            match app.controller.delete(id) {
                Ok(0) => app.status_message = Some(format!("no todo #{}", id)),
                Ok(_) => app.status_message = Some(format!("deleted #{}", id)),
                Err(_) => {}
            }
            // Deleting the todo being edited drops the edit form
            if was_editing && !app.controller.state().is_editing() && app.focus.is_text_field() {
                app.set_focus(Focus::Table);
            }
            app.clamp_cursor();
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm_delete = None;
        }
        _ => {}
    }
}
