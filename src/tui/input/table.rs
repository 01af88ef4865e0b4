use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Focus};

pub(super) fn handle_table(app: &mut App, key: KeyEvent) {
    let count = app.visible_todos().len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.cursor = count.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char('e') => {
            let Some(id) = app.selected_todo().map(|t| t.id) else {
                return;
            };
            if app.controller.begin_edit(id).is_ok() {
                app.set_focus(Focus::Title);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.confirm_delete = app.selected_todo().map(|t| t.id);
        }
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}
