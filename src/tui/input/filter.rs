use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Progress;
use crate::tui::app::{App, Focus};

pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    let current = app.controller.state().filter_value();
    let chosen = match key.code {
        KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
            current.map_or(Progress::ALL[0], Progress::next)
        }
        KeyCode::Left => current.map_or(Progress::ALL[0], Progress::prev),
        KeyCode::Char(c @ '1'..='3') => Progress::ALL[(c as usize) - ('1' as usize)],
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Up => {
            app.set_focus(Focus::Filter.prev());
            return;
        }
        KeyCode::Down => {
            app.set_focus(Focus::Table);
            return;
        }
        _ => return,
    };
    app.controller.set_filter(chosen);
    app.cursor = 0;
    app.scroll_offset = 0;
}
