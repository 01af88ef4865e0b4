use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::board::{Controller, ControllerSettings, FixedClock};
use crate::model::{BoardConfig, Progress, Todo, TodoId};
use crate::store::{MemoryStore, RetryPolicy};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn todo(id: u64, title: &str, progress: Progress) -> Todo {
    Todo {
        id: TodoId(id),
        title: title.into(),
        progress,
        detail: String::new(),
        createddate: "2026年10月16日".into(),
        updateddate: String::new(),
    }
}

/// Three todos, one per progress status
pub fn sample_todos() -> Vec<Todo> {
    vec![
        todo(1, "Buy milk", Progress::NotStarted),
        todo(2, "Walk dog", Progress::InProgress),
        todo(3, "File taxes", Progress::Done),
    ]
}

/// An App over an in-memory store seeded with `todos`, already loaded.
pub fn app_with_todos(todos: Vec<Todo>) -> App {
    let mut config = BoardConfig::default();
    config.board.name = "Chores".into();
    let settings = ControllerSettings {
        date_format: config.ui.date_format.clone(),
        retry: RetryPolicy::none(),
    };
    let at = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let mut controller = Controller::with_clock(
        Box::new(MemoryStore::with_documents(todos)) as Box<dyn crate::store::TodoStore>,
        settings,
        Box::new(FixedClock(at)),
    );
    controller.load().unwrap();
    App::new(controller, &config)
}

pub fn empty_app() -> App {
    app_with_todos(Vec::new())
}
