use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::board::{Controller, ControllerSettings};
use crate::io::board_io;
use crate::io::logging;
use crate::model::{BoardConfig, Progress, Todo, TodoId};
use crate::store::{FileStore, TodoStore};

use super::input;
use super::render;
use super::theme::Theme;

/// Store behind the TUI's controller
pub type BoxedStore = Box<dyn TodoStore>;

/// Which control receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Progress,
    Detail,
    Filter,
    Table,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Title,
        Focus::Progress,
        Focus::Detail,
        Focus::Filter,
        Focus::Table,
    ];

    pub fn next(self) -> Focus {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Free-text form fields
    pub fn is_text_field(self) -> bool {
        matches!(self, Focus::Title | Focus::Detail)
    }
}

/// Main application state
pub struct App {
    pub controller: Controller<BoxedStore>,
    pub board_name: String,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub focus: Focus,
    /// Selected row in the visible table
    pub cursor: usize,
    /// First visible table row
    pub scroll_offset: usize,
    /// Byte offset of the text cursor in the focused text field
    pub text_cursor: usize,
    /// Todo awaiting a y/n delete confirmation
    pub confirm_delete: Option<TodoId>,
    /// Result of the last successful action
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller<BoxedStore>, config: &BoardConfig) -> Self {
        App {
            controller,
            board_name: config.board.name.clone(),
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            focus: Focus::Title,
            cursor: 0,
            scroll_offset: 0,
            text_cursor: 0,
            confirm_delete: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Rows of the table currently shown
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.controller.state().visible_todos()
    }

    /// The todo under the table cursor
    pub fn selected_todo(&self) -> Option<&Todo> {
        self.visible_todos().get(self.cursor).copied()
    }

    /// Keep the table cursor on a row after the list changes
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_todos().len();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }

    /// Current text of a form field, from whichever draft the form is showing
    pub fn field_text(&self, field: Focus) -> &str {
        let state = self.controller.state();
        match (state.draft_edit(), field) {
            (Some(todo), Focus::Title) => &todo.title,
            (Some(todo), Focus::Detail) => &todo.detail,
            (None, Focus::Title) => &state.draft_new().title,
            (None, Focus::Detail) => &state.draft_new().detail,
            _ => "",
        }
    }

    /// Progress selected in the form; the create form starts with none
    pub fn field_progress(&self) -> Option<Progress> {
        let state = self.controller.state();
        match state.draft_edit() {
            Some(todo) => Some(todo.progress),
            None => state.draft_new().progress,
        }
    }

    /// Move focus, placing the text cursor at the end of a text field
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.text_cursor = self.field_text(focus).len();
    }
}

/// Run the TUI application
pub fn run(board_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let board = board_io::locate_board(board_dir.map(Path::new))?;
    let _log_guard = logging::init_file(&board.board_dir);

    let store: BoxedStore = Box::new(FileStore::open(&board.board_dir, &board.config.store));
    let mut controller = Controller::new(store, ControllerSettings::from_config(&board.config));
    // A failed load leaves the error in the status row
    if let Err(e) = controller.load() {
        tracing::error!("initial load failed: {e}");
    }

    let mut app = App::new(controller, &board.config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
