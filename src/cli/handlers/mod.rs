mod init;
pub use init::cmd_init;

use std::path::Path;

use crate::board::{Controller, ControllerSettings, EditOutcome};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, Board, BoardIoError};
use crate::io::logging;
use crate::model::{FieldChange, TodoId};
use crate::ops::todo_ops;
use crate::store::{FileStore, RetryPolicy, TodoStore, with_retry};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    logging::init_stderr();
    let json = cli.json;
    let board_dir = cli.board_dir;

    match cli.command {
        None => Err("no subcommand given (try `tb --help`)".into()),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before board discovery
            Commands::Init(args) => cmd_init(args, board_dir.as_deref()),

            // Read commands
            Commands::List(args) => cmd_list(args, board_dir.as_deref(), json),
            Commands::Show(args) => cmd_show(args, board_dir.as_deref(), json),
            Commands::Progress => cmd_progress(board_dir.as_deref(), json),

            // Write commands
            Commands::Add(args) => cmd_add(args, board_dir.as_deref()),
            Commands::Edit(args) => cmd_edit(args, board_dir.as_deref()),
            Commands::Rm(args) => cmd_rm(args, board_dir.as_deref()),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_board_from(board_dir: Option<&str>) -> Result<Board, BoardIoError> {
    board_io::locate_board(board_dir.map(Path::new))
}

/// Open the board's store and load its todos into a fresh controller
fn open_controller(
    board_dir: Option<&str>,
) -> Result<Controller<FileStore>, Box<dyn std::error::Error>> {
    let board = load_board_from(board_dir)?;
    let store = FileStore::open(&board.board_dir, &board.config.store);
    let mut controller = Controller::new(store, ControllerSettings::from_config(&board.config));
    controller.load()?;
    Ok(controller)
}

fn parse_id(s: &str) -> Result<TodoId, String> {
    s.parse()
        .map_err(|_| format!("invalid todo id '{}' (expected a number like 3 or #3)", s))
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, board_dir: Option<&str>, json: bool) -> CmdResult {
    let progress = args.progress.as_deref().map(parse_progress).transpose()?;
    let mut controller = open_controller(board_dir)?;
    if let Some(p) = progress {
        controller.set_filter(p);
    }
    let todos = controller.state().visible_todos();

    if json {
        return print_json(&TodoListJson { progress, todos });
    }
    for line in format_todo_table(&todos) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, board_dir: Option<&str>, json: bool) -> CmdResult {
    let id = parse_id(&args.id)?;
    let board = load_board_from(board_dir)?;
    let store = FileStore::open(&board.board_dir, &board.config.store);
    let retry = RetryPolicy::from_config(&board.config.store.retry);
    let docs = with_retry(&retry, "find_by_id", || store.find_by_id(id))?;

    if docs.is_empty() {
        return Err(format!("todo not found: #{}", id).into());
    }
    if json {
        let docs: Vec<_> = docs.iter().map(document_to_json).collect();
        return print_json(&docs);
    }
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in format_document(doc) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_progress(board_dir: Option<&str>, json: bool) -> CmdResult {
    let controller = open_controller(board_dir)?;
    let counts = todo_ops::progress_counts(controller.state().todos());
    if json {
        return print_json(&progress_options_json(&counts));
    }
    for line in format_progress_options(&counts) {
        println!("{}", line);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, board_dir: Option<&str>) -> CmdResult {
    let progress = parse_progress(&args.progress)?;
    let mut controller = open_controller(board_dir)?;
    controller.update_draft(FieldChange::Title(args.title));
    controller.update_draft(FieldChange::Progress(progress));
    controller.update_draft(FieldChange::Detail(args.detail));
    let todo = controller.submit_create()?;
    println!("#{} {}", todo.id, todo.title);
    Ok(())
}

fn cmd_edit(args: EditArgs, board_dir: Option<&str>) -> CmdResult {
    let id = parse_id(&args.id)?;
    let progress = args.progress.as_deref().map(parse_progress).transpose()?;
    if args.title.is_none() && progress.is_none() && args.detail.is_none() {
        return Err("nothing to change (give --title, --progress, or --detail)".into());
    }

    let mut controller = open_controller(board_dir)?;
    controller.begin_edit(id)?;
    if let Some(title) = args.title {
        controller.edit_field(FieldChange::Title(title))?;
    }
    if let Some(p) = progress {
        controller.edit_field(FieldChange::Progress(p))?;
    }
    if let Some(detail) = args.detail {
        controller.edit_field(FieldChange::Detail(detail))?;
    }

    match controller.submit_edit()? {
        EditOutcome::Saved(todo) => {
            println!("#{} {} [{}]", todo.id, todo.title, todo.progress);
            Ok(())
        }
        EditOutcome::Missing(id) => {
            Err(format!("todo #{} was deleted before the edit was saved", id).into())
        }
    }
}

fn cmd_rm(args: RmArgs, board_dir: Option<&str>) -> CmdResult {
    let id = parse_id(&args.id)?;
    let mut controller = open_controller(board_dir)?;
    let removed = controller.delete(id)?;
    if removed == 0 {
        println!("no todo #{}", id);
    } else {
        println!("deleted #{}", id);
    }
    Ok(())
}
