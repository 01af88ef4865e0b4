use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("todoboard v", env!("CARGO_PKG_VERSION"), " - todos in a table"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new board in the current directory
    Init(InitArgs),
    /// List todos, optionally only those with one progress status
    List(ListArgs),
    /// Show every stored document with an id
    Show(ShowArgs),
    /// Add a todo
    Add(AddArgs),
    /// Change a todo's title, progress, or detail
    Edit(EditArgs),
    /// Delete a todo
    Rm(RmArgs),
    /// List the progress statuses a todo can have
    Progress,
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if .todoboard/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only todos with this progress ("not started", "in progress", "done")
    #[arg(long)]
    pub progress: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Todo id
    pub id: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Todo title
    pub title: String,
    /// Progress status
    #[arg(long)]
    pub progress: String,
    /// Free-text detail
    #[arg(long, default_value = "")]
    pub detail: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo id
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New progress status
    #[arg(long)]
    pub progress: Option<String>,
    /// New detail
    #[arg(long)]
    pub detail: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Todo id
    pub id: String,
}
