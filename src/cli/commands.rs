use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("[#] taskboard v", env!("CARGO_PKG_VERSION"), " - columns, tasks, drag and drop"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: $TASKBOARD_DIR or the platform data dir)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show columns, tasks and progress
    Show(ShowArgs),
    /// Show per-column and overall completion
    Progress,
    /// Add a task to the bottom of a column
    Add(AddArgs),
    /// Edit a task's fields
    Edit(EditArgs),
    /// Move a task to a column (reorder or cross-column)
    Mv(MvArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Column management
    Column(ColumnCmd),
    /// Set the theme, or toggle it when no theme is given
    Theme(ThemeArgs),
    /// Reset the board to the three default columns
    Reset(ConfirmArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// Only show this column (id or title)
    pub column: Option<String>,
}

// ---------------------------------------------------------------------------
// Task command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Column to add the task to (id or title)
    pub column: String,
    /// Task title
    pub title: String,
    /// Task description
    #[arg(long = "desc")]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long = "desc")]
    pub description: Option<String>,
    /// New due date (YYYY-MM-DD, empty string clears it)
    #[arg(long)]
    pub due: Option<String>,
    /// New comma-separated tags (empty string clears them)
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID
    pub id: String,
    /// Target column (id or title)
    pub column: String,
    /// Position in the target column, 0-based (default: bottom)
    #[arg(long)]
    pub index: Option<usize>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: String,
    /// Confirm the deletion
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Confirm the destructive action
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// light or dark
    pub theme: Option<String>,
}

// ---------------------------------------------------------------------------
// Column command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ColumnCmd {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Add a column at the right end
    Add(ColumnAddArgs),
    /// Rename a column
    Rename(ColumnRenameArgs),
    /// Move a column to a position
    Mv(ColumnMvArgs),
    /// Delete a column and all of its tasks
    Rm(ColumnRmArgs),
}

#[derive(Args)]
pub struct ColumnAddArgs {
    /// Column title (default: "Column N")
    pub title: Option<String>,
}

#[derive(Args)]
pub struct ColumnRenameArgs {
    /// Column (id or title)
    pub column: String,
    /// New title (blank becomes "Untitled")
    pub title: String,
}

#[derive(Args)]
pub struct ColumnMvArgs {
    /// Column (id or title)
    pub column: String,
    /// New position, 0-based
    pub index: usize,
}

#[derive(Args)]
pub struct ColumnRmArgs {
    /// Column (id or title)
    pub column: String,
    /// Confirm the deletion
    #[arg(long, short = 'y')]
    pub yes: bool,
}
