use clap::{Args, Parser, Subcommand};
use kanban_domain::{ColumnId, Priority};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A kanban board with undo/redo, filtering and debounced saving", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the board record (or set KANBAN_DIR env var)
    #[arg(long, value_name = "DIR", env = "KANBAN_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task operations
    Task(TaskCommand),
    /// Show the board, filtered and windowed
    List(ListArgs),
    /// Apply JSON actions read from stdin, one per line
    Replay,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the To Do column
    Add(TaskAddArgs),
    /// Edit a task's title, description or priority
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Move a task to a column and position
    Move(TaskMoveArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// low, medium, high or 1-3
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct TaskMoveArgs {
    #[arg(long)]
    pub id: String,
    /// Target column: todo, in-progress or done
    #[arg(long)]
    pub to: ColumnId,
    /// Position in the target column; counted among matching tasks when a
    /// filter is given. Appends when omitted.
    #[arg(long, allow_hyphen_values = true)]
    pub index: Option<i64>,
    /// Text filter the index refers to
    #[arg(long)]
    pub text: Option<String>,
    /// Priority filter the index refers to
    #[arg(long)]
    pub filter_priority: Option<Priority>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show this column
    #[arg(long)]
    pub column: Option<ColumnId>,
    /// Case-insensitive text filter on title and description
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Scroll offset of each column list, in pixels
    #[arg(long, default_value_t = 0)]
    pub scroll: usize,
    /// Number of rows in the visible window (defaults to the configured size)
    #[arg(long)]
    pub window: Option<usize>,
}
