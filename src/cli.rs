use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::types::{Priority, Status};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A CLI for Kanban boards and issues", version)]
#[command(after_help = "EXAMPLES:
    kanban boards                       List boards
    kanban board 3                      Show board 3 as status columns
    kanban issues --search login        Search issues by title or assignee
    kanban issue create -t \"Title\"      Create a new issue
    kanban open \"/boards/3?taskId=7\"    Open an issue on its board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage issues
    #[command(
        alias = "i",
        after_help = "EXAMPLES:
    kanban issue list --status InProgress
    kanban issue view 7
    kanban issue create -t \"Bug fix\" -d \"Description\" --board 3 --priority High
    kanban issue update 7 --status Done
    kanban issue move 7 InProgress"
    )]
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// List issues (alias for 'issue list')
    #[command(
        alias = "is",
        after_help = "EXAMPLES:
    kanban issues --search \"login\"
    kanban issues --status Backlog --board 3"
    )]
    Issues(IssueListArgs),
    /// List boards
    #[command(
        alias = "b",
        after_help = "EXAMPLES:
    kanban boards
    kanban boards --format json"
    )]
    Boards,
    /// Show one board grouped into status columns
    #[command(after_help = "EXAMPLES:
    kanban board 3
    kanban board 3 --task 7
    kanban board 3 --dynamic")]
    Board(BoardArgs),
    /// List assignable users
    #[command(
        alias = "u",
        after_help = "EXAMPLES:
    kanban users"
    )]
    Users,
    /// Render a client route (/boards, /boards/{id}?taskId={id}, /issues)
    #[command(after_help = "EXAMPLES:
    kanban open /boards
    kanban open /boards/3?taskId=7
    kanban open /issues")]
    Open {
        /// Route to open
        route: String,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    kanban completions bash > ~/.bash_completion.d/kanban
    kanban completions zsh > ~/.zfunc/_kanban
    kanban completions fish > ~/.config/fish/completions/kanban.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    kanban init")]
    Init,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    kanban issue list --search ada
    kanban issue list --status Done --board 2"
    )]
    List(IssueListArgs),
    /// View issue details
    #[command(
        alias = "v",
        after_help = "EXAMPLES:
    kanban issue view 7"
    )]
    View {
        /// Issue ID
        id: u64,
    },
    /// Create a new issue
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    kanban issue create -t \"Fix login bug\" --board 3
    kanban issue create -t \"New feature\" --route /boards/3 --priority High"
    )]
    Create(IssueCreateArgs),
    /// Update an existing issue
    #[command(
        alias = "u",
        after_help = "EXAMPLES:
    kanban issue update 7 --status Done
    kanban issue update 7 --assignee 2
    kanban issue update 7 --board 4 --priority Medium"
    )]
    Update(IssueUpdateArgs),
    /// Change only the status of an issue
    #[command(after_help = "EXAMPLES:
    kanban issue move 7 InProgress")]
    Move {
        /// Issue ID
        id: u64,
        /// New status
        #[arg(value_enum)]
        status: Status,
    },
}

#[derive(Args, Clone, Default)]
pub struct IssueListArgs {
    /// Case-insensitive text matched against title or assignee name
    #[arg(long, short, default_value = "")]
    pub search: String,

    /// Filter by status
    #[arg(long, value_enum)]
    pub status: Option<Status>,

    /// Filter by board ID
    #[arg(long)]
    pub board: Option<u64>,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Board ID
    pub id: u64,

    /// Show this issue's details alongside the board
    #[arg(long)]
    pub task: Option<u64>,

    /// One column per status present instead of the fixed three
    #[arg(long)]
    pub dynamic: bool,
}

#[derive(Args)]
pub struct IssueCreateArgs {
    /// Issue title
    #[arg(long, short)]
    pub title: String,

    /// Issue description
    #[arg(long, short, default_value = "")]
    pub description: String,

    /// Board ID (falls back to --route context, then default_board)
    #[arg(long)]
    pub board: Option<u64>,

    /// Route the form is opened from, e.g. /boards/3
    #[arg(long)]
    pub route: Option<String>,

    /// Priority level
    #[arg(long, value_enum, default_value = "Low")]
    pub priority: Priority,

    /// Initial status
    #[arg(long, value_enum, default_value = "Backlog")]
    pub status: Status,

    /// Assignee user ID
    #[arg(long)]
    pub assignee: Option<u64>,
}

#[derive(Args)]
pub struct IssueUpdateArgs {
    /// Issue ID
    pub id: u64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Move to another board
    #[arg(long)]
    pub board: Option<u64>,

    /// New priority level
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// New status
    #[arg(long, value_enum)]
    pub status: Option<Status>,

    /// Assign to user ID
    #[arg(long)]
    pub assignee: Option<u64>,
}
