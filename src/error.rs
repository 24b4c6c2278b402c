use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Board ID is required: pass --board, open from a board route, or set default_board")]
    MissingBoardId,

    #[error("Form is not open")]
    FormClosed,

    #[error("Board not found: {0}")]
    BoardNotFound(u64),

    #[error("Issue not found: {0}")]
    IssueNotFound(u64),

    #[error("Unknown assignee: {0}")]
    UnknownAssignee(u64),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),
}

pub type Result<T> = std::result::Result<T, KanbanError>;
