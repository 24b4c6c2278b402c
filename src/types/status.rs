use std::fmt;

use clap::builder::PossibleValue;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Workflow status of an issue.
///
/// Only the three canonical values are selectable or filterable. Anything
/// else the server sends is kept verbatim in `Unrecognized` for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Backlog,
    InProgress,
    Done,
    Unrecognized(String),
}

static CANONICAL: [Status; 3] = [Status::Backlog, Status::InProgress, Status::Done];

impl Status {
    /// The three canonical statuses in column order.
    pub fn canonical() -> &'static [Status] {
        &CANONICAL
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Backlog" => Status::Backlog,
            "InProgress" => Status::InProgress,
            "Done" => Status::Done,
            other => Status::Unrecognized(other.to_string()),
        }
    }

    /// Wire token as sent to and received from the API.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Backlog => "Backlog",
            Status::InProgress => "InProgress",
            Status::Done => "Done",
            Status::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Status::InProgress => "In Progress",
            other => other.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Status::Unrecognized(_))
    }

    /// Get the colored label for terminal output.
    pub fn colored(&self) -> String {
        let label = self.label();
        match self {
            Status::Backlog => label.bright_black().to_string(),
            Status::InProgress => label.blue().to_string(),
            Status::Done => label.green().to_string(),
            Status::Unrecognized(_) => label.italic().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ValueEnum for Status {
    fn value_variants<'a>() -> &'a [Self] {
        &CANONICAL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Status::Backlog => Some(PossibleValue::new("Backlog").alias("backlog")),
            Status::InProgress => Some(
                PossibleValue::new("InProgress")
                    .aliases(["in-progress", "in_progress", "inprogress"]),
            ),
            Status::Done => Some(PossibleValue::new("Done").alias("done")),
            Status::Unrecognized(_) => None,
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Status::from_raw(&raw))
    }
}
