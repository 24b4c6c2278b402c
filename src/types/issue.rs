use serde::{Deserialize, Serialize};

use super::{Assignee, Priority, Status};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub board_id: u64,
    #[serde(default)]
    pub board_name: String,
    #[serde(default)]
    pub assignee: Option<Assignee>,
}

impl Issue {
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(|a| a.full_name.as_str())
    }
}

/// Body for `POST /tasks/create`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    pub title: String,
    pub description: String,
    pub board_id: u64,
    pub priority: Priority,
    pub status: Status,
    pub assignee_id: Option<u64>,
}
