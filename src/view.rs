//! Pure view-model derivations over an issue collection.

use serde::Serialize;

use crate::types::{Issue, Status};

/// One status column of a board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub issues: Vec<Issue>,
}

/// Bucket issues into the fixed Backlog / In Progress / Done columns.
///
/// Issues whose status is none of the three are left out.
pub fn board_columns(issues: &[Issue]) -> Vec<Column> {
    Status::canonical()
        .iter()
        .map(|status| Column {
            id: status.as_str().to_string(),
            title: status.label().to_string(),
            issues: issues
                .iter()
                .filter(|issue| &issue.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

/// One column per distinct raw status, in first-seen order.
pub fn dynamic_columns(issues: &[Issue]) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();

    for issue in issues {
        let raw = issue.status.as_str();
        match columns.iter_mut().find(|c| c.id == raw) {
            Some(column) => column.issues.push(issue.clone()),
            None => columns.push(Column {
                id: raw.to_string(),
                title: humanize(raw),
                issues: vec![issue.clone()],
            }),
        }
    }

    columns
}

/// `in_progress` -> `In Progress`
pub fn humanize(token: &str) -> String {
    token
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Criteria for the issues list. Unset fields always match.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub search: String,
    pub status: Option<Status>,
    /// Compared against the string form of the issue's board id.
    pub board: Option<String>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_search(issue) && self.matches_status(issue) && self.matches_board(issue)
    }

    fn matches_search(&self, issue: &Issue) -> bool {
        let needle = self.search.to_lowercase();
        issue.title.to_lowercase().contains(&needle)
            || issue
                .assignee_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
    }

    fn matches_status(&self, issue: &Issue) -> bool {
        self.status.as_ref().is_none_or(|status| &issue.status == status)
    }

    fn matches_board(&self, issue: &Issue) -> bool {
        self.board
            .as_deref()
            .is_none_or(|board| issue.board_id.to_string() == board)
    }
}

pub fn filter_issues(issues: &[Issue], filter: &IssueFilter) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| filter.matches(issue))
        .cloned()
        .collect()
}
