//! Process-lifetime query cache keyed by endpoint and argument.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Identity of a read query: the endpoint plus its argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AllBoards,
    BoardIssues(u64),
    AllIssues,
    Issue(u64),
    AllUsers,
}

impl QueryKey {
    pub fn path(&self) -> String {
        match self {
            QueryKey::AllBoards => "/boards".to_string(),
            QueryKey::BoardIssues(id) => format!("/boards/{id}"),
            QueryKey::AllIssues => "/tasks".to_string(),
            QueryKey::Issue(id) => format!("/tasks/{id}"),
            QueryKey::AllUsers => "/users".to_string(),
        }
    }

    /// Queries whose payload goes stale when an issue is created or updated.
    pub fn affected_by_issue_write(issue_id: Option<u64>, board_ids: &[u64]) -> Vec<QueryKey> {
        let mut keys = vec![QueryKey::AllIssues];
        keys.extend(issue_id.map(QueryKey::Issue));
        for &board_id in board_ids {
            let key = QueryKey::BoardIssues(board_id);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Value>,
}

impl QueryCache {
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<Result<T>> {
        self.entries
            .get(key)
            .map(|value| serde_json::from_value(value.clone()).map_err(Into::into))
    }

    pub fn insert(&mut self, key: QueryKey, value: Value) {
        self.entries.insert(key, value);
    }

    #[cfg(test)]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate(&mut self, keys: &[QueryKey]) {
        for key in keys {
            if self.entries.remove(key).is_some() {
                tracing::debug!(%key, "invalidated cached query");
            }
        }
    }
}
