//! Resource operations for boards, tasks and users on top of the query cache.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{QueryCache, QueryKey};
use crate::client::KanbanClient;
use crate::error::Result;
use crate::types::{Assignee, Board, Issue, IssueFields};

pub struct KanbanApi {
    client: KanbanClient,
    cache: QueryCache,
}

impl KanbanApi {
    pub fn new(client: KanbanClient) -> Self {
        Self {
            client,
            cache: QueryCache::default(),
        }
    }

    /// Serve from cache when present, otherwise fetch and remember.
    async fn query<T: DeserializeOwned>(&mut self, key: QueryKey) -> Result<T> {
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(%key, "cache hit");
            return cached;
        }
        self.refetch(key).await
    }

    /// Always hit the server and replace the cached entry.
    async fn refetch<T: DeserializeOwned>(&mut self, key: QueryKey) -> Result<T> {
        let value: Value = self.client.get(&key.path()).await?;
        let decoded = serde_json::from_value(value.clone())?;
        self.cache.insert(key, value);
        Ok(decoded)
    }

    pub async fn get_all_boards(&mut self) -> Result<Vec<Board>> {
        self.query(QueryKey::AllBoards).await
    }

    pub async fn get_board_issues(&mut self, board_id: u64) -> Result<Vec<Issue>> {
        self.query(QueryKey::BoardIssues(board_id)).await
    }

    pub async fn get_all_issues(&mut self) -> Result<Vec<Issue>> {
        self.query(QueryKey::AllIssues).await
    }

    pub async fn get_issue(&mut self, id: u64) -> Result<Issue> {
        self.query(QueryKey::Issue(id)).await
    }

    pub async fn get_all_users(&mut self) -> Result<Vec<Assignee>> {
        self.query(QueryKey::AllUsers).await
    }

    pub async fn refetch_board_issues(&mut self, board_id: u64) -> Result<Vec<Issue>> {
        self.refetch(QueryKey::BoardIssues(board_id)).await
    }

    pub async fn refetch_all_issues(&mut self) -> Result<Vec<Issue>> {
        self.refetch(QueryKey::AllIssues).await
    }

    pub async fn create_issue(&mut self, fields: &IssueFields) -> Result<Issue> {
        let created: Issue = self.client.post("/tasks/create", fields).await?;
        self.after_write(Some(created.id), &[fields.board_id, created.board_id]);
        Ok(created)
    }

    /// `issue` is the full merged issue; `previous_board` is where it lived before the edit.
    pub async fn update_issue(
        &mut self,
        id: u64,
        issue: &Issue,
        previous_board: Option<u64>,
    ) -> Result<Issue> {
        let updated: Issue = self.client.put(&format!("/tasks/update/{id}"), issue).await?;
        self.after_write(Some(id), &board_ids(issue, previous_board));
        Ok(updated)
    }

    pub async fn update_issue_status(&mut self, id: u64, issue: &Issue) -> Result<Issue> {
        let updated: Issue = self
            .client
            .put(&format!("/tasks/updateStatus/{id}"), issue)
            .await?;
        self.after_write(Some(id), &[issue.board_id]);
        Ok(updated)
    }

    fn after_write(&mut self, issue_id: Option<u64>, board_ids: &[u64]) {
        self.cache
            .invalidate(&QueryKey::affected_by_issue_write(issue_id, board_ids));
    }

    #[cfg(test)]
    pub fn is_cached(&self, key: &QueryKey) -> bool {
        self.cache.contains(key)
    }
}

fn board_ids(issue: &Issue, previous: Option<u64>) -> Vec<u64> {
    let mut ids = vec![issue.board_id];
    ids.extend(previous);
    ids
}
