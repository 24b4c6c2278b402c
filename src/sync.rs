//! The one funnel through which fetched issues reach the mirror store.

use crate::api::KanbanApi;
use crate::error::Result;
use crate::store::{FetchTicket, IssueStore};
use crate::types::Issue;

/// Which server collection the store should mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    AllIssues,
    Board(u64),
}

pub async fn load(api: &mut KanbanApi, store: &mut IssueStore, source: Source) -> Result<()> {
    let ticket = store.begin_fetch();
    let result = match source {
        Source::AllIssues => api.get_all_issues().await,
        Source::Board(id) => api.get_board_issues(id).await,
    };
    settle(store, ticket, result)
}

pub async fn refresh(api: &mut KanbanApi, store: &mut IssueStore, source: Source) -> Result<()> {
    let ticket = store.begin_fetch();
    let result = match source {
        Source::AllIssues => api.refetch_all_issues().await,
        Source::Board(id) => api.refetch_board_issues(id).await,
    };
    settle(store, ticket, result)
}

fn settle(store: &mut IssueStore, ticket: FetchTicket, result: Result<Vec<Issue>>) -> Result<()> {
    let outcome = store.finish_fetch(ticket, result);
    tracing::debug!(
        issues = store.issues().len(),
        loading = store.is_loading(),
        error = store.error(),
        "issue store settled"
    );
    outcome.map(|_| ())
}

/// After a confirmed create: resync, or fall back to appending the server's echo.
pub async fn after_create(
    api: &mut KanbanApi,
    store: &mut IssueStore,
    source: Source,
    created: Issue,
) {
    if let Err(e) = refresh(api, store, source).await {
        tracing::warn!("Failed to refresh issues after create: {e}");
        if !store.issues().iter().any(|i| i.id == created.id) {
            store.append(created);
        }
    }
}

/// After a confirmed update: patch the loaded copy in place.
pub fn after_update(store: &mut IssueStore, updated: Issue) {
    let id = updated.id;
    if !store.replace_by_id(updated) {
        tracing::debug!(id, "updated issue not loaded in store, skipping");
    }
}
