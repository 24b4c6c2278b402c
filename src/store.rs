//! Synchronous issue snapshot that every view derives from.
//!
//! The store is only ever written with replace-style operations. Fetches are
//! tagged with a generation token so a response that lands after a newer
//! snapshot was applied is dropped instead of clobbering it.

use crate::error::Result;
use crate::types::Issue;

/// Handed out by [`IssueStore::begin_fetch`]; one per in-flight read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct IssueStore {
    issues: Vec<Issue>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    applied: u64,
}

impl IssueStore {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn replace_all(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
    }

    pub fn append(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Returns `false` and leaves the store untouched when the id is not loaded.
    pub fn replace_by_id(&mut self, issue: Issue) -> bool {
        match self.issues.iter_mut().find(|existing| existing.id == issue.id) {
            Some(slot) => {
                *slot = issue;
                true
            }
            None => false,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket(self.issued)
    }

    /// Apply the outcome of a fetch started with `ticket`.
    ///
    /// Returns `Ok(true)` when the snapshot was applied and `Ok(false)` when
    /// a newer snapshot already landed. Errors are recorded and passed back.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Issue>>,
    ) -> Result<bool> {
        if ticket.0 <= self.applied {
            tracing::warn!(
                ticket = ticket.0,
                applied = self.applied,
                "dropping stale issue snapshot"
            );
            return Ok(false);
        }

        if ticket.0 == self.issued {
            self.loading = false;
        }

        match result {
            Ok(issues) => {
                self.applied = ticket.0;
                self.error = None;
                self.replace_all(issues);
                Ok(true)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanbanError;
    use crate::testing::issue;
    use crate::types::Status;

    fn seeded() -> IssueStore {
        let mut store = IssueStore::default();
        store.replace_all(vec![
            issue(1, "First", Status::Backlog, 1),
            issue(2, "Second", Status::Done, 1),
        ]);
        store
    }

    #[test]
    fn test_replace_by_id_unknown_id_is_noop() {
        let mut store = seeded();
        let before = store.issues().to_vec();

        let replaced = store.replace_by_id(issue(42, "Ghost", Status::Done, 1));

        assert!(!replaced);
        assert_eq!(store.issues(), before.as_slice());
    }

    #[test]
    fn test_replace_by_id_keeps_position() {
        let mut store = seeded();
        let mut edited = store.issues()[0].clone();
        edited.status = Status::InProgress;

        assert!(store.replace_by_id(edited.clone()));
        assert_eq!(store.issues()[0], edited);
        assert_eq!(store.issues().len(), 2);
    }

    #[test]
    fn test_append_adds_to_end() {
        let mut store = seeded();
        store.append(issue(3, "Third", Status::Backlog, 2));
        assert_eq!(store.issues().last().map(|i| i.id), Some(3));
    }

    #[test]
    fn test_fetch_lifecycle_clears_loading() {
        let mut store = IssueStore::default();
        let ticket = store.begin_fetch();
        assert!(store.is_loading());

        let applied = store
            .finish_fetch(ticket, Ok(vec![issue(1, "One", Status::Done, 1)]))
            .unwrap();

        assert!(applied);
        assert!(!store.is_loading());
        assert_eq!(store.issues().len(), 1);
    }

    #[test]
    fn test_late_response_is_dropped() {
        let mut store = IssueStore::default();
        let old = store.begin_fetch();
        let new = store.begin_fetch();

        store
            .finish_fetch(new, Ok(vec![issue(2, "Fresh", Status::Done, 1)]))
            .unwrap();
        let applied = store
            .finish_fetch(old, Ok(vec![issue(1, "Stale", Status::Backlog, 1)]))
            .unwrap();

        assert!(!applied);
        assert_eq!(store.issues()[0].title, "Fresh");
    }

    #[test]
    fn test_failed_fetch_records_error_and_keeps_issues() {
        let mut store = seeded();
        let ticket = store.begin_fetch();

        let result = store.finish_fetch(ticket, Err(KanbanError::EmptyResponse));

        assert!(result.is_err());
        assert_eq!(store.error(), Some("Empty response from API"));
        assert_eq!(store.issues().len(), 2);
        assert!(!store.is_loading());
    }
}
