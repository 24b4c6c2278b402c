//! Create/edit workflow for a single issue.
//!
//! A form is opened either empty (create) or seeded from an existing issue
//! (edit). Submitting resolves the effective board, sends one create or
//! update request, and closes the form only on success.

use crate::api::KanbanApi;
use crate::error::{KanbanError, Result};
use crate::route::Route;
use crate::types::{Assignee, Board, Issue, IssueFields, Priority, Status};

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Issue),
}

/// What the caller should do after a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Server echo of the new issue; the caller's collection needs a refresh.
    Created(Issue),
    /// The fully resolved issue as sent to the server.
    Updated(Issue),
}

impl SubmitOutcome {
    pub fn refresh_requested(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

#[derive(Debug, Clone)]
pub struct IssueForm {
    mode: FormMode,
    open: bool,
    context_board: Option<u64>,
    pub title: String,
    pub description: String,
    /// Explicit board selection made in the form.
    pub board_id: Option<u64>,
    pub priority: Priority,
    pub status: Status,
    pub assignee_id: Option<u64>,
}

impl IssueForm {
    pub fn open_create(context_board: Option<u64>) -> Self {
        Self {
            mode: FormMode::Create,
            open: true,
            context_board,
            title: String::new(),
            description: String::new(),
            board_id: None,
            priority: Priority::Low,
            status: Status::Backlog,
            assignee_id: None,
        }
    }

    pub fn open_edit(issue: Issue, context_board: Option<u64>) -> Self {
        Self {
            open: true,
            context_board,
            title: issue.title.clone(),
            description: issue.description.clone(),
            board_id: None,
            priority: issue.priority,
            status: issue.status.clone(),
            assignee_id: issue.assignee.as_ref().map(|a| a.id),
            mode: FormMode::Edit(issue),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Selection, then opening context, then the edited issue's own board.
    pub fn resolve_board_id(&self) -> Result<u64> {
        let editing = match &self.mode {
            FormMode::Edit(issue) => Some(issue.board_id),
            FormMode::Create => None,
        };

        self.board_id
            .or(self.context_board)
            .or(editing)
            .ok_or(KanbanError::MissingBoardId)
    }

    /// Route to the edited issue on its board.
    pub fn board_route(&self) -> Option<Route> {
        match &self.mode {
            FormMode::Edit(issue) => Some(Route::Board {
                id: issue.board_id,
                task_id: Some(issue.id),
            }),
            FormMode::Create => None,
        }
    }

    fn fields(&self, board_id: u64) -> IssueFields {
        IssueFields {
            title: self.title.clone(),
            description: self.description.clone(),
            board_id,
            priority: self.priority,
            status: self.status.clone(),
            assignee_id: self.assignee_id,
        }
    }

    fn merged(
        &self,
        original: &Issue,
        board_id: u64,
        board: Option<&Board>,
        users: &[Assignee],
    ) -> Result<Issue> {
        let assignee = match self.assignee_id {
            Some(id) => Some(
                users
                    .iter()
                    .find(|user| user.id == id)
                    .cloned()
                    .ok_or(KanbanError::UnknownAssignee(id))?,
            ),
            None => original.assignee.clone(),
        };

        Ok(Issue {
            id: original.id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            priority: self.priority,
            board_id,
            board_name: board
                .map(|b| b.name.clone())
                .unwrap_or_else(|| original.board_name.clone()),
            assignee,
        })
    }

    /// Send the form. On failure the error is logged and the form stays open.
    pub async fn submit(&mut self, api: &mut KanbanApi) -> Result<SubmitOutcome> {
        if !self.is_open() {
            return Err(KanbanError::FormClosed);
        }

        match self.send(api).await {
            Ok(outcome) => {
                self.close();
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Error saving issue: {e}");
                Err(e)
            }
        }
    }

    async fn send(&self, api: &mut KanbanApi) -> Result<SubmitOutcome> {
        let board_id = self.resolve_board_id()?;
        let boards = api.get_all_boards().await?;
        let board = boards.iter().find(|b| b.id == board_id);

        match &self.mode {
            FormMode::Create => {
                if board.is_none() {
                    return Err(KanbanError::BoardNotFound(board_id));
                }
                let created = api.create_issue(&self.fields(board_id)).await?;
                Ok(SubmitOutcome::Created(created))
            }
            FormMode::Edit(original) => {
                // An unlisted board is tolerated only when the issue stays where it is.
                let kept_board = board_id == original.board_id && !original.board_name.is_empty();
                if board.is_none() && !kept_board {
                    return Err(KanbanError::BoardNotFound(board_id));
                }
                let users = match self.assignee_id {
                    Some(_) => api.get_all_users().await?,
                    None => Vec::new(),
                };
                let merged = self.merged(original, board_id, board, &users)?;
                api.update_issue(original.id, &merged, Some(original.board_id))
                    .await?;
                Ok(SubmitOutcome::Updated(merged))
            }
        }
    }
}
