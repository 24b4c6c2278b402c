//! Navigation header and the global quick-create entry point.

use colored::Colorize;

use crate::api::KanbanApi;
use crate::form::IssueForm;
use crate::route::Route;
use crate::store::IssueStore;
use crate::sync::{self, Source};
use crate::types::Issue;

pub struct Header {
    route: Route,
}

impl Header {
    pub fn new(route: Route) -> Self {
        Self { route }
    }

    /// `Issues  Boards`, with the section of the current route highlighted.
    pub fn nav_line(&self) -> String {
        let issues_active = matches!(self.route, Route::Issues);
        [("Issues", issues_active), ("Boards", !issues_active)]
            .iter()
            .map(|(label, active)| {
                if *active {
                    label.red().bold().to_string()
                } else {
                    label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Open an empty create form that already knows the board of the current route.
    pub fn quick_create(&self, fallback_board: Option<u64>) -> IssueForm {
        IssueForm::open_create(self.route.board_context().or(fallback_board))
    }

    /// Resync the mirror with every issue once a quick-create went through.
    pub async fn on_created(&self, api: &mut KanbanApi, store: &mut IssueStore, created: Issue) {
        sync::after_create(api, store, Source::AllIssues, created).await;
    }
}
