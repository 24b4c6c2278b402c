use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::api::KanbanApi;
use crate::cli::BoardArgs;
use crate::commands::issues::print_issue_detail;
use crate::error::Result;
use crate::output::{self, truncate};
use crate::store::IssueStore;
use crate::sync::{self, Source};
use crate::types::{Board, Issue};
use crate::view::{board_columns, dynamic_columns, Column};

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
}

impl From<&Issue> for CardRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            title: truncate(&issue.title, 40),
            priority: issue.priority.colored(),
            assignee: issue.assignee_name().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Serialize)]
struct BoardView<'a> {
    board: Option<&'a Board>,
    columns: &'a [Column],
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<&'a Issue>,
}

pub async fn show(api: &mut KanbanApi, store: &mut IssueStore, args: BoardArgs) -> Result<()> {
    sync::load(api, store, Source::Board(args.id)).await?;

    let boards = match api.get_all_boards().await {
        Ok(boards) => boards,
        Err(e) => {
            tracing::warn!("Failed to load boards: {e}");
            Vec::new()
        }
    };
    let board = boards.iter().find(|b| b.id == args.id);

    let columns = if args.dynamic {
        dynamic_columns(store.issues())
    } else {
        board_columns(store.issues())
    };

    // `?taskId=` selects that issue when it belongs to this board.
    let selected = args
        .task
        .and_then(|task_id| store.issues().iter().find(|issue| issue.id == task_id));

    if output::is_json_output() {
        output::print_json(&BoardView {
            board,
            columns: &columns,
            selected,
        });
        return Ok(());
    }

    let title = board
        .map(|b| b.name.clone())
        .unwrap_or_else(|| format!("Board {}", args.id));
    println!("{}", title.bold());

    for column in &columns {
        println!();
        println!("{} ({})", column.title.bold(), column.issues.len());
        if column.issues.is_empty() {
            println!("  {}", "No issues".bright_black());
        } else {
            output::print_table(&column.issues, |i| CardRow::from(i));
        }
    }

    let hidden = store
        .issues()
        .iter()
        .filter(|issue| !issue.status.is_recognized())
        .count();
    if hidden > 0 && !args.dynamic {
        println!();
        output::print_message(&format!(
            "{hidden} issue(s) with an unrecognized status hidden; use --dynamic to show them"
        ));
    }

    match (args.task, selected) {
        (_, Some(issue)) => {
            println!();
            print_issue_detail(issue);
            println!();
            println!("Edit with: kanban issue update {} --status <STATUS> ...", issue.id);
        }
        (Some(task_id), None) => {
            output::print_message(&format!("Issue #{task_id} is not on this board"));
        }
        (None, None) => {}
    }

    Ok(())
}
