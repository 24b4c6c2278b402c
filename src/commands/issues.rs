use colored::Colorize;
use tabled::Tabled;

use crate::api::KanbanApi;
use crate::cli::{IssueCreateArgs, IssueListArgs, IssueUpdateArgs};
use crate::config::Config;
use crate::error::{KanbanError, Result};
use crate::form::{IssueForm, SubmitOutcome};
use crate::header::Header;
use crate::output::{self, is_json_output, truncate};
use crate::route::Route;
use crate::store::IssueStore;
use crate::sync::{self, Source};
use crate::types::{Issue, Status};
use crate::view::{filter_issues, IssueFilter};

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Board")]
    board: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        let colored = !is_json_output();
        Self {
            id: issue.id,
            title: truncate(&issue.title, 50),
            status: if colored {
                issue.status.colored()
            } else {
                issue.status.label().to_string()
            },
            priority: if colored {
                issue.priority.colored()
            } else {
                issue.priority.label().to_string()
            },
            board: issue.board_name.clone(),
            assignee: issue.assignee_name().unwrap_or_default().to_string(),
        }
    }
}

impl From<&IssueListArgs> for IssueFilter {
    fn from(args: &IssueListArgs) -> Self {
        Self {
            search: args.search.clone(),
            status: args.status.clone(),
            board: args.board.map(|id| id.to_string()),
        }
    }
}

pub(crate) fn print_issue_detail(issue: &Issue) {
    println!("#{} - {}", issue.id, issue.title.bold());
    println!();

    if !issue.description.is_empty() {
        println!("{}", issue.description);
        println!();
    }

    println!("Board:    {} ({})", issue.board_name, issue.board_id);
    println!("Status:   {}", issue.status.colored());
    println!("Priority: {}", issue.priority.colored());
    println!("Assignee: {}", issue.assignee_name().unwrap_or("-"));
}

async fn fetch_issue(api: &mut KanbanApi, id: u64) -> Result<Issue> {
    api.get_issue(id).await.map_err(|e| match e {
        KanbanError::ApiError { status: 404, .. } => KanbanError::IssueNotFound(id),
        other => other,
    })
}

/// Feed a successful submit back into the mirror store.
async fn apply_outcome(
    api: &mut KanbanApi,
    store: &mut IssueStore,
    header: &Header,
    outcome: SubmitOutcome,
) -> Issue {
    tracing::debug!(refresh = outcome.refresh_requested(), "issue saved");
    match outcome {
        SubmitOutcome::Created(created) => {
            header.on_created(api, store, created.clone()).await;
            created
        }
        SubmitOutcome::Updated(updated) => {
            sync::after_update(store, updated.clone());
            updated
        }
    }
}

pub async fn list(api: &mut KanbanApi, store: &mut IssueStore, args: IssueListArgs) -> Result<()> {
    sync::load(api, store, Source::AllIssues).await?;

    let filtered = filter_issues(store.issues(), &IssueFilter::from(&args));

    if filtered.is_empty() {
        output::print_message("No issues found");
        return Ok(());
    }

    output::print_table(&filtered, |i| IssueRow::from(i));

    Ok(())
}

pub async fn view(api: &mut KanbanApi, id: u64) -> Result<()> {
    let issue = fetch_issue(api, id).await?;
    let form = IssueForm::open_edit(issue.clone(), None);

    output::print_item(&issue, |issue| {
        print_issue_detail(issue);
        if let Some(route) = form.board_route() {
            println!();
            println!("Open on board: kanban open \"{route}\"");
        }
    });

    Ok(())
}

pub async fn create(
    api: &mut KanbanApi,
    store: &mut IssueStore,
    config: &Config,
    args: IssueCreateArgs,
) -> Result<()> {
    let route = args
        .route
        .as_deref()
        .map(Route::parse)
        .transpose()?
        .unwrap_or(Route::Issues);
    let header = Header::new(route);

    let mut form = header.quick_create(config.default_board);
    form.title = args.title;
    form.description = args.description;
    form.board_id = args.board;
    form.priority = args.priority;
    form.status = args.status;
    form.assignee_id = args.assignee;

    let outcome = form.submit(api).await?;
    let created = apply_outcome(api, store, &header, outcome).await;

    output::print_message(&format!("Created #{} - {}", created.id, created.title));

    Ok(())
}

pub async fn update(
    api: &mut KanbanApi,
    store: &mut IssueStore,
    args: IssueUpdateArgs,
) -> Result<()> {
    if args.title.is_none()
        && args.description.is_none()
        && args.board.is_none()
        && args.priority.is_none()
        && args.status.is_none()
        && args.assignee.is_none()
    {
        output::print_message("No updates specified");
        return Ok(());
    }

    sync::load(api, store, Source::AllIssues).await?;

    let issue = match store.issues().iter().find(|i| i.id == args.id) {
        Some(issue) => issue.clone(),
        None => fetch_issue(api, args.id).await?,
    };

    let mut form = IssueForm::open_edit(issue, None);
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(priority) = args.priority {
        form.priority = priority;
    }
    if let Some(status) = args.status {
        form.status = status;
    }
    form.board_id = args.board;
    if args.assignee.is_some() {
        form.assignee_id = args.assignee;
    }

    let outcome = form.submit(api).await?;
    let updated = apply_outcome(api, store, &Header::new(Route::Issues), outcome).await;

    output::print_message(&format!("Updated #{} - {}", updated.id, updated.title));

    Ok(())
}

pub async fn move_to(
    api: &mut KanbanApi,
    store: &mut IssueStore,
    id: u64,
    status: Status,
) -> Result<()> {
    sync::load(api, store, Source::AllIssues).await?;

    let mut issue = match store.issues().iter().find(|i| i.id == id) {
        Some(issue) => issue.clone(),
        None => fetch_issue(api, id).await?,
    };
    issue.status = status;

    let updated = api.update_issue_status(id, &issue).await?;
    sync::after_update(store, updated);

    output::print_message(&format!("Moved #{} to {}", issue.id, issue.status));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::testing::{api_for, board_json, envelope, issue, issue_json, mount_get};

    fn create_args(title: &str) -> IssueCreateArgs {
        IssueCreateArgs {
            title: title.to_string(),
            description: String::new(),
            board: None,
            route: None,
            priority: Default::default(),
            status: Status::Backlog,
            assignee: None,
        }
    }

    #[tokio::test]
    async fn test_create_from_board_route_refreshes_store() {
        let server = MockServer::start().await;
        let created = issue(12, "From board", Status::Backlog, 5);
        mount_get(&server, "/boards", json!([board_json(5, "Board 5")])).await;
        Mock::given(method("POST"))
            .and(path("/tasks/create"))
            .and(body_partial_json(json!({ "boardId": 5, "title": "From board" })))
            .respond_with(envelope(issue_json(&created)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(envelope(json!([issue_json(&created)])))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let mut store = IssueStore::default();
        let mut args = create_args("From board");
        args.route = Some("/boards/5".to_string());

        create(&mut api, &mut store, &Config::default(), args)
            .await
            .unwrap();

        assert_eq!(store.issues(), &[created]);
    }

    #[tokio::test]
    async fn test_create_without_board_fails_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/create"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let mut store = IssueStore::default();

        let result = create(&mut api, &mut store, &Config::default(), create_args("Nowhere")).await;

        assert!(matches!(result, Err(KanbanError::MissingBoardId)));
        assert!(store.issues().is_empty());
    }

    #[tokio::test]
    async fn test_update_patches_loaded_issue() {
        let server = MockServer::start().await;
        let original = issue(7, "Task", Status::Backlog, 3);
        let other = issue(8, "Other", Status::Backlog, 3);
        mount_get(&server, "/tasks", json!([issue_json(&original), issue_json(&other)])).await;
        mount_get(&server, "/boards", json!([board_json(3, "Board 3")])).await;
        Mock::given(method("PUT"))
            .and(path("/tasks/update/7"))
            .and(body_partial_json(json!({ "status": "Done", "title": "Task" })))
            .respond_with(envelope(issue_json(&original)))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let mut store = IssueStore::default();
        let args = IssueUpdateArgs {
            id: 7,
            title: None,
            description: None,
            board: None,
            priority: None,
            status: Some(Status::Done),
            assignee: None,
        };

        update(&mut api, &mut store, args).await.unwrap();

        assert_eq!(store.issues()[0].status, Status::Done);
        assert_eq!(store.issues()[1], other);
    }

    #[tokio::test]
    async fn test_move_patches_loaded_issue() {
        let server = MockServer::start().await;
        let original = issue(7, "Task", Status::Backlog, 3);
        let mut moved = original.clone();
        moved.status = Status::InProgress;
        mount_get(&server, "/tasks", json!([issue_json(&original)])).await;
        Mock::given(method("PUT"))
            .and(path("/tasks/updateStatus/7"))
            .and(body_partial_json(json!({ "id": 7, "status": "InProgress" })))
            .respond_with(envelope(issue_json(&moved)))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let mut store = IssueStore::default();

        move_to(&mut api, &mut store, 7, Status::InProgress)
            .await
            .unwrap();

        assert_eq!(store.issues(), &[moved]);
    }

    #[tokio::test]
    async fn test_view_missing_issue_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let result = view(&mut api, 404).await;

        assert!(matches!(result, Err(KanbanError::IssueNotFound(404))));
    }

    #[test]
    fn test_list_args_become_filter() {
        let args = IssueListArgs {
            search: "ada".to_string(),
            status: Some(Status::Done),
            board: Some(3),
        };
        let filter = IssueFilter::from(&args);
        assert_eq!(filter.search, "ada");
        assert_eq!(filter.status, Some(Status::Done));
        assert_eq!(filter.board.as_deref(), Some("3"));
    }
}
