//! Shared fixtures and wiremock helpers for tests.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::KanbanApi;
use crate::client::KanbanClient;
use crate::types::{Assignee, Issue, Priority, Status};

pub fn assignee(id: u64, full_name: &str) -> Assignee {
    Assignee {
        id,
        full_name: full_name.to_string(),
        email: format!("user{id}@example.com"),
        avatar_url: format!("https://example.com/avatars/{id}.png"),
    }
}

pub fn issue(id: u64, title: &str, status: Status, board_id: u64) -> Issue {
    Issue {
        id,
        title: title.to_string(),
        description: format!("Description of {title}"),
        status,
        priority: Priority::Medium,
        board_id,
        board_name: format!("Board {board_id}"),
        assignee: None,
    }
}

pub fn board_json(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name, "description": "", "taskCount": 0 })
}

pub fn issue_json(issue: &Issue) -> Value {
    serde_json::to_value(issue).unwrap_or(Value::Null)
}

pub fn envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

pub async fn mount_get(server: &MockServer, endpoint: &str, data: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(envelope(data))
        .mount(server)
        .await;
}

pub fn api_for(server: &MockServer) -> KanbanApi {
    let client = KanbanClient::new(&server.uri(), Duration::from_secs(5))
        .unwrap_or_else(|e| panic!("mock server uri should be valid: {e}"));
    KanbanApi::new(client)
}
