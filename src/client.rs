use std::time::Duration;

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::error::{KanbanError, Result};

pub struct KanbanClient {
    http: Client,
    base_url: String,
}

/// Every response body is wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

impl KanbanClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url).map_err(|_| KanbanError::InvalidApiUrl(base_url.to_string()))?;

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(KanbanError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let envelope: Envelope<T> = response.json().await?;

        envelope.data.ok_or(KanbanError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::types::Board;

    fn client_for(server: &MockServer) -> KanbanClient {
        KanbanClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = KanbanClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(KanbanError::InvalidApiUrl(_))));
    }

    #[tokio::test]
    async fn test_get_unwraps_data_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 1, "name": "Core", "description": "", "taskCount": 4 }]
            })))
            .mount(&server)
            .await;

        let boards: Vec<Board> = client_for(&server).get("/boards").await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].task_count, 4);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such task"))
            .mount(&server)
            .await;

        let result: Result<Board> = client_for(&server).get("/tasks/99").await;
        match result {
            Err(KanbanError::ApiError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such task");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_data_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let result: Result<Vec<Board>> = client_for(&server).get("/users").await;
        assert!(matches!(result, Err(KanbanError::EmptyResponse)));
    }
}
