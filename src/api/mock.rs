use crate::api::core::{ApiProvider, ApiRequest, Method};
use crate::error::ApiError;
use crate::models::document::DocumentUpload;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
pub enum MockResponse {
    Json(Value),
    Status(StatusCode),
    Unauthorized,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedUpload {
    pub path: String,
    pub token: Option<String>,
    pub upload: DocumentUpload,
}

/// Answers from a fixed route table and records everything it was sent.
/// Unknown routes answer 404.
#[derive(Clone, Default)]
pub struct MockApiProvider {
    routes: HashMap<(Method, String), MockResponse>,
    by_body: Vec<(Method, String, Value, MockResponse)>,
    requests: Arc<RwLock<Vec<ApiRequest>>>,
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
}

impl MockApiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, method: Method, path: &str, value: Value) -> Self {
        self.with(method, path, MockResponse::Json(value))
    }

    pub fn with(mut self, method: Method, path: &str, response: MockResponse) -> Self {
        self.routes.insert((method, path.to_string()), response);
        self
    }

    /// Answers only when the request body equals `body`. Checked before the
    /// plain route table.
    pub fn with_body_response(
        mut self,
        method: Method,
        path: &str,
        body: Value,
        response: MockResponse,
    ) -> Self {
        self.by_body.push((method, path.to_string(), body, response));
        self
    }

    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.read().await.clone()
    }

    pub async fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }

    fn respond(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let keyed = body.and_then(|body| {
            self.by_body
                .iter()
                .find(|(m, p, b, _)| *m == method && p == path && b == body)
                .map(|(_, _, _, response)| response)
        });
        match keyed.or_else(|| self.routes.get(&(method, path.to_string()))) {
            Some(MockResponse::Json(value)) => Ok(value.clone()),
            Some(MockResponse::Status(status)) => Err(ApiError::Status {
                status: *status,
                body: String::new(),
            }),
            Some(MockResponse::Unauthorized) => Err(ApiError::Unauthorized),
            None => Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                body: format!("no mock route for {method} {path}"),
            }),
        }
    }
}

#[async_trait::async_trait]
impl ApiProvider for MockApiProvider {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let response = self.respond(request.method, &request.path, request.body.as_ref());
        self.requests.write().await.push(request);
        response
    }

    async fn upload(&self, request: ApiRequest, upload: DocumentUpload) -> Result<Value, ApiError> {
        self.uploads.write().await.push(RecordedUpload {
            path: request.path.clone(),
            token: request.token,
            upload,
        });
        self.respond(Method::Post, &request.path, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockApiProvider::new()
            .with_response(Method::Get, "/owner", json!([]))
            .with(Method::Get, "/task", MockResponse::Unauthorized);

        let owners = provider
            .send(ApiRequest::new(Method::Get, "/owner"))
            .await
            .unwrap();
        assert_eq!(owners, json!([]));

        let task = provider.send(ApiRequest::new(Method::Get, "/task")).await;
        assert!(matches!(task, Err(ApiError::Unauthorized)));

        let missing = provider.send(ApiRequest::new(Method::Get, "/nope")).await;
        assert!(matches!(
            missing,
            Err(ApiError::Status { status: StatusCode::NOT_FOUND, .. })
        ));

        assert_eq!(provider.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_body_keyed_response() {
        let provider = MockApiProvider::new()
            .with_body_response(
                Method::Post,
                "/auth/login",
                json!({"username": "op", "password": "pw"}),
                MockResponse::Json(json!({"access_token": "jwt"})),
            )
            .with(Method::Post, "/auth/login", MockResponse::Unauthorized);

        let good = ApiRequest::new(Method::Post, "/auth/login")
            .with_body(json!({"username": "op", "password": "pw"}));
        assert_eq!(provider.send(good).await.unwrap()["access_token"], "jwt");

        let bad = ApiRequest::new(Method::Post, "/auth/login")
            .with_body(json!({"username": "op", "password": "nope"}));
        assert!(matches!(provider.send(bad).await, Err(ApiError::Unauthorized)));
    }
}
