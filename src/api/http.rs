use crate::api::core::{ApiProvider, ApiRequest, Method};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::document::DocumentUpload;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Talks to the backend over HTTP, attaching each request's bearer token.
/// One instance serves every operator; it holds no login state itself.
#[derive(Clone, Debug)]
pub struct HttpApiProvider {
    client: Client,
    base_url: String,
}

impl HttpApiProvider {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.api_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read(&self, response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let url = response.url().to_string();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "backend answered 401");
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(%url, %status, %body, "backend request failed");
            return Err(ApiError::Status { status, body });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl ApiProvider for HttpApiProvider {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "backend request");

        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = Self::authorize(builder, request.token.as_deref())
            .send()
            .await?;
        self.read(response).await
    }

    async fn upload(&self, request: ApiRequest, upload: DocumentUpload) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        tracing::debug!(%url, file = %upload.file_name, "backend upload");

        let mut form = Form::new();
        for (name, value) in upload.fields() {
            form = form.text(name, value);
        }
        let file = Part::bytes(upload.data).file_name(upload.file_name);
        form = form.part("file", file);

        let builder = self.client.post(&url).multipart(form);
        let response = Self::authorize(builder, request.token.as_deref())
            .send()
            .await?;
        self.read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    async fn provider(router: Router) -> HttpApiProvider {
        let config = Config {
            api_base_url: serve(router).await,
            ..Config::default()
        };
        HttpApiProvider::new(&config).unwrap()
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/echo-auth",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "authorization": auth }))
                }),
            )
            .route(
                "/api/land",
                post(|Json(body): Json<Value>| async move { Json(body) }),
            )
            .route("/api/empty", get(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/api/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/api/secret", get(|| async { StatusCode::UNAUTHORIZED }))
            .route(
                "/api/upload",
                post(|headers: HeaderMap, body: String| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "authorization": auth, "has_file": body.contains("notes.txt") }))
                }),
            )
    }

    #[test]
    fn test_url_building() {
        let config = Config {
            api_base_url: "http://backend/api/".to_string(),
            ..Config::default()
        };
        let provider = HttpApiProvider::new(&config).unwrap();
        assert_eq!(provider.url("/land/2"), "http://backend/api/land/2");
        assert_eq!(provider.url("land"), "http://backend/api/land");
        assert_eq!(provider.url("https://other/x"), "https://other/x");
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let provider = provider(backend()).await;

        let anonymous = provider
            .send(ApiRequest::new(Method::Get, "/echo-auth"))
            .await
            .unwrap();
        assert_eq!(anonymous["authorization"], "");

        let signed = provider
            .send(ApiRequest::new(Method::Get, "/echo-auth").with_token(Some("tok".to_string())))
            .await
            .unwrap();
        assert_eq!(signed["authorization"], "Bearer tok");
    }

    #[tokio::test]
    async fn test_upload_is_multipart_with_token() {
        let provider = provider(backend()).await;
        let upload = DocumentUpload {
            file_name: "notes.txt".to_string(),
            data: b"hello".to_vec(),
            task_id: Some(3),
            description: None,
        };

        let answer = provider
            .upload(
                ApiRequest::new(Method::Post, "/upload").with_token(Some("tok".to_string())),
                upload,
            )
            .await
            .unwrap();
        assert_eq!(answer["authorization"], "Bearer tok");
        assert_eq!(answer["has_file"], true);
    }

    #[tokio::test]
    async fn test_json_body_and_empty_answer() {
        let provider = provider(backend()).await;

        let echoed = provider
            .send(ApiRequest::new(Method::Post, "/land").with_body(json!({"name": "x"})))
            .await
            .unwrap();
        assert_eq!(echoed["name"], "x");

        let empty = provider
            .send(ApiRequest::new(Method::Get, "/empty"))
            .await
            .unwrap();
        assert_eq!(empty, Value::Null);
    }

    #[tokio::test]
    async fn test_failure_status() {
        let provider = provider(backend()).await;
        let result = provider.send(ApiRequest::new(Method::Get, "/broken")).await;
        match result {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_status() {
        let provider = provider(backend()).await;
        let request = ApiRequest::new(Method::Get, "/secret").with_token(Some("stale".to_string()));
        let result = provider.send(request).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
