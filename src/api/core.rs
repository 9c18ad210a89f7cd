use crate::error::ApiError;
use crate::models::document::DocumentUpload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// Bearer token of the operator the request is made for.
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            token: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// Transport to the backend. Paths are relative to the backend base URL.
#[async_trait::async_trait]
pub trait ApiProvider: Send + Sync {
    /// An empty response body comes back as `Value::Null`.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
    /// `request` supplies the path and token; the body goes as multipart.
    async fn upload(&self, request: ApiRequest, upload: DocumentUpload) -> Result<Value, ApiError>;
}

/// Typed calls over a shared provider. Each operator's requests go through
/// a copy carrying that operator's token.
pub struct ApiClient<T>
where
    T: ApiProvider,
{
    pub provider: Arc<T>,
    token: Option<String>,
}

impl<T> Clone for ApiClient<T>
where
    T: ApiProvider,
{
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            token: self.token.clone(),
        }
    }
}

impl<T> ApiClient<T>
where
    T: ApiProvider,
{
    pub fn new(provider: T) -> Self {
        Self {
            provider: Arc::new(provider),
            token: None,
        }
    }

    pub fn authorized(&self, token: impl Into<String>) -> Self {
        Self {
            provider: self.provider.clone(),
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, path).with_token(self.token.clone())
    }

    pub async fn get<R>(&self, path: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        self.call(self.request(Method::Get, path)).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.call_with(Method::Post, path, body).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.call_with(Method::Put, path, body).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.call_with(Method::Patch, path, body).await
    }

    /// Whatever the backend answers to a delete is dropped.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.provider
            .send(self.request(Method::Delete, path))
            .await
            .map(|_| ())
    }

    pub async fn upload<R>(&self, path: &str, upload: DocumentUpload) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let value = self
            .provider
            .upload(self.request(Method::Post, path), upload)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn call_with<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.call(self.request(method, path).with_body(body)).await
    }

    async fn call<R>(&self, request: ApiRequest) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let value = self.provider.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }
}
