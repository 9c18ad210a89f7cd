use crate::api::{ApiClient, ApiProvider};
use crate::error::ApiError;
use crate::models::auth::{LoginRequest, LoginResponse};

pub struct AuthService<'a, T>
where
    T: ApiProvider,
{
    pub(super) client: &'a ApiClient<T>,
}

impl<T> AuthService<'_, T>
where
    T: ApiProvider,
{
    /// Returns the access token; starting the session is up to the caller.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let response: LoginResponse = self.client.post("/auth/login", request).await?;
        if response.access_token.is_empty() {
            return Err(ApiError::Invalid("login answered without a token".to_string()));
        }
        Ok(response.access_token)
    }
}
