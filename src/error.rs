use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("session expired or missing")]
    Unauthorized,
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// The text shown to operators; details stay in the log.
    pub fn notice(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "Your session has ended, please log in again.",
            _ => "The request to the server failed. Please try again.",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} is not valid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("a polygon needs at least one vertex")]
    EmptyShape,
    #[error("polygon edges may not cross")]
    SelfIntersecting,
    #[error("there is no polygon to edit")]
    NothingToEdit,
}
