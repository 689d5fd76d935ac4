use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TideError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("datastore error ({status}): {message}")]
    Datastore { status: StatusCode, message: String },

    #[error("{0}")]
    Mailer(String),

    #[error("No email content found. Save content first.")]
    NoContent,
}

/// JSON envelope returned by every `/api/*` endpoint. Handlers fold errors
/// into this shape rather than propagating them as HTTP error statuses.
#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl From<Result<(), TideError>> for ApiResponse {
    fn from(result: Result<(), TideError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::err(e.to_string()),
        }
    }
}
