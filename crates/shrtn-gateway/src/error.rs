use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shrtn_core::{ShortenerError, StorageError};
use thiserror::Error;
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced to HTTP clients as plain-text bodies.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("404 page not found")]
    NotFound,
    /// Wrong method on a known route. Answered with 404 like an unknown path.
    #[error("404 page not found")]
    MethodNotAllowed,
    #[error("{0}")]
    Storage(StorageError),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::MethodNotAllowed => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        match value {
            ShortenerError::InvalidUrl(message) => AppError::Validation(format!("invalid url: {message}")),
            ShortenerError::Storage(source) => AppError::Storage(source),
            ShortenerError::Generator(source) => AppError::Internal(source.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, message).into_response()
    }
}
