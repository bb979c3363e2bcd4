use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Wrong staff PIN.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// `message` is what the client sees; `source` stays in the logs.
    #[error("Store error: {message}")]
    StoreError {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Adapter for `map_err` that tags a store failure with the public message
    /// of the operation that hit it.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::StoreError { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                warn!(status = %self.status_code(), message = %msg, "Request rejected");
            }
            AppError::StoreError { message, source } => {
                error!(error = ?source, "{}", message);
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        let public_message = match self {
            AppError::ValidationError(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                msg
            }
            AppError::StoreError { message, .. } => message.to_string(),
        };

        error_response(public_message, status)
    }
}
