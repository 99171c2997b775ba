use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Chunking errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum ChunkerError {
    /// Malformed token budget or request field
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Tokenizer could not be loaded at startup
    #[error("Tokenizer initialization failed: {0}")]
    TokenizerInit(String),

    /// Encoding or decoding failed while chunking
    #[error("Chunking failed: {0}")]
    Tokenization(String),
}

impl ChunkerError {
    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::TokenizerInit(_) | Self::Tokenization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for logs
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::TokenizerInit(_) => "tokenizer_init_failure",
            Self::Tokenization(_) => "chunking_failure",
        }
    }
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ChunkerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), "{self}");
        } else {
            tracing::debug!(error_type = self.error_type(), "{self}");
        }

        (status, Json(ErrorResponse { detail: self.to_string() })).into_response()
    }
}
