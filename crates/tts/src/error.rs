use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis failures
///
/// `GET /tts` never turns these into error statuses; they are logged and
/// the caller receives an empty `audio_base64`.
#[derive(Debug, Error)]
pub enum TtsError {
    /// The vendor rejected the SSML document
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Subscription key rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// No provider configured to serve the request
    #[error("Provider '{0}' not found")]
    ProviderNotFound(String),

    /// Vendor returned a non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading the synthesized audio failed
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TtsError {
    /// Map a vendor error status onto a failure variant
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::InvalidRequest(message),
            401 | 403 => Self::AuthenticationFailed(message),
            _ => Self::ProviderApiError { status, message },
        }
    }

    /// Short reason recorded alongside the failure
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::AuthenticationFailed(_) => "authentication_error",
            Self::ProviderNotFound(_) => "not_found_error",
            Self::ConnectionError(_) | Self::ProviderApiError { .. } => "api_error",
            Self::ConfigError(_) | Self::InternalError(_) => "internal_error",
        }
    }
}
