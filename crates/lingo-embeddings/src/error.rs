use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbeddingsError>;

/// Embedding failures
///
/// `GET /embeddings` logs these and answers an empty `embedding_base64`.
#[derive(Debug, Error)]
pub enum EmbeddingsError {
    /// No provider configured to serve the request
    #[error("Provider '{0}' not found")]
    ProviderNotFound(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Model loading or inference failed
    #[error("Inference error: {0}")]
    InferenceError(String),

    /// The provider answered without a vector
    #[error("Empty embedding returned by provider")]
    EmptyEmbedding,

    /// Feature not available in this build
    #[error("feature not available: {feature}")]
    FeatureNotAvailable { feature: String },
}

impl EmbeddingsError {
    /// Short reason recorded alongside the failure
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::ProviderNotFound(_) => "not_found_error",
            Self::ConnectionError(_) | Self::ProviderApiError { .. } | Self::EmptyEmbedding => "api_error",
            Self::ConfigError(_) | Self::FeatureNotAvailable { .. } => "config_error",
            Self::InferenceError(_) => "inference_error",
        }
    }
}
