use std::path::PathBuf;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Top-level embeddings configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingsConfig {
    /// Provider used by `GET /embeddings`; the first configured one when unset
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Embeddings provider configurations keyed by name
    #[serde(default)]
    pub providers: IndexMap<String, EmbeddingsProviderConfig>,
}

impl EmbeddingsConfig {
    /// Name and configuration of the provider that serves requests
    pub fn active_provider(&self) -> Option<(&String, &EmbeddingsProviderConfig)> {
        match &self.default_provider {
            Some(name) => self.providers.get_key_value(name),
            None => self.providers.first(),
        }
    }
}

/// Configuration for a single embeddings provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingsProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: EmbeddingsProviderType,
    /// API key (remote providers)
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (remote providers)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Upstream model name (remote providers)
    #[serde(default)]
    pub model: Option<String>,
    /// ONNX model file (local providers)
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Tokenizer matching the ONNX model (local providers)
    #[serde(default)]
    pub tokenizer_path: Option<PathBuf>,
    /// Inputs longer than this many tokens are truncated (local providers)
    #[serde(default = "default_max_sequence_length")]
    pub max_sequence_length: usize,
    /// L2-normalise pooled vectors (local providers)
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

impl EmbeddingsProviderConfig {
    /// Local provider for an ONNX export of a sentence-transformers model
    pub fn onnx(model_path: impl Into<PathBuf>, tokenizer_path: impl Into<PathBuf>) -> Self {
        Self {
            provider_type: EmbeddingsProviderType::Onnx,
            api_key: None,
            base_url: None,
            model: None,
            model_path: Some(model_path.into()),
            tokenizer_path: Some(tokenizer_path.into()),
            max_sequence_length: default_max_sequence_length(),
            normalize: default_normalize(),
        }
    }

    /// Remote provider speaking the `OpenAI` embeddings API
    pub fn openai(api_key: SecretString, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            provider_type: EmbeddingsProviderType::Openai,
            api_key: Some(api_key),
            base_url,
            model,
            model_path: None,
            tokenizer_path: None,
            max_sequence_length: default_max_sequence_length(),
            normalize: default_normalize(),
        }
    }
}

/// Supported embeddings providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingsProviderType {
    /// Local ONNX sentence-embedding model
    Onnx,
    /// `OpenAI`-compatible embeddings API
    Openai,
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_sequence_length() -> usize {
    256
}

#[allow(clippy::missing_const_for_fn)]
fn default_normalize() -> bool {
    true
}
