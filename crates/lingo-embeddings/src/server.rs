use lingo_config::{EmbeddingsConfig, EmbeddingsProviderConfig, EmbeddingsProviderType};
use secrecy::SecretString;

use crate::{
    error::EmbeddingsError,
    provider::{EmbeddingsProvider, onnx::OnnxEmbeddingsProvider, openai::OpenAiEmbeddingsProvider},
};

/// Embeddings server backed by a single active provider
pub struct Server {
    provider: Option<Box<dyn EmbeddingsProvider>>,
}

impl Server {
    /// Server without a provider; every request fails with `ProviderNotFound`
    pub(crate) const fn unavailable() -> Self {
        Self { provider: None }
    }

    /// Embed `text` with the active provider
    pub async fn embed(&self, text: &str) -> crate::error::Result<Vec<f32>> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            EmbeddingsError::ProviderNotFound("No embeddings providers configured".to_string())
        })?;

        provider.embed(text).await
    }

    /// Name of the active provider, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|provider| provider.name())
    }
}

/// Builder for constructing the embeddings server from configuration
pub struct EmbeddingsServerBuilder<'a> {
    config: &'a EmbeddingsConfig,
}

impl<'a> EmbeddingsServerBuilder<'a> {
    pub const fn new(config: &'a EmbeddingsConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let Some((name, provider_config)) = self.config.active_provider() else {
            if let Some(name) = &self.config.default_provider {
                return Err(EmbeddingsError::ProviderNotFound(name.clone()));
            }

            tracing::warn!("No embeddings providers configured, /embeddings will return empty vectors");
            return Ok(Server::unavailable());
        };

        tracing::debug!("Initializing embeddings provider: {name}");

        let provider: Box<dyn EmbeddingsProvider> = match provider_config.provider_type {
            EmbeddingsProviderType::Onnx => {
                let (model_path, tokenizer_path) = provider_config
                    .model_path
                    .as_deref()
                    .zip(provider_config.tokenizer_path.as_deref())
                    .ok_or_else(|| {
                        EmbeddingsError::ConfigError(format!(
                            "ONNX provider '{name}' requires model_path and tokenizer_path"
                        ))
                    })?;

                Box::new(OnnxEmbeddingsProvider::load(
                    name.clone(),
                    model_path,
                    tokenizer_path,
                    provider_config.max_sequence_length,
                    provider_config.normalize,
                )?)
            }
            EmbeddingsProviderType::Openai => Box::new(OpenAiEmbeddingsProvider::new(
                name.clone(),
                resolve_api_key(name, provider_config)?,
                provider_config.base_url.clone(),
                provider_config.model.clone(),
            )?),
        };

        tracing::debug!(provider = %name, "embeddings server initialized");

        Ok(Server {
            provider: Some(provider),
        })
    }
}

fn resolve_api_key(name: &str, config: &EmbeddingsProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| EmbeddingsError::ConfigError(format!("Embeddings provider '{name}' requires an API key")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_providers_is_provider_not_found() {
        let server = EmbeddingsServerBuilder::new(&EmbeddingsConfig::default()).build().unwrap();

        assert!(server.provider_name().is_none());
        assert!(matches!(
            server.embed("salam").await,
            Err(EmbeddingsError::ProviderNotFound(_))
        ));
    }

    #[test]
    fn unknown_default_provider_fails() {
        let config = EmbeddingsConfig {
            default_provider: Some("missing".to_string()),
            ..EmbeddingsConfig::default()
        };

        assert!(matches!(
            EmbeddingsServerBuilder::new(&config).build(),
            Err(EmbeddingsError::ProviderNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn openai_provider_is_selected() {
        let mut config = EmbeddingsConfig::default();
        config.providers.insert(
            "remote".to_string(),
            EmbeddingsProviderConfig::openai(SecretString::from("sk-test".to_string()), None, None),
        );

        let server = EmbeddingsServerBuilder::new(&config).build().unwrap();
        assert_eq!(server.provider_name(), Some("remote"));
    }

    #[test]
    fn openai_provider_without_key_fails() {
        let mut provider = EmbeddingsProviderConfig::openai(SecretString::from("sk".to_string()), None, None);
        provider.api_key = None;

        let mut config = EmbeddingsConfig::default();
        config.providers.insert("remote".to_string(), provider);

        assert!(matches!(
            EmbeddingsServerBuilder::new(&config).build(),
            Err(EmbeddingsError::ConfigError(_))
        ));
    }
}
