use std::time::Duration;

use lingo_config::{TtsConfig, TtsProviderConfig, TtsProviderType};
use secrecy::SecretString;

use crate::{
    error::TtsError,
    provider::{TtsProvider, azure::AzureSpeechProvider},
    types::{SpeechRequest, SpeechResponse},
};

/// TTS server that renders text with the configured language and voice
pub struct Server {
    providers: Vec<Box<dyn TtsProvider>>,
    language: String,
    voice: String,
    output_format: String,
}

impl Server {
    /// Synthesize `text` using the first configured provider
    pub async fn synthesize(&self, text: &str) -> crate::error::Result<SpeechResponse> {
        let provider = self
            .providers
            .first()
            .ok_or_else(|| TtsError::ProviderNotFound("No TTS providers configured".to_string()))?;

        tracing::debug!(provider = provider.name(), "synthesizing speech");

        let request = SpeechRequest {
            text: text.to_string(),
            language: self.language.clone(),
            voice: self.voice.clone(),
            output_format: self.output_format.clone(),
        };

        provider.synthesize(&request).await
    }

    /// Number of configured providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Name of the provider that serves requests, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.providers.first().map(|provider| provider.name())
    }

    /// Server with the configured voice but no providers
    pub(crate) fn without_providers(config: &TtsConfig) -> Self {
        Self {
            providers: Vec::new(),
            language: config.language.clone(),
            voice: config.voice.clone(),
            output_format: config.output_format.clone(),
        }
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a TtsConfig,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a TtsConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let mut providers: Vec<Box<dyn TtsProvider>> = Vec::new();

        for (name, provider_config) in &self.config.providers {
            tracing::debug!("Initializing TTS provider: {name}");

            let provider: Box<dyn TtsProvider> = match provider_config.provider_type {
                TtsProviderType::Azure => Box::new(AzureSpeechProvider::new(
                    name.clone(),
                    resolve_api_key(name, provider_config)?,
                    provider_config.region.as_deref(),
                    provider_config.base_url.as_deref(),
                    Duration::from_secs(provider_config.timeout_secs),
                )?),
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            tracing::warn!("No TTS providers configured, /tts will return empty audio");
        } else {
            tracing::debug!(
                voice = %self.config.voice,
                language = %self.config.language,
                "TTS server initialized with {} provider(s)",
                providers.len()
            );
        }

        Ok(Server {
            providers,
            ..Server::without_providers(self.config)
        })
    }
}

fn resolve_api_key(name: &str, config: &TtsProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| TtsError::ConfigError(format!("API key required for TTS provider '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_providers_is_provider_not_found() {
        let server = TtsServerBuilder::new(&TtsConfig::default()).build().unwrap();
        assert_eq!(server.provider_count(), 0);

        let err = server.synthesize("Salam").await.err().unwrap();
        assert!(matches!(err, TtsError::ProviderNotFound(_)));
    }

    #[test]
    fn azure_without_key_fails_to_build() {
        let config: TtsConfig = toml::from_str(
            r#"
            [providers.azure]
            type = "azure"
            region = "westeurope"
            "#,
        )
        .unwrap();

        assert!(matches!(TtsServerBuilder::new(&config).build(), Err(TtsError::ConfigError(_))));
    }

    #[test]
    fn first_configured_provider_serves_requests() {
        let config: TtsConfig = toml::from_str(
            r#"
            [providers.primary]
            type = "azure"
            api_key = "key"
            region = "westeurope"

            [providers.secondary]
            type = "azure"
            api_key = "key"
            base_url = "http://127.0.0.1:9"
            "#,
        )
        .unwrap();

        let server = TtsServerBuilder::new(&config).build().unwrap();
        assert_eq!(server.provider_count(), 2);
        assert_eq!(server.provider_name(), Some("primary"));
    }
}
