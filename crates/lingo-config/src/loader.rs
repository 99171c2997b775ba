use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, EmbeddingsProviderType, TtsProviderType};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_chunking()?;
        self.validate_tts()?;
        self.validate_embeddings()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_chunking(&self) -> anyhow::Result<()> {
        if self.chunking.max_tokens == 0 {
            anyhow::bail!("chunking.max_tokens must be greater than 0");
        }

        if self.chunking.tokenizer_path.as_os_str().is_empty() {
            anyhow::bail!("chunking.tokenizer_path must not be empty");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        for (name, provider) in &self.tts.providers {
            match provider.provider_type {
                TtsProviderType::Azure => {
                    if provider.api_key.as_ref().is_none_or(|key| key.expose_secret().is_empty()) {
                        anyhow::bail!("TTS provider '{name}' requires an api_key");
                    }

                    let has_region = provider.region.as_ref().is_some_and(|region| !region.is_empty());
                    if !has_region && provider.base_url.is_none() {
                        anyhow::bail!("TTS provider '{name}' requires a region or base_url");
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_embeddings(&self) -> anyhow::Result<()> {
        if let Some(ref name) = self.embeddings.default_provider
            && !self.embeddings.providers.contains_key(name)
        {
            anyhow::bail!("embeddings.default_provider '{name}' is not a configured provider");
        }

        for (name, provider) in &self.embeddings.providers {
            match provider.provider_type {
                EmbeddingsProviderType::Onnx => {
                    if provider.model_path.is_none() || provider.tokenizer_path.is_none() {
                        anyhow::bail!("embeddings provider '{name}' requires model_path and tokenizer_path");
                    }

                    if provider.max_sequence_length == 0 {
                        anyhow::bail!("embeddings provider '{name}' max_sequence_length must be greater than 0");
                    }
                }
                EmbeddingsProviderType::Openai => {
                    if provider.api_key.is_none() {
                        anyhow::bail!("embeddings provider '{name}' requires an api_key");
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        if let Some(ref telemetry) = self.telemetry
            && !(0.0..=1.0).contains(&telemetry.sampling_rate)
        {
            anyhow::bail!("telemetry.sampling_rate must be between 0.0 and 1.0");
        }

        Ok(())
    }
}
