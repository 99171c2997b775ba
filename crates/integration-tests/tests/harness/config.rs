//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use lingo_config::{
    ChunkingConfig, Config, EmbeddingsConfig, EmbeddingsProviderConfig, ServerConfig, TtsConfig, TtsProviderConfig,
    TtsProviderType,
};
use secrecy::SecretString;

/// Word-level BERT-style tokenizer shared with the chunker's unit tests
pub const FIXTURE_TOKENIZER: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../lingo-chunker/tests/fixtures/tokenizer.json"
);

/// Subscription key the mock speech service accepts
pub const SPEECH_KEY: &str = "test-speech-key";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                    ..ServerConfig::default()
                },
                tts: TtsConfig::default(),
                embeddings: EmbeddingsConfig::default(),
                chunking: ChunkingConfig::new(FIXTURE_TOKENIZER),
                telemetry: None,
            },
        }
    }

    /// Add an Azure speech provider pointed at a mock backend
    pub fn with_azure_tts(self, base_url: &str) -> Self {
        self.with_azure_tts_key(base_url, SPEECH_KEY)
    }

    /// Add an Azure speech provider using the given subscription key
    pub fn with_azure_tts_key(mut self, base_url: &str, key: &str) -> Self {
        self.config.tts.providers.insert(
            "azure".to_owned(),
            TtsProviderConfig {
                provider_type: TtsProviderType::Azure,
                api_key: Some(SecretString::from(key.to_owned())),
                region: None,
                base_url: Some(base_url.to_owned()),
                timeout_secs: 5,
            },
        );
        self
    }

    /// Add an OpenAI-compatible embeddings provider pointed at a mock backend
    pub fn with_openai_embeddings(mut self, base_url: &str) -> Self {
        self.config.embeddings.providers.insert(
            "remote".to_owned(),
            EmbeddingsProviderConfig::openai(
                SecretString::from("test-key".to_owned()),
                Some(base_url.to_owned()),
                Some("mock-embedding".to_owned()),
            ),
        );
        self
    }

    /// Set the default chunk budget
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.chunking.max_tokens = max_tokens;
        self
    }

    /// Set the request body limit
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.config.server.body_limit_bytes = bytes;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
