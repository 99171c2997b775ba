#![allow(clippy::must_use_candidate)]

pub mod chunking;
pub mod embeddings;
mod env;
mod loader;
pub mod server;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use chunking::*;
pub use embeddings::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
pub use tts::*;

/// Top-level Lingo configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech synthesis configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Sentence embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    /// Token-aware chunking configuration
    pub chunking: ChunkingConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
