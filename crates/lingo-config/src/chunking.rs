use std::path::PathBuf;

use serde::Deserialize;

/// Token budget applied when a request does not name one
pub const DEFAULT_MAX_TOKENS: usize = 500;

/// Token-aware chunking configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkingConfig {
    /// Path to a Hugging Face `tokenizer.json`
    pub tokenizer_path: PathBuf,
    /// Default maximum tokens per chunk, boundary markers included
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl ChunkingConfig {
    pub fn new(tokenizer_path: impl Into<PathBuf>) -> Self {
        Self {
            tokenizer_path: tokenizer_path.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new("models/all-MiniLM-L6-v2/tokenizer.json")
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}
