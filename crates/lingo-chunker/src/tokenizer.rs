use std::path::Path;

use tokenizers::PostProcessor;

use crate::error::{ChunkerError, Result};

/// Byte range of one token in the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenSpan {
    pub start: usize,
    pub end: usize,
    /// False for continuation pieces such as WordPiece `##able`
    pub starts_word: bool,
}

/// Process-wide tokenizer shared by every chunking request
///
/// Wraps a Hugging Face tokenizer with truncation and padding switched off,
/// so counts reflect the full input. Encoding takes `&self`, which makes a
/// single instance safe to share across concurrent requests.
pub struct Tokenizer {
    inner: tokenizers::Tokenizer,
    markers: usize,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("vocab_size", &self.inner.get_vocab_size(true))
            .field("markers", &self.markers)
            .finish()
    }
}

impl Tokenizer {
    /// Load a `tokenizer.json` from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| ChunkerError::TokenizerInit(format!("cannot load tokenizer from '{}': {e}", path.display())))?;

        Self::new(inner)
    }

    /// Load a tokenizer from serialized `tokenizer.json` bytes
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let inner = tokenizers::Tokenizer::from_bytes(bytes)
            .map_err(|e| ChunkerError::TokenizerInit(format!("cannot parse tokenizer: {e}")))?;

        Self::new(inner)
    }

    fn new(mut inner: tokenizers::Tokenizer) -> Result<Self> {
        inner
            .with_truncation(None)
            .map_err(|e| ChunkerError::TokenizerInit(format!("cannot disable truncation: {e}")))?;
        inner.with_padding(None);

        let markers = inner.get_post_processor().map_or(0, |processor| processor.added_tokens(false));

        Ok(Self { inner, markers })
    }

    /// Number of boundary markers added around a single sequence
    pub const fn markers(&self) -> usize {
        self.markers
    }

    /// Token ids for `text`, boundary markers included
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        self.ids(text, true)
    }

    /// Token ids for `text` without boundary markers
    pub fn encode_content(&self, text: &str) -> Result<Vec<u32>> {
        self.ids(text, false)
    }

    /// Length of `encode(text)`
    pub fn count(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }

    /// Length of `encode_content(text)`
    pub fn count_content(&self, text: &str) -> Result<usize> {
        Ok(self.encode_content(text)?.len())
    }

    /// Where each content token of `text` sits in the input
    pub(crate) fn spans(&self, text: &str) -> Result<Vec<TokenSpan>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| ChunkerError::Tokenization(format!("encode failed: {e}")))?;

        let word_ids = encoding.get_word_ids();

        Ok(encoding
            .get_offsets()
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| TokenSpan {
                start,
                end,
                starts_word: i == 0 || word_ids[i].is_none() || word_ids[i] != word_ids[i - 1],
            })
            .collect())
    }

    fn ids(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        self.inner
            .encode(text, add_special_tokens)
            .map(|encoding| encoding.get_ids().to_vec())
            .map_err(|e| ChunkerError::Tokenization(format!("encode failed: {e}")))
    }
}
