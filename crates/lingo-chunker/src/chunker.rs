use crate::{
    error::{ChunkerError, Result},
    tokenizer::{TokenSpan, Tokenizer},
    types::{Chunk, QaPair},
};

/// Token-bounded text chunker
///
/// Splits text into consecutive windows of content tokens and cuts the
/// original text at the window edges. Every chunk re-encodes to at most
/// `max_tokens` tokens, boundary markers included.
#[derive(Debug)]
pub struct Chunker {
    tokenizer: Tokenizer,
    default_max_tokens: usize,
}

impl Chunker {
    pub const fn new(tokenizer: Tokenizer, default_max_tokens: usize) -> Self {
        Self {
            tokenizer,
            default_max_tokens,
        }
    }

    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub const fn default_max_tokens(&self) -> usize {
        self.default_max_tokens
    }

    /// Validate a caller-supplied budget, falling back to the configured one
    pub fn resolve_max_tokens(&self, requested: Option<i64>) -> Result<usize> {
        let Some(requested) = requested else {
            return Ok(self.default_max_tokens);
        };

        usize::try_from(requested)
            .ok()
            .filter(|&max_tokens| max_tokens > 0)
            .ok_or_else(|| ChunkerError::InvalidArgument(format!("max_tokens must be positive, got {requested}")))
    }

    /// Split `text` into chunks of at most `max_tokens` tokens each
    ///
    /// Windows never overlap and keep token order. A window ends early rather
    /// than leave the next one starting inside a word, unless the word alone is
    /// wider than the window. Each chunk is the original text under its window,
    /// trimmed; a chunk that still re-encodes over budget is shrunk. Text without
    /// content tokens yields a single empty chunk.
    pub fn split(&self, text: &str, max_tokens: usize) -> Result<Vec<String>> {
        let window = self.window_size(max_tokens)?;
        let spans = self.tokenizer.spans(text)?;

        if spans.is_empty() {
            return Ok(vec![String::new()]);
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < spans.len() {
            let mut end = word_aligned_end(&spans, start, (start + window).min(spans.len()));

            let chunk = loop {
                let chunk = slice(text, &spans[start..end])?;

                if end - start == 1 || self.tokenizer.count_content(chunk)? <= window {
                    break chunk;
                }

                end = word_aligned_end(&spans, start, end - 1);
            };

            chunks.push(chunk.to_string());
            start = end;
        }

        Ok(chunks)
    }

    /// Chunk a question/answer pair for embedding
    ///
    /// Pairs that already fit are returned untouched as a single chunk;
    /// otherwise each split fragment is re-counted, since re-encoding a
    /// fragment on its own is not guaranteed to preserve the window length.
    pub fn build_chunks(&self, pair: &QaPair, max_tokens: usize) -> Result<Vec<Chunk>> {
        self.window_size(max_tokens)?;

        let combined = pair.combined_text();
        let total = self.tokenizer.count(&combined)?;

        if total <= max_tokens {
            return Ok(vec![Chunk {
                text: combined,
                intent: pair.intent.clone(),
                token_count: total,
            }]);
        }

        let chunks = self
            .split(&combined, max_tokens)?
            .into_iter()
            .map(|text| {
                let token_count = self.tokenizer.count(&text)?;
                Ok(Chunk {
                    text,
                    intent: pair.intent.clone(),
                    token_count,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(total_tokens = total, max_tokens, chunks = chunks.len(), "split question/answer pair");

        Ok(chunks)
    }

    /// Content tokens per window once markers are reserved
    fn window_size(&self, max_tokens: usize) -> Result<usize> {
        let markers = self.tokenizer.markers();

        if max_tokens <= markers {
            return Err(ChunkerError::InvalidArgument(format!(
                "max_tokens must exceed the {markers} boundary marker token(s), got {max_tokens}"
            )));
        }

        Ok(max_tokens - markers)
    }
}

/// Latest end in `start + 1..=end` that does not cut through a word
///
/// Falls back to `end` when a single word covers the whole range.
fn word_aligned_end(spans: &[TokenSpan], start: usize, end: usize) -> usize {
    if end >= spans.len() {
        return spans.len();
    }

    (start + 1..=end).rev().find(|&i| spans[i].starts_word).unwrap_or(end)
}

/// Original text covered by a run of tokens, trimmed
fn slice<'a>(text: &'a str, spans: &[TokenSpan]) -> Result<&'a str> {
    let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
        return Ok("");
    };

    text.get(first.start..last.end.max(first.start))
        .map(str::trim)
        .ok_or_else(|| ChunkerError::Tokenization(format!("token offsets {}..{} out of range", first.start, last.end)))
}
