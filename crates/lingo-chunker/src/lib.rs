#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod chunker;
mod error;
mod request;
mod tokenizer;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use chunker::Chunker;
pub use error::{ChunkerError, Result};
pub use tokenizer::Tokenizer;
pub use types::{Chunk, QaPair, QaSplitRequest, QaSplitResponse};
use request::JsonPayload;

/// Load the tokenizer and build the chunker from configuration
///
/// A tokenizer that cannot be loaded is fatal: the caller must not start
/// serving.
pub fn build_server(config: &lingo_config::Config) -> anyhow::Result<Arc<Chunker>> {
    let chunking = &config.chunking;

    let tokenizer = Tokenizer::from_file(&chunking.tokenizer_path)
        .map_err(|e| anyhow::anyhow!("Failed to initialize chunker: {e}"))?;

    tracing::info!(
        path = %chunking.tokenizer_path.display(),
        markers = tokenizer.markers(),
        max_tokens = chunking.max_tokens,
        "loaded chunking tokenizer"
    );

    Ok(Arc::new(Chunker::new(tokenizer, chunking.max_tokens)))
}

/// Create the endpoint router for question/answer splitting
pub fn endpoint_router() -> Router<Arc<Chunker>> {
    Router::new().route("/qasplit", post(qasplit))
}

/// Handle question/answer splitting requests
async fn qasplit(
    State(chunker): State<Arc<Chunker>>,
    JsonPayload(request): JsonPayload<QaSplitRequest>,
) -> Result<Json<QaSplitResponse>> {
    tracing::debug!(intent = %request.pair.intent, "qasplit handler called");

    let max_tokens = chunker.resolve_max_tokens(request.max_tokens)?;
    let chunks = chunker.build_chunks(&request.pair, max_tokens)?;

    tracing::debug!(chunks = chunks.len(), "qasplit complete");

    Ok(Json(QaSplitResponse::success(chunks)))
}
