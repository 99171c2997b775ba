#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
mod pooling;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

pub use error::{EmbeddingsError, Result};
pub use server::{EmbeddingsServerBuilder, Server};
pub use types::{EmbeddingPayload, EmbeddingQuery, decode_vector, encode_vector};

/// Build the embeddings server from configuration
///
/// A provider that fails to initialize is logged and left out, so
/// `/embeddings` answers empty vectors instead of keeping the service down.
pub fn build_server(config: &lingo_config::Config) -> Arc<Server> {
    let server = EmbeddingsServerBuilder::new(&config.embeddings)
        .build()
        .unwrap_or_else(|e| {
            tracing::error!(
                reason = e.error_type(),
                error = %e,
                "Failed to initialize embeddings provider, /embeddings will return empty vectors"
            );
            Server::unavailable()
        });

    Arc::new(server)
}

/// Create the endpoint router for embeddings
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/embeddings", get(embed))
}

/// Handle embedding requests
///
/// Failures are logged and reported as an empty `embedding_base64`.
async fn embed(State(server): State<Arc<Server>>, Query(query): Query<EmbeddingQuery>) -> Json<EmbeddingPayload> {
    tracing::debug!(text = %query.text, "embeddings handler called");

    let embedding_base64 = match server.embed(&query.text).await {
        Ok(embedding) => {
            let encoded = encode_vector(&embedding);
            tracing::debug!(dimensions = embedding.len(), base64_len = encoded.len(), "embedding complete");
            encoded
        }
        Err(e) => {
            tracing::error!(reason = e.error_type(), error = %e, "embedding failed");
            String::new()
        }
    };

    Json(EmbeddingPayload { embedding_base64 })
}
