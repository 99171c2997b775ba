//! Mock `OpenAI`-compatible embeddings backend for integration tests

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Vector returned for every accepted request
pub const EMBEDDING: [f32; 4] = [0.5, -1.0, 2.0, 0.125];

/// Mock embeddings backend
pub struct MockEmbeddings {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockEmbeddingsState>,
}

struct MockEmbeddingsState {
    status: StatusCode,
    request_count: AtomicU32,
}

impl MockEmbeddings {
    /// Start a mock that embeds successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_status(StatusCode::OK).await
    }

    /// Start a mock that answers every request with `status`
    pub async fn start_with_status(status: StatusCode) -> anyhow::Result<Self> {
        let state = Arc::new(MockEmbeddingsState {
            status,
            request_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/v1/embeddings", routing::post(handle_embeddings))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to configure as the provider's `base_url`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of embedding requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockEmbeddings {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_embeddings(
    State(state): State<Arc<MockEmbeddingsState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if state.status != StatusCode::OK {
        return (state.status, "upstream failure").into_response();
    }

    Json(serde_json::json!({
        "object": "list",
        "data": [{
            "object": "embedding",
            "embedding": EMBEDDING,
            "index": 0
        }],
        "model": body["model"],
        "usage": { "prompt_tokens": 1, "total_tokens": 1 }
    }))
    .into_response()
}
