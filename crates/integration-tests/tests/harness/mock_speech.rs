//! Mock speech synthesis backend for integration tests
//!
//! Accepts SSML on the REST synthesis path and answers canned audio bytes

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

use super::config::SPEECH_KEY;

/// Audio returned for every accepted request
pub const AUDIO: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub ssml: String,
    pub content_type: Option<String>,
    pub output_format: Option<String>,
    pub user_agent: Option<String>,
}

/// Mock speech backend
pub struct MockSpeech {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSpeechState>,
}

struct MockSpeechState {
    status: StatusCode,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockSpeech {
    /// Start a mock that synthesizes successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_status(StatusCode::OK).await
    }

    /// Start a mock that answers every request with `status`
    pub async fn start_with_status(status: StatusCode) -> anyhow::Result<Self> {
        let state = Arc::new(MockSpeechState {
            status,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/cognitiveservices/v1", routing::post(handle_synthesis))
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
        format!("http://{}", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockSpeech {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

async fn handle_synthesis(
    State(state): State<Arc<MockSpeechState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        ssml: String::from_utf8_lossy(&body).into_owned(),
        content_type: header(&headers, "content-type"),
        output_format: header(&headers, "x-microsoft-outputformat"),
        user_agent: header(&headers, "user-agent"),
    });

    if header(&headers, "ocp-apim-subscription-key").as_deref() != Some(SPEECH_KEY) {
        return (StatusCode::UNAUTHORIZED, Bytes::from_static(b"invalid subscription key"));
    }

    if state.status != StatusCode::OK {
        return (state.status, Bytes::from_static(b"synthesis failed"));
    }

    (StatusCode::OK, Bytes::from_static(AUDIO))
}
