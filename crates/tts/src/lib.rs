#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod server;
mod ssml;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use base64::{Engine, engine::general_purpose::STANDARD};

pub use error::{Result, TtsError};
pub use server::{Server, TtsServerBuilder};
pub use types::{AudioPayload, SpeechQuery, SpeechRequest, SpeechResponse};

/// Build the TTS server from configuration
///
/// Provider initialization failures are logged and the server starts without
/// providers, so `/tts` answers empty audio.
pub fn build_server(config: &lingo_config::Config) -> Arc<Server> {
    let server = TtsServerBuilder::new(&config.tts).build().unwrap_or_else(|e| {
        tracing::error!(
            reason = e.error_type(),
            error = %e,
            "Failed to initialize TTS provider, /tts will return empty audio"
        );
        Server::without_providers(&config.tts)
    });

    Arc::new(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/tts", get(synthesize))
}

/// Handle speech synthesis requests
///
/// Failures are logged and reported as an empty `audio_base64`.
async fn synthesize(State(server): State<Arc<Server>>, Query(query): Query<SpeechQuery>) -> Json<AudioPayload> {
    tracing::debug!(text = %query.text, "TTS handler called");

    let audio_base64 = match server.synthesize(&query.text).await {
        Ok(response) => {
            let encoded = STANDARD.encode(&response.audio);
            tracing::debug!(content_type = %response.content_type, base64_len = encoded.len(), "speech synthesis complete");
            encoded
        }
        Err(e) => {
            tracing::error!(reason = e.error_type(), error = %e, "speech synthesis failed");
            String::new()
        }
    };

    Json(AudioPayload { audio_base64 })
}
