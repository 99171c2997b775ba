use serde::{Deserialize, Serialize};

/// `GET /tts` query string
#[derive(Debug, Deserialize)]
pub struct SpeechQuery {
    /// Text to synthesize into speech
    pub text: String,
}

/// Synthesis request handed to a provider
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    /// Language tag, e.g. `az-AZ`
    pub language: String,
    /// Vendor voice name
    pub voice: String,
    /// Vendor output format identifier
    pub output_format: String,
}

/// Raw audio returned by a provider
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/wav")
    pub content_type: String,
}

/// `GET /tts` response body; empty string when synthesis failed
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioPayload {
    pub audio_base64: String,
}
