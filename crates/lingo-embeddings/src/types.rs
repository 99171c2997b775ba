use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// `GET /embeddings` query string
#[derive(Debug, Deserialize)]
pub struct EmbeddingQuery {
    /// Text to embed
    pub text: String,
}

/// `GET /embeddings` response body; empty string when embedding failed
#[derive(Debug, Serialize, Deserialize)]
pub struct EmbeddingPayload {
    pub embedding_base64: String,
}

/// Base64 of the vector as consecutive little-endian `f32` values
pub fn encode_vector(embedding: &[f32]) -> String {
    let bytes: Vec<u8> = embedding.iter().flat_map(|value| value.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}

/// Inverse of [`encode_vector`]; `None` for malformed input
pub fn decode_vector(encoded: &str) -> Option<Vec<f32>> {
    let bytes = STANDARD.decode(encoded).ok()?;

    if bytes.len() % 4 != 0 {
        return None;
    }

    Some(
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}
