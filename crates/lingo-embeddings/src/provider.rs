pub mod onnx;
pub mod openai;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for embeddings provider implementations
#[async_trait]
pub(crate) trait EmbeddingsProvider: Send + Sync {
    /// Fixed-length vector for `text`
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the provider name
    fn name(&self) -> &str;
}
