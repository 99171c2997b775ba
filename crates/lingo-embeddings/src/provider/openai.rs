use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::EmbeddingsProvider;
use crate::error::{EmbeddingsError, Result};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model requested when the provider configuration names none
const DEFAULT_MODEL: &str = "text-embedding-3-small";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Embeddings from an `OpenAI`-compatible HTTP API
pub(crate) struct OpenAiEmbeddingsProvider {
    name: String,
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiEmbeddingsProvider {
    pub fn new(name: String, api_key: SecretString, base_url: Option<String>, model: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EmbeddingsError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name,
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

/// Wire format for the `OpenAI` embeddings API request
#[derive(Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    input: [&'a str; 1],
    model: &'a str,
    encoding_format: &'static str,
}

/// Wire format for the `OpenAI` embeddings API response
#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingsProvider for OpenAiEmbeddingsProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let wire_request = OpenAiEmbeddingRequest {
            input: [text],
            model: &self.model,
            encoding_format: "float",
        };

        tracing::debug!(provider = %self.name, model = %self.model, "sending embeddings request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "embeddings request failed");
                EmbeddingsError::ConnectionError(format!("Failed to send embeddings request: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, status = %status, "embeddings API error: {error_text}");

            return Err(EmbeddingsError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let wire_response: OpenAiEmbeddingResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse embeddings response");
            EmbeddingsError::ConnectionError(format!("Failed to parse embeddings response: {e}"))
        })?;

        let embedding = wire_response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or(EmbeddingsError::EmptyEmbedding)?;

        if embedding.is_empty() {
            return Err(EmbeddingsError::EmptyEmbedding);
        }

        Ok(embedding)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
