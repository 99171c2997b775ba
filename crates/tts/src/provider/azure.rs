use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::TtsError,
    ssml,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const SYNTHESIS_PATH: &str = "/cognitiveservices/v1";

/// Azure Cognitive Services Speech provider (REST synthesis endpoint)
pub(crate) struct AzureSpeechProvider {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    name: String,
}

impl AzureSpeechProvider {
    pub fn new(
        name: String,
        api_key: SecretString,
        region: Option<&str>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> crate::error::Result<Self> {
        let endpoint = synthesis_endpoint(region, base_url)
            .ok_or_else(|| TtsError::ConfigError(format!("TTS provider '{name}' needs a region or base_url")))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TtsError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            name,
        })
    }
}

/// Resolve the synthesis URL; an explicit base URL wins over the region
fn synthesis_endpoint(region: Option<&str>, base_url: Option<&str>) -> Option<String> {
    match (base_url, region) {
        (Some(base_url), _) => Some(format!("{}{SYNTHESIS_PATH}", base_url.trim_end_matches('/'))),
        (None, Some(region)) if !region.is_empty() => {
            Some(format!("https://{region}.tts.speech.microsoft.com{SYNTHESIS_PATH}"))
        }
        _ => None,
    }
}

#[async_trait]
impl TtsProvider for AzureSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> crate::error::Result<SpeechResponse> {
        tracing::debug!(
            provider = %self.name,
            voice = %request.voice,
            language = %request.language,
            input_len = request.text.len(),
            "Azure TTS request"
        );

        let body = ssml::render(&request.text, &request.language, &request.voice);

        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, self.api_key.expose_secret())
            .header(http::header::CONTENT_TYPE, "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, &request.output_format)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "Azure TTS request failed");
                TtsError::ConnectionError(format!("Failed to send request to Azure Speech: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let details = if error_text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                error_text
            };

            tracing::error!(provider = %self.name, %status, "synthesis canceled: {details}");

            return Err(TtsError::from_status(status.as_u16(), details));
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/wav")
            .to_string();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to read Azure TTS response body");
            TtsError::InternalError(format!("failed to read audio: {e}"))
        })?;

        tracing::debug!(provider = %self.name, bytes = audio.len(), "Azure TTS synthesis complete");

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
