use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Top-level TTS configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Synthesis language, e.g. `az-AZ`
    #[serde(default = "default_language")]
    pub language: String,
    /// Voice name, e.g. `az-AZ-BabekNeural`
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Vendor output format identifier
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// TTS provider configurations keyed by name
    #[serde(default)]
    pub providers: IndexMap<String, TtsProviderConfig>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            voice: default_voice(),
            output_format: default_output_format(),
            providers: IndexMap::new(),
        }
    }
}

/// Configuration for a single TTS provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: TtsProviderType,
    /// Subscription key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Service region, e.g. `westeurope`
    #[serde(default)]
    pub region: Option<String>,
    /// Base URL override (takes precedence over the region endpoint)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Supported TTS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// Azure Cognitive Services Speech
    Azure,
}

fn default_language() -> String {
    "az-AZ".to_string()
}

fn default_voice() -> String {
    "az-AZ-BabekNeural".to_string()
}

fn default_output_format() -> String {
    "riff-24khz-16bit-mono-pcm".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    60
}
