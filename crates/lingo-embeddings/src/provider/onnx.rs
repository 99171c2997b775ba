//! Local sentence embeddings from an ONNX transformer export
//!
//! Runs models such as `all-MiniLM-L6-v2` in-process through `ort`: the
//! tokenizer output feeds the session, the last hidden state is mean pooled
//! over the attention mask and optionally L2-normalised.
//!
//! Enable with the `onnx` feature flag

use std::path::Path;
#[cfg(feature = "onnx")]
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::EmbeddingsProvider;
use crate::error::{EmbeddingsError, Result};

/// ONNX sentence-embedding provider
///
/// Without the `onnx` feature the provider cannot be constructed and
/// [`OnnxEmbeddingsProvider::load`] reports the missing feature.
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
pub(crate) struct OnnxEmbeddingsProvider {
    name: String,
    #[cfg(feature = "onnx")]
    session: Arc<Mutex<ort::session::Session>>,
    #[cfg(feature = "onnx")]
    tokenizer: Arc<tokenizers::Tokenizer>,
    #[cfg(feature = "onnx")]
    normalize: bool,
}

impl OnnxEmbeddingsProvider {
    /// Load the model and its tokenizer from disk
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingsError::InferenceError` if either file cannot be
    /// loaded
    #[cfg(feature = "onnx")]
    pub fn load(
        name: String,
        model_path: &Path,
        tokenizer_path: &Path,
        max_sequence_length: usize,
        normalize: bool,
    ) -> Result<Self> {
        use tokenizers::TruncationParams;

        let mut tokenizer = tokenizers::Tokenizer::from_file(tokenizer_path).map_err(|e| {
            EmbeddingsError::InferenceError(format!(
                "failed to load tokenizer from {}: {e}",
                tokenizer_path.display()
            ))
        })?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_sequence_length,
                ..TruncationParams::default()
            }))
            .map_err(|e| EmbeddingsError::InferenceError(format!("invalid truncation settings: {e}")))?;
        tokenizer.with_padding(None);

        let session = ort::session::Session::builder()
            .and_then(|builder| builder.commit_from_file(model_path))
            .map_err(|e| EmbeddingsError::InferenceError(format!("failed to load ONNX model: {e}")))?;

        tracing::info!(provider = %name, path = %model_path.display(), "loaded ONNX embeddings model");

        Ok(Self {
            name,
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            normalize,
        })
    }

    /// Load the model and its tokenizer from disk
    ///
    /// # Errors
    ///
    /// Returns `EmbeddingsError::FeatureNotAvailable` when the `onnx` feature
    /// is not enabled
    #[cfg(not(feature = "onnx"))]
    pub fn load(
        _name: String,
        _model_path: &Path,
        _tokenizer_path: &Path,
        _max_sequence_length: usize,
        _normalize: bool,
    ) -> Result<Self> {
        Err(EmbeddingsError::FeatureNotAvailable {
            feature: "onnx".to_owned(),
        })
    }
}

#[async_trait]
impl EmbeddingsProvider for OnnxEmbeddingsProvider {
    #[cfg(feature = "onnx")]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let normalize = self.normalize;
        let text = text.to_owned();

        tokio::task::spawn_blocking(move || infer(&session, &tokenizer, &text, normalize))
            .await
            .map_err(|e| EmbeddingsError::InferenceError(format!("inference task failed: {e}")))?
    }

    #[cfg(not(feature = "onnx"))]
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(EmbeddingsError::FeatureNotAvailable {
            feature: "onnx".to_owned(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Tokenize, run the session and pool one sequence
#[cfg(feature = "onnx")]
fn infer(
    session: &Mutex<ort::session::Session>,
    tokenizer: &tokenizers::Tokenizer,
    text: &str,
    normalize: bool,
) -> Result<Vec<f32>> {
    use ndarray::Array2;
    use ort::value::Tensor;

    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| EmbeddingsError::InferenceError(format!("tokenization failed: {e}")))?;

    let widen = |values: &[u32]| values.iter().map(|&v| i64::from(v)).collect::<Vec<_>>();
    let len = encoding.get_ids().len();

    let tensor = |values: Vec<i64>| {
        Array2::from_shape_vec((1, len), values)
            .map_err(|e| EmbeddingsError::InferenceError(format!("failed to build input tensor: {e}")))
            .and_then(|array| {
                Tensor::from_array(array)
                    .map_err(|e| EmbeddingsError::InferenceError(format!("failed to prepare ONNX inputs: {e}")))
            })
    };

    let input_ids = tensor(widen(encoding.get_ids()))?;
    let attention_mask = tensor(widen(encoding.get_attention_mask()))?;
    let token_type_ids = tensor(widen(encoding.get_type_ids()))?;

    let mut session = session
        .lock()
        .map_err(|_| EmbeddingsError::InferenceError("ONNX session lock poisoned".to_owned()))?;

    let outputs = session
        .run(ort::inputs![
            "input_ids" => input_ids,
            "attention_mask" => attention_mask,
            "token_type_ids" => token_type_ids,
        ])
        .map_err(|e| EmbeddingsError::InferenceError(format!("ONNX inference failed: {e}")))?;

    let (shape, hidden) = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| EmbeddingsError::InferenceError(format!("failed to extract output tensor: {e}")))?;

    let dim = crate::pooling::hidden_size(shape, len, hidden.len())
        .ok_or_else(|| EmbeddingsError::InferenceError(format!("unexpected output shape {shape:?} for {len} tokens")))?;

    let mut pooled = crate::pooling::mean_pool(hidden, dim, encoding.get_attention_mask());

    if normalize {
        crate::pooling::l2_normalize(&mut pooled);
    }

    Ok(pooled)
}
