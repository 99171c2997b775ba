use serde::{Deserialize, Serialize};

/// Question/answer pair submitted to `POST /qasplit`
#[derive(Debug, Clone, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
    pub intent: String,
}

impl QaPair {
    /// Single string fed to the tokenizer
    pub fn combined_text(&self) -> String {
        format!("Q: {} A: {}", self.question, self.answer)
    }
}

/// `POST /qasplit` body
#[derive(Debug, Deserialize)]
pub struct QaSplitRequest {
    #[serde(flatten)]
    pub pair: QaPair,
    /// Overrides the configured token budget; signed so that negative
    /// values surface as invalid arguments instead of parse errors
    #[serde(default)]
    pub max_tokens: Option<i64>,
}

/// One unit of text sized for downstream embedding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub intent: String,
    /// Token count of `text`, boundary markers included
    pub token_count: usize,
}

/// `POST /qasplit` success body
#[derive(Debug, Serialize)]
pub struct QaSplitResponse {
    pub status: &'static str,
    pub data: Vec<Chunk>,
}

impl QaSplitResponse {
    pub const fn success(data: Vec<Chunk>) -> Self {
        Self { status: "success", data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_uses_literal_template() {
        let pair = QaPair {
            question: "Salam necesen".to_string(),
            answer: "Yaxshiyam".to_string(),
            intent: "greeting".to_string(),
        };
        assert_eq!(pair.combined_text(), "Q: Salam necesen A: Yaxshiyam");
    }

    #[test]
    fn empty_pair_keeps_template_spacing() {
        let pair = QaPair {
            question: String::new(),
            answer: String::new(),
            intent: "empty".to_string(),
        };
        assert_eq!(pair.combined_text(), "Q:  A: ");
    }

    #[test]
    fn request_accepts_optional_max_tokens() {
        let request: QaSplitRequest =
            serde_json::from_str(r#"{"question":"q","answer":"a","intent":"i","max_tokens":-3}"#).unwrap();
        assert_eq!(request.max_tokens, Some(-3));
        assert_eq!(request.pair.intent, "i");

        let request: QaSplitRequest = serde_json::from_str(r#"{"question":"q","answer":"a","intent":"i"}"#).unwrap();
        assert!(request.max_tokens.is_none());
    }

    #[test]
    fn request_requires_intent() {
        assert!(serde_json::from_str::<QaSplitRequest>(r#"{"question":"q","answer":"a"}"#).is_err());
    }
}
