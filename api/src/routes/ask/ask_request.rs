use faq_base::{Selection, SelectionSource};
use serde::{Deserialize, Serialize};

/// Request payload for /ask_question.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Free-text user question.
    pub question: String,
}

/// Response payload for /ask_question.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// Which stage produced the answer.
    pub source: SelectionSource,
    /// Best cosine score; absent for keyword overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl From<Selection> for AskResponse {
    fn from(s: Selection) -> Self {
        Self {
            answer: s.text,
            source: s.source,
            score: s.score,
        }
    }
}
