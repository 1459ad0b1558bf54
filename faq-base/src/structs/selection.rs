use serde::Serialize;

/// Which branch of the selector produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// A keyword override fired.
    Keyword,
    /// The best corpus match cleared the similarity threshold.
    Corpus,
    /// The generator's text passed the quality gate.
    Generated,
    /// The generator's text was rejected; the rephrase message was used.
    Rephrase,
    /// The generator failed; the cannot-answer message was used.
    Unavailable,
}

/// Result of one selection. `text` is what the user sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub text: String,
    pub source: SelectionSource,
    /// Best cosine similarity, when the lexical step ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}
