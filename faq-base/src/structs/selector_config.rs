//! Configuration layer: selector thresholds, keyword overrides and canned
//! messages, with defaults and environment overrides.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::faq_base_error::FaqBaseError;

/// Marker some generators leave in their output at the end of a document.
pub const END_OF_TEXT_MARKER: &str = "<|endoftext|>";

/// One keyword override: if `trigger` occurs in the lower-cased query,
/// `response` is returned as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOverride {
    pub trigger: String,
    pub response: String,
}

impl KeywordOverride {
    pub fn new(trigger: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            response: response.into(),
        }
    }
}

/// The six built-in overrides, in declaration order.
pub fn default_keyword_overrides() -> Vec<KeywordOverride> {
    vec![
        KeywordOverride::new(
            "password",
            "A strong password has at least 12 characters and mixes upper-case letters, \
             lower-case letters, digits and symbols.",
        ),
        KeywordOverride::new(
            "security",
            "To stay secure, turn on two-factor authentication and use a password manager.",
        ),
        KeywordOverride::new(
            "cybersecurity",
            "Cybersecurity is the protection of systems, networks and programs against \
             cyberattacks.",
        ),
        KeywordOverride::new(
            "cloud",
            "The cloud lets you store data and use online services at any time, from anywhere.",
        ),
        KeywordOverride::new(
            "spreadsheet",
            "To save a spreadsheet, use the 'File > Save As' command.",
        ),
        KeywordOverride::new(
            "vpn",
            "A VPN (Virtual Private Network) secures your connection by encrypting your data \
             and hiding your IP address.",
        ),
    ]
}

/// Knobs of the response selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Minimum cosine similarity for a corpus answer (0.0..=1.0).
    pub similarity_threshold: f32,
    /// Token cap for the generator.
    pub max_generated_tokens: u32,
    /// Generated text with fewer whitespace-separated words is rejected.
    pub min_accepted_words: usize,
    /// Keyword overrides, checked before anything else.
    pub keyword_overrides: Vec<KeywordOverride>,
    /// Generated text containing this marker is rejected.
    pub end_of_text_marker: String,
    /// Shown when generated text fails the quality gate.
    pub rephrase_message: String,
    /// Shown when the generator is unreachable or broken.
    pub unavailable_message: String,
    /// Shown when the generator refuses the prompt.
    pub invalid_input_message: String,
}

const CANNOT_ANSWER: &str = "I can't answer this question right now. Try another question.";

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            max_generated_tokens: 30,
            min_accepted_words: 5,
            keyword_overrides: default_keyword_overrides(),
            end_of_text_marker: END_OF_TEXT_MARKER.to_string(),
            rephrase_message: "I'm not sure I understand your question, try rephrasing it."
                .to_string(),
            unavailable_message: CANNOT_ANSWER.to_string(),
            invalid_input_message: CANNOT_ANSWER.to_string(),
        }
    }
}

impl SelectorConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Environment variables used:
    /// - `FAQ_SIMILARITY_THRESHOLD` (default: 0.6)
    /// - `FAQ_MAX_GENERATED_TOKENS` (default: 30)
    /// - `FAQ_MIN_ACCEPTED_WORDS` (default: 5)
    /// - `FAQ_KEYWORDS_PATH` (optional JSON array of `{ "trigger", "response" }`
    ///   replacing the built-in overrides)
    pub fn from_env() -> Result<Self, FaqBaseError> {
        let mut cfg = Self::default();

        if let Some(v) = read_env::<f32>("FAQ_SIMILARITY_THRESHOLD")? {
            cfg.similarity_threshold = v;
        }
        if let Some(v) = read_env::<u32>("FAQ_MAX_GENERATED_TOKENS")? {
            cfg.max_generated_tokens = v;
        }
        if let Some(v) = read_env::<usize>("FAQ_MIN_ACCEPTED_WORDS")? {
            cfg.min_accepted_words = v;
        }
        if let Some(path) = std::env::var("FAQ_KEYWORDS_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            cfg.keyword_overrides = read_keyword_file(Path::new(path.trim()))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Basic range checks.
    pub fn validate(&self) -> Result<(), FaqBaseError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(FaqBaseError::InvalidConfig(
                "FAQ_SIMILARITY_THRESHOLD must be within 0.0..=1.0".into(),
            ));
        }
        if self.max_generated_tokens == 0 {
            return Err(FaqBaseError::InvalidConfig(
                "FAQ_MAX_GENERATED_TOKENS must be > 0".into(),
            ));
        }
        if self
            .keyword_overrides
            .iter()
            .any(|k| k.trigger.trim().is_empty())
        {
            return Err(FaqBaseError::InvalidConfig(
                "keyword triggers must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Read a JSON array of keyword overrides.
pub fn read_keyword_file(path: &Path) -> Result<Vec<KeywordOverride>, FaqBaseError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read an optional value from env; unset or empty is `Ok(None)`.
fn read_env<T: FromStr>(key: &str) -> Result<Option<T>, FaqBaseError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            v.trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| FaqBaseError::EnvParse {
                    key: key.into(),
                    value: v,
                })
        }
        _ => Ok(None),
    }
}
