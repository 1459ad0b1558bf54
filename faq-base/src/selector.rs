//! Response selection: keyword override → lexical match → generative fallback.
//!
//! [`ResponseSelector::select`] never fails. Every failure path ends in a
//! fixed message from [`SelectorConfig`].

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::generator::{GenerationError, GenerationRequest, TextGenerator};
use crate::keywords::KeywordTable;
use crate::lexical_index::LexicalIndex;
use crate::structs::corpus::Corpus;
use crate::structs::selection::{Selection, SelectionSource};
use crate::structs::selector_config::SelectorConfig;

/// Owns the read-only corpus state and the injected generator.
pub struct ResponseSelector {
    corpus: Corpus,
    index: LexicalIndex,
    keywords: KeywordTable,
    generator: Arc<dyn TextGenerator>,
    cfg: SelectorConfig,
}

impl ResponseSelector {
    /// Builds the lexical index and keyword table once.
    pub fn new(corpus: Corpus, cfg: SelectorConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let index = LexicalIndex::build(corpus.instructions());
        let keywords = KeywordTable::new(cfg.keyword_overrides.iter().cloned());

        info!(
            target: "faq_base::selector",
            records = corpus.len(),
            vocabulary = index.vocabulary_len(),
            keywords = keywords.len(),
            threshold = cfg.similarity_threshold,
            "response selector ready"
        );

        Self {
            corpus,
            index,
            keywords,
            generator,
            cfg,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.cfg
    }

    /// Just the answer text.
    pub async fn respond(&self, query: &str) -> String {
        self.select(query).await.text
    }

    /// Picks exactly one answer for `query`.
    #[instrument(target = "faq_base::selector", skip_all, fields(query_chars = query.chars().count()))]
    pub async fn select(&self, query: &str) -> Selection {
        if let Some(hit) = self.keywords.lookup(query) {
            debug!(target: "faq_base::selector", trigger = %hit.trigger, "keyword override");
            return Selection {
                text: hit.response.clone(),
                source: SelectionSource::Keyword,
                score: None,
            };
        }

        let query_vec = self.index.project(query);
        let (best, score) = self.index.best_match(&query_vec).unwrap_or((0, 0.0));

        if score >= self.cfg.similarity_threshold {
            if let Some(response) = self.corpus.response(best) {
                debug!(target: "faq_base::selector", best, score, "corpus match");
                return Selection {
                    text: response.to_string(),
                    source: SelectionSource::Corpus,
                    score: Some(score),
                };
            }
        }

        debug!(
            target: "faq_base::selector",
            score,
            threshold = self.cfg.similarity_threshold,
            "weak match, falling back to generator"
        );
        self.generate_fallback(query, score).await
    }

    async fn generate_fallback(&self, query: &str, score: f32) -> Selection {
        let request = GenerationRequest {
            prompt: query,
            max_tokens: self.cfg.max_generated_tokens,
            truncate: true,
        };

        let (text, source) = match self.generator.generate(request).await {
            Ok(raw) => {
                let text = raw.trim();
                match screen_generated(text, &self.cfg) {
                    None => (text.to_string(), SelectionSource::Generated),
                    Some(reason) => {
                        info!(target: "faq_base::selector", ?reason, "generated text rejected");
                        (self.cfg.rephrase_message.clone(), SelectionSource::Rephrase)
                    }
                }
            }
            Err(err @ GenerationError::InvalidInput(_)) => {
                warn!(target: "faq_base::selector", error = %err, "generator refused the prompt");
                (
                    self.cfg.invalid_input_message.clone(),
                    SelectionSource::Unavailable,
                )
            }
            Err(err @ GenerationError::Unavailable(_)) => {
                warn!(target: "faq_base::selector", error = %err, "generator unavailable");
                (
                    self.cfg.unavailable_message.clone(),
                    SelectionSource::Unavailable,
                )
            }
        };

        Selection {
            text,
            source,
            score: Some(score),
        }
    }
}

/// Why generated text was not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooFewWords(usize),
    NonAscii,
    EndOfTextMarker,
}

/// Quality gate for (already trimmed) generated text. `None` means accept.
pub fn screen_generated(text: &str, cfg: &SelectorConfig) -> Option<Rejection> {
    let words = text.split_whitespace().count();
    if words < cfg.min_accepted_words {
        return Some(Rejection::TooFewWords(words));
    }
    if !text.is_ascii() {
        return Some(Rejection::NonAscii);
    }
    if !cfg.end_of_text_marker.is_empty() && text.contains(&cfg.end_of_text_marker) {
        return Some(Rejection::EndOfTextMarker);
    }
    None
}
