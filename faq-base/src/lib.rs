//! Public API:
//! - `load_selector`: read the JSONL corpus, build the TF-IDF index and keyword table.
//! - `ResponseSelector::select`: keyword override, lexical match, generative fallback.

pub mod corpus_reader;
pub mod errors;
pub mod generator;
pub mod keywords;
pub mod lexical_index;
pub mod selector;
pub mod structs;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

pub use errors::faq_base_error::FaqBaseError;
pub use generator::{GenerationError, GenerationRequest, TextGenerator};
pub use selector::ResponseSelector;
pub use structs::corpus::{Corpus, Record};
pub use structs::selection::{Selection, SelectionSource};
pub use structs::selector_config::{KeywordOverride, SelectorConfig};

/// Load the corpus at `corpus_path` and build a selector around `generator`.
///
/// # Errors
/// Any corpus load error; see [`corpus_reader::load_corpus`].
pub async fn load_selector(
    corpus_path: impl AsRef<Path>,
    cfg: SelectorConfig,
    generator: Arc<dyn TextGenerator>,
) -> Result<ResponseSelector, FaqBaseError> {
    let started = Instant::now();
    let corpus = corpus_reader::load_corpus(corpus_path).await?;
    let selector = ResponseSelector::new(corpus, cfg, generator);

    info!(
        target: "faq_base::index",
        records = selector.corpus().len(),
        duration_ms = started.elapsed().as_millis(),
        "load_selector: finished"
    );
    Ok(selector)
}
