//! TF-IDF vector space over the corpus instructions.
//!
//! Weighting follows the common vectorizer defaults:
//! - tokens are lower-cased runs of two or more word characters;
//! - term frequency is the raw count;
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1` (smoothed);
//! - every vector is L2-normalized.
//!
//! The vocabulary is fixed at build time. Terms never seen in the
//! instructions get no weight when a query is projected.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern compiles"));

/// Sparse vector as `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, w)| w == 0.0)
    }

    fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }
}

/// Cosine similarity of two sparse vectors; `0.0` if either is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }

    let (mut i, mut j, mut dot) = (0, 0, 0.0f32);
    while i < a.entries.len() && j < b.entries.len() {
        let (ta, wa) = a.entries[i];
        let (tb, wb) = b.entries[j];
        match ta.cmp(&tb) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += wa * wb;
                i += 1;
                j += 1;
            }
        }
    }
    dot / (na * nb)
}

/// Lower-cased tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted model plus the vectors of the instructions it was fitted on.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Fit the vocabulary and IDF weights on `instructions` and vectorize them.
    ///
    /// Deterministic: term indices follow the sorted vocabulary.
    pub fn build<S: AsRef<str>>(instructions: &[S]) -> Self {
        let docs: Vec<Vec<String>> = instructions
            .iter()
            .map(|s| tokenize(s.as_ref()))
            .collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &docs {
            let unique: BTreeSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_default() += 1;
            }
        }

        let n = docs.len() as f32;
        let mut vocabulary = HashMap::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());
        for (i, (term, count)) in df.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), i);
            idf.push(((1.0 + n) / (1.0 + count as f32)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            vectors: Vec::with_capacity(docs.len()),
        };
        let vectors: Vec<SparseVector> = docs.iter().map(|d| index.weigh(d)).collect();
        index.vectors = vectors;
        index
    }

    /// Map `text` into the fitted space.
    pub fn project(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    /// Cosine similarity of `query` against every instruction, in corpus order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f32> {
        self.vectors
            .iter()
            .map(|v| cosine_similarity(query, v))
            .collect()
    }

    /// Index and score of the most similar instruction.
    ///
    /// Ties go to the lowest index. `None` for an empty index.
    pub fn best_match(&self, query: &SparseVector) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, score) in self.similarities(query).into_iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((i, score)),
            }
        }
        best
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_default() += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        SparseVector { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn tokenizer_drops_single_chars_and_punctuation() {
        assert_eq!(
            tokenize("How do I save an Excel file?"),
            vec!["how", "do", "save", "an", "excel", "file"]
        );
    }

    #[test]
    fn identical_text_scores_one() {
        let index = LexicalIndex::build(&[
            "How do I save an Excel file?",
            "How do I reset my password?",
        ]);
        let q = index.project("how do I save an excel file");
        let (best, score) = index.best_match(&q).unwrap();
        assert_eq!(best, 0);
        assert!((score - 1.0).abs() < EPS, "score = {score}");
    }

    #[test]
    fn smoothed_idf_matches_reference_values() {
        // n = 2; "shared" in both docs, "alpha" in one.
        let index = LexicalIndex::build(&["shared alpha", "shared beta"]);
        let alpha = index.vocabulary["alpha"];
        let shared = index.vocabulary["shared"];
        assert!((index.idf[shared] - 1.0).abs() < EPS);
        assert!((index.idf[alpha] - ((3.0f32 / 2.0).ln() + 1.0)).abs() < EPS);
    }

    #[test]
    fn unknown_terms_project_to_zero() {
        let index = LexicalIndex::build(&["open the settings menu"]);
        let q = index.project("zzz qqq");
        assert!(q.is_zero());
        assert_eq!(index.best_match(&q), Some((0, 0.0)));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let index = LexicalIndex::build(&["reset router", "other words", "reset router"]);
        let q = index.project("reset router");
        let (best, score) = index.best_match(&q).unwrap();
        assert_eq!(best, 0);
        assert!((score - 1.0).abs() < EPS);
    }

    #[test]
    fn empty_index_has_no_match() {
        let index = LexicalIndex::build::<&str>(&[]);
        assert!(index.is_empty());
        assert_eq!(index.best_match(&index.project("anything")), None);
    }

    #[test]
    fn vocabulary_is_fixed_after_build() {
        let index = LexicalIndex::build(&["alpha beta"]);
        let _ = index.project("gamma delta alpha");
        assert_eq!(index.vocabulary_len(), 2);
    }

    #[test]
    fn cosine_of_partial_overlap_is_between_zero_and_one() {
        let index = LexicalIndex::build(&["install the printer driver", "change wallpaper"]);
        let q = index.project("printer driver");
        let sims = index.similarities(&q);
        assert!(sims[0] > 0.0 && sims[0] < 1.0);
        assert_eq!(sims[1], 0.0);
    }
}
