//! Instruction/response pairs kept as two aligned sequences.

use serde::{Deserialize, Serialize};

/// One line of the corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Example question.
    pub instruction: String,
    /// Canned answer for that question.
    pub response: String,
}

/// Ordered corpus. `instructions()[i]` pairs with `responses()[i]`.
///
/// Both halves are only ever extended together, so their lengths match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    instructions: Vec<String>,
    responses: Vec<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.instructions.push(record.instruction);
        self.responses.push(record.response);
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn response(&self, index: usize) -> Option<&str> {
        self.responses.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromIterator<Record> for Corpus {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for record in iter {
            corpus.push(record);
        }
        corpus
    }
}
