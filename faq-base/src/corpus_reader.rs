//! Async JSONL reader for the FAQ corpus.
//!
//! Each non-blank line is one JSON object with string fields `instruction`
//! and `response`; other fields are ignored. Unlike a best-effort ingest, the
//! corpus is all-or-nothing: the first malformed line aborts the load.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::errors::faq_base_error::FaqBaseError;
use crate::structs::corpus::{Corpus, Record};

/// Read the corpus file at `path`, preserving record order.
///
/// # Errors
/// - [`FaqBaseError::CorpusNotFound`] if the file does not exist
/// - [`FaqBaseError::CorpusParse`] with the 1-based line number of the first
///   line that is not valid JSON or lacks a field
/// - [`FaqBaseError::CorpusEncoding`] with the line number of a line that is
///   not valid UTF-8
/// - [`FaqBaseError::Io`] on other I/O errors
///
/// # Example
/// ```no_run
/// # use faq_base::corpus_reader::load_corpus;
/// # async fn demo() -> Result<(), faq_base::FaqBaseError> {
/// let corpus = load_corpus("faq.jsonl").await?;
/// println!("{} records", corpus.len());
/// # Ok(()) }
/// ```
pub async fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus, FaqBaseError> {
    let path = path.as_ref();
    let file = File::open(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => FaqBaseError::CorpusNotFound {
            path: path.to_path_buf(),
        },
        _ => FaqBaseError::Io(e),
    })?;

    let mut lines = BufReader::new(file).lines();
    let mut corpus = Corpus::new();
    let mut line_no = 0usize;

    loop {
        line_no += 1;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(FaqBaseError::CorpusEncoding {
                    line: line_no,
                    source: e,
                });
            }
            Err(e) => return Err(FaqBaseError::Io(e)),
        };
        if let Some(record) = parse_corpus_line(&line, line_no)? {
            corpus.push(record);
        }
    }

    info!(
        target: "faq_base::corpus",
        path = %path.display(),
        records = corpus.len(),
        "corpus loaded"
    );
    Ok(corpus)
}

/// Parse one corpus line. Blank lines yield `Ok(None)`.
pub fn parse_corpus_line(line: &str, line_no: usize) -> Result<Option<Record>, FaqBaseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        debug!(target: "faq_base::corpus", line = line_no, "skipping blank line");
        return Ok(None);
    }
    serde_json::from_str::<Record>(trimmed)
        .map(Some)
        .map_err(|source| FaqBaseError::CorpusParse {
            line: line_no,
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn corpus_file(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[tokio::test]
    async fn loads_records_in_order_and_skips_blank_lines() {
        let f = corpus_file(concat!(
            r#"{"instruction": "How do I save an Excel file?", "response": "Use File > Save As."}"#,
            "\n\n",
            r#"{"instruction": "How do I print?", "response": "Press Ctrl+P.", "lang": "en"}"#,
            "\n",
        ));

        let corpus = load_corpus(f.path()).await.unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.instructions().len(), corpus.responses().len());
        assert_eq!(corpus.instructions()[0], "How do I save an Excel file?");
        assert_eq!(corpus.responses()[1], "Press Ctrl+P.");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_corpus(dir.path().join("nope.jsonl")).await.unwrap_err();
        assert!(matches!(err, FaqBaseError::CorpusNotFound { .. }));
    }

    #[tokio::test]
    async fn malformed_line_aborts_with_line_number() {
        let f = corpus_file(concat!(
            r#"{"instruction": "a", "response": "b"}"#,
            "\n",
            "not json\n",
            r#"{"instruction": "c", "response": "d"}"#,
            "\n",
        ));
        let err = load_corpus(f.path()).await.unwrap_err();
        assert!(matches!(err, FaqBaseError::CorpusParse { line: 2, .. }));
    }

    #[tokio::test]
    async fn invalid_utf8_line_reports_its_line_number() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{"instruction": "a", "response": "b"}"#).unwrap();
        f.write_all(b"\n").unwrap();
        f.write_all(b"{\"instruction\": \"caf\xE9\", \"response\": \"d\"}\n")
            .unwrap();

        let err = load_corpus(f.path()).await.unwrap_err();
        assert!(matches!(err, FaqBaseError::CorpusEncoding { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn line_without_response_is_a_parse_error() {
        let err = parse_corpus_line(r#"{"instruction": "only half"}"#, 7).unwrap_err();
        match err {
            FaqBaseError::CorpusParse { line, source } => {
                assert_eq!(line, 7);
                assert!(source.to_string().contains("response"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
