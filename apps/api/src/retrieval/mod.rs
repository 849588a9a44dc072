//! Retrieval — pluggable, trait-based lookup of salary records by free text.
//!
//! The backend is an explicit configuration choice made once at startup
//! (`RETRIEVAL_BACKEND`), not a runtime fallback chain. `AppState` holds an
//! `Arc<dyn Retriever>`, so handlers and the pipeline never know which
//! variant is behind it.

pub mod overlap;
pub mod tfidf;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::corpus::SalaryCorpus;
use crate::errors::AppError;
use crate::models::estimate::CandidateMatch;

/// Which similarity backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalBackend {
    /// TF-IDF cosine similarity (default).
    TfIdf,
    /// Jaccard word-overlap similarity.
    Overlap,
}

impl FromStr for RetrievalBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(RetrievalBackend::TfIdf),
            "overlap" | "jaccard" => Ok(RetrievalBackend::Overlap),
            other => Err(format!(
                "unknown retrieval backend '{other}' (expected 'tfidf' or 'overlap')"
            )),
        }
    }
}

/// The retrieval trait. Implement this to swap similarity backends without
/// touching the pipeline, handlers, or estimator.
///
/// Contract: results are ordered by descending similarity, every score is in
/// [0, 1], ties keep corpus insertion order, and zero term overlap yields an
/// empty list rather than an error.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<CandidateMatch>, AppError>;

    /// Short backend label surfaced in responses for transparency.
    fn backend_name(&self) -> &'static str;
}

/// Constructs the configured backend over the loaded corpus.
pub fn build_retriever(backend: RetrievalBackend, corpus: &SalaryCorpus) -> Arc<dyn Retriever> {
    match backend {
        RetrievalBackend::TfIdf => Arc::new(tfidf::TfIdfRetriever::new(corpus)),
        RetrievalBackend::Overlap => Arc::new(overlap::OverlapRetriever::new(corpus)),
    }
}

/// English stop words stripped from both documents and queries.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "the", "to", "with",
];

/// Shared tokenizer: case-folds, splits on non-alphanumeric boundaries, and
/// drops stop words and single characters.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1 && !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}
