//! TF-IDF similarity index over the salary corpus.
//!
//! Builds term-frequency/inverse-document-frequency vectors for every
//! record's searchable text at construction; queries are scored by cosine
//! similarity. Vectors are l2-normalized up front so scoring is a dot
//! product.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::corpus::SalaryCorpus;
use crate::errors::AppError;
use crate::models::estimate::CandidateMatch;
use crate::models::record::SalaryRecord;
use crate::retrieval::{tokenize, Retriever};

pub struct TfIdfRetriever {
    records: Vec<SalaryRecord>,
    /// Smoothed inverse document frequency per vocabulary term.
    idf: HashMap<String, f32>,
    /// One l2-normalized tf-idf vector per record, sparse over the vocab.
    doc_vectors: Vec<HashMap<String, f32>>,
}

impl TfIdfRetriever {
    pub fn new(corpus: &SalaryCorpus) -> Self {
        let records = corpus.records().to_vec();
        let doc_tokens: Vec<Vec<String>> = records
            .iter()
            .map(|r| tokenize(&r.searchable_text()))
            .collect();

        // Document frequency per term.
        let mut df: HashMap<String, usize> = HashMap::new();
        for tokens in &doc_tokens {
            let mut seen: Vec<&String> = tokens.iter().collect();
            seen.sort();
            seen.dedup();
            for term in seen {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1, always positive.
        let n = doc_tokens.len() as f32;
        let idf: HashMap<String, f32> = df
            .into_iter()
            .map(|(term, count)| {
                let weight = ((1.0 + n) / (1.0 + count as f32)).ln() + 1.0;
                (term, weight)
            })
            .collect();

        let doc_vectors = doc_tokens
            .iter()
            .map(|tokens| weighted_vector(tokens, &idf))
            .collect();

        Self {
            records,
            idf,
            doc_vectors,
        }
    }
}

#[async_trait]
impl Retriever for TfIdfRetriever {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<CandidateMatch>, AppError> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.records.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = weighted_vector(&query_tokens, &self.idf);
        if query_vector.is_empty() {
            // No query term appears in the corpus vocabulary.
            return Ok(Vec::new());
        }

        let mut scored: Vec<CandidateMatch> = self
            .doc_vectors
            .iter()
            .zip(&self.records)
            .filter_map(|(doc_vector, record)| {
                let score = dot(&query_vector, doc_vector);
                (score > 0.0).then(|| CandidateMatch {
                    record: record.clone(),
                    similarity: score.clamp(0.0, 1.0),
                })
            })
            .collect();

        // Stable sort keeps corpus insertion order for tied scores.
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    fn backend_name(&self) -> &'static str {
        "tfidf"
    }
}

/// tf-idf weights for one token list, l2-normalized. Tokens outside the
/// vocabulary contribute nothing.
fn weighted_vector(tokens: &[String], idf: &HashMap<String, f32>) -> HashMap<String, f32> {
    let mut counts: HashMap<&String, f32> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }

    let mut vector: HashMap<String, f32> = counts
        .into_iter()
        .filter_map(|(term, count)| idf.get(term).map(|w| (term.clone(), count * w)))
        .collect();

    let norm = vector.values().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for value in vector.values_mut() {
            *value /= norm;
        }
    }
    vector
}

fn dot(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    // Iterate the smaller side.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, v)| large.get(term).map(|w| v * w))
        .sum()
}
