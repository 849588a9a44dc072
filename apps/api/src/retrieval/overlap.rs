//! Jaccard word-overlap retriever — the simpler similarity backend.
//!
//! Scores each record by |query ∩ doc| / |query ∪ doc| over tokenized
//! searchable texts. Cheaper to reason about than TF-IDF and useful as a
//! baseline; selected with `RETRIEVAL_BACKEND=overlap`.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::corpus::SalaryCorpus;
use crate::errors::AppError;
use crate::models::estimate::CandidateMatch;
use crate::models::record::SalaryRecord;
use crate::retrieval::{tokenize, Retriever};

pub struct OverlapRetriever {
    records: Vec<SalaryRecord>,
    doc_tokens: Vec<HashSet<String>>,
}

impl OverlapRetriever {
    pub fn new(corpus: &SalaryCorpus) -> Self {
        let records = corpus.records().to_vec();
        let doc_tokens = records
            .iter()
            .map(|r| tokenize(&r.searchable_text()).into_iter().collect())
            .collect();
        Self {
            records,
            doc_tokens,
        }
    }
}

#[async_trait]
impl Retriever for OverlapRetriever {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<CandidateMatch>, AppError> {
        let query_tokens: HashSet<String> = tokenize(query).into_iter().collect();
        if query_tokens.is_empty() || self.records.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<CandidateMatch> = self
            .doc_tokens
            .iter()
            .zip(&self.records)
            .filter_map(|(doc, record)| {
                let score = jaccard(&query_tokens, doc);
                (score > 0.0).then(|| CandidateMatch {
                    record: record.clone(),
                    similarity: score,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    fn backend_name(&self) -> &'static str {
        "overlap"
    }
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f32 / union as f32
}
