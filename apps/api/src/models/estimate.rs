//! Output data models for retrieval and estimation, shared across backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::record::SalaryRecord;

/// A salary record paired with its similarity score against the query.
/// Produced transiently per request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub record: SalaryRecord,
    /// Cosine or overlap similarity in [0, 1]; higher is better.
    pub similarity: f32,
}

/// Multiplicative adjustment factors derived from one profile.
/// All values are fixed positive constants from the factor tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MultiplierSet {
    pub experience: f64,
    pub education: f64,
    pub location: f64,
}

impl MultiplierSet {
    pub fn product(&self) -> f64 {
        self.experience * self.education * self.location
    }
}

/// Final estimation result. Computed once per request and returned to the
/// caller; there is no durable storage for estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Monthly figures in millions of IDR; min <= avg <= max, all positive.
    pub estimated_min_millions: f64,
    pub estimated_avg_millions: f64,
    pub estimated_max_millions: f64,
    /// Retrieval-quality heuristic in [0, 1] — not a statistical interval.
    pub confidence: f32,
    pub best_match_title: Option<String>,
    pub multipliers: MultiplierSet,
    /// Ranked candidates the estimate was computed from, best first.
    pub matched: Vec<CandidateMatch>,
    /// LLM-generated explanation; `None` when the narrative service failed.
    pub narrative: Option<String>,
    pub recommendations: Vec<String>,
    pub estimated_at: DateTime<Utc>,
}
