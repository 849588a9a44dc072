//! The estimation pipeline: retrieve → estimate → narrate.
//!
//! State flows through an explicit request-scoped context object instead of
//! anything global. The narrative step is best-effort: its failure is logged
//! and the numeric estimate is returned unchanged.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::estimate::estimator::{self, EstimatorParams};
use crate::models::estimate::EstimateResult;
use crate::models::profile::Profile;
use crate::narrative::Narrator;
use crate::retrieval::Retriever;

/// Request-scoped context. Created once per estimation request, read-only
/// while the pipeline runs.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub request_id: Uuid,
    pub profile: Profile,
    /// Retrieval query text built from the profile.
    pub query: String,
    pub received_at: DateTime<Utc>,
}

impl EstimateRequest {
    pub fn new(profile: Profile, extra_query: Option<String>) -> Self {
        let query = build_query(&profile, extra_query.as_deref());
        Self {
            request_id: Uuid::new_v4(),
            profile,
            query,
            received_at: Utc::now(),
        }
    }
}

/// How many skills feed the retrieval query.
const MAX_QUERY_SKILLS: usize = 5;

/// Builds the retrieval query: current title, industry, leading skills, the
/// experience band label, and any caller-supplied query text.
fn build_query(profile: &Profile, extra: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(title) = &profile.current_title {
        parts.push(title.clone());
    }
    parts.push(profile.detected_industry.clone());
    parts.extend(profile.skills.iter().take(MAX_QUERY_SKILLS).cloned());
    parts.push(format!("{} level", profile.experience_level().label()));
    if let Some(extra) = extra {
        parts.push(extra.to_string());
    }
    parts.retain(|p| !p.trim().is_empty());
    parts.join(" ")
}

const MAX_RECOMMENDATIONS: usize = 5;

/// Runs the full pipeline for one request.
pub async fn run(
    req: &EstimateRequest,
    retriever: &dyn Retriever,
    narrator: &dyn Narrator,
    params: &EstimatorParams,
) -> Result<EstimateResult, AppError> {
    let candidates = retriever.search(&req.query, params.top_k).await?;
    info!(
        request_id = %req.request_id,
        backend = retriever.backend_name(),
        candidates = candidates.len(),
        "retrieval complete"
    );

    let mut result = estimator::estimate(&req.profile, &candidates, params)?;

    // Best-effort narrative: a failure here must never block the estimate.
    match narrator.narrate(&req.profile, &result).await {
        Ok(analysis) => {
            result.narrative = Some(analysis.explanation);
            if !analysis.recommendations.is_empty() {
                let mut merged = analysis.recommendations;
                merged.extend(result.recommendations.drain(..));
                merged.truncate(MAX_RECOMMENDATIONS);
                result.recommendations = merged;
            }
        }
        Err(e) => {
            warn!(
                request_id = %req.request_id,
                "narrative generation failed, returning numeric estimate only: {e}"
            );
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::corpus::SalaryCorpus;
    use crate::models::profile::EducationLevel;
    use crate::narrative::NarrativeAnalysis;
    use crate::retrieval::{build_retriever, RetrievalBackend};

    struct FailingNarrator;

    #[async_trait]
    impl Narrator for FailingNarrator {
        async fn narrate(
            &self,
            _profile: &Profile,
            _estimate: &EstimateResult,
        ) -> Result<NarrativeAnalysis, AppError> {
            // Simulates a timed-out external service.
            Err(AppError::Llm("request timed out".to_string()))
        }
    }

    struct CannedNarrator;

    #[async_trait]
    impl Narrator for CannedNarrator {
        async fn narrate(
            &self,
            _profile: &Profile,
            _estimate: &EstimateResult,
        ) -> Result<NarrativeAnalysis, AppError> {
            Ok(NarrativeAnalysis {
                explanation: "A solid match for development roles.".to_string(),
                recommendations: vec!["Deepen cloud skills".to_string()],
                market_insights: None,
            })
        }
    }

    fn profile() -> Profile {
        Profile {
            current_title: Some("Full-stack Developer".to_string()),
            years_experience: 5.0,
            education_level: EducationLevel::Bachelor,
            detected_industry: "Technology".to_string(),
            skills: vec!["rust".to_string(), "react".to_string()],
            location: Some("Jakarta".to_string()),
        }
    }

    #[tokio::test]
    async fn test_narrative_failure_does_not_block_estimate() {
        let retriever = build_retriever(RetrievalBackend::TfIdf, &SalaryCorpus::sample());
        let req = EstimateRequest::new(profile(), None);
        let params = EstimatorParams::default();

        let result = run(&req, retriever.as_ref(), &FailingNarrator, &params)
            .await
            .unwrap();

        assert!(result.narrative.is_none());
        assert!(result.estimated_avg_millions > 0.0);
        assert!(result.confidence > 0.0);
        assert_eq!(
            result.best_match_title.as_deref(),
            Some("Full-stack Developer")
        );
    }

    #[tokio::test]
    async fn test_successful_narrative_is_attached_and_recs_merged() {
        let retriever = build_retriever(RetrievalBackend::TfIdf, &SalaryCorpus::sample());
        let req = EstimateRequest::new(profile(), None);
        let params = EstimatorParams::default();

        let result = run(&req, retriever.as_ref(), &CannedNarrator, &params)
            .await
            .unwrap();

        assert_eq!(
            result.narrative.as_deref(),
            Some("A solid match for development roles.")
        );
        assert_eq!(result.recommendations[0], "Deepen cloud skills");
        assert!(result.recommendations.len() <= MAX_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_empty_corpus_signals_no_match() {
        let retriever = build_retriever(
            RetrievalBackend::TfIdf,
            &SalaryCorpus::from_records(vec![]),
        );
        let req = EstimateRequest::new(profile(), None);
        let params = EstimatorParams::default();

        let err = run(&req, retriever.as_ref(), &CannedNarrator, &params)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoMatch(_)));
    }

    #[test]
    fn test_query_built_from_profile() {
        let req = EstimateRequest::new(profile(), Some("backend".to_string()));
        assert!(req.query.contains("Full-stack Developer"));
        assert!(req.query.contains("Technology"));
        assert!(req.query.contains("rust"));
        assert!(req.query.contains("mid level"));
        assert!(req.query.contains("backend"));
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        let a = EstimateRequest::new(profile(), None);
        let b = EstimateRequest::new(profile(), None);
        assert_ne!(a.request_id, b.request_id);
    }
}
