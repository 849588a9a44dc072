//! Narrative — pluggable, trait-based generator of the natural-language
//! explanation attached to an estimate.
//!
//! Default: `LlmNarrator` via the OpenRouter client. The pipeline treats any
//! failure here as non-fatal: the numeric estimate is always returned.

pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::estimate::EstimateResult;
use crate::models::profile::Profile;

/// Structured analysis returned by the narrative service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeAnalysis {
    pub explanation: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub market_insights: Option<String>,
}

/// The narrator trait. Carried in `AppState` as `Arc<dyn Narrator>` so tests
/// can swap in a failing or canned implementation.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(
        &self,
        profile: &Profile,
        estimate: &EstimateResult,
    ) -> Result<NarrativeAnalysis, AppError>;
}

/// LLM-backed narrator.
pub struct LlmNarrator {
    llm: LlmClient,
}

impl LlmNarrator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Narrator for LlmNarrator {
    async fn narrate(
        &self,
        profile: &Profile,
        estimate: &EstimateResult,
    ) -> Result<NarrativeAnalysis, AppError> {
        let prompt = prompts::build_narrative_prompt(profile, estimate);
        self.llm
            .call_json::<NarrativeAnalysis>(&prompt, prompts::NARRATIVE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("narrative generation failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_deserializes_with_missing_optional_fields() {
        let json = r#"{"explanation": "Solid mid-level profile."}"#;
        let analysis: NarrativeAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.explanation, "Solid mid-level profile.");
        assert!(analysis.recommendations.is_empty());
        assert!(analysis.market_insights.is_none());
    }

    #[test]
    fn test_analysis_deserializes_full() {
        let json = r#"{
            "explanation": "Strong match against development roles.",
            "recommendations": ["Learn Kubernetes", "Mentor juniors"],
            "market_insights": "Demand for full-stack roles remains high."
        }"#;
        let analysis: NarrativeAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.recommendations.len(), 2);
        assert!(analysis.market_insights.is_some());
    }
}
