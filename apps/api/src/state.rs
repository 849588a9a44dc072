use std::sync::Arc;

use crate::config::Config;
use crate::corpus::SalaryCorpus;
use crate::estimate::estimator::EstimatorParams;
use crate::narrative::Narrator;
use crate::retrieval::Retriever;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only salary guide, loaded once at startup.
    pub corpus: Arc<SalaryCorpus>,
    /// Pluggable similarity backend. Chosen via RETRIEVAL_BACKEND at startup.
    pub retriever: Arc<dyn Retriever>,
    /// Pluggable narrative generator. Default: LlmNarrator over OpenRouter.
    pub narrator: Arc<dyn Narrator>,
    /// Estimator tuning — tolerance band, confidence discount, clamp range.
    pub params: EstimatorParams,
}
