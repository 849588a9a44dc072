use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::estimate::pipeline::{self, EstimateRequest};
use crate::models::estimate::EstimateResult;
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EstimateRequestBody {
    pub profile: Profile,
    /// Optional extra query text appended to the profile-derived query.
    #[serde(default)]
    pub query_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub request_id: Uuid,
    pub retrieval_backend: &'static str,
    pub estimate: EstimateResult,
}

/// POST /api/v1/estimate
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(body): Json<EstimateRequestBody>,
) -> Result<Json<EstimateResponse>, AppError> {
    if body.profile.years_experience < 0.0 || !body.profile.years_experience.is_finite() {
        return Err(AppError::Validation(
            "years_experience must be a non-negative number".to_string(),
        ));
    }

    let req = EstimateRequest::new(body.profile, body.query_text);
    let estimate = pipeline::run(
        &req,
        state.retriever.as_ref(),
        state.narrator.as_ref(),
        &state.params,
    )
    .await?;

    Ok(Json(EstimateResponse {
        request_id: req.request_id,
        retrieval_backend: state.retriever.backend_name(),
        estimate,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SimilarRolesQuery {
    pub title: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct SimilarRole {
    pub title: String,
    pub industry: String,
    pub salary_millions: f64,
}

/// GET /api/v1/roles/similar
/// Looks up roles similar to a title, deduplicated and excluding the title
/// itself.
pub async fn handle_similar_roles(
    State(state): State<AppState>,
    Query(params): Query<SimilarRolesQuery>,
) -> Result<Json<Vec<SimilarRole>>, AppError> {
    if params.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    let limit = params.limit.clamp(1, 20);

    let query = match &params.industry {
        Some(industry) => format!("{} {}", params.title, industry),
        None => params.title.clone(),
    };

    // Over-fetch so dedup and self-exclusion still fill the limit.
    let candidates = state.retriever.search(&query, limit * 2).await?;

    let mut seen_titles: Vec<String> = Vec::new();
    let mut roles = Vec::new();
    for m in candidates {
        let title = m.record.job_title;
        if title.eq_ignore_ascii_case(&params.title) || seen_titles.contains(&title) {
            continue;
        }
        seen_titles.push(title.clone());
        roles.push(SimilarRole {
            title,
            industry: m.record.industry,
            salary_millions: m.record.monthly_salary_idr_millions,
        });
        if roles.len() >= limit {
            break;
        }
    }

    Ok(Json(roles))
}
