pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::estimate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Estimation API
        .route("/api/v1/estimate", post(handlers::handle_estimate))
        .route("/api/v1/roles/similar", get(handlers::handle_similar_roles))
        .with_state(state)
}
