mod config;
mod corpus;
mod errors;
mod estimate;
mod llm_client;
mod models;
mod narrative;
mod retrieval;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::SalaryCorpus;
use crate::estimate::estimator::EstimatorParams;
use crate::llm_client::LlmClient;
use crate::narrative::LlmNarrator;
use crate::retrieval::build_retriever;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Crate name with hyphens does not match the tracing target.
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gaji API v{}", env!("CARGO_PKG_VERSION"));

    // Load the salary guide
    let corpus = Arc::new(SalaryCorpus::load(&config.salary_guide_path)?);
    info!("Salary corpus loaded ({} records)", corpus.len());

    // Build the similarity backend chosen in config
    let retriever = build_retriever(config.retrieval_backend, &corpus);
    info!("Retriever initialized (backend: {})", retriever.backend_name());

    // Initialize LLM client and narrator
    let llm = LlmClient::new(
        config.openrouter_api_key.clone(),
        config.openrouter_base_url.clone(),
        config.llm_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());
    let narrator = Arc::new(LlmNarrator::new(llm));

    // Build app state
    let state = AppState {
        config: config.clone(),
        corpus,
        retriever,
        narrator,
        params: EstimatorParams::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
