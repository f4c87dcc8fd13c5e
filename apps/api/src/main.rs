mod assessment;
mod banks;
mod communication;
mod config;
mod embedding;
mod errors;
mod inference;
mod models;
mod outcome;
mod routes;
mod state;
mod technical;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::banks::{CommunicationBank, TechnicalBank};
use crate::communication::CommunicationScorer;
use crate::config::Config;
use crate::embedding::{Embedder, HttpEmbedder, UnconfiguredEmbedder};
use crate::models::LevelTag;
use crate::routes::build_router;
use crate::state::AppState;
use crate::technical::{ComplexityPredictor, TechnicalEvaluator};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting assessor v{}", env!("CARGO_PKG_VERSION"));

    // Question banks
    let communication_bank = CommunicationBank::load(&config.communication_bank_path)
        .with_context(|| {
            format!(
                "loading communication bank from {}",
                config.communication_bank_path.display()
            )
        })?;
    let technical_bank = TechnicalBank::load(&config.technical_bank_path).with_context(|| {
        format!(
            "loading technical bank from {}",
            config.technical_bank_path.display()
        )
    })?;

    info!(
        "Communication bank: {} questions (basic {}, medium {}, hard {})",
        communication_bank.len(),
        communication_bank.count_for(LevelTag::Basic),
        communication_bank.count_for(LevelTag::Medium),
        communication_bank.count_for(LevelTag::Hard)
    );
    if communication_bank.is_empty() {
        warn!("Communication bank is empty; every communication question will be null");
    }
    info!(
        "Technical bank: {} questions across {} skills",
        technical_bank.len(),
        technical_bank.skills().len()
    );
    if technical_bank.is_empty() {
        warn!("Technical bank is empty; every technical question will be null");
    }

    // Communication scoring bundle
    let communication_scorer = CommunicationScorer::load(&config.communication_model_path)
        .with_context(|| {
            format!(
                "loading communication model from {}",
                config.communication_model_path.display()
            )
        })?;
    info!(
        "Communication model loaded (axes: {})",
        communication_scorer.axes().collect::<Vec<_>>().join(", ")
    );

    // Complexity predictor (optional artifact)
    let predictor = match &config.complexity_model_path {
        Some(path) => ComplexityPredictor::load(path)
            .with_context(|| format!("loading complexity model from {}", path.display()))?,
        None => {
            warn!("COMPLEXITY_MODEL_PATH not set; next complexity will use the fallback rule");
            ComplexityPredictor::fallback_only()
        }
    };

    // Embedding backend
    let embedder: Arc<dyn Embedder> = match &config.embedding_url {
        Some(url) => {
            let embedder = HttpEmbedder::new(
                url,
                config.embedding_model.clone(),
                Duration::from_secs(config.embedding_timeout_secs),
            )
            .context("building embedding client")?;
            info!("Embedding backend: {url} (model: {})", config.embedding_model);
            Arc::new(embedder)
        }
        None => {
            warn!("EMBEDDING_URL not set; semantic similarity will degrade to 0.0");
            Arc::new(UnconfiguredEmbedder)
        }
    };

    let state = AppState {
        communication_scorer: Arc::new(communication_scorer),
        communication_bank: Arc::new(communication_bank),
        technical_bank: Arc::new(technical_bank),
        technical_evaluator: Arc::new(TechnicalEvaluator::new(embedder, predictor)),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(errors::panic_response))
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
