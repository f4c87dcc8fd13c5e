use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub communication_model: &'static str,
    /// `fallback_only` when no complexity model was configured.
    pub technical_model: &'static str,
    pub question_bank_size: usize,
    pub communication_bank_size: usize,
    pub embedding_model: String,
}

/// GET /health
/// Reports which artifacts are loaded and how many questions each bank holds.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let technical_model = if state.technical_evaluator.has_complexity_model() {
        "loaded"
    } else {
        "fallback_only"
    };

    Json(HealthResponse {
        status: "healthy",
        communication_model: "loaded",
        technical_model,
        question_bank_size: state.technical_bank.len(),
        communication_bank_size: state.communication_bank.len(),
        embedding_model: state.technical_evaluator.embedding_model().to_string(),
    })
}
