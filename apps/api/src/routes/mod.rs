pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::communication::handlers as communication;
use crate::state::AppState;
use crate::technical::handlers as technical;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/skills/list", get(technical::handle_skills_list))
        // Communication track
        .route(
            "/communication/question",
            post(communication::handle_communication_question),
        )
        .route(
            "/communication/evaluation",
            post(communication::handle_communication_evaluation),
        )
        // Technical track
        .route(
            "/technical/question",
            post(technical::handle_technical_question),
        )
        .route(
            "/technical/evaluation",
            post(technical::handle_technical_evaluation),
        )
        // Adaptive assessment
        .route(
            "/assessment/start",
            post(assessment::handle_start_assessment),
        )
        .route(
            "/assessment/next-question",
            post(assessment::handle_next_question),
        )
        .with_state(state)
}
