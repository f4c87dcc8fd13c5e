//! Axum route handlers for the adaptive assessment loop.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::orchestrator::{self, NextQuestion};
use crate::banks::technical::requested_skills;
use crate::errors::{ApiJson, AppError};
use crate::models::{AssessmentSession, AssessmentType, ExperienceLevel, LastPerformance};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartAssessmentRequest {
    pub level: Option<String>,
    pub skills: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub assessment_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartAssessmentResponse {
    pub session: AssessmentSession,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NextQuestionRequest {
    pub session: AssessmentSession,
    pub last_performance: Option<LastPerformance>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /assessment/start
pub async fn handle_start_assessment(
    ApiJson(request): ApiJson<StartAssessmentRequest>,
) -> Result<Json<StartAssessmentResponse>, AppError> {
    let level = ExperienceLevel::parse_or_default(request.level.as_deref())?;
    let assessment_type = match request.assessment_type.as_deref() {
        Some(raw) if !raw.trim().is_empty() => {
            raw.parse::<AssessmentType>().map_err(AppError::Validation)?
        }
        _ => AssessmentType::default(),
    };

    let session = orchestrator::start_session(level, requested_skills(request.skills), assessment_type);
    info!(
        "Assessment started: level={}, type={}, skills={:?}",
        level.as_str(),
        assessment_type,
        session.skills
    );

    Ok(Json(StartAssessmentResponse {
        message: format!("Assessment started for {} level", level.as_str()),
        session,
    }))
}

/// POST /assessment/next-question
///
/// Folds `last_performance` into the session, then picks the next question.
/// The returned session must be sent back on the following call.
pub async fn handle_next_question(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NextQuestionRequest>,
) -> Result<Json<NextQuestion>, AppError> {
    let next = orchestrator::next_question(
        request.session,
        request.last_performance.as_ref(),
        &state.technical_bank,
        &state.communication_bank,
        &mut rand::thread_rng(),
    );
    Ok(Json(next))
}
