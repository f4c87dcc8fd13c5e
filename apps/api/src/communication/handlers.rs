//! Axum route handlers for the communication track.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::communication::CommunicationEvaluation;
use crate::errors::{ApiJson, AppError};
use crate::models::{CommunicationQuestionResponse, ExperienceLevel, LevelTag, QuestionKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommunicationQuestionRequest {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommunicationEvaluationRequest {
    pub level: Option<String>,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CommunicationEvaluationResponse {
    pub evaluation: CommunicationEvaluation,
    pub question: String,
    pub level: LevelTag,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

/// POST /communication/question
///
/// Random soft-skill question for the level; `question` is null when the bank has none.
pub async fn handle_communication_question(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CommunicationQuestionRequest>,
) -> Result<Json<CommunicationQuestionResponse>, AppError> {
    let level = ExperienceLevel::parse_or_default(request.level.as_deref())?;
    let question = state
        .communication_bank
        .draw(level.tag(), &mut rand::thread_rng());
    Ok(Json(question.into()))
}

/// POST /communication/evaluation
pub async fn handle_communication_evaluation(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CommunicationEvaluationRequest>,
) -> Result<Json<CommunicationEvaluationResponse>, AppError> {
    let level = ExperienceLevel::parse_or_default(request.level.as_deref())?.tag();
    let evaluation = state
        .communication_scorer
        .evaluate(&request.answer, level)?;

    Ok(Json(CommunicationEvaluationResponse {
        evaluation,
        question: request.question,
        level,
        kind: QuestionKind::Communication,
    }))
}
