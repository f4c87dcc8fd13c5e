//! Axum route handlers for the technical track.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::banks::technical::requested_skills;
use crate::errors::{ApiJson, AppError};
use crate::models::{ExperienceLevel, QuestionKind, TechnicalQuestionResponse};
use crate::state::AppState;
use crate::technical::{QuestionContext, TechnicalEvaluation};

const DEFAULT_COMPLEXITY: f64 = 2.0;
const DEFAULT_TECHNOLOGY: &str = "general";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TechnicalQuestionRequest {
    pub level: Option<String>,
    pub skills: Option<Vec<String>>,
    pub current_complexity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TechnicalEvaluationRequest {
    pub level: Option<String>,
    pub question: String,
    pub answer: String,
    pub expected_answer: String,
    pub complexity_score: Option<f64>,
    pub technology: Option<String>,
    pub bloom_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TechnicalEvaluationResponse {
    pub evaluation: TechnicalEvaluation,
    pub question: String,
    pub level: ExperienceLevel,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /technical/question
///
/// Returns the bank question closest to the requested complexity for the skills.
pub async fn handle_technical_question(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TechnicalQuestionRequest>,
) -> Result<Json<TechnicalQuestionResponse>, AppError> {
    let level = ExperienceLevel::parse_or_default(request.level.as_deref())?;
    let skills = requested_skills(request.skills);

    let question = state
        .technical_bank
        .select(level, &skills, request.current_complexity);

    Ok(Json(question.into()))
}

/// POST /technical/evaluation
///
/// Scores the answer against the expected answer and predicts the next complexity.
pub async fn handle_technical_evaluation(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TechnicalEvaluationRequest>,
) -> Result<Json<TechnicalEvaluationResponse>, AppError> {
    let level = ExperienceLevel::parse_or_default(request.level.as_deref())?;

    let context = QuestionContext {
        question: request.question,
        expected_answer: request.expected_answer,
        complexity_score: request.complexity_score.unwrap_or(DEFAULT_COMPLEXITY),
        technology: request
            .technology
            .unwrap_or_else(|| DEFAULT_TECHNOLOGY.to_string()),
        bloom_label: request.bloom_label.unwrap_or_default(),
    };

    let evaluation = state
        .technical_evaluator
        .evaluate(&context, &request.answer, level)
        .await;

    Ok(Json(TechnicalEvaluationResponse {
        evaluation,
        question: context.question,
        level,
        kind: QuestionKind::Technical,
    }))
}

/// GET /skills/list
pub async fn handle_skills_list(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.technical_bank.skills(),
    })
}
