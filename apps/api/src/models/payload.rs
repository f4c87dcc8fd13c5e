//! Question payloads as returned to clients. An unavailable question is
//! `"question": null`, never a sentinel string.

use serde::Serialize;

use crate::models::{CommunicationQuestion, QuestionId, QuestionKind, TechnicalQuestion};

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalDetails {
    pub expected_answer: String,
    pub complexity_score: f64,
    pub technology: String,
    pub bloom_label: String,
    pub question_id: QuestionId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalQuestionResponse {
    pub question: Option<String>,
    #[serde(flatten)]
    pub details: Option<TechnicalDetails>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

impl From<Option<&TechnicalQuestion>> for TechnicalQuestionResponse {
    fn from(question: Option<&TechnicalQuestion>) -> Self {
        Self {
            question: question.map(|q| q.text.clone()),
            details: question.map(|q| TechnicalDetails {
                expected_answer: q.expected_answer.clone(),
                complexity_score: q.complexity_score,
                technology: q.technology.clone(),
                bloom_label: q.bloom_label.clone(),
                question_id: q.id,
            }),
            kind: QuestionKind::Technical,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunicationQuestionResponse {
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

impl From<Option<&CommunicationQuestion>> for CommunicationQuestionResponse {
    fn from(question: Option<&CommunicationQuestion>) -> Self {
        Self {
            question: question.map(|q| q.text.clone()),
            question_id: question.map(|q| q.id),
            kind: QuestionKind::Communication,
        }
    }
}

/// Either kind of question; serializes as the inner payload with its `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuestionPayload {
    Technical(TechnicalQuestionResponse),
    Communication(CommunicationQuestionResponse),
}

impl QuestionPayload {
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionPayload::Technical(_) => QuestionKind::Technical,
            QuestionPayload::Communication(_) => QuestionKind::Communication,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            QuestionPayload::Technical(t) => t.question.is_some(),
            QuestionPayload::Communication(c) => c.question.is_some(),
        }
    }
}
