use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::level::LevelTag;

/// Immutable identifier assigned when a bank is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the technical question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    pub id: QuestionId,
    pub text: String,
    pub expected_answer: String,
    pub complexity_score: f64,
    pub technology: String,
    pub bloom_label: String,
}

/// A row of the communication (soft-skill) question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationQuestion {
    pub id: QuestionId,
    pub level: LevelTag,
    pub text: String,
}
