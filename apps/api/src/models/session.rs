use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::level::ExperienceLevel;

/// Which question families an assessment draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Communication,
    Technical,
    #[default]
    Both,
}

/// Kind of a single question handed to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Communication,
    Technical,
}

impl AssessmentType {
    /// Kind of the question asked after `questions_answered` answers.
    /// `Both` alternates, starting with a technical question.
    pub fn kind_for_turn(self, questions_answered: u32) -> QuestionKind {
        match self {
            Self::Communication => QuestionKind::Communication,
            Self::Technical => QuestionKind::Technical,
            Self::Both if questions_answered % 2 == 0 => QuestionKind::Technical,
            Self::Both => QuestionKind::Communication,
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Communication => "communication",
            Self::Technical => "technical",
            Self::Both => "both",
        })
    }
}

impl FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "communication" => Ok(Self::Communication),
            "technical" => Ok(Self::Technical),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown assessment type '{other}' (expected communication, technical or both)"
            )),
        }
    }
}

/// Caller-owned assessment state. The server never stores it; every call
/// receives the latest snapshot and returns the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    pub level: ExperienceLevel,
    pub skills: Vec<String>,
    #[serde(rename = "type", default)]
    pub assessment_type: AssessmentType,
    pub current_complexity: f64,
    #[serde(default)]
    pub questions_answered: u32,
    #[serde(default)]
    pub total_score: f64,
}

/// What the client reports about the turn it just answered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LastPerformance {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub next_complexity: Option<f64>,
}
