//! Next-question complexity: model prediction with a deterministic fallback.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::inference::{ModelError, Regressor, TfidfVectorizer};
use crate::models::ExperienceLevel;
use crate::outcome::{round_to, Outcome};

pub const MIN_COMPLEXITY: f64 = 1.0;
pub const MAX_COMPLEXITY: f64 = 5.0;

/// Fallback step applied per answer.
const FALLBACK_STEP: f64 = 0.3;
/// Quality (0-10) at or above which the next question gets harder.
const RAISE_THRESHOLD: f64 = 7.0;
/// Quality (0-10) below which the next question gets easier.
const LOWER_THRESHOLD: f64 = 4.0;

pub fn clamp_complexity(value: f64) -> f64 {
    value.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY)
}

/// The rule used whenever the model cannot answer.
///
/// quality >= 7 raises by 0.3, quality < 4 lowers by 0.3, anything between
/// keeps the current complexity. Always within [1.0, 5.0].
pub fn fallback_complexity(answer_quality: f64, current: f64) -> f64 {
    let current = clamp_complexity(current);
    let next = if answer_quality >= RAISE_THRESHOLD {
        (current + FALLBACK_STEP).min(MAX_COMPLEXITY)
    } else if answer_quality >= LOWER_THRESHOLD {
        current
    } else {
        (current - FALLBACK_STEP).max(MIN_COMPLEXITY)
    };
    round_to(next, 2)
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("no complexity model loaded")]
    NoModel,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to read complexity model {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse complexity model: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Numeric columns the complexity model may consume, in artifact order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericFeature {
    ComplexityScore,
    AnswerQualityScore,
    ExperienceEncoded,
}

/// Exported next-complexity pipeline: tfidf over question + expected answer,
/// followed by the numeric columns, into one regressor.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplexityModel {
    pub text_vectorizer: TfidfVectorizer,
    pub numeric_features: Vec<NumericFeature>,
    pub regressor: Regressor,
}

impl ComplexityModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.text_vectorizer.validate()?;
        self.regressor.validate()?;
        let width = self.text_vectorizer.dimensions() + self.numeric_features.len();
        match self.regressor.dimensions() {
            Some(expected) if expected != width => Err(ModelError::DimensionMismatch {
                expected,
                got: width,
            }),
            _ => Ok(()),
        }
    }

    fn row(&self, input: &ComplexityInput<'_>) -> Vec<f64> {
        let qa_text = format!("{} {}", input.question, input.expected_answer);
        let mut row = self.text_vectorizer.transform(&qa_text);
        row.extend(self.numeric_features.iter().map(|feature| match feature {
            NumericFeature::ComplexityScore => input.current_complexity,
            NumericFeature::AnswerQualityScore => input.answer_quality / 10.0,
            NumericFeature::ExperienceEncoded => f64::from(input.level.code()),
        }));
        row
    }

    fn predict(&self, input: &ComplexityInput<'_>) -> Result<f64, ModelError> {
        self.regressor.predict(&self.row(input))
    }
}

/// One answered technical question, as seen by the predictor.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityInput<'a> {
    pub question: &'a str,
    pub expected_answer: &'a str,
    /// Raw correctness on the 0-10 scale.
    pub answer_quality: f64,
    pub current_complexity: f64,
    pub level: ExperienceLevel,
}

#[derive(Debug, Clone, Default)]
pub struct ComplexityPredictor {
    model: Option<ComplexityModel>,
}

impl ComplexityPredictor {
    pub fn new(model: Option<ComplexityModel>) -> Self {
        Self { model }
    }

    /// Predictor with no model: every call takes the fallback rule.
    pub fn fallback_only() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, PredictionError> {
        let model: ComplexityModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(Self::new(Some(model)))
    }

    pub fn load(path: &Path) -> Result<Self, PredictionError> {
        let json = std::fs::read_to_string(path).map_err(|source| PredictionError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let predictor = Self::from_json(&json)?;
        info!("Loaded complexity model from {}", path.display());
        Ok(predictor)
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn predict(&self, input: &ComplexityInput<'_>) -> Outcome<f64> {
        match self.try_predict(input) {
            Ok(next) => {
                debug!(
                    "Model predicted next complexity {next} (current {}, quality {})",
                    input.current_complexity, input.answer_quality
                );
                Outcome::Primary(next)
            }
            Err(e) => {
                let next = fallback_complexity(input.answer_quality, input.current_complexity);
                warn!("Complexity prediction failed ({e}); fallback rule gives {next}");
                Outcome::fallback(next, e.to_string())
            }
        }
    }

    fn try_predict(&self, input: &ComplexityInput<'_>) -> Result<f64, PredictionError> {
        let model = self.model.as_ref().ok_or(PredictionError::NoModel)?;
        let raw = model.predict(input)?;
        Ok(round_to(clamp_complexity(raw), 2))
    }
}
