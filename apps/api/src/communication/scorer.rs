//! Communication scorer: statistical + TF-IDF features through one
//! regressor per score axis, then a keyword adjustment tied to the level.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::communication::features::{extract_features, FEATURE_COUNT};
use crate::inference::{ModelError, Regressor, StandardScaler, TfidfVectorizer};
use crate::models::LevelTag;
use crate::outcome::round_to;

/// Axes averaged into `adjusted_score`. Every bundle must provide all three.
pub const REQUIRED_AXES: [&str; 3] = [
    "technical_accuracy",
    "communication_effectiveness",
    "competency_demonstration",
];

const KEYWORD_WEIGHT: f64 = 0.5;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("model bundle has no regressor for axis '{0}'")]
    MissingAxis(String),

    #[error("model bundle has no scaler for axis '{0}'")]
    MissingScaler(String),

    #[error("axis '{axis}': {source}")]
    Model {
        axis: String,
        #[source]
        source: ModelError,
    },

    #[error("tfidf vectorizer: {0}")]
    Vectorizer(ModelError),

    #[error("failed to read model bundle {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Level-specific keywords that nudge the adjusted score up or down.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordIndicators {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

/// The exported communication model bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunicationModelBundle {
    pub models: BTreeMap<String, Regressor>,
    pub scalers: BTreeMap<String, StandardScaler>,
    pub tfidf_vectorizer: TfidfVectorizer,
    /// Keyed by level tag: `basic`, `medium`, `hard`.
    #[serde(default)]
    pub experience_indicators: BTreeMap<String, KeywordIndicators>,
}

/// Per-axis scores plus the keyword-adjusted aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunicationEvaluation {
    #[serde(flatten)]
    pub axes: BTreeMap<String, f64>,
    pub adjusted_score: f64,
    pub keyword_bonus: usize,
    pub keyword_penalty: usize,
}

#[derive(Debug, Clone)]
pub struct CommunicationScorer {
    bundle: CommunicationModelBundle,
}

impl CommunicationScorer {
    /// Validates the bundle: every required axis present, a scaler per
    /// regressor, and consistent widths across vectorizer, scalers and models.
    pub fn new(bundle: CommunicationModelBundle) -> Result<Self, ScoringError> {
        for axis in REQUIRED_AXES {
            if !bundle.models.contains_key(axis) {
                return Err(ScoringError::MissingAxis(axis.to_string()));
            }
        }

        bundle
            .tfidf_vectorizer
            .validate()
            .map_err(ScoringError::Vectorizer)?;
        let width = FEATURE_COUNT + bundle.tfidf_vectorizer.dimensions();

        for (axis, regressor) in &bundle.models {
            let scaler = bundle
                .scalers
                .get(axis)
                .ok_or_else(|| ScoringError::MissingScaler(axis.clone()))?;
            let model_error = |source: ModelError| ScoringError::Model {
                axis: axis.clone(),
                source,
            };

            scaler.validate().map_err(model_error)?;
            regressor.validate().map_err(model_error)?;
            if scaler.dimensions() != width {
                return Err(model_error(ModelError::DimensionMismatch {
                    expected: width,
                    got: scaler.dimensions(),
                }));
            }
            if let Some(dimensions) = regressor.dimensions() {
                if dimensions != width {
                    return Err(model_error(ModelError::DimensionMismatch {
                        expected: width,
                        got: dimensions,
                    }));
                }
            }
        }

        Ok(Self { bundle })
    }

    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScoringError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let scorer = Self::from_json(&json)?;
        info!(
            "Loaded communication model bundle from {} ({} axes, {} tfidf terms)",
            path.display(),
            scorer.bundle.models.len(),
            scorer.bundle.tfidf_vectorizer.dimensions()
        );
        Ok(scorer)
    }

    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.bundle.models.keys().map(String::as_str)
    }

    /// Scores `answer` on every axis and applies the keyword adjustment for `level`.
    pub fn evaluate(
        &self,
        answer: &str,
        level: LevelTag,
    ) -> Result<CommunicationEvaluation, ScoringError> {
        let mut input: Vec<f64> = extract_features(answer).to_vec();
        input.extend(self.bundle.tfidf_vectorizer.transform(answer));

        let mut axes = BTreeMap::new();
        for (axis, regressor) in &self.bundle.models {
            let scaler = self
                .bundle
                .scalers
                .get(axis)
                .ok_or_else(|| ScoringError::MissingScaler(axis.clone()))?;
            let model_error = |source: ModelError| ScoringError::Model {
                axis: axis.clone(),
                source,
            };
            let scaled = scaler.transform(&input).map_err(model_error)?;
            let prediction = regressor.predict(&scaled).map_err(model_error)?;
            axes.insert(axis.clone(), round_to(prediction, 2));
        }

        let mut base = 0.0;
        for axis in REQUIRED_AXES {
            base += axes
                .get(axis)
                .ok_or_else(|| ScoringError::MissingAxis(axis.to_string()))?;
        }
        base /= REQUIRED_AXES.len() as f64;

        let (bonus, penalty) = self.keyword_hits(answer, level);
        let adjusted_score = round_to(
            base + KEYWORD_WEIGHT * bonus as f64 - KEYWORD_WEIGHT * penalty as f64,
            2,
        );

        debug!(
            "Communication score for {} answer: base={base:.3} bonus={bonus} penalty={penalty} adjusted={adjusted_score}",
            level.as_str()
        );

        Ok(CommunicationEvaluation {
            axes,
            adjusted_score,
            keyword_bonus: bonus,
            keyword_penalty: penalty,
        })
    }

    /// Counts positive and negative indicator keywords (lowercase substring match).
    fn keyword_hits(&self, answer: &str, level: LevelTag) -> (usize, usize) {
        let Some(indicators) = self.bundle.experience_indicators.get(level.as_str()) else {
            return (0, 0);
        };
        let lower = answer.to_lowercase();
        let count = |words: &[String]| {
            words
                .iter()
                .filter(|w| lower.contains(&w.to_lowercase()))
                .count()
        };
        (count(&indicators.positive), count(&indicators.negative))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Regressors only weigh the first feature (word count); tfidf has two terms.
    pub(crate) fn bundle_json() -> serde_json::Value {
        let width = FEATURE_COUNT + 2;
        let mut coefficients = vec![0.0; width];
        coefficients[0] = 0.1;
        let linear = |intercept: f64| {
            json!({"kind": "linear", "coefficients": coefficients.clone(), "intercept": intercept})
        };
        let scaler = json!({"mean": vec![0.0; width], "scale": vec![1.0; width]});
        json!({
            "models": {
                "technical_accuracy": linear(5.0),
                "communication_effectiveness": linear(6.0),
                "competency_demonstration": linear(7.0)
            },
            "scalers": {
                "technical_accuracy": scaler.clone(),
                "communication_effectiveness": scaler.clone(),
                "competency_demonstration": scaler
            },
            "tfidf_vectorizer": {"vocabulary": {"team": 0, "deadline": 1}, "idf": [1.0, 1.5]},
            "experience_indicators": {
                "basic": {"positive": ["learn", "team"], "negative": ["don't know"]},
                "hard": {"positive": ["mentor"], "negative": ["not sure", "maybe"]}
            }
        })
    }

    pub(crate) fn scorer() -> CommunicationScorer {
        CommunicationScorer::from_json(&bundle_json().to_string()).unwrap()
    }

    #[test]
    fn test_scores_every_axis_rounded() {
        let eval = scorer()
            .evaluate("We met the deadline as a team", LevelTag::Medium)
            .unwrap();
        // 7 words -> +0.7 on each axis
        assert_eq!(eval.axes["technical_accuracy"], 5.7);
        assert_eq!(eval.axes["communication_effectiveness"], 6.7);
        assert_eq!(eval.axes["competency_demonstration"], 7.7);
        assert_eq!(eval.adjusted_score, 6.7);
    }

    #[test]
    fn test_keyword_bonus_and_penalty() {
        let eval = scorer()
            .evaluate("I want to learn with my team but I don't know", LevelTag::Basic)
            .unwrap();
        assert_eq!(eval.keyword_bonus, 2);
        assert_eq!(eval.keyword_penalty, 1);
        // 11 words: base mean = 6.0 + 1.1 = 7.1; +1.0 - 0.5
        assert_eq!(eval.adjusted_score, 7.6);
    }

    #[test]
    fn test_level_without_indicators_has_no_adjustment() {
        let eval = scorer()
            .evaluate("I want to learn with my team", LevelTag::Medium)
            .unwrap();
        assert_eq!(eval.keyword_bonus, 0);
        assert_eq!(eval.keyword_penalty, 0);
    }

    #[test]
    fn test_empty_answer_scores_intercepts() {
        let eval = scorer().evaluate("", LevelTag::Hard).unwrap();
        assert_eq!(eval.axes["technical_accuracy"], 5.0);
        assert_eq!(eval.adjusted_score, 6.0);
    }

    #[test]
    fn test_adjusted_score_is_deterministic() {
        let scorer = scorer();
        let answer = "As a mentor I would maybe ensure the team hits the deadline.";
        let first = scorer.evaluate(answer, LevelTag::Hard).unwrap();
        let second = scorer.evaluate(answer, LevelTag::Hard).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_axis_fails_loudly() {
        let mut bundle = bundle_json();
        bundle["models"]
            .as_object_mut()
            .unwrap()
            .remove("competency_demonstration");
        let err = CommunicationScorer::from_json(&bundle.to_string()).unwrap_err();
        assert!(
            matches!(err, ScoringError::MissingAxis(ref axis) if axis == "competency_demonstration")
        );
    }

    #[test]
    fn test_missing_scaler_is_rejected() {
        let mut bundle = bundle_json();
        bundle["scalers"]
            .as_object_mut()
            .unwrap()
            .remove("technical_accuracy");
        let err = CommunicationScorer::from_json(&bundle.to_string()).unwrap_err();
        assert!(matches!(err, ScoringError::MissingScaler(_)));
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let mut bundle = bundle_json();
        bundle["tfidf_vectorizer"] = json!({"vocabulary": {"team": 0}, "idf": [1.0]});
        let err = CommunicationScorer::from_json(&bundle.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Model {
                source: ModelError::DimensionMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_serializes_axes_flat() {
        let eval = scorer().evaluate("team", LevelTag::Basic).unwrap();
        let value = serde_json::to_value(&eval).unwrap();
        assert!(value["technical_accuracy"].is_number());
        assert!(value["adjusted_score"].is_number());
        assert!(value.get("axes").is_none());
    }

    #[test]
    fn test_bundled_demo_model_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/communication_model.json");
        let scorer = CommunicationScorer::load(&path).unwrap();
        let eval = scorer
            .evaluate("I mentor two engineers and lead our design reviews.", LevelTag::Hard)
            .unwrap();
        assert_eq!(eval.keyword_bonus, 2);
        assert!(eval.adjusted_score.is_finite());
    }
}
