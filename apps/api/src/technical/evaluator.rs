//! Technical answer evaluation: semantic similarity to the expected answer,
//! technical vocabulary, completeness, and the next-complexity prediction.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::embedding::{cosine_similarity, Embedder, EmbeddingError};
use crate::models::ExperienceLevel;
use crate::outcome::{round_to, Degradation, Outcome};
use crate::technical::complexity::{ComplexityInput, ComplexityPredictor};

const TECHNICAL_VOCABULARY: &[&str] = &[
    "api", "database", "algorithm", "function", "method", "class", "object", "array", "string",
    "boolean", "integer", "async", "await", "promise", "callback", "closure", "prototype",
    "inheritance", "polymorphism", "encapsulation", "abstraction", "framework", "library",
    "module", "component", "service", "controller", "model", "view", "rest", "json", "xml",
    "http", "https", "sql", "nosql", "crud", "mvc", "mvvm",
];

/// Distinct vocabulary terms occurring as substrings of the lowercased text.
pub fn count_technical_terms(text: &str) -> usize {
    let lower = text.to_lowercase();
    TECHNICAL_VOCABULARY
        .iter()
        .filter(|term| lower.contains(*term))
        .count()
}

/// Share of the expected answer's distinct words that the candidate used.
pub fn assess_completeness(candidate: &str, expected: &str) -> f64 {
    if candidate.trim().is_empty() || expected.trim().is_empty() {
        return 0.0;
    }
    let words = |text: &str| -> HashSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    };
    let candidate_words = words(candidate);
    let expected_words = words(expected);
    let overlap = candidate_words.intersection(&expected_words).count();
    round_to(overlap as f64 / expected_words.len() as f64, 2)
}

/// Score of one candidate answer against the expected answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerScore {
    /// Similarity scaled to 0-10, two decimals.
    pub correctness: f64,
    /// `None` when no similarity was computed (blank answer or failed embedding).
    pub semantic_similarity: Option<f64>,
    pub word_count: usize,
    pub technical_terms: usize,
}

impl AnswerScore {
    fn zero(candidate: &str) -> Self {
        Self {
            correctness: 0.0,
            semantic_similarity: None,
            word_count: candidate.split_whitespace().count(),
            technical_terms: count_technical_terms(candidate),
        }
    }
}

/// The question being answered, as echoed back by the client.
#[derive(Debug, Clone)]
pub struct QuestionContext {
    pub question: String,
    pub expected_answer: String,
    pub complexity_score: f64,
    pub technology: String,
    pub bloom_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerAnalysis {
    pub word_count: usize,
    pub technical_terms: usize,
    pub completeness: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalEvaluation {
    pub technical_accuracy: f64,
    pub semantic_similarity: f64,
    pub current_complexity: f64,
    pub next_complexity: f64,
    pub technology: String,
    pub bloom_level: String,
    pub answer_analysis: AnswerAnalysis,
    /// Stages that answered from their fallback path; empty on the happy path.
    pub degraded: Vec<Degradation>,
}

pub struct TechnicalEvaluator {
    embedder: Arc<dyn Embedder>,
    predictor: ComplexityPredictor,
}

impl TechnicalEvaluator {
    pub fn new(embedder: Arc<dyn Embedder>, predictor: ComplexityPredictor) -> Self {
        Self {
            embedder,
            predictor,
        }
    }

    pub fn embedding_model(&self) -> &str {
        self.embedder.model_name()
    }

    pub fn has_complexity_model(&self) -> bool {
        self.predictor.has_model()
    }

    /// Blank answers short-circuit to zero without touching the embedder.
    /// Embedding failures degrade to the same zero score.
    pub async fn score_answer(&self, expected_answer: &str, candidate: &str) -> Outcome<AnswerScore> {
        if candidate.trim().is_empty() {
            return Outcome::Primary(AnswerScore::zero(candidate));
        }

        match self.similarity(expected_answer, candidate).await {
            Ok(similarity) => {
                let score = AnswerScore {
                    correctness: round_to(similarity * 10.0, 2),
                    semantic_similarity: Some(round_to(similarity, 3)),
                    word_count: candidate.split_whitespace().count(),
                    technical_terms: count_technical_terms(candidate),
                };
                debug!(
                    "Semantic similarity {similarity:.3} -> correctness {}",
                    score.correctness
                );
                Outcome::Primary(score)
            }
            Err(e) => {
                warn!("Semantic similarity unavailable ({e}); scoring answer as 0.0");
                Outcome::fallback(AnswerScore::zero(candidate), e.to_string())
            }
        }
    }

    async fn similarity(&self, expected: &str, candidate: &str) -> Result<f64, EmbeddingError> {
        let embeddings = self.embedder.embed_batch(&[expected, candidate]).await?;
        match embeddings.as_slice() {
            [expected, candidate] => cosine_similarity(expected, candidate),
            other => Err(EmbeddingError::CountMismatch {
                expected: 2,
                got: other.len(),
            }),
        }
    }

    /// Full evaluation: answer score, answer analysis and next complexity.
    pub async fn evaluate(
        &self,
        context: &QuestionContext,
        candidate: &str,
        level: ExperienceLevel,
    ) -> TechnicalEvaluation {
        let score = self.score_answer(&context.expected_answer, candidate).await;
        let similarity_degradation = score.degradation("semantic_similarity");
        let score = score.into_value();

        let next = self.predictor.predict(&ComplexityInput {
            question: &context.question,
            expected_answer: &context.expected_answer,
            answer_quality: score.correctness,
            current_complexity: context.complexity_score,
            level,
        });

        debug!(
            "Next complexity {} ({})",
            next.value(),
            if next.is_fallback() { "fallback" } else { "model" }
        );

        let degraded = similarity_degradation
            .into_iter()
            .chain(next.degradation("next_complexity"))
            .collect();

        TechnicalEvaluation {
            technical_accuracy: score.correctness,
            semantic_similarity: score.semantic_similarity.unwrap_or(0.0),
            current_complexity: context.complexity_score,
            next_complexity: next.into_value(),
            technology: context.technology.clone(),
            bloom_level: context.bloom_label.clone(),
            answer_analysis: AnswerAnalysis {
                word_count: score.word_count,
                technical_terms: score.technical_terms,
                completeness: assess_completeness(candidate, &context.expected_answer),
            },
            degraded,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds text as [len of words containing "rust", 1.0]; counts calls.
    #[derive(Default)]
    pub(crate) struct FakeEmbedder {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| {
                    let hits = t.to_lowercase().matches("rust").count() as f32;
                    vec![hits, 1.0]
                })
                .collect())
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }

    pub(crate) struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::Api {
                status: 503,
                message: "model loading".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn context() -> QuestionContext {
        QuestionContext {
            question: "Why does Rust have a borrow checker?".to_string(),
            expected_answer: "rust enforces ownership at compile time".to_string(),
            complexity_score: 3.0,
            technology: "Rust".to_string(),
            bloom_label: "understand".to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_answer_never_calls_embedder() {
        let embedder = Arc::new(FakeEmbedder::default());
        let evaluator = TechnicalEvaluator::new(embedder.clone(), ComplexityPredictor::fallback_only());

        let outcome = evaluator.score_answer("anything", "   ").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.value().correctness, 0.0);
        assert_eq!(outcome.value().semantic_similarity, None);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_identical_direction_scores_ten() {
        let evaluator =
            TechnicalEvaluator::new(Arc::new(FakeEmbedder::default()), ComplexityPredictor::fallback_only());
        let outcome = evaluator
            .score_answer("rust enforces ownership", "Rust checks ownership")
            .await;
        let score = outcome.into_value();
        assert_eq!(score.correctness, 10.0);
        assert_eq!(score.semantic_similarity, Some(1.0));
        assert_eq!(score.word_count, 3);
    }

    #[tokio::test]
    async fn test_embedding_failure_degrades_to_zero() {
        let evaluator = TechnicalEvaluator::new(Arc::new(FailingEmbedder), ComplexityPredictor::fallback_only());
        let outcome = evaluator.score_answer("expected", "an api answer").await;
        assert!(outcome.is_fallback());
        assert!(outcome.reason().unwrap().contains("503"));
        assert_eq!(outcome.value().correctness, 0.0);
        assert_eq!(outcome.value().technical_terms, 1);
    }

    #[tokio::test]
    async fn test_full_evaluation_feeds_correctness_into_fallback_rule() {
        let evaluator =
            TechnicalEvaluator::new(Arc::new(FakeEmbedder::default()), ComplexityPredictor::fallback_only());
        let eval = evaluator
            .evaluate(&context(), "rust uses ownership and a borrow checker", ExperienceLevel::Associate)
            .await;

        assert_eq!(eval.technical_accuracy, 10.0);
        // correctness 10 >= 7 -> 3.0 + 0.3
        assert_eq!(eval.next_complexity, 3.3);
        assert_eq!(eval.current_complexity, 3.0);
        assert_eq!(eval.bloom_level, "understand");
        assert_eq!(eval.degraded.len(), 1);
        assert_eq!(eval.degraded[0].stage, "next_complexity");
        // "rust" and "ownership" of 6 expected words
        assert_eq!(eval.answer_analysis.completeness, 0.33);
    }

    #[tokio::test]
    async fn test_full_evaluation_with_failing_embedder_lowers_complexity() {
        let evaluator = TechnicalEvaluator::new(Arc::new(FailingEmbedder), ComplexityPredictor::fallback_only());
        let eval = evaluator
            .evaluate(&context(), "no idea", ExperienceLevel::Intern)
            .await;
        assert_eq!(eval.technical_accuracy, 0.0);
        assert_eq!(eval.semantic_similarity, 0.0);
        assert_eq!(eval.next_complexity, 2.7);
        let stages: Vec<_> = eval.degraded.iter().map(|d| d.stage).collect();
        assert_eq!(stages, vec!["semantic_similarity", "next_complexity"]);
    }

    #[test]
    fn test_count_technical_terms() {
        assert_eq!(count_technical_terms("A REST API returning JSON"), 3);
        assert_eq!(count_technical_terms("nothing here"), 0);
    }

    #[test]
    fn test_completeness() {
        assert_eq!(assess_completeness("a b", "a b c d"), 0.5);
        assert_eq!(assess_completeness("", "a b"), 0.0);
        assert_eq!(assess_completeness("a", "   "), 0.0);
    }
}
