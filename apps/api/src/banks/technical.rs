//! Technical question bank and the complexity-targeted selector.

use std::path::Path;

use tracing::debug;

use crate::banks::loader::{load_technical_questions, BankError};
use crate::models::{ExperienceLevel, TechnicalQuestion};
use crate::technical::complexity::clamp_complexity;

/// Skills assumed when a request names none.
pub const DEFAULT_SKILLS: &[&str] = &["java", "react"];

/// Requested skills, or `DEFAULT_SKILLS` when the request names none.
pub fn requested_skills(skills: Option<Vec<String>>) -> Vec<String> {
    match skills {
        Some(skills) if !skills.is_empty() => skills,
        _ => DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TechnicalBank {
    questions: Vec<TechnicalQuestion>,
}

impl TechnicalBank {
    pub fn new(questions: Vec<TechnicalQuestion>) -> Self {
        Self { questions }
    }

    pub fn load(path: &Path) -> Result<Self, BankError> {
        load_technical_questions(path).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct technologies in bank order.
    pub fn skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();
        for question in &self.questions {
            if !skills.iter().any(|s| s == &question.technology) {
                skills.push(question.technology.clone());
            }
        }
        skills
    }

    /// Picks the question whose complexity is closest to `target`.
    ///
    /// - `target` defaults to the level's starting complexity and is clamped
    ///   to [1.0, 5.0].
    /// - Only rows whose technology matches a requested skill
    ///   (case-insensitive) are candidates; if none match, the whole bank is.
    /// - Ties go to the earliest row in bank order.
    ///
    /// Returns `None` only when the bank itself is empty.
    pub fn select(
        &self,
        level: ExperienceLevel,
        skills: &[String],
        target: Option<f64>,
    ) -> Option<&TechnicalQuestion> {
        let target = clamp_complexity(target.unwrap_or_else(|| level.starting_complexity()));
        let wanted: Vec<String> = skills.iter().map(|s| s.trim().to_lowercase()).collect();

        let matching: Vec<&TechnicalQuestion> = self
            .questions
            .iter()
            .filter(|q| wanted.contains(&q.technology.to_lowercase()))
            .collect();

        let candidates = if matching.is_empty() {
            debug!("No questions match skills {wanted:?}; falling back to the full bank");
            self.questions.iter().collect()
        } else {
            matching
        };

        // `min_by` keeps the first of equally-minimal elements.
        let selected = candidates.into_iter().min_by(|a, b| {
            let da = (a.complexity_score - target).abs();
            let db = (b.complexity_score - target).abs();
            da.total_cmp(&db)
        });

        if let Some(question) = selected {
            debug!(
                "Selected question {} ({}, complexity {}) for target {target}",
                question.id, question.technology, question.complexity_score
            );
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;

    fn question(id: u32, technology: &str, complexity: f64) -> TechnicalQuestion {
        TechnicalQuestion {
            id: QuestionId(id),
            text: format!("{technology} question {id}"),
            expected_answer: format!("{technology} answer {id}"),
            complexity_score: complexity,
            technology: technology.to_string(),
            bloom_label: "understand".to_string(),
        }
    }

    fn bank() -> TechnicalBank {
        TechnicalBank::new(vec![
            question(0, "Java", 1.5),
            question(1, "React", 2.6),
            question(2, "Java", 3.0),
            question(3, "Python", 2.7),
            question(4, "Java", 4.6),
            question(5, "React", 3.5),
        ])
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selects_closest_within_skill_filter() {
        let bank = bank();
        let q = bank
            .select(ExperienceLevel::Intern, &skills(&["java"]), Some(3.2))
            .unwrap();
        assert_eq!(q.id, QuestionId(2));
    }

    #[test]
    fn test_selected_distance_is_minimal_among_matching_rows() {
        let bank = bank();
        let wanted = skills(&["JAVA", "react"]);
        for target in [1.0, 1.9, 2.65, 2.7, 3.9, 5.0] {
            let chosen = bank.select(ExperienceLevel::Intern, &wanted, Some(target)).unwrap();
            let best = (chosen.complexity_score - target).abs();
            for q in bank.questions.iter().filter(|q| q.technology != "Python") {
                assert!(best <= (q.complexity_score - target).abs());
            }
        }
    }

    #[test]
    fn test_default_target_is_level_starting_complexity() {
        let bank = bank();
        // associate starts at 2.7
        let q = bank
            .select(ExperienceLevel::Associate, &skills(&["react"]), None)
            .unwrap();
        assert_eq!(q.id, QuestionId(1));
    }

    #[test]
    fn test_ties_break_by_bank_order() {
        let bank = TechnicalBank::new(vec![
            question(10, "Go", 2.0),
            question(11, "Go", 4.0),
        ]);
        let q = bank
            .select(ExperienceLevel::Intern, &skills(&["go"]), Some(3.0))
            .unwrap();
        assert_eq!(q.id, QuestionId(10));
    }

    #[test]
    fn test_unmatched_skills_fall_back_to_full_bank() {
        let bank = bank();
        let q = bank
            .select(ExperienceLevel::Intern, &skills(&["haskell"]), Some(2.7))
            .unwrap();
        assert_eq!(q.id, QuestionId(3));
    }

    #[test]
    fn test_target_is_clamped() {
        let bank = bank();
        let q = bank
            .select(ExperienceLevel::Intern, &skills(&["java"]), Some(42.0))
            .unwrap();
        assert_eq!(q.id, QuestionId(4));
    }

    #[test]
    fn test_empty_bank_yields_none() {
        let bank = TechnicalBank::default();
        assert!(bank
            .select(ExperienceLevel::Intern, &skills(&["java"]), None)
            .is_none());
    }

    #[test]
    fn test_skills_are_distinct_in_bank_order() {
        assert_eq!(bank().skills(), vec!["Java", "React", "Python"]);
    }

    #[test]
    fn test_requested_skills_default() {
        assert_eq!(requested_skills(None), vec!["java", "react"]);
        assert_eq!(requested_skills(Some(vec![])), vec!["java", "react"]);
        assert_eq!(requested_skills(Some(skills(&["go"]))), vec!["go"]);
    }


    #[test]
    fn test_bundled_demo_bank_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/technical_questions.csv");
        let bank = TechnicalBank::load(&path).unwrap();
        assert_eq!(bank.len(), 12);
        assert_eq!(bank.skills(), vec!["Java", "React", "Python"]);
    }
}
