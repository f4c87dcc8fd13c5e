//! Communication (soft-skill) question bank.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::banks::loader::{load_communication_questions, BankError};
use crate::models::{CommunicationQuestion, LevelTag};

#[derive(Debug, Clone, Default)]
pub struct CommunicationBank {
    questions: Vec<CommunicationQuestion>,
}

impl CommunicationBank {
    pub fn new(questions: Vec<CommunicationQuestion>) -> Self {
        Self { questions }
    }

    pub fn load(path: &Path) -> Result<Self, BankError> {
        load_communication_questions(path).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn count_for(&self, level: LevelTag) -> usize {
        self.questions.iter().filter(|q| q.level == level).count()
    }

    /// Uniform random draw among questions tagged `level`; `None` if there are none.
    pub fn draw<R: Rng + ?Sized>(&self, level: LevelTag, rng: &mut R) -> Option<&CommunicationQuestion> {
        let pool: Vec<&CommunicationQuestion> =
            self.questions.iter().filter(|q| q.level == level).collect();
        pool.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> CommunicationBank {
        CommunicationBank::new(vec![
            CommunicationQuestion {
                id: QuestionId(0),
                level: LevelTag::Basic,
                text: "Describe your favourite project.".to_string(),
            },
            CommunicationQuestion {
                id: QuestionId(1),
                level: LevelTag::Medium,
                text: "How do you handle unclear requirements?".to_string(),
            },
            CommunicationQuestion {
                id: QuestionId(2),
                level: LevelTag::Basic,
                text: "How do you ask for feedback?".to_string(),
            },
        ])
    }

    #[test]
    fn test_draw_only_returns_matching_level() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let q = bank.draw(LevelTag::Basic, &mut rng).unwrap();
            assert_eq!(q.level, LevelTag::Basic);
        }
    }

    #[test]
    fn test_draw_covers_every_matching_row() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(bank.draw(LevelTag::Basic, &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_draw_without_matching_level_is_none() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(bank().draw(LevelTag::Hard, &mut rng).is_none());
    }

    #[test]
    fn test_counts_per_level() {
        let bank = bank();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.count_for(LevelTag::Basic), 2);
        assert_eq!(bank.count_for(LevelTag::Hard), 0);
    }

    #[test]
    fn test_bundled_demo_bank_covers_every_level() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/softskill_questions.csv");
        let bank = CommunicationBank::load(&path).unwrap();
        for tag in [LevelTag::Basic, LevelTag::Medium, LevelTag::Hard] {
            assert_eq!(bank.count_for(tag), 3);
        }
    }
}
