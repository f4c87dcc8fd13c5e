//! Session lifecycle: start a session, fold in the last answered turn, and
//! pick the next question.
//!
//! Question type for `both` alternates on `questions_answered` (even →
//! technical, odd → communication). Technical questions are chosen at the
//! session's current complexity; communication questions are a random draw
//! for the level.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::banks::{CommunicationBank, TechnicalBank};
use crate::models::{
    AssessmentSession, AssessmentType, ExperienceLevel, LastPerformance, QuestionKind,
    QuestionPayload,
};
use crate::technical::complexity::clamp_complexity;

/// Fresh session at the level's starting complexity.
pub fn start_session(
    level: ExperienceLevel,
    skills: Vec<String>,
    assessment_type: AssessmentType,
) -> AssessmentSession {
    AssessmentSession {
        level,
        skills,
        assessment_type,
        current_complexity: level.starting_complexity(),
        questions_answered: 0,
        total_score: 0.0,
    }
}

/// Folds a reported turn into the session: one more answer, its score added
/// to the total, and the complexity moved to the predicted next value.
pub fn record_performance(mut session: AssessmentSession, performance: &LastPerformance) -> AssessmentSession {
    session.questions_answered = session.questions_answered.saturating_add(1);
    if let Some(score) = performance.score.filter(|s| s.is_finite()) {
        session.total_score += score;
    }
    if let Some(next) = performance.next_complexity.filter(|c| c.is_finite()) {
        session.current_complexity = clamp_complexity(next);
    }
    session
}

#[derive(Debug, Clone, Serialize)]
pub struct NextQuestion {
    #[serde(flatten)]
    pub question: QuestionPayload,
    /// Session to send back with the next call.
    pub session: AssessmentSession,
}

/// Advances `session` by `last_performance` (if any) and selects the next question.
pub fn next_question<R: Rng + ?Sized>(
    session: AssessmentSession,
    last_performance: Option<&LastPerformance>,
    technical_bank: &TechnicalBank,
    communication_bank: &CommunicationBank,
    rng: &mut R,
) -> NextQuestion {
    let mut session = match last_performance {
        Some(performance) => record_performance(session, performance),
        None => session,
    };
    session.current_complexity = clamp_complexity(session.current_complexity);

    let kind = session.assessment_type.kind_for_turn(session.questions_answered);
    let question = match kind {
        QuestionKind::Technical => QuestionPayload::Technical(
            technical_bank
                .select(session.level, &session.skills, Some(session.current_complexity))
                .into(),
        ),
        QuestionKind::Communication => QuestionPayload::Communication(
            communication_bank.draw(session.level.tag(), rng).into(),
        ),
    };

    debug!(
        "Turn {} of {} assessment: {:?} question (complexity {}, available: {})",
        session.questions_answered,
        session.assessment_type,
        question.kind(),
        session.current_complexity,
        question.is_available()
    );

    NextQuestion { question, session }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommunicationQuestion, LevelTag, QuestionId, TechnicalQuestion};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn technical_bank() -> TechnicalBank {
        let question = |id: u32, complexity: f64| TechnicalQuestion {
            id: QuestionId(id),
            text: format!("java question {id}"),
            expected_answer: "answer".to_string(),
            complexity_score: complexity,
            technology: "Java".to_string(),
            bloom_label: "apply".to_string(),
        };
        TechnicalBank::new(vec![question(0, 2.0), question(1, 2.5), question(2, 3.5)])
    }

    fn communication_bank() -> CommunicationBank {
        CommunicationBank::new(vec![CommunicationQuestion {
            id: QuestionId(0),
            level: LevelTag::Basic,
            text: "How do you ask for help?".to_string(),
        }])
    }

    fn performance(score: f64, next_complexity: Option<f64>) -> LastPerformance {
        LastPerformance {
            score: Some(score),
            next_complexity,
        }
    }

    #[test]
    fn test_start_uses_level_starting_complexity() {
        let session = start_session(
            ExperienceLevel::SoftwareEngineer,
            vec!["java".to_string()],
            AssessmentType::Both,
        );
        assert_eq!(session.current_complexity, 3.2);
        assert_eq!(session.questions_answered, 0);
        assert_eq!(session.total_score, 0.0);
    }

    #[test]
    fn test_both_alternates_when_session_is_round_tripped() {
        let mut rng = StdRng::seed_from_u64(11);
        let (tech, comm) = (technical_bank(), communication_bank());
        let session = start_session(ExperienceLevel::Intern, vec!["java".to_string()], AssessmentType::Both);

        let first = next_question(session, None, &tech, &comm, &mut rng);
        assert_eq!(first.question.kind(), QuestionKind::Technical);

        let second = next_question(first.session, Some(&performance(8.0, Some(2.3))), &tech, &comm, &mut rng);
        assert_eq!(second.question.kind(), QuestionKind::Communication);
        assert!(second.question.is_available());

        let third = next_question(second.session, Some(&performance(6.5, None)), &tech, &comm, &mut rng);
        assert_eq!(third.question.kind(), QuestionKind::Technical);
        assert_eq!(third.session.questions_answered, 2);
        assert_eq!(third.session.total_score, 14.5);
        assert_eq!(third.session.current_complexity, 2.3);
    }

    #[test]
    fn test_unchanged_session_without_performance_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(5);
        let (tech, comm) = (technical_bank(), communication_bank());
        let session = start_session(ExperienceLevel::Intern, vec![], AssessmentType::Both);

        let a = next_question(session.clone(), None, &tech, &comm, &mut rng);
        let b = next_question(session.clone(), None, &tech, &comm, &mut rng);
        assert_eq!(a.session, session);
        assert_eq!(a.question.kind(), b.question.kind());
    }

    #[test]
    fn test_technical_question_follows_predicted_complexity() {
        let mut rng = StdRng::seed_from_u64(2);
        let (tech, comm) = (technical_bank(), communication_bank());
        let session = start_session(ExperienceLevel::Intern, vec!["java".to_string()], AssessmentType::Technical);

        let next = next_question(session, Some(&performance(9.0, Some(3.4))), &tech, &comm, &mut rng);
        let value = serde_json::to_value(&next).unwrap();
        assert_eq!(value["type"], "technical");
        assert_eq!(value["question_id"], 2);
        assert_eq!(value["session"]["current_complexity"], 3.4);
    }

    #[test]
    fn test_reported_complexity_is_clamped() {
        let session = start_session(ExperienceLevel::Associate, vec![], AssessmentType::Both);
        let session = record_performance(session, &performance(10.0, Some(9.0)));
        assert_eq!(session.current_complexity, 5.0);
        let session = record_performance(session, &performance(0.0, Some(-3.0)));
        assert_eq!(session.current_complexity, 1.0);
    }

    #[test]
    fn test_answer_count_saturates_at_max() {
        let mut session = start_session(ExperienceLevel::Intern, vec![], AssessmentType::Both);
        session.questions_answered = u32::MAX;
        let session = record_performance(session, &performance(1.0, None));
        assert_eq!(session.questions_answered, u32::MAX);
        assert_eq!(session.total_score, 1.0);
    }

    #[test]
    fn test_missing_communication_level_yields_null_question() {
        let mut rng = StdRng::seed_from_u64(9);
        let (tech, comm) = (technical_bank(), communication_bank());
        let session = start_session(
            ExperienceLevel::SoftwareEngineer,
            vec![],
            AssessmentType::Communication,
        );
        let next = next_question(session, None, &tech, &comm, &mut rng);
        let value = serde_json::to_value(&next).unwrap();
        assert_eq!(value["type"], "communication");
        assert!(value["question"].is_null());
    }
}
