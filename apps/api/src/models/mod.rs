pub mod level;
pub mod payload;
pub mod question;
pub mod session;

pub use level::{ExperienceLevel, LevelTag};
pub use payload::{CommunicationQuestionResponse, QuestionPayload, TechnicalQuestionResponse};
pub use question::{CommunicationQuestion, QuestionId, TechnicalQuestion};
pub use session::{AssessmentSession, AssessmentType, LastPerformance, QuestionKind};
