// Technical track: question selection lives in `banks::technical`; this module
// scores answers and predicts how hard the next question should be.

pub mod complexity;
pub mod evaluator;
pub mod handlers;

pub use complexity::ComplexityPredictor;
pub use evaluator::{QuestionContext, TechnicalEvaluation, TechnicalEvaluator};
