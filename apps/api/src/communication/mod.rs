// Communication track: statistical features, readability and the
// multi-regressor scorer with its keyword adjustment.

pub mod features;
pub mod handlers;
pub mod readability;
pub mod scorer;

pub use scorer::{CommunicationEvaluation, CommunicationScorer, ScoringError};
