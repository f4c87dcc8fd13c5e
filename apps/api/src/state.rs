use std::sync::Arc;

use crate::banks::{CommunicationBank, TechnicalBank};
use crate::communication::CommunicationScorer;
use crate::technical::TechnicalEvaluator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub communication_scorer: Arc<CommunicationScorer>,
    pub communication_bank: Arc<CommunicationBank>,
    pub technical_bank: Arc<TechnicalBank>,
    /// Owns the embedding backend and the complexity predictor.
    pub technical_evaluator: Arc<TechnicalEvaluator>,
}
