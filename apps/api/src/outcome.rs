//! Explicit record of which path produced a scoring value.
//!
//! Inference steps that may degrade (embedding similarity, complexity
//! prediction) return `Outcome<T>` instead of swallowing their error, so
//! callers and tests can tell a primary answer from a fallback.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The primary path produced the value.
    Primary(T),
    /// The primary path failed; `value` came from the documented fallback.
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Outcome::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Primary(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Primary(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Primary(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Converts a fallback into a `Degradation` entry for response payloads.
    pub fn degradation(&self, stage: &'static str) -> Option<Degradation> {
        self.reason().map(|reason| Degradation {
            stage,
            reason: reason.to_string(),
        })
    }
}

/// A scoring stage that answered from its fallback path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Degradation {
    pub stage: &'static str,
    pub reason: String,
}

/// Rounds to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
