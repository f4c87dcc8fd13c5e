//! Static question banks, loaded once at startup and shared read-only.

pub mod communication;
pub mod loader;
pub mod technical;

pub use communication::CommunicationBank;
pub use technical::TechnicalBank;
