// Adaptive assessment loop. Sessions are owned by the caller and
// round-tripped through every call; nothing is kept server-side.

pub mod handlers;
pub mod orchestrator;
