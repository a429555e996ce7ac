//! Lead buying-intent scoring.
//!
//! Combines a deterministic rule score with an AI (or heuristic) intent classification to place
//! each uploaded lead into a High / Medium / Low intent tier.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
