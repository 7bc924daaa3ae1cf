//! Claim validation, risk scoring, and the review workflow that consumes them.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
