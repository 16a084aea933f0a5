//! Domain-level error taxonomy for the dealflow engine.

use crate::workflow::Stage;

/// Dealflow domain errors.
///
/// Every variant is local and recoverable: a rejected intent leaves the
/// workflow exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum DealflowError {
    #[error("invalid equity percentage: {0} (must be greater than zero)")]
    InvalidEquity(f64),

    #[error("valuation out of range for investment {investment} at {equity_percent}% equity")]
    ValuationOverflow { investment: u64, equity_percent: f64 },

    #[error("score out of range: {0} (must be within 0..=100)")]
    InvalidScore(u8),

    #[error("intent {intent} is not valid in stage {stage}")]
    InvalidTransition { stage: Stage, intent: &'static str },

    #[error("record not found: {0}")]
    UnknownRecord(u32),

    #[error("unknown sector: {0}")]
    UnknownSector(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dealflow domain operations.
pub type Result<T> = std::result::Result<T, DealflowError>;
