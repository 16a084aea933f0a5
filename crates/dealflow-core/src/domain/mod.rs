//! Domain models for the dealflow engine.
//!
//! Canonical definitions for the core entities:
//! - `OpportunityRecord`: immutable catalog entry
//! - `InvestorPreference`: profiling input with self-correcting ranges
//! - `DealParameters`: validated scoring input
//! - `ConversationMessage`: append-only log entry

pub mod deal;
pub mod error;
pub mod message;
pub mod opportunity;
pub mod preference;

// Re-export main types and errors
pub use deal::DealParameters;
pub use error::{DealflowError, Result};
pub use message::{ConversationMessage, SpeakerRole};
pub use opportunity::{CounterpartProfile, OpportunityRecord, Score, Sector};
pub use preference::{EquityRange, InvestorPreference};
