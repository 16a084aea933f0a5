//! Dealflow Core Library
//!
//! Investor-side deal workflow: profile preferences, discover opportunities,
//! score a proposed deal and talk to the counterpart through a simulated,
//! delayed-reply conversation.

pub mod catalog;
pub mod config;
pub mod conversation;
pub mod domain;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod obs;
pub mod scoring;
pub mod telemetry;
pub mod term_sheet;
pub mod workflow;

pub use catalog::Catalog;
pub use config::EngineConfig;
pub use conversation::{ConversationSession, ReplyTemplate, SubmitOutcome};

pub use domain::{
    ConversationMessage, CounterpartProfile, DealParameters, DealflowError, EquityRange,
    InvestorPreference, OpportunityRecord, Result, Score, Sector, SpeakerRole,
};

pub use filter::{filter_catalog, CatalogFilter};
pub use format::{format_ask, format_currency, format_percent};
pub use scoring::{
    acceptance_probability, aggregate_fit, implied_valuation, pre_money_valuation,
    AcceptanceLabel, DealAssessment, ScoreKind, ScoreTone,
};
pub use term_sheet::{BoardRights, TermLine, TermSheet};
pub use workflow::{DetailView, Intent, Stage, StageView, Transition, WorkflowMachine};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
