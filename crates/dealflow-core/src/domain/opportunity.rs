//! Opportunity records and the fixed sector taxonomy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{DealflowError, Result};

/// Fixed set of sector tags an opportunity can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Sector {
    #[serde(rename = "SaaS")]
    Saas,
    #[serde(rename = "FinTech")]
    FinTech,
    #[serde(rename = "HealthTech")]
    HealthTech,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "EdTech")]
    EdTech,
    #[serde(rename = "CleanTech")]
    CleanTech,
}

impl Sector {
    /// Every sector, in display order.
    pub const ALL: [Sector; 6] = [
        Sector::Saas,
        Sector::FinTech,
        Sector::HealthTech,
        Sector::AiMl,
        Sector::EdTech,
        Sector::CleanTech,
    ];

    /// Display label, also the text the catalog filter matches against.
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Saas => "SaaS",
            Sector::FinTech => "FinTech",
            Sector::HealthTech => "HealthTech",
            Sector::AiMl => "AI/ML",
            Sector::EdTech => "EdTech",
            Sector::CleanTech => "CleanTech",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = DealflowError;

    /// Case-insensitive; `aiml` and `ai-ml` are accepted for `AI/ML`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], "/");
        Sector::ALL
            .into_iter()
            .find(|sector| {
                let label = sector.label().to_ascii_lowercase();
                label == wanted || label.replace('/', "") == wanted
            })
            .ok_or_else(|| DealflowError::UnknownSector(s.to_string()))
    }
}

/// An integer score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Build a score from runtime input.
    pub fn new(value: u8) -> Result<Self> {
        if value > 100 {
            return Err(DealflowError::InvalidScore(value));
        }
        Ok(Self(value))
    }

    /// Build a score for seed data; out-of-range values fail const evaluation.
    pub const fn seeded(value: u8) -> Self {
        assert!(value <= 100, "score must be within 0..=100");
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// An immutable fundable entity in the catalog.
///
/// Records are compiled into the binary and never mutated; every other
/// component only ever sees `&'static OpportunityRecord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityRecord {
    pub id: u32,
    pub name: &'static str,
    pub sector: Sector,
    /// Funding ask in whole currency units.
    pub funding_ask: u64,
    /// Equity offered, in percent.
    pub equity_offered: f64,
    pub market_fit: Score,
    pub risk_score: Score,
    pub traction: Score,
    pub summary: &'static str,
    pub highlights: &'static [&'static str],
    pub risks: &'static [&'static str],
}

/// A member of the simulated investor panel with a precomputed fit score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterpartProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub focus: &'static str,
    pub fit_score: Score,
}
