//! Deal parameters fed to the scoring engine.

use serde::Serialize;

use super::error::{DealflowError, Result};

pub const MIN_DEAL_INVESTMENT: u64 = 100_000;
pub const MAX_DEAL_INVESTMENT: u64 = 5_000_000;
pub const DEAL_INVESTMENT_STEP: u64 = 50_000;
pub const MIN_DEAL_EQUITY: f64 = 1.0;
pub const MAX_DEAL_EQUITY: f64 = 40.0;
pub const DEAL_EQUITY_STEP: f64 = 0.5;

/// Investment amount and equity percentage under negotiation.
///
/// # Invariants
///
/// `equity_percent` is finite and strictly positive, and the implied post-
/// and pre-money valuations fit an `i64`, so scoring a constructed value
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DealParameters {
    investment: u64,
    equity_percent: f64,
}

impl DealParameters {
    /// Validate and build deal parameters.
    ///
    /// # Errors
    ///
    /// Returns `DealflowError::InvalidEquity` when `equity_percent` is zero,
    /// negative, or not finite, and `DealflowError::ValuationOverflow` when
    /// the resulting valuation is out of range.
    pub fn new(investment: u64, equity_percent: f64) -> Result<Self> {
        if !equity_percent.is_finite() || equity_percent <= 0.0 {
            return Err(DealflowError::InvalidEquity(equity_percent));
        }
        crate::scoring::pre_money_valuation(investment, equity_percent)?;
        Ok(Self {
            investment,
            equity_percent,
        })
    }

    /// Build parameters from slider input, clamping into slider bounds and
    /// snapping to slider steps. Never fails: the equity floor is 1%.
    pub fn from_sliders(investment: u64, equity_percent: f64) -> Self {
        let investment = investment.clamp(MIN_DEAL_INVESTMENT, MAX_DEAL_INVESTMENT);
        let investment = ((investment + DEAL_INVESTMENT_STEP / 2) / DEAL_INVESTMENT_STEP
            * DEAL_INVESTMENT_STEP)
            .clamp(MIN_DEAL_INVESTMENT, MAX_DEAL_INVESTMENT);

        let equity = if equity_percent.is_finite() {
            equity_percent
        } else {
            MIN_DEAL_EQUITY
        };
        let equity = ((equity / DEAL_EQUITY_STEP).round() * DEAL_EQUITY_STEP)
            .clamp(MIN_DEAL_EQUITY, MAX_DEAL_EQUITY);

        Self {
            investment,
            equity_percent: equity,
        }
    }

    pub fn investment(&self) -> u64 {
        self.investment
    }

    pub fn equity_percent(&self) -> f64 {
        self.equity_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_positive_equity() {
        assert!(matches!(
            DealParameters::new(1_000_000, 0.0),
            Err(DealflowError::InvalidEquity(_))
        ));
        assert!(DealParameters::new(1_000_000, -5.0).is_err());
        assert!(DealParameters::new(1_000_000, f64::NAN).is_err());
        assert!(DealParameters::new(1_000_000, f64::INFINITY).is_err());
    }

    #[test]
    fn test_new_rejects_unrepresentable_valuation() {
        assert!(matches!(
            DealParameters::new(u64::MAX, 1.0),
            Err(DealflowError::ValuationOverflow { .. })
        ));
        assert!(DealParameters::new(10_000_000_000_000_000_000, 200.0).is_ok());
    }

    #[test]
    fn test_new_accepts_small_positive_equity() {
        let params = DealParameters::new(0, 0.01).unwrap();
        assert_eq!(params.investment(), 0);
        assert_eq!(params.equity_percent(), 0.01);
    }

    #[test]
    fn test_from_sliders_clamps_and_snaps() {
        let params = DealParameters::from_sliders(0, 0.0);
        assert_eq!(params.investment(), MIN_DEAL_INVESTMENT);
        assert_eq!(params.equity_percent(), MIN_DEAL_EQUITY);

        let params = DealParameters::from_sliders(9_000_000, 55.0);
        assert_eq!(params.investment(), MAX_DEAL_INVESTMENT);
        assert_eq!(params.equity_percent(), MAX_DEAL_EQUITY);

        let params = DealParameters::from_sliders(1_830_000, 12.3);
        assert_eq!(params.investment(), 1_850_000);
        assert_eq!(params.equity_percent(), 12.5);

        let params = DealParameters::from_sliders(2_000_000, f64::NAN);
        assert_eq!(params.equity_percent(), MIN_DEAL_EQUITY);
    }
}
