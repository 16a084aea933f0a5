//! Deal scoring engine.
//!
//! Pure functions deriving implied valuation, acceptance probability and
//! aggregate fit from numeric inputs. The acceptance heuristic evaluates its
//! bands in a fixed order (valuation, equity, investment) and clamps the sum
//! to `[MIN_PROBABILITY, MAX_PROBABILITY]`; identical input always yields
//! identical output.

use std::fmt;

use serde::Serialize;

use crate::domain::{DealParameters, DealflowError, Result, Score};

pub const BASELINE_PROBABILITY: i32 = 50;
pub const MIN_PROBABILITY: u8 = 5;
pub const MAX_PROBABILITY: u8 = 98;

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

fn checked_equity(equity_percent: f64) -> Result<f64> {
    if !equity_percent.is_finite() || equity_percent <= 0.0 {
        return Err(DealflowError::InvalidEquity(equity_percent));
    }
    Ok(equity_percent)
}

/// Unrounded `investment / (equity / 100)`.
fn raw_valuation(investment: u64, equity_percent: f64) -> Result<f64> {
    let equity = checked_equity(equity_percent)?;
    Ok(valuation_of(investment, equity))
}

fn valuation_of(investment: u64, equity_percent: f64) -> f64 {
    investment as f64 / (equity_percent / 100.0)
}

/// First post-money value that no longer fits an `i64`.
const POST_MONEY_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Rounded post-money and signed pre-money for an unrounded valuation.
fn settle(investment: u64, equity_percent: f64, valuation: f64) -> Result<(u64, i64)> {
    let overflow = || DealflowError::ValuationOverflow {
        investment,
        equity_percent,
    };
    let post = valuation.round();
    if !(post < POST_MONEY_LIMIT) {
        return Err(overflow());
    }
    let post_money = post as u64;
    let pre_money = i64::try_from(i128::from(post_money) - i128::from(investment))
        .map_err(|_| overflow())?;
    Ok((post_money, pre_money))
}

/// Implied post-money valuation, rounded to the nearest whole currency unit.
///
/// # Errors
///
/// Returns `DealflowError::InvalidEquity` if `equity_percent` is not a
/// finite, strictly positive number, and `DealflowError::ValuationOverflow`
/// when the valuation does not fit the signed 64-bit range.
pub fn implied_valuation(investment: u64, equity_percent: f64) -> Result<u64> {
    let valuation = raw_valuation(investment, equity_percent)?;
    Ok(settle(investment, equity_percent, valuation)?.0)
}

/// Pre-money valuation: post-money (the implied valuation) minus the
/// investment. Negative only for equity above 100%.
pub fn pre_money_valuation(investment: u64, equity_percent: f64) -> Result<i64> {
    let valuation = raw_valuation(investment, equity_percent)?;
    Ok(settle(investment, equity_percent, valuation)?.1)
}

// ---------------------------------------------------------------------------
// Acceptance probability
// ---------------------------------------------------------------------------

fn valuation_delta(valuation: f64) -> i32 {
    if (8_000_000.0..=15_000_000.0).contains(&valuation) {
        25
    } else if (5_000_000.0..=20_000_000.0).contains(&valuation) {
        15
    } else if valuation > 25_000_000.0 {
        -15
    } else {
        5
    }
}

fn equity_delta(equity_percent: f64) -> i32 {
    if (8.0..=18.0).contains(&equity_percent) {
        15
    } else if equity_percent > 25.0 {
        -10
    } else if equity_percent < 5.0 {
        -15
    } else {
        0
    }
}

fn investment_delta(investment: u64) -> i32 {
    if (500_000..=2_500_000).contains(&investment) {
        10
    } else if investment > 3_500_000 {
        -5
    } else {
        0
    }
}

/// Synthetic likelihood, in percent, that a deal would be accepted.
///
/// Starts at [`BASELINE_PROBABILITY`], applies the valuation, equity and
/// investment bands in that order, then clamps to
/// `[MIN_PROBABILITY, MAX_PROBABILITY]`.
pub fn acceptance_probability(investment: u64, equity_percent: f64) -> Result<u8> {
    let valuation = raw_valuation(investment, equity_percent)?;
    Ok(probability_for(investment, equity_percent, valuation))
}

fn probability_for(investment: u64, equity_percent: f64, valuation: f64) -> u8 {
    let mut score = BASELINE_PROBABILITY;
    score += valuation_delta(valuation);
    score += equity_delta(equity_percent);
    score += investment_delta(investment);

    score.clamp(MIN_PROBABILITY as i32, MAX_PROBABILITY as i32) as u8
}

/// Ordered acceptance bands, each inclusive at its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AcceptanceLabel {
    Unlikely,
    Moderate,
    Favorable,
    VeryLikely,
}

impl AcceptanceLabel {
    pub fn from_probability(probability: u8) -> Self {
        match probability {
            80.. => AcceptanceLabel::VeryLikely,
            60..=79 => AcceptanceLabel::Favorable,
            40..=59 => AcceptanceLabel::Moderate,
            _ => AcceptanceLabel::Unlikely,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            AcceptanceLabel::VeryLikely => "Very Likely",
            AcceptanceLabel::Favorable => "Favorable",
            AcceptanceLabel::Moderate => "Moderate",
            AcceptanceLabel::Unlikely => "Unlikely",
        }
    }
}

impl fmt::Display for AcceptanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Everything the detail view shows for one set of deal parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealAssessment {
    pub investment: u64,
    pub equity_percent: f64,
    pub post_money: u64,
    pub pre_money: i64,
    pub probability: u8,
    pub label: AcceptanceLabel,
}

impl DealAssessment {
    /// Score validated parameters. Cannot fail: `DealParameters` guarantees
    /// positive equity and a valuation that fits the signed 64-bit range.
    pub fn assess(params: &DealParameters) -> Self {
        let investment = params.investment();
        let equity = params.equity_percent();
        let valuation = valuation_of(investment, equity);

        // Saturation never triggers for constructed parameters.
        let post_money = valuation.round() as u64;
        let pre_money = (i128::from(post_money) - i128::from(investment))
            .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        let probability = probability_for(investment, equity, valuation);

        Self {
            investment,
            equity_percent: equity,
            post_money,
            pre_money,
            probability,
            label: AcceptanceLabel::from_probability(probability),
        }
    }
}

// ---------------------------------------------------------------------------
// Fit
// ---------------------------------------------------------------------------

/// Mean of the given fit scores, rounded half-up to a whole percentage.
/// `None` when there is nothing to average.
pub fn aggregate_fit<I>(scores: I) -> Option<u8>
where
    I: IntoIterator<Item = Score>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| (sum + u32::from(s.value()), count + 1));
    if count == 0 {
        return None;
    }
    Some(((sum * 2 + count) / (count * 2)) as u8)
}

/// Which scale a score bar is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    MarketFit,
    Risk,
    Traction,
}

/// Traffic-light reading of a score bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTone {
    Strong,
    Fair,
    Weak,
}

impl ScoreTone {
    /// Risk reads inverted: a high risk score is weak.
    pub fn classify(kind: ScoreKind, score: Score) -> Self {
        let v = score.value();
        match kind {
            ScoreKind::Risk => match v {
                51.. => ScoreTone::Weak,
                31..=50 => ScoreTone::Fair,
                _ => ScoreTone::Strong,
            },
            ScoreKind::MarketFit | ScoreKind::Traction => match v {
                76.. => ScoreTone::Strong,
                51..=75 => ScoreTone::Fair,
                _ => ScoreTone::Weak,
            },
        }
    }
}
