//! Investor preferences collected during profiling.
//!
//! All adjustments self-correct instead of failing: the amount is clamped and
//! snapped to its slider step, and the equity range pushes the opposite bound
//! so that `low < high` holds after every call.

use serde::Serialize;

use super::opportunity::Sector;

pub const MIN_INVESTMENT: u64 = 50_000;
pub const MAX_INVESTMENT: u64 = 10_000_000;
pub const INVESTMENT_STEP: u64 = 50_000;
pub const DEFAULT_INVESTMENT: u64 = 500_000;

pub const MIN_EQUITY: u8 = 1;
pub const MAX_EQUITY: u8 = 40;

/// Preferred equity window, in whole percent.
///
/// # Invariants
///
/// `MIN_EQUITY <= low < high <= MAX_EQUITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquityRange {
    low: u8,
    high: u8,
}

impl Default for EquityRange {
    fn default() -> Self {
        Self { low: 5, high: 20 }
    }
}

impl EquityRange {
    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    /// Move the lower bound. Raising it to or past `high` pushes `high` up by
    /// the same delta.
    pub fn set_low(&mut self, value: u8) {
        let value = value.clamp(MIN_EQUITY, MAX_EQUITY - 1);
        if value >= self.high {
            let delta = value - self.low;
            self.high = self.high.saturating_add(delta).clamp(value + 1, MAX_EQUITY);
        }
        self.low = value;
    }

    /// Move the upper bound. Lowering it to or below `low` pushes `low` down
    /// by the same delta.
    pub fn set_high(&mut self, value: u8) {
        let value = value.clamp(MIN_EQUITY + 1, MAX_EQUITY);
        if value <= self.low {
            let delta = self.high - value;
            self.low = self.low.saturating_sub(delta).clamp(MIN_EQUITY, value - 1);
        }
        self.high = value;
    }
}

/// Session-scoped investor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorPreference {
    investment_amount: u64,
    equity_range: EquityRange,
    selected_tags: Vec<Sector>,
}

impl Default for InvestorPreference {
    fn default() -> Self {
        Self {
            investment_amount: DEFAULT_INVESTMENT,
            equity_range: EquityRange::default(),
            selected_tags: Vec::new(),
        }
    }
}

impl InvestorPreference {
    pub fn investment_amount(&self) -> u64 {
        self.investment_amount
    }

    pub fn equity_range(&self) -> EquityRange {
        self.equity_range
    }

    /// Selected sectors, in the order they were toggled on. Empty means
    /// every sector.
    pub fn selected_tags(&self) -> &[Sector] {
        &self.selected_tags
    }

    /// Clamp into range and snap to the nearest slider step.
    pub fn set_investment_amount(&mut self, amount: u64) {
        let clamped = amount.clamp(MIN_INVESTMENT, MAX_INVESTMENT);
        let snapped = (clamped + INVESTMENT_STEP / 2) / INVESTMENT_STEP * INVESTMENT_STEP;
        self.investment_amount = snapped.clamp(MIN_INVESTMENT, MAX_INVESTMENT);
    }

    pub fn set_equity_low(&mut self, value: u8) {
        self.equity_range.set_low(value);
    }

    pub fn set_equity_high(&mut self, value: u8) {
        self.equity_range.set_high(value);
    }

    /// Add the sector if absent, remove it otherwise. Returns whether the
    /// sector is selected afterwards.
    pub fn toggle_tag(&mut self, sector: Sector) -> bool {
        if let Some(pos) = self.selected_tags.iter().position(|s| *s == sector) {
            self.selected_tags.remove(pos);
            false
        } else {
            self.selected_tags.push(sector);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(low: u8, high: u8) -> EquityRange {
        EquityRange { low, high }
    }

    #[test]
    fn test_default_preference() {
        let pref = InvestorPreference::default();
        assert_eq!(pref.investment_amount(), 500_000);
        assert_eq!(pref.equity_range(), range(5, 20));
        assert!(pref.selected_tags().is_empty());
    }

    #[test]
    fn test_raising_low_past_high_pushes_high_by_delta() {
        let mut r = range(5, 20);
        r.set_low(25);
        assert_eq!(r.low(), 25);
        assert_eq!(r.high(), 40);

        let mut r = range(5, 10);
        r.set_low(12);
        assert_eq!((r.low(), r.high()), (12, 17));
    }

    #[test]
    fn test_low_equal_to_high_is_pushed() {
        let mut r = range(5, 20);
        r.set_low(20);
        assert!(r.low() < r.high());
        assert_eq!(r.low(), 20);
    }

    #[test]
    fn test_lowering_high_below_low_pushes_low_by_delta() {
        let mut r = range(10, 20);
        r.set_high(8);
        assert_eq!((r.low(), r.high()), (1, 8));

        let mut r = range(15, 18);
        r.set_high(14);
        assert_eq!((r.low(), r.high()), (11, 14));
    }

    #[test]
    fn test_bounds_at_edges_keep_invariant() {
        let mut r = range(5, 20);
        r.set_low(40);
        assert_eq!((r.low(), r.high()), (39, 40));

        let mut r = range(5, 20);
        r.set_high(0);
        assert_eq!((r.low(), r.high()), (1, 2));
    }

    #[test]
    fn test_adjustment_sequence_preserves_invariant() {
        let mut r = EquityRange::default();
        let moves: [(bool, u8); 12] = [
            (true, 39),
            (false, 3),
            (true, 1),
            (false, 40),
            (true, 40),
            (false, 1),
            (true, 0),
            (false, 2),
            (true, 2),
            (false, 25),
            (true, 24),
            (false, 24),
        ];
        for (is_low, value) in moves {
            if is_low {
                r.set_low(value);
            } else {
                r.set_high(value);
            }
            assert!(r.low() < r.high(), "violated after {is_low} {value}: {r:?}");
            assert!(r.low() >= MIN_EQUITY && r.high() <= MAX_EQUITY);
        }
    }

    #[test]
    fn test_investment_clamped_and_snapped() {
        let mut pref = InvestorPreference::default();
        pref.set_investment_amount(0);
        assert_eq!(pref.investment_amount(), MIN_INVESTMENT);
        pref.set_investment_amount(u64::MAX);
        assert_eq!(pref.investment_amount(), MAX_INVESTMENT);
        pref.set_investment_amount(1_230_000);
        assert_eq!(pref.investment_amount(), 1_250_000);
        pref.set_investment_amount(1_220_000);
        assert_eq!(pref.investment_amount(), 1_200_000);
    }

    #[test]
    fn test_toggle_tag() {
        let mut pref = InvestorPreference::default();
        assert!(pref.toggle_tag(Sector::FinTech));
        assert!(pref.toggle_tag(Sector::EdTech));
        assert_eq!(pref.selected_tags(), &[Sector::FinTech, Sector::EdTech]);
        assert!(!pref.toggle_tag(Sector::FinTech));
        assert_eq!(pref.selected_tags(), &[Sector::EdTech]);
    }
}
