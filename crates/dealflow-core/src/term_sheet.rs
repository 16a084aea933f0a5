//! Term sheet preview generated from deal parameters.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::DealParameters;
use crate::format::{format_currency, format_percent};
use crate::scoring::DealAssessment;

/// Equity at or above this percentage earns the investor a board seat.
pub const BOARD_SEAT_EQUITY: f64 = 15.0;

pub const KEY_CONDITIONS: [&str; 4] = [
    "Satisfactory completion of due diligence",
    "Approval of final legal documentation",
    "No material adverse change prior to closing",
    "Customary representations and warranties",
];

/// Board representation granted by the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardRights {
    InvestorSeat,
    ObserverOnly,
}

impl BoardRights {
    pub fn for_equity(equity_percent: f64) -> Self {
        if equity_percent >= BOARD_SEAT_EQUITY {
            BoardRights::InvestorSeat
        } else {
            BoardRights::ObserverOnly
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            BoardRights::InvestorSeat => "1 Investor Seat",
            BoardRights::ObserverOnly => "Observer Rights Only",
        }
    }
}

/// One labelled line of the rendered sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermLine {
    pub label: &'static str,
    pub value: String,
}

/// Seed-round term sheet derived from one set of deal parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermSheet {
    pub issued_on: NaiveDate,
    pub investment: u64,
    pub equity_percent: f64,
    pub pre_money: i64,
    pub post_money: u64,
    pub board: BoardRights,
}

impl TermSheet {
    pub fn from_deal(params: &DealParameters, issued_on: NaiveDate) -> Self {
        let assessment = DealAssessment::assess(params);
        Self {
            issued_on,
            investment: params.investment(),
            equity_percent: params.equity_percent(),
            pre_money: assessment.pre_money,
            post_money: assessment.post_money,
            board: BoardRights::for_equity(params.equity_percent()),
        }
    }

    /// Rows in display order: deal-derived terms first, then the fixed
    /// seed-round boilerplate.
    pub fn lines(&self) -> Vec<TermLine> {
        let line = |label, value: String| TermLine { label, value };
        vec![
            line("Investment Amount", format_currency(self.investment as i64)),
            line("Equity Stake", format_percent(self.equity_percent)),
            line("Pre-Money Valuation", format_currency(self.pre_money)),
            line("Post-Money Valuation", format_currency(self.post_money as i64)),
            line("Investment Type", "Seed Round -- Priced Equity".into()),
            line("Share Class", "Series Seed Preferred".into()),
            line("Liquidation Preference", "1x Non-Participating".into()),
            line("Anti-Dilution", "Broad-Based Weighted Average".into()),
            line("Board Seat", self.board.text().into()),
            line("Pro-Rata Rights", "Yes -- for future rounds".into()),
            line("Vesting Schedule", "4-year, 1-year cliff".into()),
            line("Information Rights", "Quarterly financials & annual audits".into()),
        ]
    }

    pub fn key_conditions(&self) -> &'static [&'static str] {
        &KEY_CONDITIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_valuations_follow_scoring() {
        let params = DealParameters::new(2_000_000, 10.0).unwrap();
        let sheet = TermSheet::from_deal(&params, date());
        assert_eq!(sheet.post_money, 20_000_000);
        assert_eq!(sheet.pre_money, 18_000_000);

        let lines = sheet.lines();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0].value, "$2.0M");
        assert_eq!(lines[1].value, "10%");
        assert_eq!(lines[2].value, "$18.0M");
        assert_eq!(lines[3].value, "$20.0M");
    }

    #[test]
    fn test_board_seat_threshold() {
        let below = DealParameters::new(1_000_000, 14.5).unwrap();
        let at = DealParameters::new(1_000_000, 15.0).unwrap();
        assert_eq!(
            TermSheet::from_deal(&below, date()).board,
            BoardRights::ObserverOnly
        );
        assert_eq!(
            TermSheet::from_deal(&at, date()).board,
            BoardRights::InvestorSeat
        );
    }

    #[test]
    fn test_serializes() {
        let params = DealParameters::new(750_000, 12.5).unwrap();
        let json = serde_json::to_value(TermSheet::from_deal(&params, date())).unwrap();
        assert_eq!(json["issued_on"], "2026-01-15");
        assert_eq!(json["board"], "observer_only");
        assert_eq!(json["post_money"], 6_000_000);
    }
}
