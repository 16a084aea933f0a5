//! User intents sent from the rendering layer.

use crate::domain::Sector;

/// Everything a user can ask the workflow to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    // Profiling
    AdjustInvestment(u64),
    AdjustEquityLow(u8),
    AdjustEquityHigh(u8),
    ToggleTag(Sector),
    Proceed,

    // Discovery
    SetQuery(String),
    Select(u32),

    // Detail
    AdjustDeal { investment: u64, equity_percent: f64 },
    StartConversation,

    // Conversation
    Submit(String),

    // Any stage but profiling
    Back,
}

impl Intent {
    /// Stable name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AdjustInvestment(_) => "adjust_investment",
            Intent::AdjustEquityLow(_) => "adjust_equity_low",
            Intent::AdjustEquityHigh(_) => "adjust_equity_high",
            Intent::ToggleTag(_) => "toggle_tag",
            Intent::Proceed => "proceed",
            Intent::SetQuery(_) => "set_query",
            Intent::Select(_) => "select",
            Intent::AdjustDeal { .. } => "adjust_deal",
            Intent::StartConversation => "start_conversation",
            Intent::Submit(_) => "submit",
            Intent::Back => "back",
        }
    }
}
