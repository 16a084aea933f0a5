//! Read-only snapshots handed to the rendering layer.

use serde::Serialize;

use super::stage::Stage;
use crate::domain::{
    ConversationMessage, DealParameters, InvestorPreference, OpportunityRecord, Sector,
};
use crate::scoring::{DealAssessment, ScoreKind, ScoreTone};

/// Scores and tones shown next to a selected record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub record: &'static OpportunityRecord,
    pub deal: DealParameters,
    pub assessment: DealAssessment,
    pub market_fit_tone: ScoreTone,
    pub risk_tone: ScoreTone,
    pub traction_tone: ScoreTone,
}

impl DetailView {
    pub fn new(record: &'static OpportunityRecord, deal: DealParameters) -> Self {
        Self {
            record,
            deal,
            assessment: DealAssessment::assess(&deal),
            market_fit_tone: ScoreTone::classify(ScoreKind::MarketFit, record.market_fit),
            risk_tone: ScoreTone::classify(ScoreKind::Risk, record.risk_score),
            traction_tone: ScoreTone::classify(ScoreKind::Traction, record.traction),
        }
    }
}

/// What the current stage shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageView<'a> {
    Profiling {
        preference: &'a InvestorPreference,
    },
    Discovery {
        query: &'a str,
        tags: &'a [Sector],
        records: Vec<&'static OpportunityRecord>,
    },
    Detail(DetailView),
    Conversation {
        record: &'static OpportunityRecord,
        messages: &'a [ConversationMessage],
        pending_replies: usize,
    },
}

impl StageView<'_> {
    pub fn stage(&self) -> Stage {
        match self {
            StageView::Profiling { .. } => Stage::Profiling,
            StageView::Discovery { .. } => Stage::Discovery,
            StageView::Detail(_) => Stage::Detail,
            StageView::Conversation { .. } => Stage::Conversation,
        }
    }
}
