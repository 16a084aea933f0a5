//! The workflow state machine.
//!
//! `WorkflowMachine` exclusively owns the session state. The rendering layer
//! sends [`Intent`]s and reads [`StageView`] snapshots; scoring and filtering
//! are pure calls made on its behalf.

use chrono::NaiveDate;
use serde::Serialize;

use super::intent::Intent;
use super::stage::Stage;
use super::view::{DetailView, StageView};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::conversation::{ConversationSession, SubmitOutcome};
use crate::domain::{
    ConversationMessage, DealParameters, DealflowError, InvestorPreference, OpportunityRecord,
    Result,
};
use crate::filter::CatalogFilter;
use crate::obs;
use crate::scoring::{aggregate_fit, DealAssessment};
use crate::term_sheet::TermSheet;

/// A stage change (or a stay, when `from == to`) caused by one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
    pub intent: &'static str,
}

impl Transition {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// The chosen record together with everything tied to it.
#[derive(Debug)]
struct Selection {
    record: &'static OpportunityRecord,
    deal: DealParameters,
    conversation: Option<ConversationSession>,
}

impl Selection {
    fn new(record: &'static OpportunityRecord) -> Self {
        Self {
            record,
            deal: DealParameters::from_sliders(record.funding_ask, record.equity_offered),
            conversation: None,
        }
    }
}

/// Session state owned by the workflow.
///
/// # Invariants
///
/// - `selection` is `Some` whenever `stage >= Stage::Detail`.
/// - A conversation, if any, belongs to `selection.record`.
#[derive(Debug)]
pub struct WorkflowState {
    stage: Stage,
    preference: InvestorPreference,
    query: String,
    selection: Option<Selection>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            stage: Stage::Profiling,
            preference: InvestorPreference::default(),
            query: String::new(),
            selection: None,
        }
    }
}

pub struct WorkflowMachine {
    catalog: &'static Catalog,
    config: EngineConfig,
    state: WorkflowState,
}

impl Default for WorkflowMachine {
    fn default() -> Self {
        Self::new(Catalog::seeded(), EngineConfig::default())
    }
}

impl WorkflowMachine {
    pub fn new(catalog: &'static Catalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            state: WorkflowState::default(),
        }
    }

    // -- accessors ---------------------------------------------------------

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn preference(&self) -> &InvestorPreference {
        &self.state.preference
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn selected(&self) -> Option<&'static OpportunityRecord> {
        self.state.selection.as_ref().map(|s| s.record)
    }

    pub fn deal(&self) -> Option<DealParameters> {
        self.state.selection.as_ref().map(|s| s.deal)
    }

    pub fn conversation(&self) -> Option<&ConversationSession> {
        self.state
            .selection
            .as_ref()
            .and_then(|s| s.conversation.as_ref())
    }

    /// Message log of the current conversation; empty before one starts.
    pub fn messages(&self) -> &[ConversationMessage] {
        self.conversation().map(|c| c.messages()).unwrap_or(&[])
    }

    pub fn has_pending_replies(&self) -> bool {
        self.conversation().is_some_and(|c| c.has_pending())
    }

    /// Records passing the current tag and query filters, in catalog order.
    pub fn visible_records(&self) -> Vec<&'static OpportunityRecord> {
        CatalogFilter::new(self.state.preference.selected_tags(), &self.state.query)
            .apply(self.catalog.records())
    }

    /// Scores for the selected record, available from detail onwards.
    pub fn detail(&self) -> Option<DetailView> {
        self.state
            .selection
            .as_ref()
            .map(|s| DetailView::new(s.record, s.deal))
    }

    /// Indicative term sheet for the current deal parameters.
    pub fn term_sheet(&self, issued_on: NaiveDate) -> Option<TermSheet> {
        self.deal().map(|deal| TermSheet::from_deal(&deal, issued_on))
    }

    /// Mean fit across the counterpart panel.
    pub fn panel_fit(&self) -> Option<u8> {
        aggregate_fit(self.catalog.counterparts().iter().map(|c| c.fit_score))
    }

    // -- intents -----------------------------------------------------------

    /// Apply one intent.
    ///
    /// # Errors
    ///
    /// Returns `DealflowError::InvalidTransition` for an intent the current
    /// stage does not accept and `DealflowError::UnknownRecord` for a select
    /// outside the visible records. State is unchanged on error.
    pub fn apply(&mut self, intent: Intent) -> Result<Transition> {
        let from = self.state.stage;
        let name = intent.name();

        let to = match (from, intent) {
            (Stage::Profiling, Intent::AdjustInvestment(amount)) => {
                self.state.preference.set_investment_amount(amount);
                from
            }
            (Stage::Profiling, Intent::AdjustEquityLow(value)) => {
                self.state.preference.set_equity_low(value);
                from
            }
            (Stage::Profiling, Intent::AdjustEquityHigh(value)) => {
                self.state.preference.set_equity_high(value);
                from
            }
            (Stage::Profiling, Intent::ToggleTag(sector)) => {
                self.state.preference.toggle_tag(sector);
                from
            }
            (Stage::Profiling, Intent::Proceed) => Stage::Discovery,

            (Stage::Discovery, Intent::SetQuery(query)) => {
                self.state.query = query;
                from
            }
            (Stage::Discovery, Intent::Select(id)) => {
                self.select(id)?;
                Stage::Detail
            }
            (Stage::Discovery, Intent::Back) => Stage::Profiling,

            (Stage::Detail, Intent::AdjustDeal {
                investment,
                equity_percent,
            }) => {
                let selection = self.selection_mut(from, name)?;
                selection.deal = DealParameters::from_sliders(investment, equity_percent);
                obs::emit_deal_assessed(&DealAssessment::assess(&selection.deal));
                from
            }
            (Stage::Detail, Intent::StartConversation) => {
                self.start_conversation(from, name)?;
                Stage::Conversation
            }
            (Stage::Detail, Intent::Back) => Stage::Discovery,

            (Stage::Conversation, Intent::Submit(text)) => {
                self.submit(&text);
                from
            }
            (Stage::Conversation, Intent::Back) => Stage::Detail,

            // Submitting without an open conversation is silently ignored.
            (_, Intent::Submit(_)) => {
                obs::emit_intent_rejected(from, name);
                from
            }

            (stage, _) => {
                obs::emit_intent_rejected(stage, name);
                return Err(DealflowError::InvalidTransition {
                    stage,
                    intent: name,
                });
            }
        };

        debug_assert!(from.is_adjacent(to), "illegal jump {from} -> {to}");
        self.state.stage = to;
        if from != to {
            obs::emit_transition(from, to, name);
        }
        Ok(Transition {
            from,
            to,
            intent: name,
        })
    }

    /// Snapshot of what the current stage shows.
    pub fn view(&self) -> StageView<'_> {
        match (self.state.stage, &self.state.selection) {
            (Stage::Profiling, _) => StageView::Profiling {
                preference: &self.state.preference,
            },
            (Stage::Detail, Some(selection)) => {
                StageView::Detail(DetailView::new(selection.record, selection.deal))
            }
            (Stage::Conversation, Some(selection)) => StageView::Conversation {
                record: selection.record,
                messages: selection
                    .conversation
                    .as_ref()
                    .map(|c| c.messages())
                    .unwrap_or(&[]),
                pending_replies: selection
                    .conversation
                    .as_ref()
                    .map_or(0, |c| c.pending_replies()),
            },
            // Detail and Conversation are never entered without a selection.
            (Stage::Discovery | Stage::Detail | Stage::Conversation, _) => StageView::Discovery {
                query: &self.state.query,
                tags: self.state.preference.selected_tags(),
                records: self.visible_records(),
            },
        }
    }

    // -- conversation timing -----------------------------------------------

    /// Wait for the next counterpart reply of the current conversation.
    ///
    /// Replies keep landing while the conversation is hidden behind the
    /// detail stage. Returns `None` at once when nothing is pending.
    /// Cancel-safe.
    pub async fn next_reply(&mut self) -> Option<&ConversationMessage> {
        let conversation = self.state.selection.as_mut()?.conversation.as_mut()?;
        conversation.next_reply().await
    }

    /// Deliver every reply whose deadline has passed.
    pub fn deliver_due(&mut self) -> usize {
        self.state
            .selection
            .as_mut()
            .and_then(|s| s.conversation.as_mut())
            .map_or(0, |c| c.deliver_due())
    }

    // -- internals ---------------------------------------------------------

    fn selection_mut(&mut self, stage: Stage, intent: &'static str) -> Result<&mut Selection> {
        self.state
            .selection
            .as_mut()
            .ok_or(DealflowError::InvalidTransition { stage, intent })
    }

    fn select(&mut self, id: u32) -> Result<()> {
        let record = self
            .visible_records()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(DealflowError::UnknownRecord(id))?;

        let same = self
            .state
            .selection
            .as_ref()
            .is_some_and(|s| std::ptr::eq(s.record, record));
        if !same {
            // Dropping the old selection closes its conversation.
            self.state.selection = Some(Selection::new(record));
        }
        Ok(())
    }

    fn start_conversation(&mut self, stage: Stage, intent: &'static str) -> Result<()> {
        let config = self.config.clone();
        let selection = self.selection_mut(stage, intent)?;
        let live = selection
            .conversation
            .as_ref()
            .is_some_and(|c| !c.is_closed());
        if !live {
            selection.conversation = Some(ConversationSession::start(selection.record, &config));
        }
        Ok(())
    }

    fn submit(&mut self, text: &str) -> SubmitOutcome {
        match self
            .state
            .selection
            .as_mut()
            .and_then(|s| s.conversation.as_mut())
        {
            Some(conversation) => conversation.submit(text),
            None => SubmitOutcome::Ignored,
        }
    }
}
