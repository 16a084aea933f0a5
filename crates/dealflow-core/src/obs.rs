//! Structured observability hooks for workflow and conversation events.
//!
//! This module provides:
//! - Session-scoped tracing spans via the `SessionSpan` RAII guard
//! - Emission functions with stable `event` keys for each lifecycle step
//!
//! Events are emitted at `info!` level unless noted; filter with `RUST_LOG`.

use tracing::{debug, info};
use uuid::Uuid;

use crate::scoring::DealAssessment;
use crate::workflow::Stage;

/// RAII guard that enters a conversation-scoped span.
///
/// ```ignore
/// let _span = SessionSpan::enter(session.id(), "MediSync");
/// // tracing calls here carry session_id and record
/// ```
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    pub fn enter(session_id: Uuid, record: &str) -> Self {
        let span = tracing::info_span!("dealflow.session", session_id = %session_id, record = %record);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: the workflow moved between stages.
pub fn emit_transition(from: Stage, to: Stage, intent: &str) {
    info!(event = "workflow.transition", from = %from, to = %to, intent = %intent);
}

/// Emit event: an intent was refused in the current stage (debug level).
pub fn emit_intent_rejected(stage: Stage, intent: &str) {
    debug!(event = "workflow.intent_rejected", stage = %stage, intent = %intent);
}

/// Emit event: a conversation session began.
pub fn emit_conversation_started(session_id: Uuid, record: &str) {
    info!(event = "conversation.started", session_id = %session_id, record = %record);
}

/// Emit event: a user message was appended and a reply scheduled.
pub fn emit_message_submitted(session_id: Uuid, seq: u64, pending: usize) {
    info!(
        event = "conversation.message_submitted",
        session_id = %session_id,
        seq = seq,
        pending_replies = pending,
    );
}

/// Emit event: a deferred counterpart reply landed in the log.
pub fn emit_reply_delivered(session_id: Uuid, seq: u64, template: &str) {
    info!(
        event = "conversation.reply_delivered",
        session_id = %session_id,
        seq = seq,
        template = %template,
    );
}

/// Emit event: a session ended, dropping any replies still pending.
pub fn emit_conversation_closed(session_id: Uuid, messages: usize, cancelled: usize) {
    info!(
        event = "conversation.closed",
        session_id = %session_id,
        messages = messages,
        cancelled_replies = cancelled,
    );
}

/// Emit event: deal parameters were scored (debug level).
pub fn emit_deal_assessed(assessment: &DealAssessment) {
    debug!(
        event = "deal.assessed",
        investment = assessment.investment,
        equity_percent = assessment.equity_percent,
        post_money = assessment.post_money,
        probability = assessment.probability,
        label = %assessment.label,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_span_create() {
        let _span = SessionSpan::enter(Uuid::new_v4(), "MediSync");
        emit_transition(Stage::Profiling, Stage::Discovery, "proceed");
    }
}
