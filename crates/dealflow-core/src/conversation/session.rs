//! A single conversation with the counterpart of one opportunity.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;
use uuid::Uuid;

use super::schedule::{DeferredReplies, PendingReply};
use super::templates::{greeting, ReplyTemplate};
use crate::config::EngineConfig;
use crate::domain::{ConversationMessage, OpportunityRecord, SpeakerRole};
use crate::metrics::METRICS;
use crate::obs;

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user message was logged and one reply scheduled.
    Accepted { seq: u64, reply_due: Instant },
    /// Blank text or a closed session; nothing changed.
    Ignored,
}

/// Append-only message log plus the replies still owed to it.
///
/// # Invariants
///
/// - `log[i].seq == i`; messages are never reordered or removed.
/// - Once closed, the session neither schedules nor delivers replies, so a
///   log can never receive text meant for another record.
#[derive(Debug)]
pub struct ConversationSession {
    id: Uuid,
    record: &'static OpportunityRecord,
    log: Vec<ConversationMessage>,
    replies: DeferredReplies,
    rng: StdRng,
    closed: bool,
}

impl ConversationSession {
    /// Open a session whose log starts with the counterpart greeting.
    pub fn start(record: &'static OpportunityRecord, config: &EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(record, config.reply_delay(), rng)
    }

    pub fn with_rng(record: &'static OpportunityRecord, delay: Duration, rng: StdRng) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            record,
            log: Vec::new(),
            replies: DeferredReplies::new(delay),
            rng,
            closed: false,
        };
        session.append(SpeakerRole::Counterpart, greeting(record));

        METRICS.inc_sessions_started();
        obs::emit_conversation_started(session.id, record.name);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record(&self) -> &'static OpportunityRecord {
        self.record
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.log
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.replies.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Log a user message and schedule exactly one counterpart reply.
    ///
    /// Blank text is ignored. Submissions are not throttled: several replies
    /// may be pending at once and they land in submission order.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if self.closed || text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let seq = self.append(SpeakerRole::User, text.to_string());
        let pending = self.replies.schedule(Instant::now());

        METRICS.inc_messages_submitted();
        obs::emit_message_submitted(self.id, seq, self.replies.len());

        SubmitOutcome::Accepted {
            seq,
            reply_due: pending.due,
        }
    }

    /// Wait for the oldest pending reply and append it.
    ///
    /// Returns `None` at once when nothing is pending. Cancel-safe, so it can
    /// race user input inside `tokio::select!`.
    pub async fn next_reply(&mut self) -> Option<&ConversationMessage> {
        if self.closed {
            return None;
        }
        let pending = self.replies.expired().await?;
        Some(self.deliver(pending))
    }

    /// Append every reply whose deadline has already passed. Returns how many
    /// landed.
    pub fn deliver_due(&mut self) -> usize {
        if self.closed {
            return 0;
        }
        let now = Instant::now();
        let mut delivered = 0;
        while let Some(pending) = self.replies.pop_expired(now) {
            self.deliver(pending);
            delivered += 1;
        }
        delivered
    }

    /// End the session, cancelling any pending replies. Returns how many
    /// were cancelled. Idempotent.
    pub fn close(&mut self) -> usize {
        if self.closed {
            return 0;
        }
        self.closed = true;
        let cancelled = self.replies.cancel_all();

        METRICS.add_replies_cancelled(cancelled as u64);
        obs::emit_conversation_closed(self.id, self.log.len(), cancelled);
        cancelled
    }

    fn deliver(&mut self, pending: PendingReply) -> &ConversationMessage {
        let template = ReplyTemplate::choose(&mut self.rng);
        let seq = self.append(SpeakerRole::Counterpart, template.render(self.record));

        METRICS.inc_replies_delivered();
        obs::emit_reply_delivered(self.id, seq, template.name());
        tracing::trace!(ticket = pending.ticket, "reply ticket consumed");

        &self.log[seq as usize]
    }

    fn append(&mut self, role: SpeakerRole, text: String) -> u64 {
        let seq = self.log.len() as u64;
        self.log.push(ConversationMessage {
            seq,
            role,
            text,
            sent_at: Utc::now(),
        });
        seq
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        self.close();
    }
}
