//! Conversation messages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    /// The investor driving the workflow.
    User,
    /// The simulated founder representative.
    Counterpart,
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRole::User => f.write_str("user"),
            SpeakerRole::Counterpart => f.write_str("counterpart"),
        }
    }
}

/// One entry of an append-only conversation log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationMessage {
    /// Arrival order within the log, starting at 0 for the greeting.
    pub seq: u64,
    pub role: SpeakerRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}
