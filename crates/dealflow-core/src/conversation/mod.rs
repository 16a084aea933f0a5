//! Conversation simulator.
//!
//! A session keeps an append-only message log for one opportunity and owes
//! one delayed counterpart reply per accepted user message. Replies are drawn
//! uniformly from a fixed template pool; no language generation happens here.

pub mod schedule;
pub mod session;
pub mod templates;

pub use schedule::{DeferredReplies, PendingReply};
pub use session::{ConversationSession, SubmitOutcome};
pub use templates::{greeting, ReplyTemplate};
