//! Global atomic counters for engine observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single `tracing::info!`
//! event (e.g. when a CLI session ends).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters.
pub struct Metrics {
    sessions_started: AtomicU64,
    messages_submitted: AtomicU64,
    replies_delivered: AtomicU64,
    replies_cancelled: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            sessions_started: AtomicU64::new(0),
            messages_submitted: AtomicU64::new(0),
            replies_delivered: AtomicU64::new(0),
            replies_cancelled: AtomicU64::new(0),
        }
    }

    pub fn inc_sessions_started(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "sessions_started", "counter incremented");
    }

    pub fn inc_messages_submitted(&self) {
        self.messages_submitted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "messages_submitted", "counter incremented");
    }

    pub fn inc_replies_delivered(&self) {
        self.replies_delivered.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "replies_delivered", "counter incremented");
    }

    pub fn add_replies_cancelled(&self, n: u64) {
        if n == 0 {
            return;
        }
        self.replies_cancelled.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "replies_cancelled", n, "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            sessions_started = self.sessions_started(),
            messages_submitted = self.messages_submitted(),
            replies_delivered = self.replies_delivered(),
            replies_cancelled = self.replies_cancelled(),
        );
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started.load(Ordering::Relaxed)
    }

    pub fn messages_submitted(&self) -> u64 {
        self.messages_submitted.load(Ordering::Relaxed)
    }

    pub fn replies_delivered(&self) -> u64 {
        self.replies_delivered.load(Ordering::Relaxed)
    }

    pub fn replies_cancelled(&self) -> u64 {
        self.replies_cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Local instance: the global is shared with every other test in the binary.
    #[test]
    fn test_counters_increment() {
        let m = Metrics::new();
        m.inc_sessions_started();
        m.inc_messages_submitted();
        m.inc_messages_submitted();
        m.inc_replies_delivered();
        m.add_replies_cancelled(0);
        m.add_replies_cancelled(3);
        assert_eq!(m.sessions_started(), 1);
        assert_eq!(m.messages_submitted(), 2);
        assert_eq!(m.replies_delivered(), 1);
        assert_eq!(m.replies_cancelled(), 3);
        m.flush();
    }
}
