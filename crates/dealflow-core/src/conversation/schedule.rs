//! Deadline queue for deferred counterpart replies.
//!
//! Each submission schedules one reply due a fixed delay later. The queue is
//! owned by its session: dropping or clearing it cancels every pending reply,
//! and nothing else can fire on its behalf. With a constant delay deadlines
//! never decrease, so replies come out in submission order.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// A reply waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    /// Monotonic per-queue ticket, starting at 0.
    pub ticket: u64,
    pub due: Instant,
}

#[derive(Debug)]
pub struct DeferredReplies {
    delay: Duration,
    queue: VecDeque<PendingReply>,
    next_ticket: u64,
}

impl DeferredReplies {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            queue: VecDeque::new(),
            next_ticket: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Deadline of the oldest pending reply.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.front().map(|p| p.due)
    }

    /// Schedule one reply due `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) -> PendingReply {
        let pending = PendingReply {
            ticket: self.next_ticket,
            due: now + self.delay,
        };
        self.next_ticket += 1;
        self.queue.push_back(pending);
        pending
    }

    /// Pop the oldest reply if its deadline is at or before `now`.
    pub fn pop_expired(&mut self, now: Instant) -> Option<PendingReply> {
        match self.queue.front() {
            Some(p) if p.due <= now => self.queue.pop_front(),
            _ => None,
        }
    }

    /// Wait for the oldest reply's deadline and pop it. Returns `None`
    /// immediately when nothing is pending.
    ///
    /// Cancel-safe: the reply is only removed after the wait completes.
    pub async fn expired(&mut self) -> Option<PendingReply> {
        let due = self.queue.front()?.due;
        sleep_until(due).await;
        self.queue.pop_front()
    }

    /// Drop every pending reply, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.queue.len();
        self.queue.clear();
        n
    }
}
