//! Deferred work queue.
//!
//! Adapters must not call back into application code while the host is in
//! the middle of a layout pass. Work such as a load-more request or a
//! "is the visible region full" re-check is posted here instead, and the host
//! drains it from its dispatch loop with [`DeferredQueue::take_due`].
//!
//! Tasks are plain values (usually an enum of actions) rather than closures so
//! the owner can execute them with mutable access to itself.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// An entry in the queue (min-heap by due time, then by post order).
#[derive(Debug)]
struct QueueEntry<A> {
    id: TaskId,
    due: Instant,
    action: A,
}

impl<A> PartialEq for QueueEntry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.id == other.id
    }
}

impl<A> Eq for QueueEntry<A> {}

impl<A> PartialOrd for QueueEntry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for QueueEntry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// A queue of fire-once deferred actions.
///
/// There is no cancellation of superseded work: a task that becomes stale is
/// still delivered, and its handler is expected to re-read live state.
#[derive(Debug)]
pub struct DeferredQueue<A> {
    entries: BinaryHeap<QueueEntry<A>>,
    next_id: u64,
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DeferredQueue<A> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
            next_id: 1,
        }
    }

    /// Post an action to run on the next drain.
    pub fn post(&mut self, action: A) -> TaskId {
        self.post_at(Instant::now(), action)
    }

    /// Post an action that becomes due after `delay`.
    pub fn post_delayed(&mut self, delay: Duration, action: A) -> TaskId {
        self.post_at(Instant::now() + delay, action)
    }

    /// Post an action that becomes due at `due`.
    pub fn post_at(&mut self, due: Instant, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(QueueEntry { id, due, action });
        tracing::trace!(target: targets::DEFERRED, task = id.as_u64(), pending = self.entries.len(), "task posted");
        id
    }

    /// Remove and return every action due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<A> {
        let mut due = Vec::new();
        while self.entries.peek().is_some_and(|entry| entry.due <= now) {
            if let Some(entry) = self.entries.pop() {
                due.push(entry.action);
            }
        }
        if !due.is_empty() {
            tracing::trace!(target: targets::DEFERRED, count = due.len(), "tasks due");
        }
        due
    }

    /// Time until the next action becomes due, or `None` if the queue is empty.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.entries
            .peek()
            .map(|entry| entry.due.saturating_duration_since(now))
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
