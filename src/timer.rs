//! Deferred callbacks driven by the event loop's tick
//!
//! Payloads are plain data describing what to do once the deadline passes;
//! the owner drains due payloads on every tick and applies them. There is no
//! cancel: a payload that is no longer relevant must be harmless to apply.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry<T> {
    /// scheduling order, breaks ties between equal deadlines
    seq: u64,
    due: Instant,
    payload: T,
}

/// Queue of payloads waiting for their deadline
#[derive(Debug)]
pub struct DeferredQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `payload` to become due `after` from `now`.
    pub fn schedule(&mut self, after: Duration, now: Instant, payload: T) {
        self.entries.push(Entry {
            seq: self.next_seq,
            due: now + after,
            payload,
        });
        self.next_seq += 1;
    }

    /// Remove and return every payload due at `now`, earliest first.
    /// Payloads with the same deadline come out in scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;

        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.payload).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
