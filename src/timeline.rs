//! Delayed actions keyed by due time.
//!
//! Every entry carries the [`Epoch`] it was scheduled in. Scheduled work is
//! never cancelled; instead the session bumps its epoch on game over and on
//! restart, and entries from an older epoch are dropped when they come due.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::state::InsectId;

/// Monotonic time in milliseconds, as supplied by the host.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(pub u32);

impl Epoch {
    pub fn next(self) -> Epoch {
        Epoch(self.0.wrapping_add(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedAction {
    Spawn,
    RemoveInsect(InsectId),
    /// One beat of the elapsed-time clock.
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub due: Millis,
    pub epoch: Epoch,
    pub action: TimedAction,
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    item: Scheduled,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.item.due == other.item.due && self.seq == other.seq
    }
}
impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap: earliest due (then earliest scheduled) must compare greatest.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .item
            .due
            .cmp(&self.item.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub struct Timeline {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, epoch: Epoch, action: TimedAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { seq, item: Scheduled { due, epoch, action } });
    }

    /// Removes and returns the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Scheduled> {
        if self.heap.peek()?.item.due > now {
            return None;
        }
        self.heap.pop().map(|e| e.item)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.heap.peek().map(|e| e.item.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
