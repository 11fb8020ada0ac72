use crate::time::Time;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// An event waiting in the queue.
///
/// Ordered by fire time, then by scheduling order so that events due at the
/// same instant run FIFO.
#[derive(Debug)]
struct Scheduled<E> {
    at: Time,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    // Reversed: BinaryHeap is a max-heap and the earliest event must come out first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .0
            .total_cmp(&self.at.0)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Simulation clock plus pending event queue.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Time,
    next_seq: u64,
    queue: BinaryHeap<Scheduled<E>>,
}

impl<E: std::fmt::Debug> Scheduler<E> {
    pub fn new() -> Self {
        Scheduler {
            now: Time::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> Time {
        self.now
    }

    /// Fire time of the earliest pending event.
    pub fn peek_time(&self) -> Option<Time> {
        self.queue.peek().map(|s| s.at)
    }

    /// Schedules `event` at `at`. Times in the past are pulled up to `now`.
    pub fn schedule_at(&mut self, at: Time, event: E) {
        debug_assert!(at >= self.now, "event scheduled in the past: {} < {}", at, self.now);
        let at = if at < self.now { self.now } else { at };
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(%at, seq, ?event, "schedule");
        self.queue.push(Scheduled { at, seq, event });
    }

    pub fn schedule_in(&mut self, delay: f64, event: E) {
        self.schedule_at(self.now + delay.max(0.0), event);
    }

    /// Pops the earliest event if it fires strictly before `horizon`, advancing
    /// the clock to its fire time.
    pub fn pop_before(&mut self, horizon: Time) -> Option<E> {
        if self.queue.peek()?.at >= horizon {
            return None;
        }
        let next = self.queue.pop()?;
        self.now = next.at;
        Some(next.event)
    }

    /// Moves the clock forward to `t` without running anything.
    pub fn advance_to(&mut self, t: Time) {
        if t > self.now {
            self.now = t;
        }
    }
}

impl<E: std::fmt::Debug> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
