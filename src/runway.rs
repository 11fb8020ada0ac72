use crate::aircraft::AircraftId;
use crate::time::Time;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// What an aircraft wants the runway for. The discriminant is the request
/// priority; lower values are served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Landing = 1,
    Takeoff = 2,
}

impl Operation {
    pub fn priority(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Landing => write!(f, "landing"),
            Operation::Takeoff => write!(f, "takeoff"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    pub aircraft: AircraftId,
    pub operation: Operation,
    pub requested_at: Time,
}

#[derive(Debug)]
struct Pending {
    priority: u8,
    seq: u64,
    request: Request,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Min-heap on (priority, seq).
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A pool of interchangeable runway units.
///
/// Requests are granted immediately while a unit is free; otherwise they wait
/// and are granted on release by (priority, arrival order). A held unit is
/// never revoked.
#[derive(Debug)]
pub struct Runway {
    capacity: usize,
    in_use: usize,
    peak: usize,
    next_seq: u64,
    pending: BinaryHeap<Pending>,
}

impl Runway {
    pub fn new(capacity: usize) -> Runway {
        debug_assert!(capacity > 0, "runway capacity must be positive");
        Runway {
            capacity,
            in_use: 0,
            peak: 0,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Highest number of units held at once so far.
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn queued(&self) -> usize {
        self.pending.len()
    }

    /// Returns the request back if it was granted at once, `None` if it was queued.
    pub fn request(&mut self, request: Request) -> Option<Request> {
        if self.in_use < self.capacity {
            self.acquire();
            return Some(request);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            priority: request.operation.priority(),
            seq,
            request,
        });
        None
    }

    /// Frees one unit and hands it to the best waiting request, if any.
    pub fn release(&mut self) -> Option<Request> {
        debug_assert!(self.in_use > 0, "release without a held unit");
        self.in_use = self.in_use.saturating_sub(1);
        let next = self.pending.pop()?;
        self.acquire();
        Some(next.request)
    }

    fn acquire(&mut self) {
        self.in_use += 1;
        self.peak = self.peak.max(self.in_use);
        debug_assert!(self.in_use <= self.capacity, "runway over capacity");
    }
}
