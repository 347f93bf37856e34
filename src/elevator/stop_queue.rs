use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::shared::Request;

/// A queued request and the proximity score it was given when it was queued.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledStop {
    request: Request,
    proximity_score: f64,
    sequence: u64,
}

impl ScheduledStop {
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn proximity_score(&self) -> f64 {
        self.proximity_score
    }
}

impl Ord for ScheduledStop {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest score first, oldest first on ties.
        other
            .proximity_score
            .total_cmp(&self.proximity_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for ScheduledStop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledStop {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledStop {}

/// Min-priority queue of stops keyed by proximity score.
#[derive(Debug, Default)]
pub struct StopQueue {
    stops: BinaryHeap<ScheduledStop>,
    next_sequence: u64,
}

impl StopQueue {
    pub fn new() -> StopQueue {
        StopQueue::default()
    }

    pub fn push(&mut self, request: Request, proximity_score: f64) -> ScheduledStop {
        let stop = ScheduledStop {
            request,
            proximity_score,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.stops.push(stop);
        stop
    }

    pub fn pop(&mut self) -> Option<ScheduledStop> {
        self.stops.pop()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
