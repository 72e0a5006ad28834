//! Request queues.
//!
//! Three stages mediate between the host's request stream and the
//! timing-accurate completion stream:
//! 1. **`IngressQueue`:** bounded, arrival-ordered; enqueue fails without
//!    growing when full (backpressure, not an error).
//! 2. **`InFlightQueue`:** requests whose column command has issued, ordered
//!    by finish cycle so completions drain in the order they become ready.
//! 3. **`CompletionQueue`:** finished requests awaiting retrieval, FIFO.
//!
//! A request is in exactly one stage at a time; nothing is duplicated or
//! dropped between submit and retrieve.

use std::collections::VecDeque;

use crate::request::{Completion, Request};

/// Bounded, arrival-ordered queue of accepted requests.
#[derive(Debug)]
pub struct IngressQueue {
    queue: VecDeque<Request>,
    capacity: usize,
}

impl IngressQueue {
    /// Creates an empty queue with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// Attempts to enqueue a request.
    ///
    /// # Arguments
    ///
    /// * `request` - The request to admit.
    ///
    /// # Errors
    ///
    /// Returns the request unchanged when the queue is full; nothing is
    /// mutated in that case.
    pub fn try_push(&mut self, request: Request) -> Result<(), Request> {
        if self.is_full() {
            return Err(request);
        }
        self.queue.push_back(request);
        Ok(())
    }

    /// Returns the request at `index` (arrival order, 0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Request> {
        self.queue.get(index)
    }

    /// Removes and returns the request at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range (scheduler bug).
    pub fn remove(&mut self, index: usize) -> Request {
        match self.queue.remove(index) {
            Some(request) => request,
            None => panic!("ingress index {index} out of range"),
        }
    }

    /// Iterates requests in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.queue.iter()
    }
}

/// Issued requests ordered by the cycle their data transfer finishes.
///
/// Insertion keeps the queue sorted by finish cycle, stable for ties, so
/// draining the front yields completions in the order they become ready.
#[derive(Debug, Default)]
pub struct InFlightQueue {
    queue: VecDeque<Completion>,
}

impl InFlightQueue {
    /// Creates an empty in-flight set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of in-flight requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no requests are in flight.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Inserts a request that will finish at `completion.finish_cycle`.
    pub fn insert(&mut self, completion: Completion) {
        let at = self
            .queue
            .partition_point(|c| c.finish_cycle <= completion.finish_cycle);
        self.queue.insert(at, completion);
    }

    /// Removes and returns the next completion due at or before `cycle`.
    pub fn pop_due(&mut self, cycle: u64) -> Option<Completion> {
        if self.queue.front()?.finish_cycle <= cycle {
            self.queue.pop_front()
        } else {
            None
        }
    }
}

/// Finished requests awaiting retrieval by the host.
#[derive(Debug, Default)]
pub struct CompletionQueue {
    queue: VecDeque<Completion>,
}

impl CompletionQueue {
    /// Creates an empty completion queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retrievable completions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is retrievable.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Appends a completion in the order it became ready.
    pub fn push(&mut self, completion: Completion) {
        self.queue.push_back(completion);
    }

    /// Removes and returns the oldest completion, if any.
    pub fn pop(&mut self) -> Option<Completion> {
        self.queue.pop_front()
    }
}
