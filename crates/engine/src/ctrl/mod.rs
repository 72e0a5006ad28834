//! Memory controller.
//!
//! The controller owns everything that changes while the simulation runs:
//! 1. **Bank arena:** one `Bank` per (rank, bank), flat-indexed.
//! 2. **Queues:** bounded ingress, finish-ordered in-flight, completion FIFO.
//! 3. **Refresh:** a rank-wide unavailability window every nREFI cycles.
//! 4. **Scheduling:** one command per tick on the channel command bus,
//!    chosen by the configured policy.
//!
//! The host-facing cycle counter lives in the facade; the controller is
//! driven with the current cycle each tick.

/// Ingress, in-flight, and completion queues.
pub mod queue;

/// Request-selection policy.
pub mod scheduler;

use crate::config::Config;
use crate::ctrl::queue::{CompletionQueue, InFlightQueue, IngressQueue};
use crate::ctrl::scheduler::Scheduler;
use crate::dram::bank::{Bank, BankState};
use crate::dram::timing::TimingParams;
use crate::request::{Completion, Request};
use crate::stats::Stats;

/// Identity of the request that last opened a row, for hit classification.
type Opener = (u64, u64);

/// Single-channel DDR4 memory controller.
///
/// All mutable simulation state is owned here; the only way to reach it is
/// through the facade's operations.
#[derive(Debug)]
pub struct Controller {
    timing: TimingParams,
    banks: Vec<Bank>,
    banks_per_rank: u64,
    /// Which request's selection opened each bank's current row.
    opened_by: Vec<Option<Opener>>,
    ingress: IngressQueue,
    in_flight: InFlightQueue,
    completions: CompletionQueue,
    scheduler: Scheduler,
    next_refresh_at: u64,
    refresh_until: u64,
    stats: Stats,
}

impl Controller {
    /// Builds an idle controller from a validated configuration.
    ///
    /// All banks start idle, both queues empty, the first refresh due one
    /// interval in.
    ///
    /// # Arguments
    ///
    /// * `config` - Already-validated configuration.
    pub fn new(config: &Config) -> Self {
        let bank_count = (config.geometry.ranks * config.geometry.banks) as usize;
        Self {
            timing: config.timing,
            banks: vec![Bank::new(); bank_count],
            banks_per_rank: config.geometry.banks,
            opened_by: vec![None; bank_count],
            ingress: IngressQueue::new(config.queue.ingress_capacity),
            in_flight: InFlightQueue::new(),
            completions: CompletionQueue::new(),
            scheduler: Scheduler::new(config.queue.scheduler, config.queue.starvation_limit),
            next_refresh_at: config.timing.refresh_interval,
            refresh_until: 0,
            stats: Stats::default(),
        }
    }

    /// Attempts to admit a request into the ingress queue.
    ///
    /// # Errors
    ///
    /// Returns the request unchanged when the queue is full; no state
    /// changes in that case beyond the rejection counter.
    pub fn try_enqueue(&mut self, request: Request) -> Result<(), Request> {
        match self.ingress.try_push(request) {
            Ok(()) => {
                if request.kind.is_write() {
                    self.stats.writes_accepted += 1;
                } else {
                    self.stats.reads_accepted += 1;
                }
                self.stats.max_ingress_depth = self.stats.max_ingress_depth.max(self.ingress.len());
                Ok(())
            }
            Err(request) => {
                self.stats.rejected += 1;
                tracing::trace!(addr = request.addr, "submit rejected, ingress full");
                Err(request)
            }
        }
    }

    /// Advances the controller to `cycle`.
    ///
    /// In order: finished precharges settle, due in-flight requests move to
    /// the completion queue, refresh bookkeeping runs, and at most one
    /// command issues on the channel command bus. An empty ingress queue is
    /// a no-op tick, never an error.
    pub fn tick(&mut self, cycle: u64) {
        for bank in &mut self.banks {
            bank.settle(cycle);
        }
        while let Some(completion) = self.in_flight.pop_due(cycle) {
            tracing::debug!(
                addr = completion.addr,
                kind = ?completion.kind,
                finish = completion.finish_cycle,
                "request complete"
            );
            self.completions.push(completion);
            self.stats.completions += 1;
        }

        if cycle >= self.next_refresh_at {
            self.enter_refresh(cycle);
        }
        if cycle < self.refresh_until {
            return;
        }

        let Some(index) =
            self.scheduler
                .select(&self.ingress, &self.banks, self.banks_per_rank, cycle)
        else {
            return;
        };
        self.issue_for(index, cycle);
    }

    /// Removes and returns the oldest completion, if any.
    pub fn try_dequeue(&mut self) -> Option<Completion> {
        self.completions.pop()
    }

    /// Requests accepted but not yet retrievable plus those retrievable.
    pub fn pending(&self) -> usize {
        self.ingress.len() + self.in_flight.len() + self.completions.len()
    }

    /// Read-only statistics.
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Issues the next command needed by the request at `index`.
    ///
    /// A row hit issues its column command and moves the request in flight;
    /// a conflicting open row is precharged; an idle bank is activated. A
    /// bank mid-delay leaves the command bus idle this tick.
    fn issue_for(&mut self, index: usize, cycle: u64) {
        let request = match self.ingress.get(index) {
            Some(request) => *request,
            None => panic!("scheduler selected out-of-range index {index}"),
        };
        let flat = request.location.flat_bank(self.banks_per_rank);
        let row = request.location.row;
        let bank = &mut self.banks[flat];

        match bank.state() {
            BankState::Active { row: open } if open == row => {
                if bank.is_ready(cycle) {
                    let finish = bank.access(row, request.kind, cycle, &self.timing);
                    let request = self.ingress.remove(index);
                    let opener = (request.addr, request.arrival_cycle);
                    if self.opened_by[flat] == Some(opener) {
                        // The opener consumes the activation it paid for.
                        self.opened_by[flat] = None;
                    } else {
                        self.stats.row_hits += 1;
                    }
                    tracing::debug!(
                        addr = request.addr,
                        kind = ?request.kind,
                        bank = flat,
                        row,
                        cycle,
                        finish,
                        "issue column"
                    );
                    self.in_flight.insert(Completion::of(&request, finish));
                }
            }
            BankState::Active { .. } => {
                if bank.can_precharge(cycle) {
                    bank.precharge(cycle, &self.timing);
                    self.opened_by[flat] = None;
                    self.stats.precharges += 1;
                    self.stats.row_conflicts += 1;
                    tracing::debug!(bank = flat, cycle, "issue precharge (row conflict)");
                }
            }
            BankState::Idle => {
                if bank.can_activate(cycle) {
                    bank.activate(row, cycle, &self.timing);
                    self.opened_by[flat] = Some((request.addr, request.arrival_cycle));
                    self.stats.activations += 1;
                    self.stats.row_misses += 1;
                    tracing::debug!(bank = flat, row, cycle, "issue activate");
                }
            }
            BankState::Precharging => {
                // Mid-delay; nothing can issue for this bank yet.
            }
        }
    }

    /// Enters a refresh window: every row closes and the rank is unavailable
    /// for nRFC cycles.
    fn enter_refresh(&mut self, cycle: u64) {
        for bank in &mut self.banks {
            bank.refresh(cycle, &self.timing);
        }
        self.opened_by.fill(None);
        self.refresh_until = cycle + self.timing.refresh_latency;
        while self.next_refresh_at <= cycle {
            self.next_refresh_at += self.timing.refresh_interval;
        }
        self.stats.refreshes += 1;
        tracing::debug!(cycle, until = self.refresh_until, "refresh window");
    }
}
