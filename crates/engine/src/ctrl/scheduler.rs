//! Request selection policy.
//!
//! Once per tick the controller asks the scheduler which pending request to
//! serve next. Two policies are supported:
//! 1. **`Fcfs`:** strict arrival order; the oldest request is always chosen.
//! 2. **`FrFcfs`:** first-ready, first-come first-served — among requests
//!    whose bank can take a column command this cycle, a row-buffer hit is
//!    preferred over the oldest request; ties break by arrival order.
//!
//! Row-hit bypass alone can starve a row-miss request behind an endless hit
//! stream, so `FrFcfs` carries an age bound: once the oldest request has
//! waited `starvation_limit` cycles it is served exclusively until it issues.
//! Arrival order is FIFO, so every request reaches the front after finitely
//! many issues and the wait of any accepted request is bounded.

use serde::Deserialize;

use crate::ctrl::queue::IngressQueue;
use crate::dram::bank::Bank;

/// Request-selection policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SchedulerPolicy {
    /// Strict first-come, first-served.
    #[serde(alias = "FCFS")]
    Fcfs,
    /// First-ready FCFS: prefer row-buffer hits, age-bounded (default).
    #[default]
    #[serde(alias = "FRFCFS")]
    FrFcfs,
}

/// Picks which pending request the controller serves each tick.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    policy: SchedulerPolicy,
    starvation_limit: u64,
}

impl Scheduler {
    /// Creates a scheduler with the given policy and age bound.
    pub const fn new(policy: SchedulerPolicy, starvation_limit: u64) -> Self {
        Self {
            policy,
            starvation_limit,
        }
    }

    /// Selects the ingress-queue index of the request to serve this tick.
    ///
    /// `FrFcfs` preference order, each scanned in arrival order: a request
    /// whose column command can issue right now (row hit), then one whose
    /// bank is idle and can take an activation, then the oldest request.
    /// Precharging a conflicting open row is only ever done on behalf of the
    /// oldest request, so a row with pending hits is not closed under it.
    ///
    /// The chosen request's bank is not necessarily ready; the controller
    /// walks it toward readiness (precharge, activate) when it is not.
    ///
    /// # Arguments
    ///
    /// * `ingress` - Pending requests in arrival order.
    /// * `banks` - Bank arena, indexed by flat bank id.
    /// * `banks_per_rank` - Flat-index stride.
    /// * `cycle` - Current cycle.
    ///
    /// # Returns
    ///
    /// `None` when the queue is empty, otherwise `Some(index)`.
    pub fn select(
        &self,
        ingress: &IngressQueue,
        banks: &[Bank],
        banks_per_rank: u64,
        cycle: u64,
    ) -> Option<usize> {
        let front = ingress.get(0)?;
        if self.policy == SchedulerPolicy::Fcfs {
            return Some(0);
        }
        // Age bound: an over-age front request suspends row-hit bypass.
        if cycle.saturating_sub(front.arrival_cycle) >= self.starvation_limit {
            return Some(0);
        }
        if let Some(hit) = ingress.iter().position(|request| {
            banks[request.location.flat_bank(banks_per_rank)]
                .can_access(request.location.row, cycle)
        }) {
            return Some(hit);
        }
        let activatable = ingress.iter().position(|request| {
            banks[request.location.flat_bank(banks_per_rank)].can_activate(cycle)
        });
        Some(activatable.unwrap_or(0))
    }
}
