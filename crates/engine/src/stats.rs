//! Controller statistics collection.
//!
//! Flat counters updated by the controller as it issues commands and retires
//! requests. Read-only access is exposed through the facade; counters never
//! affect scheduling decisions.

/// Command and queue counters for one controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    /// Read requests accepted into the ingress queue.
    pub reads_accepted: u64,
    /// Write requests accepted into the ingress queue.
    pub writes_accepted: u64,
    /// Submissions rejected because the ingress queue was full.
    pub rejected: u64,

    /// Activate commands issued.
    pub activations: u64,
    /// Precharge commands issued.
    pub precharges: u64,
    /// Refresh windows entered.
    pub refreshes: u64,

    /// Column commands that found their row opened by an earlier request.
    pub row_hits: u64,
    /// Activations issued into an idle bank (row closed).
    pub row_misses: u64,
    /// Precharges forced by a conflicting open row.
    pub row_conflicts: u64,

    /// Requests whose data transfer finished.
    pub completions: u64,
    /// Deepest ingress-queue occupancy observed.
    pub max_ingress_depth: usize,
}

impl Stats {
    /// Total accepted requests.
    pub const fn accepted(&self) -> u64 {
        self.reads_accepted + self.writes_accepted
    }

    /// Fraction of column commands that were row-buffer hits.
    ///
    /// Returns 0.0 before any column command has issued.
    pub fn row_hit_rate(&self) -> f64 {
        let columns = self.row_hits + self.row_misses;
        if columns == 0 {
            return 0.0;
        }
        self.row_hits as f64 / columns as f64
    }
}
