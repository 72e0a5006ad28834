//! Memory-system facade.
//!
//! `MemorySystem` is the single owning handle a host drives: it owns the
//! cycle counter, the address mapper, and one controller (one channel), and
//! routes every mutation through its public operations. Nothing inside can
//! be aliased from outside; callers needing concurrent access serialize
//! externally.
//!
//! The operational contract is non-blocking throughout: `try_submit` reports
//! backpressure instead of waiting, `try_retrieve` reports emptiness instead
//! of waiting, and `tick` advances exactly one cycle of bounded work.

use crate::config::{Config, ConfigError};
use crate::ctrl::Controller;
use crate::dram::addr::{AddressMapper, Location};
use crate::request::{AccessKind, Completion, Request};
use crate::stats::Stats;

/// Owning handle over one memory channel.
///
/// # Examples
///
/// ```
/// use ramulite_core::{AccessKind, Config, MemorySystem};
///
/// let mut mem = MemorySystem::new(Config::default()).unwrap();
/// assert!(mem.try_submit(0x4000, AccessKind::Read));
/// while mem.try_retrieve().is_none() {
///     mem.tick();
/// }
/// ```
#[derive(Debug)]
pub struct MemorySystem {
    mapper: AddressMapper,
    controller: Controller,
    clk: u64,
}

impl MemorySystem {
    /// Builds a memory system at cycle 0 with all banks idle.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration payload, validated here.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the configuration is structurally invalid; no
    /// system is constructed in that case.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mapper: AddressMapper::new(&config.geometry),
            controller: Controller::new(&config),
            clk: 0,
        })
    }

    /// Advances the simulation by exactly one cycle.
    ///
    /// Always succeeds; work is bounded by the bank count plus the due
    /// completions this cycle.
    pub fn tick(&mut self) {
        self.clk += 1;
        self.controller.tick(self.clk);
    }

    /// Attempts to submit a request at the current cycle.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical address.
    /// * `kind` - Read or write.
    ///
    /// # Returns
    ///
    /// `true` when admitted; `false` when the ingress queue is full
    /// (backpressure — retry on a later cycle or drop, per host policy).
    pub fn try_submit(&mut self, addr: u64, kind: AccessKind) -> bool {
        let request = Request {
            addr,
            kind,
            location: self.mapper.decode(addr),
            arrival_cycle: self.clk,
        };
        self.controller.try_enqueue(request).is_ok()
    }

    /// Attempts to retrieve the oldest finished request.
    ///
    /// Completions come back in the order they became ready, which is not
    /// necessarily submission order across banks.
    ///
    /// # Returns
    ///
    /// `None` when nothing has finished; repeated calls on an empty queue
    /// mutate nothing.
    pub fn try_retrieve(&mut self) -> Option<Completion> {
        self.controller.try_dequeue()
    }

    /// Current cycle; 0 at construction, incremented by exactly one per tick.
    pub const fn cycle(&self) -> u64 {
        self.clk
    }

    /// Requests accepted and not yet retrieved.
    pub fn pending_requests(&self) -> usize {
        self.controller.pending()
    }

    /// Read-only controller statistics.
    pub const fn stats(&self) -> &Stats {
        self.controller.stats()
    }

    /// Decodes a physical address into DRAM coordinates.
    pub fn decode(&self, addr: u64) -> Location {
        self.mapper.decode(addr)
    }

    /// Encodes DRAM coordinates into the physical address of their burst.
    ///
    /// Inverse of [`MemorySystem::decode`]; useful for hosts and tests that
    /// construct bank-conflict patterns.
    pub fn encode(&self, location: &Location) -> u64 {
        self.mapper.encode(location)
    }
}
