//! Cycle-accurate DDR4 memory-controller timing model.
//!
//! This crate simulates the timing and ordering of DRAM accesses for a host
//! simulator that drives one clock tick at a time. It provides:
//! 1. **Device model:** JEDEC speed-grade timing, address decode/encode, and
//!    the per-bank activate/access/precharge state machine.
//! 2. **Controller:** bounded ingress and completion queues, FR-FCFS
//!    scheduling with an anti-starvation bound, and rank-wide refresh.
//! 3. **Facade:** [`MemorySystem`], a single owning handle with non-blocking
//!    `try_submit`/`try_retrieve` and a `tick` the host calls once per cycle.
//!
//! Only timing and ordering are modeled; data contents, power, and
//! multi-channel topologies are out of scope.

/// Engine configuration: geometry, timing, queues, and validation.
pub mod config;
/// Memory controller: queues, scheduler, refresh, per-tick issue.
pub mod ctrl;
/// DDR4 device model: timing tables, address mapping, bank state.
pub mod dram;
/// Facade handle driven by the host.
pub mod memory;
/// Request and completion records.
pub mod request;
/// Command and queue counters.
pub mod stats;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// Construction-time configuration errors.
pub use crate::config::ConfigError;
/// The owning facade handle; construct with [`MemorySystem::new`].
pub use crate::memory::MemorySystem;
/// Read/write discriminant for submissions and completions.
pub use crate::request::{AccessKind, Completion};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs a process-wide `tracing` subscriber, once.
///
/// Formats to stderr, filtered by `RUST_LOG` (default `info`). Idempotent:
/// if a subscriber is already installed this call is a no-op. The engine
/// never calls this itself and works with no subscriber at all; hosts that
/// want the engine's structured events call it once at startup.
pub fn init_tracing() {
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();
    if let Err(error) = result {
        // A subscriber is already installed; keep it.
        tracing::debug!(%error, "tracing subscriber already set");
    }
}
