//! Engine configuration.
//!
//! This module defines the configuration consumed once at construction. It
//! provides:
//! 1. **Structures:** `Config` with geometry, timing, and queue sections.
//! 2. **Presets:** JEDEC organization presets (`Organization`) and speed bins
//!    (re-exported `SpeedGrade`), so a host can pick a part instead of
//!    spelling out every count.
//! 3. **Validation:** `Config::validate` gates construction; a structurally
//!    invalid description is a `ConfigError` and the engine is never built.
//!
//! Configuration is supplied as an already-structured payload: deserialize
//! from JSON with [`Config::from_json`] or build in code from
//! `Config::default()`. File I/O belongs to the host.

use serde::Deserialize;
use thiserror::Error;

use crate::ctrl::scheduler::SchedulerPolicy;
use crate::dram::addr::MappingScheme;
use crate::dram::timing::TimingParams;

/// Default configuration constants.
mod defaults {
    /// Ranks per channel.
    pub const RANKS: u64 = 1;

    /// Banks per rank (DDR4: 4 bank groups x 4 banks, flattened).
    pub const BANKS: u64 = 16;

    /// Rows per bank (4 Gb x8 part).
    pub const ROWS: u64 = 1 << 15;

    /// Columns per row, in burst-sized units.
    pub const COLUMNS: u64 = 1 << 7;

    /// Low address bits covered by one burst transfer (64-byte bursts).
    pub const OFFSET_BITS: u32 = 6;

    /// Ingress-queue capacity in requests.
    pub const INGRESS_CAPACITY: usize = 512;

    /// Age in cycles past which the oldest request preempts row-hit bypass.
    pub const STARVATION_LIMIT: u64 = 512;
}

/// JEDEC DDR4 device organizations (density x device width).
///
/// Each preset fixes banks, rows, and columns; see
/// [`GeometryConfig::from_organization`].
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Organization {
    /// 2 Gb, x4 devices.
    DDR4_2Gb_x4,
    /// 2 Gb, x8 devices.
    DDR4_2Gb_x8,
    /// 2 Gb, x16 devices.
    DDR4_2Gb_x16,
    /// 4 Gb, x4 devices.
    DDR4_4Gb_x4,
    /// 4 Gb, x8 devices (default).
    #[default]
    DDR4_4Gb_x8,
    /// 4 Gb, x16 devices.
    DDR4_4Gb_x16,
    /// 8 Gb, x4 devices.
    DDR4_8Gb_x4,
    /// 8 Gb, x8 devices.
    DDR4_8Gb_x8,
    /// 8 Gb, x16 devices.
    DDR4_8Gb_x16,
}

impl Organization {
    /// Returns (banks per rank, rows per bank, columns per row).
    ///
    /// x16 parts have two bank groups instead of four; columns are counted in
    /// burst-sized units, so the low three column bits of the part are part
    /// of the burst offset.
    const fn geometry(self) -> (u64, u64, u64) {
        match self {
            Self::DDR4_2Gb_x4 => (16, 1 << 15, 1 << 7),
            Self::DDR4_2Gb_x8 => (16, 1 << 14, 1 << 7),
            Self::DDR4_2Gb_x16 => (8, 1 << 14, 1 << 7),
            Self::DDR4_4Gb_x4 => (16, 1 << 16, 1 << 7),
            Self::DDR4_4Gb_x8 => (16, 1 << 15, 1 << 7),
            Self::DDR4_4Gb_x16 => (8, 1 << 15, 1 << 7),
            Self::DDR4_8Gb_x4 => (16, 1 << 17, 1 << 7),
            Self::DDR4_8Gb_x8 => (16, 1 << 16, 1 << 7),
            Self::DDR4_8Gb_x16 => (8, 1 << 16, 1 << 7),
        }
    }
}

/// Address-space geometry: coordinate counts and the interleaving scheme.
///
/// Every count must be a power of two; `channels` must be 1 (one controller
/// instance models one channel).
#[derive(Debug, Clone, Deserialize)]
pub struct GeometryConfig {
    /// Channels; must be 1.
    #[serde(default = "GeometryConfig::default_channels")]
    pub channels: u64,

    /// Ranks per channel.
    #[serde(default = "GeometryConfig::default_ranks")]
    pub ranks: u64,

    /// Banks per rank.
    #[serde(default = "GeometryConfig::default_banks")]
    pub banks: u64,

    /// Rows per bank.
    #[serde(default = "GeometryConfig::default_rows")]
    pub rows: u64,

    /// Columns per row, in burst-sized units.
    #[serde(default = "GeometryConfig::default_columns")]
    pub columns: u64,

    /// Low address bits covered by one burst transfer.
    #[serde(default = "GeometryConfig::default_offset_bits")]
    pub offset_bits: u32,

    /// Field interleaving order.
    #[serde(default)]
    pub mapping: MappingScheme,
}

impl GeometryConfig {
    fn default_channels() -> u64 {
        1
    }
    fn default_ranks() -> u64 {
        defaults::RANKS
    }
    fn default_banks() -> u64 {
        defaults::BANKS
    }
    fn default_rows() -> u64 {
        defaults::ROWS
    }
    fn default_columns() -> u64 {
        defaults::COLUMNS
    }
    fn default_offset_bits() -> u32 {
        defaults::OFFSET_BITS
    }

    /// Builds a geometry from a JEDEC organization preset.
    ///
    /// # Arguments
    ///
    /// * `organization` - Density x width preset.
    /// * `ranks` - Ranks per channel (power of two).
    ///
    /// # Returns
    ///
    /// A geometry with the preset's banks/rows/columns and default mapping.
    pub fn from_organization(organization: Organization, ranks: u64) -> Self {
        let (banks, rows, columns) = organization.geometry();
        Self {
            channels: 1,
            ranks,
            banks,
            rows,
            columns,
            offset_bits: defaults::OFFSET_BITS,
            mapping: MappingScheme::default(),
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::from_organization(Organization::default(), defaults::RANKS)
    }
}

/// Queue sizing and scheduling policy.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Ingress-queue capacity; `try_submit` reports backpressure beyond it.
    #[serde(default = "QueueConfig::default_ingress_capacity")]
    pub ingress_capacity: usize,

    /// Age in cycles past which the oldest request preempts row-hit bypass.
    #[serde(default = "QueueConfig::default_starvation_limit")]
    pub starvation_limit: u64,

    /// Request-selection policy.
    #[serde(default)]
    pub scheduler: SchedulerPolicy,
}

impl QueueConfig {
    fn default_ingress_capacity() -> usize {
        defaults::INGRESS_CAPACITY
    }
    fn default_starvation_limit() -> u64 {
        defaults::STARVATION_LIMIT
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            ingress_capacity: defaults::INGRESS_CAPACITY,
            starvation_limit: defaults::STARVATION_LIMIT,
            scheduler: SchedulerPolicy::default(),
        }
    }
}

/// Root configuration: geometry, timing, and queue sections.
///
/// # Examples
///
/// Default part (DDR4-2400R, 4 Gb x8, one rank):
///
/// ```
/// use ramulite_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.timing.cas_latency, 16);
/// ```
///
/// From a JSON payload (host-supplied):
///
/// ```
/// use ramulite_core::Config;
///
/// let config = Config::from_json(
///     r#"{
///         "geometry": { "ranks": 2, "mapping": "RoBaRaCoCh" },
///         "timing": { "cas_latency": 22, "cas_write_latency": 16 },
///         "queue": { "ingress_capacity": 64 }
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(config.geometry.ranks, 2);
/// assert_eq!(config.queue.ingress_capacity, 64);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address-space geometry.
    pub geometry: GeometryConfig,
    /// DRAM timing table.
    pub timing: TimingParams,
    /// Queue sizing and scheduling policy.
    pub queue: QueueConfig,
}

impl Config {
    /// Deserializes and validates a configuration from a JSON payload.
    ///
    /// # Arguments
    ///
    /// * `payload` - JSON text; absent fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] on malformed payloads, or any validation error.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for structural validity.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: non-power-of-two geometry,
    /// unsupported channel count, zero timing value, a refresh window that
    /// cannot fit its interval, or zero queue sizing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geometry.channels != 1 {
            return Err(ConfigError::UnsupportedChannels(self.geometry.channels));
        }
        for (name, value) in [
            ("ranks", self.geometry.ranks),
            ("banks", self.geometry.banks),
            ("rows", self.geometry.rows),
            ("columns", self.geometry.columns),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NonPowerOfTwo { name, value });
            }
        }
        let t = &self.timing;
        for (name, value) in [
            ("burst_cycles", t.burst_cycles),
            ("cas_latency", t.cas_latency),
            ("cas_write_latency", t.cas_write_latency),
            ("activate_delay", t.activate_delay),
            ("precharge_delay", t.precharge_delay),
            ("activate_to_precharge", t.activate_to_precharge),
            ("refresh_interval", t.refresh_interval),
            ("refresh_latency", t.refresh_latency),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroTiming { name });
            }
        }
        if t.activate_to_precharge < t.activate_delay {
            return Err(ConfigError::InconsistentTiming {
                ras: t.activate_to_precharge,
                rcd: t.activate_delay,
            });
        }
        if t.refresh_interval <= t.refresh_latency {
            return Err(ConfigError::RefreshWindow {
                interval: t.refresh_interval,
                latency: t.refresh_latency,
            });
        }
        if self.queue.ingress_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.queue.starvation_limit == 0 {
            return Err(ConfigError::ZeroStarvationLimit);
        }
        Ok(())
    }
}

/// Structural configuration errors; fatal to construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON payload did not parse.
    #[error("malformed configuration payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A geometry count is zero or not a power of two.
    #[error("geometry field `{name}` must be a power of two, got {value}")]
    NonPowerOfTwo {
        /// Offending field.
        name: &'static str,
        /// Supplied value.
        value: u64,
    },

    /// One controller instance models exactly one channel.
    #[error("multi-channel configurations are not supported, got {0} channels")]
    UnsupportedChannels(u64),

    /// A required timing value is zero.
    #[error("timing parameter `{name}` must be positive")]
    ZeroTiming {
        /// Offending parameter.
        name: &'static str,
    },

    /// tRAS shorter than tRCD would let a row close before it can be used.
    #[error("activate_to_precharge ({ras}) must be at least activate_delay ({rcd})")]
    InconsistentTiming {
        /// Supplied tRAS.
        ras: u64,
        /// Supplied tRCD.
        rcd: u64,
    },

    /// A refresh window longer than its interval never leaves the window.
    #[error("refresh_interval ({interval}) must exceed refresh_latency ({latency})")]
    RefreshWindow {
        /// Supplied nREFI.
        interval: u64,
        /// Supplied nRFC.
        latency: u64,
    },

    /// The ingress queue must admit at least one request.
    #[error("ingress queue capacity must be positive")]
    ZeroCapacity,

    /// A zero starvation limit would disable row-hit scheduling entirely.
    #[error("starvation limit must be positive")]
    ZeroStarvationLimit,
}
