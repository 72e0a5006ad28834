//! DDR4 timing parameters and speed-grade presets.
//!
//! All values are in memory-clock cycles. The preset tables follow the JEDEC
//! DDR4 speed bins; `TimingParams` can also be deserialized field-by-field
//! for custom devices. Derived latencies:
//! 1. **Read:** data is returned `nCL + nBL` cycles after the column command.
//! 2. **Write:** the burst is absorbed `nCWL + nBL` cycles after the column
//!    command.

use serde::Deserialize;

/// DDR4 speed bins with JEDEC-style cycle counts.
///
/// Each grade fixes the full `TimingParams` table via
/// [`TimingParams::from_grade`].
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SpeedGrade {
    /// DDR4-1600, CL11.
    DDR4_1600K,
    /// DDR4-1600, CL12.
    DDR4_1600L,
    /// DDR4-1866, CL13.
    DDR4_1866M,
    /// DDR4-1866, CL14.
    DDR4_1866N,
    /// DDR4-2133, CL15.
    DDR4_2133P,
    /// DDR4-2133, CL16.
    DDR4_2133R,
    /// DDR4-2400, CL16.
    #[default]
    DDR4_2400R,
    /// DDR4-2400, CL18.
    DDR4_2400U,
    /// DDR4-3200, CL22.
    DDR4_3200,
}

/// DRAM timing constants, in memory-clock cycles.
///
/// Immutable for the lifetime of a controller. Deserialize a full table, or
/// start from a speed bin with [`TimingParams::from_grade`]. Field defaults
/// are the DDR4-2400R values.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimingParams {
    /// Data rate in MT/s; informational (reporting, derived wall-clock time).
    #[serde(default = "defaults::rate")]
    pub rate: u64,

    /// Burst duration nBL: cycles the data bus is occupied per column command.
    #[serde(default = "defaults::burst_cycles")]
    pub burst_cycles: u64,

    /// CAS latency nCL: column command to first read data.
    #[serde(default = "defaults::cas_latency")]
    pub cas_latency: u64,

    /// CAS write latency nCWL: column command to first write data.
    #[serde(default = "defaults::cas_write_latency")]
    pub cas_write_latency: u64,

    /// Activate delay nRCD: row activation to first column command.
    #[serde(default = "defaults::activate_delay")]
    pub activate_delay: u64,

    /// Precharge delay nRP: precharge to the next activation.
    #[serde(default = "defaults::precharge_delay")]
    pub precharge_delay: u64,

    /// Minimum row-open time nRAS: activation to precharge.
    #[serde(default = "defaults::activate_to_precharge")]
    pub activate_to_precharge: u64,

    /// Read-to-precharge delay nRTP.
    #[serde(default = "defaults::read_to_precharge")]
    pub read_to_precharge: u64,

    /// Write recovery nWR: end of write burst to precharge.
    #[serde(default = "defaults::write_recovery")]
    pub write_recovery: u64,

    /// Refresh interval nREFI: cycles between refresh obligations.
    #[serde(default = "defaults::refresh_interval")]
    pub refresh_interval: u64,

    /// Refresh latency nRFC: cycles a rank is unavailable per refresh.
    #[serde(default = "defaults::refresh_latency")]
    pub refresh_latency: u64,
}

/// DDR4-2400R cycle counts, used as serde defaults.
mod defaults {
    pub(super) fn rate() -> u64 {
        2400
    }
    pub(super) fn burst_cycles() -> u64 {
        4
    }
    pub(super) fn cas_latency() -> u64 {
        16
    }
    pub(super) fn cas_write_latency() -> u64 {
        12
    }
    pub(super) fn activate_delay() -> u64 {
        16
    }
    pub(super) fn precharge_delay() -> u64 {
        16
    }
    pub(super) fn activate_to_precharge() -> u64 {
        39
    }
    pub(super) fn read_to_precharge() -> u64 {
        9
    }
    pub(super) fn write_recovery() -> u64 {
        18
    }
    pub(super) fn refresh_interval() -> u64 {
        9360
    }
    pub(super) fn refresh_latency() -> u64 {
        312
    }
}

impl Default for TimingParams {
    fn default() -> Self {
        Self::from_grade(SpeedGrade::DDR4_2400R)
    }
}

impl TimingParams {
    /// Returns the full timing table for a DDR4 speed bin.
    ///
    /// Core latencies follow the JEDEC bins; the refresh pair is derived from
    /// tREFI = 7.8 us and tRFC = 260 ns (4 Gb density) at the bin's clock.
    ///
    /// # Arguments
    ///
    /// * `grade` - The speed bin to expand.
    ///
    /// # Returns
    ///
    /// A complete `TimingParams` table.
    pub const fn from_grade(grade: SpeedGrade) -> Self {
        match grade {
            SpeedGrade::DDR4_1600K => Self {
                rate: 1600,
                burst_cycles: 4,
                cas_latency: 11,
                cas_write_latency: 9,
                activate_delay: 11,
                precharge_delay: 11,
                activate_to_precharge: 28,
                read_to_precharge: 6,
                write_recovery: 12,
                refresh_interval: 6240,
                refresh_latency: 208,
            },
            SpeedGrade::DDR4_1600L => Self {
                rate: 1600,
                burst_cycles: 4,
                cas_latency: 12,
                cas_write_latency: 9,
                activate_delay: 12,
                precharge_delay: 12,
                activate_to_precharge: 28,
                read_to_precharge: 6,
                write_recovery: 12,
                refresh_interval: 6240,
                refresh_latency: 208,
            },
            SpeedGrade::DDR4_1866M => Self {
                rate: 1866,
                burst_cycles: 4,
                cas_latency: 13,
                cas_write_latency: 10,
                activate_delay: 13,
                precharge_delay: 13,
                activate_to_precharge: 32,
                read_to_precharge: 7,
                write_recovery: 14,
                refresh_interval: 7277,
                refresh_latency: 243,
            },
            SpeedGrade::DDR4_1866N => Self {
                rate: 1866,
                burst_cycles: 4,
                cas_latency: 14,
                cas_write_latency: 10,
                activate_delay: 14,
                precharge_delay: 14,
                activate_to_precharge: 32,
                read_to_precharge: 7,
                write_recovery: 14,
                refresh_interval: 7277,
                refresh_latency: 243,
            },
            SpeedGrade::DDR4_2133P => Self {
                rate: 2133,
                burst_cycles: 4,
                cas_latency: 15,
                cas_write_latency: 11,
                activate_delay: 15,
                precharge_delay: 15,
                activate_to_precharge: 36,
                read_to_precharge: 8,
                write_recovery: 16,
                refresh_interval: 8319,
                refresh_latency: 277,
            },
            SpeedGrade::DDR4_2133R => Self {
                rate: 2133,
                burst_cycles: 4,
                cas_latency: 16,
                cas_write_latency: 11,
                activate_delay: 16,
                precharge_delay: 16,
                activate_to_precharge: 36,
                read_to_precharge: 8,
                write_recovery: 16,
                refresh_interval: 8319,
                refresh_latency: 277,
            },
            SpeedGrade::DDR4_2400R => Self {
                rate: 2400,
                burst_cycles: 4,
                cas_latency: 16,
                cas_write_latency: 12,
                activate_delay: 16,
                precharge_delay: 16,
                activate_to_precharge: 39,
                read_to_precharge: 9,
                write_recovery: 18,
                refresh_interval: 9360,
                refresh_latency: 312,
            },
            SpeedGrade::DDR4_2400U => Self {
                rate: 2400,
                burst_cycles: 4,
                cas_latency: 18,
                cas_write_latency: 12,
                activate_delay: 18,
                precharge_delay: 18,
                activate_to_precharge: 39,
                read_to_precharge: 9,
                write_recovery: 18,
                refresh_interval: 9360,
                refresh_latency: 312,
            },
            SpeedGrade::DDR4_3200 => Self {
                rate: 3200,
                burst_cycles: 4,
                cas_latency: 22,
                cas_write_latency: 16,
                activate_delay: 22,
                precharge_delay: 22,
                activate_to_precharge: 56,
                read_to_precharge: 12,
                write_recovery: 24,
                refresh_interval: 12480,
                refresh_latency: 416,
            },
        }
    }

    /// Cycles from a read column command to the end of the data burst.
    pub const fn read_latency(&self) -> u64 {
        self.cas_latency + self.burst_cycles
    }

    /// Cycles from a write column command to the end of the data burst.
    pub const fn write_latency(&self) -> u64 {
        self.cas_write_latency + self.burst_cycles
    }
}
