//! DDR4 device model.
//!
//! This module groups the pieces that describe the DRAM device itself,
//! independent of any controller policy. It provides:
//! 1. **Timing:** JEDEC-style cycle counts per speed grade (`TimingParams`).
//! 2. **Addressing:** Physical-address decode/encode across the
//!    channel/rank/bank/row/column hierarchy (`AddressMapper`, `Location`).
//! 3. **Bank state:** The per-bank activate/access/precharge state machine
//!    (`Bank`, `BankState`).

/// Address decode/encode and the coordinate hierarchy.
pub mod addr;

/// Per-bank state machine and timing gates.
pub mod bank;

/// Timing parameters and DDR4 speed-grade presets.
pub mod timing;
