//! Bank State-Machine Unit Tests.
//!
//! Verifies transition legality, timing gates (nRCD, nRP, nRAS, nRTP, write
//! recovery), precharge settling, refresh, and that illegal transitions
//! panic. Uses the fast timing table from `common`.

use ramulite_core::dram::bank::{Bank, BankState};
use ramulite_core::request::AccessKind;

use crate::common::fast_timing;

// ──────────────────────────────────────────────────────────
// Initial state and activation
// ──────────────────────────────────────────────────────────

#[test]
fn new_bank_is_idle_and_ready() {
    let bank = Bank::new();
    assert_eq!(bank.state(), BankState::Idle);
    assert_eq!(bank.open_row(), None);
    assert!(bank.can_activate(0));
}

#[test]
fn activate_opens_row_after_rcd() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(5, 0, &timing);
    assert_eq!(bank.open_row(), Some(5));
    // nRCD = 4: no column command before cycle 4.
    assert!(!bank.can_access(5, 3));
    assert!(bank.can_access(5, 4));
}

#[test]
fn access_requires_matching_row() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(5, 0, &timing);
    assert!(!bank.can_access(6, 4));
}

// ──────────────────────────────────────────────────────────
// Column-command latencies
// ──────────────────────────────────────────────────────────

#[test]
fn read_finishes_after_cl_plus_bl() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(1, 0, &timing);
    // nCL + nBL = 3 + 2 = 5.
    assert_eq!(bank.access(1, AccessKind::Read, 4, &timing), 9);
}

#[test]
fn write_finishes_after_cwl_plus_bl() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(1, 0, &timing);
    // nCWL + nBL = 2 + 2 = 4.
    assert_eq!(bank.access(1, AccessKind::Write, 4, &timing), 8);
}

#[test]
fn burst_occupies_the_bank() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(1, 0, &timing);
    let _ = bank.access(1, AccessKind::Read, 4, &timing);
    // nBL = 2: the next column command waits for the data bus.
    assert!(!bank.can_access(1, 5));
    assert!(bank.can_access(1, 6));
}

// ──────────────────────────────────────────────────────────
// Precharge gates: nRAS, nRTP, write recovery
// ──────────────────────────────────────────────────────────

#[test]
fn precharge_waits_for_ras() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(2, 0, &timing);
    // nRAS = 8.
    assert!(!bank.can_precharge(7));
    assert!(bank.can_precharge(8));
}

#[test]
fn write_recovery_extends_the_precharge_gate() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(2, 0, &timing);
    let _ = bank.access(2, AccessKind::Write, 4, &timing);
    // Write gate: 4 + (nCWL + nBL) + nWR = 4 + 4 + 3 = 11 > nRAS.
    assert!(!bank.can_precharge(10));
    assert!(bank.can_precharge(11));
}

#[test]
fn read_to_precharge_stays_within_ras() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(2, 0, &timing);
    let _ = bank.access(2, AccessKind::Read, 4, &timing);
    // Read gate 4 + nRTP = 6 is dominated by nRAS = 8.
    assert!(!bank.can_precharge(7));
    assert!(bank.can_precharge(8));
}

// ──────────────────────────────────────────────────────────
// Precharge settling and refresh
// ──────────────────────────────────────────────────────────

#[test]
fn precharge_settles_to_idle_after_rp() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(2, 0, &timing);
    bank.precharge(8, &timing);
    assert_eq!(bank.state(), BankState::Precharging);

    // nRP = 4: still closing at cycle 11.
    bank.settle(11);
    assert_eq!(bank.state(), BankState::Precharging);
    assert!(!bank.can_activate(11));

    bank.settle(12);
    assert_eq!(bank.state(), BankState::Idle);
    assert!(bank.can_activate(12));
}

#[test]
fn refresh_closes_the_row_and_blocks_for_rfc() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(3, 0, &timing);
    bank.refresh(5, &timing);
    assert_eq!(bank.state(), BankState::Idle);
    assert_eq!(bank.open_row(), None);
    // nRFC = 10.
    assert!(!bank.can_activate(14));
    assert!(bank.can_activate(15));
}

// ──────────────────────────────────────────────────────────
// Illegal transitions are fatal
// ──────────────────────────────────────────────────────────

#[test]
#[should_panic(expected = "illegal activate")]
fn activate_on_open_bank_panics() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.activate(1, 0, &timing);
    bank.activate(2, 10, &timing);
}

#[test]
#[should_panic(expected = "illegal column command")]
fn access_on_idle_bank_panics() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    let _ = bank.access(1, AccessKind::Read, 0, &timing);
}

#[test]
#[should_panic(expected = "illegal precharge")]
fn precharge_on_idle_bank_panics() {
    let timing = fast_timing();
    let mut bank = Bank::new();
    bank.precharge(0, &timing);
}
