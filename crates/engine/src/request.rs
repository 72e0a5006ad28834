//! Request and completion records.
//!
//! A `Request` is created when the host submits an access and is immutable
//! from then on; it travels ingress queue -> in-flight set -> completion
//! queue and is handed back to the host as a `Completion`. An accepted
//! request is never dropped.

use crate::dram::addr::Location;

/// Whether an access reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Read access; data returns `nCL + nBL` cycles after the column command.
    Read,
    /// Write access; the burst is absorbed `nCWL + nBL` cycles after the
    /// column command.
    Write,
}

impl AccessKind {
    /// Returns `true` for writes.
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

/// An accepted memory access awaiting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Physical address as submitted by the host.
    pub addr: u64,
    /// Read or write.
    pub kind: AccessKind,
    /// Decoded DRAM coordinates of `addr`.
    pub location: Location,
    /// Cycle at which the request was accepted.
    pub arrival_cycle: u64,
}

/// A finished request, as delivered to the host by `try_retrieve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Physical address of the original request.
    pub addr: u64,
    /// Read or write.
    pub kind: AccessKind,
    /// Cycle at which the request was accepted.
    pub arrival_cycle: u64,
    /// Cycle at which the data transfer finished.
    pub finish_cycle: u64,
}

impl Completion {
    /// Builds the completion record for a finished request.
    pub const fn of(request: &Request, finish_cycle: u64) -> Self {
        Self {
            addr: request.addr,
            kind: request.kind,
            arrival_cycle: request.arrival_cycle,
            finish_cycle,
        }
    }
}
