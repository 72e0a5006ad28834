//! Physical-address decode and encode.
//!
//! A physical address maps onto the DRAM coordinate hierarchy
//! (channel, rank, bank, row, column) by bit slicing. This module provides:
//! 1. **`Location`:** A decoded coordinate tuple plus flat-index helpers for
//!    arena storage.
//! 2. **`MappingScheme`:** The supported interleaving orders.
//! 3. **`AddressMapper`:** Pure `decode`/`encode` that are exact inverses for
//!    every address within the configured space.

use serde::Deserialize;

use crate::config::GeometryConfig;

/// Coordinate-hierarchy levels, ordered from most to least significant.
const LEVELS: usize = 5;

const CHANNEL: usize = 0;
const RANK: usize = 1;
const BANK: usize = 2;
const ROW: usize = 3;
const COLUMN: usize = 4;

/// Address-interleaving schemes.
///
/// Variant names spell the field order from the most significant bits down to
/// the least significant: `ChRaBaRoCo` places the channel bits at the top and
/// the column bits directly above the burst offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MappingScheme {
    /// channel : rank : bank : row : column (row-interleaved, default).
    #[default]
    ChRaBaRoCo,
    /// row : bank : rank : column : channel.
    RoBaRaCoCh,
    /// column : row : bank : rank : channel.
    CoRoBaRaCh,
    /// row : column : bank : rank : channel.
    RoCoBaRaCh,
}

impl MappingScheme {
    /// Returns the slice order, least-significant field first.
    ///
    /// Entries are level indices (0 = channel .. 4 = column): the first entry
    /// names the field taken from the lowest address bits after the burst
    /// offset is stripped.
    const fn slice_order(self) -> [usize; LEVELS] {
        match self {
            Self::ChRaBaRoCo => [COLUMN, ROW, BANK, RANK, CHANNEL],
            Self::RoBaRaCoCh => [CHANNEL, COLUMN, RANK, BANK, ROW],
            Self::CoRoBaRaCh => [CHANNEL, RANK, BANK, ROW, COLUMN],
            Self::RoCoBaRaCh => [CHANNEL, RANK, BANK, COLUMN, ROW],
        }
    }
}

/// A decoded DRAM coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Channel index (always 0 in a single-channel configuration).
    pub channel: u64,
    /// Rank index within the channel.
    pub rank: u64,
    /// Bank index within the rank.
    pub bank: u64,
    /// Row index within the bank.
    pub row: u64,
    /// Column index within the row.
    pub column: u64,
}

impl Location {
    /// Returns the flat bank-arena index for this location.
    ///
    /// # Arguments
    ///
    /// * `banks_per_rank` - Bank count per rank from the geometry.
    pub const fn flat_bank(&self, banks_per_rank: u64) -> usize {
        (self.rank * banks_per_rank + self.bank) as usize
    }
}

/// Pure address decoder/encoder for a fixed geometry.
///
/// Built once at construction; `decode` and `encode` are total and side-effect
/// free. Address bits above the configured space are discarded, so decoding
/// wraps deterministically (same input, same output).
#[derive(Debug, Clone)]
pub struct AddressMapper {
    /// Field widths in bits, indexed by level (channel .. column).
    bits: [u32; LEVELS],
    /// Slice order, least-significant field first.
    order: [usize; LEVELS],
    /// Low bits covered by one burst transfer.
    offset_bits: u32,
}

impl AddressMapper {
    /// Builds a mapper for the given geometry.
    ///
    /// The geometry must already be validated: every count a power of two.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated geometry (counts and mapping scheme).
    ///
    /// # Returns
    ///
    /// A mapper whose `decode`/`encode` are exact inverses over the space.
    pub fn new(geometry: &GeometryConfig) -> Self {
        let bits = [
            log2(geometry.channels),
            log2(geometry.ranks),
            log2(geometry.banks),
            log2(geometry.rows),
            log2(geometry.columns),
        ];
        Self {
            bits,
            order: geometry.mapping.slice_order(),
            offset_bits: geometry.offset_bits,
        }
    }

    /// Decodes a physical address into DRAM coordinates.
    ///
    /// The burst offset is stripped first, then fields are sliced from the
    /// low bits upward in the scheme's order. Bits beyond the configured
    /// space are ignored.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical address.
    ///
    /// # Returns
    ///
    /// The decoded `Location`.
    pub fn decode(&self, addr: u64) -> Location {
        let mut rest = addr >> self.offset_bits;
        let mut fields = [0_u64; LEVELS];
        for level in self.order {
            fields[level] = slice_low_bits(&mut rest, self.bits[level]);
        }
        Location {
            channel: fields[CHANNEL],
            rank: fields[RANK],
            bank: fields[BANK],
            row: fields[ROW],
            column: fields[COLUMN],
        }
    }

    /// Encodes DRAM coordinates back into a physical address.
    ///
    /// Exact inverse of [`AddressMapper::decode`] for in-range coordinates;
    /// the burst-offset bits of the result are zero.
    ///
    /// # Arguments
    ///
    /// * `location` - Coordinates to encode (each field within its width).
    ///
    /// # Returns
    ///
    /// The physical address of the first byte of the burst.
    pub fn encode(&self, location: &Location) -> u64 {
        let fields = [
            location.channel,
            location.rank,
            location.bank,
            location.row,
            location.column,
        ];
        let mut addr = 0_u64;
        for level in self.order.iter().rev() {
            addr = (addr << self.bits[*level]) | (fields[*level] & mask(self.bits[*level]));
        }
        addr << self.offset_bits
    }

    /// Total addressable bytes in the configured space.
    pub fn space_bytes(&self) -> u64 {
        let field_bits: u32 = self.bits.iter().sum();
        1_u64 << (field_bits + self.offset_bits)
    }
}

/// Removes and returns the low `bits` of `addr`.
fn slice_low_bits(addr: &mut u64, bits: u32) -> u64 {
    let low = *addr & mask(bits);
    *addr >>= bits;
    low
}

const fn mask(bits: u32) -> u64 {
    (1_u64 << bits) - 1
}

/// Floor log2 of a power-of-two count.
const fn log2(mut count: u64) -> u32 {
    let mut bits = 0;
    while count > 1 {
        count >>= 1;
        bits += 1;
    }
    bits
}
