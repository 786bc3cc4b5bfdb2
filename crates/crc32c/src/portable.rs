//! Portable CRC32C: the software engine.
//!
//! Slicing-by-8 processes 8 bytes per step with 8 independent table lookups,
//! hiding lookup latency. For each 8-byte chunk:
//!
//! 1. XOR the low 4 bytes with the current register
//! 2. Look up each byte in the table matching its distance from the end
//! 3. XOR the 8 entries together
//!
//! Bytes that do not fill a chunk go through the single-byte table, so the
//! result never depends on where chunk boundaries fall.

// Indices are `u8 as usize` into 256-entry tables and fixed table numbers < 8.
#![allow(clippy::indexing_slicing)]

use crate::tables::TABLES;

/// Compute CRC32C using slicing-by-8.
///
/// `crc` is the raw register (NOT pre/post XORed); the caller applies the
/// final XOR.
#[inline]
#[must_use]
pub fn compute(crc: u32, data: &[u8]) -> u32 {
  let t = &TABLES.0;
  let mut crc = crc;

  let (chunks, tail) = data.as_chunks::<8>();
  for chunk in chunks {
    let d = u64::from_le_bytes(*chunk);
    let lo = (crc as u64 ^ d) as u32;
    let hi = (d >> 32) as u32;

    // table[7] consumes the first byte of the chunk, table[0] the last.
    crc = t[7][(lo & 0xFF) as usize]
      ^ t[6][((lo >> 8) & 0xFF) as usize]
      ^ t[5][((lo >> 16) & 0xFF) as usize]
      ^ t[4][(lo >> 24) as usize]
      ^ t[3][(hi & 0xFF) as usize]
      ^ t[2][((hi >> 8) & 0xFF) as usize]
      ^ t[1][((hi >> 16) & 0xFF) as usize]
      ^ t[0][(hi >> 24) as usize];
  }

  compute_bytewise(crc, tail)
}

/// Compute CRC32C one byte at a time with the single 256-entry table.
///
/// This is the formulation slicing-by-8 must agree with.
#[inline]
#[must_use]
pub fn compute_bytewise(crc: u32, data: &[u8]) -> u32 {
  data.iter().fold(crc, |crc, &byte| compute_byte(crc, byte))
}

/// Advance the register by one byte.
#[inline]
#[must_use]
pub const fn compute_byte(crc: u32, byte: u8) -> u32 {
  let idx = (crc as u8 ^ byte) as usize;
  (crc >> 8) ^ TABLES.0[0][idx]
}
