//! Table-less CRC32C.
//!
//! One bit per step with a branchless conditional XOR. Slow (~200 MB/s), but
//! it depends on nothing except the polynomial, which makes it the yardstick
//! the table-driven and hardware engines are checked against.

use crate::tables::POLYNOMIAL;

/// Compute CRC32C over `data` without lookup tables.
///
/// `crc` is the raw register (pre-inverted); the result is too.
#[inline]
#[must_use]
pub fn compute(crc: u32, data: &[u8]) -> u32 {
  data.iter().fold(crc, |crc, &byte| compute_byte(crc, byte))
}

/// Advance the register by one byte.
///
/// `0u32.wrapping_sub(bit)` is either all zeros or all ones, so the polynomial
/// is applied without a branch.
#[inline]
#[must_use]
pub const fn compute_byte(mut crc: u32, byte: u8) -> u32 {
  crc ^= byte as u32;

  let mut i = 0;
  while i < 8 {
    let mask = 0u32.wrapping_sub(crc & 1);
    crc = (crc >> 1) ^ (POLYNOMIAL & mask);
    i += 1;
  }

  crc
}
