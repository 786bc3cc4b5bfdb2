//! Const-fn CRC32C lookup table generation.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78).
//! Tables are computed at compile time and embedded in the binary.

// All indexing below uses bounded loop indices (0..256, 0..8).
// Clippy cannot prove this in const fn contexts.
#![allow(clippy::indexing_slicing)]

/// CRC32C polynomial in reflected (LSB-first) form.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// 64-byte aligned wrapper so each table starts on a cache line.
#[repr(C, align(64))]
pub struct Aligned64<T>(pub T);

/// Slicing-by-8 lookup tables. Total size: 8 * 256 * 4 = 8KB.
///
/// `TABLES.0[0]` is the classic single-byte table; `TABLES.0[k]` advances a
/// byte through `k` additional zero bytes.
pub static TABLES: Aligned64<[[u32; 256]; 8]> = Aligned64(generate_slicing_tables(POLYNOMIAL));

/// Generate the single-byte table for a reflected polynomial.
#[must_use]
pub const fn generate_table_0(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      if crc & 1 != 0 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }

  table
}

/// Generate 8 tables for slicing-by-8.
#[must_use]
pub const fn generate_slicing_tables(poly: u32) -> [[u32; 256]; 8] {
  let table0 = generate_table_0(poly);
  let mut tables = [[0u32; 256]; 8];
  tables[0] = table0;

  let mut t = 1;
  while t < 8 {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ table0[(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_0_known_entries() {
    let table = &TABLES.0[0];
    assert_eq!(table[0], 0);
    assert_eq!(table[1], 0xF26B_8303);
    assert_eq!(table[128], POLYNOMIAL);
    assert_eq!(table[255], 0xAD7D_5351);
  }

  #[test]
  fn slicing_tables_chain() {
    let tables = &TABLES.0;
    for t in 1..8 {
      for i in 0..256 {
        let prev = tables[t - 1][i];
        let expected = (prev >> 8) ^ tables[0][(prev & 0xFF) as usize];
        assert_eq!(tables[t][i], expected);
      }
    }
  }

  #[test]
  fn tables_are_cache_aligned() {
    let addr = core::ptr::addr_of!(TABLES.0) as usize;
    assert_eq!(addr % 64, 0);
  }
}
