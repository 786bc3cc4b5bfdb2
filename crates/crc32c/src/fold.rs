//! GF(2) arithmetic for merging parallel CRC32C lanes.
//!
//! The hardware engine splits a block into three equal lanes and runs one
//! `crc32` chain per lane. The raw register is linear in its seed, so for
//! lanes `A`, `B`, `C` of `n` bytes each:
//!
//! ```text
//! R(s, A || B || C) = shift(R(s, A), 2n) ^ shift(R(0, B), n) ^ R(0, C)
//! shift(r, n)       = r * x^(8n) mod P
//! ```
//!
//! `shift` is done with one carry-less multiply by a precomputed key
//! followed by a `crc32` of the 64-bit product from a zero register. That
//! `crc32` contributes `x^33` (`x^32` from the instruction, `x` from the
//! reflected 32x32 product landing one bit low in 64 bits), so the key for a
//! shift of `n` bytes is `x^(8n - 33) mod P`.
//!
//! Arithmetic below is done in normal (MSB-first) form and reflected at the
//! end, because the register and the instructions are LSB-first.

#![cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]

/// CRC32C polynomial with explicit x^32 term. Normal form: 0x1_1EDC_6F41.
const POLY_FULL: u64 = 0x1_1EDC_6F41;

/// Bytes per lane in the long block loop.
pub const LONG: usize = 8192;

/// Bytes per lane in the short block loop.
pub const SHORT: usize = 256;

/// Number of independent `crc32` chains per block.
pub const LANES: usize = 3;

/// Keys for one block: (shift by two lanes, shift by one lane).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneKeys {
  pub two_lanes: u64,
  pub one_lane: u64,
}

impl LaneKeys {
  #[must_use]
  pub const fn for_lane_len(lane: usize) -> Self {
    Self {
      two_lanes: shift_key(2 * lane),
      one_lane: shift_key(lane),
    }
  }
}

pub const LONG_KEYS: LaneKeys = LaneKeys::for_lane_len(LONG);
pub const SHORT_KEYS: LaneKeys = LaneKeys::for_lane_len(SHORT);

/// Multiply two polynomials in GF(2) and reduce mod `POLY_FULL`.
///
/// Normal form; both inputs are at most 32-bit polynomials.
#[must_use]
pub const fn mul_mod(a: u64, b: u64) -> u64 {
  let mut product: u64 = 0;
  let mut i = 0;
  while i < 32 {
    if (b >> i) & 1 != 0 {
      product ^= a << i;
    }
    i += 1;
  }

  // product is at most 63 bits; reduce from the top down.
  let mut bit = 62u32;
  while bit >= 32 {
    if (product >> bit) & 1 != 0 {
      product ^= POLY_FULL << (bit - 32);
    }
    bit -= 1;
  }

  product
}

/// `x^n mod P` in normal form, by square-and-multiply.
#[must_use]
pub const fn xpow_mod(n: u64) -> u64 {
  if n < 32 {
    return 1u64 << n;
  }

  let mut result: u64 = 1; // x^0
  let mut base: u64 = 2; // x^1
  let mut exp = n;

  while exp > 0 {
    if exp & 1 != 0 {
      result = mul_mod(result, base);
    }
    base = mul_mod(base, base);
    exp >>= 1;
  }

  result
}

/// Carry-less multiply key that shifts a raw register forward by `bytes`.
///
/// Only meaningful for `bytes >= 5` (the exponent must stay non-negative);
/// every lane length used here is far above that.
#[must_use]
pub const fn shift_key(bytes: usize) -> u64 {
  let exp = (bytes as u64) * 8 - 33;
  (xpow_mod(exp) as u32).reverse_bits() as u64
}

/// Software `shift`: advance a raw register over `bytes` zero bytes.
#[cfg(test)]
#[must_use]
pub const fn shift(crc: u32, bytes: usize) -> u32 {
  let normal = crc.reverse_bits() as u64;
  (mul_mod(normal, xpow_mod(bytes as u64 * 8)) as u32).reverse_bits()
}

/// Portable 32x32 -> 64 carry-less multiply.
///
/// Matches `pclmulqdq` / `pmull` on the low 32 bits of each operand.
#[cfg(test)]
#[must_use]
pub const fn clmul(a: u32, b: u32) -> u64 {
  let a = a as u64;
  let mut product = 0u64;
  let mut i = 0;
  while i < 32 {
    if (b >> i) & 1 != 0 {
      product ^= a << i;
    }
    i += 1;
  }
  product
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::portable;

  #[test]
  fn xpow_small_exponents() {
    assert_eq!(xpow_mod(0), 1);
    assert_eq!(xpow_mod(31), 1 << 31);
    // x^32 = P - x^32
    assert_eq!(xpow_mod(32), POLY_FULL & 0xFFFF_FFFF);
  }

  #[test]
  fn xpow_adds_exponents() {
    for (a, b) in [(40, 77), (1000, 3), (8192 * 8, 8192 * 8)] {
      assert_eq!(mul_mod(xpow_mod(a), xpow_mod(b)), xpow_mod(a + b));
    }
  }

  #[test]
  fn shift_matches_zero_padding() {
    for crc in [0u32, 1, !0, 0xE306_9283] {
      for bytes in [0usize, 1, 7, 8, 64, SHORT, 2 * SHORT] {
        let zeros = [0u8; 2 * SHORT];
        assert_eq!(
          shift(crc, bytes),
          portable::compute(crc, &zeros[..bytes]),
          "crc={crc:#x} bytes={bytes}"
        );
      }
    }
  }

  #[test]
  fn key_then_crc_of_product_shifts() {
    // Mirrors the hardware merge: crc32_u64(0, clmul(a, key)) == shift(a, n).
    for crc in [1u32, 0x8000_0000, !0, 0xBFE9_2A83] {
      for lane in [SHORT, LONG] {
        let key = shift_key(lane) as u32;
        let product = clmul(crc, key);
        assert_eq!(portable::compute(0, &product.to_le_bytes()), shift(crc, lane), "lane={lane}");
      }
    }
  }

  #[test]
  fn lane_keys_are_consistent() {
    assert_eq!(LONG_KEYS.one_lane, shift_key(LONG));
    assert_eq!(LONG_KEYS.two_lanes, shift_key(2 * LONG));
    assert_eq!(SHORT_KEYS, LaneKeys::for_lane_len(SHORT));
    // keys fit in 32 bits so a single clmul lane suffices
    assert_eq!(LONG_KEYS.two_lanes >> 32, 0);
    assert_eq!(SHORT_KEYS.one_lane >> 32, 0);
  }

  #[test]
  fn three_lane_merge_matches_sequential() {
    let data: Vec<u8> = (0..3 * SHORT).map(|i| (i * 31 + 7) as u8).collect();
    let (a, rest) = data.split_at(SHORT);
    let (b, c) = rest.split_at(SHORT);

    let seed = !0u32;
    let ra = portable::compute(seed, a);
    let rb = portable::compute(0, b);
    let rc = portable::compute(0, c);

    let folded = clmul(ra, SHORT_KEYS.two_lanes as u32) ^ clmul(rb, SHORT_KEYS.one_lane as u32);
    let merged = portable::compute(0, &folded.to_le_bytes()) ^ rc;

    assert_eq!(merged, portable::compute(seed, &data));
  }
}
