//! x86_64-accelerated CRC32C.
//!
//! SSE4.2 `crc32` instructions in three independent chains, merged with
//! PCLMULQDQ (see [`crate::fold`] for the math). Leftovers that do not fill a
//! short block go through 8/4/2/1-byte `crc32` strides.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::{
  _mm_clmulepi64_si128, _mm_crc32_u8, _mm_crc32_u16, _mm_crc32_u32, _mm_crc32_u64, _mm_cvtsi64_si128,
  _mm_cvtsi128_si64,
};

use crate::fold::{LANES, LONG, LONG_KEYS, LaneKeys, SHORT, SHORT_KEYS};

/// Kernel name reported for diagnostics.
pub const NAME: &str = "x86_64/sse4.2+pclmul";

/// Carry-less multiply of two values below 2^32; the product fits in 64 bits.
#[inline]
#[target_feature(enable = "sse4.2,pclmulqdq")]
unsafe fn clmul32(a: u64, key: u64) -> u64 {
  let product = _mm_clmulepi64_si128(_mm_cvtsi64_si128(a as i64), _mm_cvtsi64_si128(key as i64), 0x00);
  _mm_cvtsi128_si64(product) as u64
}

/// Consume as many `3 * lane` blocks as `data` holds, returning the rest.
#[inline]
#[target_feature(enable = "sse4.2,pclmulqdq")]
unsafe fn blocks<'a>(mut crc: u64, mut data: &'a [u8], lane: usize, keys: LaneKeys) -> (u64, &'a [u8]) {
  while let Some((block, rest)) = data.split_at_checked(LANES * lane) {
    let (a, bc) = block.split_at(lane);
    let (b, c) = bc.split_at(lane);

    let mut crc1 = 0u64;
    let mut crc2 = 0u64;
    for ((wa, wb), wc) in a.as_chunks::<8>().0.iter().zip(b.as_chunks::<8>().0).zip(c.as_chunks::<8>().0) {
      crc = _mm_crc32_u64(crc, u64::from_le_bytes(*wa));
      crc1 = _mm_crc32_u64(crc1, u64::from_le_bytes(*wb));
      crc2 = _mm_crc32_u64(crc2, u64::from_le_bytes(*wc));
    }

    let folded = clmul32(crc, keys.two_lanes) ^ clmul32(crc1, keys.one_lane);
    crc = _mm_crc32_u64(0, folded) ^ crc2;
    data = rest;
  }

  (crc, data)
}

/// Single-chain strides for whatever the block loops left over.
#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn tail(crc: u64, data: &[u8]) -> u32 {
  let mut state64 = crc;

  let (chunks8, tail8) = data.as_chunks::<8>();
  for chunk in chunks8 {
    state64 = _mm_crc32_u64(state64, u64::from_le_bytes(*chunk));
  }

  let mut state = state64 as u32;

  let (chunks4, tail4) = tail8.as_chunks::<4>();
  for chunk in chunks4 {
    state = _mm_crc32_u32(state, u32::from_le_bytes(*chunk));
  }

  let (chunks2, tail2) = tail4.as_chunks::<2>();
  for chunk in chunks2 {
    state = _mm_crc32_u16(state, u16::from_le_bytes(*chunk));
  }

  for &b in tail2 {
    state = _mm_crc32_u8(state, b);
  }

  state
}

/// CRC32C over `data` with SSE4.2 + PCLMULQDQ.
///
/// `crc` is the raw register (pre-inverted).
///
/// # Safety
/// Caller must ensure the CPU supports `sse4.2` and `pclmulqdq`.
#[target_feature(enable = "sse4.2,pclmulqdq")]
unsafe fn crc32c_sse42_pclmul(crc: u32, data: &[u8]) -> u32 {
  let (crc, rest) = blocks(u64::from(crc), data, LONG, LONG_KEYS);
  let (crc, rest) = blocks(crc, rest, SHORT, SHORT_KEYS);
  tail(crc, rest)
}

/// Safe wrapper for the SSE4.2 + PCLMULQDQ kernel.
#[inline]
pub fn crc32c_sse42_pclmul_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: the dispatcher only selects this kernel when `x86::CRC32C_READY`
  // (sse4.2 + pclmulqdq) is present.
  unsafe { crc32c_sse42_pclmul(crc, data) }
}
