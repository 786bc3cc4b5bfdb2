//! aarch64-accelerated CRC32C.
//!
//! ARMv8 `crc32c*` instructions in three independent chains, merged with
//! PMULL (`vmull_p64`). Same block layout as the x86_64 kernel; see
//! [`crate::fold`] for the merge.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::{__crc32cb, __crc32cd, __crc32ch, __crc32cw, vmull_p64};

use crate::fold::{LANES, LONG, LONG_KEYS, LaneKeys, SHORT, SHORT_KEYS};

/// Kernel name reported for diagnostics.
pub const NAME: &str = "aarch64/crc+pmull";

#[inline]
#[target_feature(enable = "aes", enable = "neon")]
unsafe fn clmul32(a: u32, key: u64) -> u64 {
  vmull_p64(u64::from(a), key) as u64
}

#[inline]
#[target_feature(enable = "crc", enable = "aes", enable = "neon")]
unsafe fn blocks<'a>(mut crc: u32, mut data: &'a [u8], lane: usize, keys: LaneKeys) -> (u32, &'a [u8]) {
  while let Some((block, rest)) = data.split_at_checked(LANES * lane) {
    let (a, bc) = block.split_at(lane);
    let (b, c) = bc.split_at(lane);

    let mut crc1 = 0u32;
    let mut crc2 = 0u32;
    for ((wa, wb), wc) in a.as_chunks::<8>().0.iter().zip(b.as_chunks::<8>().0).zip(c.as_chunks::<8>().0) {
      crc = __crc32cd(crc, u64::from_le_bytes(*wa));
      crc1 = __crc32cd(crc1, u64::from_le_bytes(*wb));
      crc2 = __crc32cd(crc2, u64::from_le_bytes(*wc));
    }

    let folded = clmul32(crc, keys.two_lanes) ^ clmul32(crc1, keys.one_lane);
    crc = __crc32cd(0, folded) ^ crc2;
    data = rest;
  }

  (crc, data)
}

#[inline]
#[target_feature(enable = "crc")]
unsafe fn tail(mut crc: u32, data: &[u8]) -> u32 {
  let (chunks8, tail8) = data.as_chunks::<8>();
  for chunk in chunks8 {
    crc = __crc32cd(crc, u64::from_le_bytes(*chunk));
  }

  let (chunks4, tail4) = tail8.as_chunks::<4>();
  for chunk in chunks4 {
    crc = __crc32cw(crc, u32::from_le_bytes(*chunk));
  }

  let (chunks2, tail2) = tail4.as_chunks::<2>();
  for chunk in chunks2 {
    crc = __crc32ch(crc, u16::from_le_bytes(*chunk));
  }

  for &b in tail2 {
    crc = __crc32cb(crc, b);
  }

  crc
}

/// CRC32C over `data` with ARMv8 CRC + PMULL.
///
/// # Safety
/// Caller must ensure the CPU supports `crc` and `aes` (PMULL).
#[target_feature(enable = "crc", enable = "aes", enable = "neon")]
unsafe fn crc32c_armv8_pmull(crc: u32, data: &[u8]) -> u32 {
  let (crc, rest) = blocks(crc, data, LONG, LONG_KEYS);
  let (crc, rest) = blocks(crc, rest, SHORT, SHORT_KEYS);
  tail(crc, rest)
}

/// Safe wrapper for the ARMv8 CRC + PMULL kernel.
#[inline]
pub fn crc32c_armv8_pmull_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: the dispatcher only selects this kernel when
  // `aarch64::CRC32C_READY` (neon + pmull + crc) is present.
  unsafe { crc32c_armv8_pmull(crc, data) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::portable;

  fn supported() -> bool {
    std::arch::is_aarch64_feature_detected!("crc") && std::arch::is_aarch64_feature_detected!("pmull")
  }

  #[test]
  fn check_value() {
    if !supported() {
      return;
    }
    assert_eq!(crc32c_armv8_pmull_safe(!0, b"123456789") ^ !0, 0xE306_9283);
  }

  #[test]
  fn matches_portable_across_tiers() {
    if !supported() {
      return;
    }

    let total = 2 * LANES * LONG + LANES * SHORT + 64;
    let data: Vec<u8> = (0..total).map(|i| (i as u32).wrapping_mul(2_654_435_761).to_le_bytes()[1]).collect();

    let mut lengths: Vec<usize> = (0..=64).collect();
    for base in [LANES * SHORT, LANES * LONG, LANES * LONG + LANES * SHORT, 2 * LANES * LONG] {
      lengths.extend(base - 9..=base + 9);
    }

    for len in lengths {
      let slice = &data[..len];
      for seed in [0u32, !0, 0x5555_AAAA] {
        assert_eq!(
          crc32c_armv8_pmull_safe(seed, slice),
          portable::compute(seed, slice),
          "len={len} seed={seed:#x}"
        );
      }
    }
  }
}
