//! Capability detection: can this host run the hardware engine?
//!
//! Static detection comes from `platform` (CPU feature bits). On top of that
//! the hardware kernel is self-tested against the software engine once,
//! unless the probe is skipped. The answer is cached for the process.

use std::sync::OnceLock;

use crate::{
  engine::Engine,
  fold::{LANES, LONG, SHORT},
};

/// Known-answer vectors: (input, CRC32C).
const VECTORS: &[(&[u8], u32)] = &[
  (b"", 0),
  (b"123456789", 0xE306_9283),
  (b"The quick brown fox jumps over the lazy dog", 0x2262_0404),
  (&[0u8; 32], 0x8A91_36AA),
  (&[0xFFu8; 32], 0x62A8_AB43),
];

/// Run the hardware kernel against the software engine.
///
/// Covers every code path of the kernel: the fixed vectors, and a buffer
/// long enough to pass through the long blocks, the short blocks and every
/// tail stride.
fn self_test(hardware: &Engine) -> bool {
  let software = Engine::software();

  for &(input, expected) in VECTORS {
    if hardware.checksum(input, 0) != expected {
      return false;
    }
  }

  let len = LANES * LONG + LANES * SHORT + 15;
  let buf: Vec<u8> = (0..len).map(|i| (i as u32).wrapping_mul(0x9E37_79B9).to_le_bytes()[3]).collect();
  for cut in [0, 1, 7, 100, LANES * SHORT, LANES * LONG] {
    let Some(slice) = buf.get(cut..) else { continue };
    if hardware.checksum(slice, 0x5555_AAAA) != software.checksum(slice, 0x5555_AAAA) {
      return false;
    }
  }

  true
}

/// Detect hardware support without caching.
///
/// With `skip_probe`, only the CPU feature bits are consulted.
#[must_use]
pub fn detect(skip_probe: bool) -> bool {
  detect_with(Engine::hardware(), skip_probe)
}

fn detect_with(hardware: Option<Engine>, skip_probe: bool) -> bool {
  let Some(hardware) = hardware else {
    tracing::debug!(arch = %platform::arch(), caps = ?platform::caps(), "no hardware CRC32C kernel for this CPU");
    return false;
  };

  if skip_probe {
    tracing::debug!(kernel = hardware.name(), "hardware self-test skipped");
    return true;
  }

  let passed = self_test(&hardware);
  if !passed {
    tracing::warn!(
      kernel = hardware.name(),
      "hardware CRC32C self-test disagreed with the software engine; using software"
    );
  }
  passed
}

static CAPABLE: OnceLock<bool> = OnceLock::new();

/// Cached capability fact. The first caller's `skip_probe` wins.
#[must_use]
pub fn cached(skip_probe: bool) -> bool {
  *CAPABLE.get_or_init(|| detect(skip_probe))
}

/// Cached capability fact, honouring `CRC32C_SKIP_HW_PROBE`.
///
/// An unparsable skip value runs the probe.
#[must_use]
pub fn is_capable() -> bool {
  let skip_probe = crate::config::Config::from_env().is_ok_and(|config| config.skip_probe);
  cached(skip_probe)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vectors_hold_for_software() {
    let software = Engine::software();
    for &(input, expected) in VECTORS {
      assert_eq!(software.checksum(input, 0), expected);
    }
  }

  #[test]
  fn software_passes_its_own_self_test() {
    assert!(self_test(&Engine::software()));
  }

  fn faulty_long(crc: u32, data: &[u8]) -> u32 {
    let crc = crate::portable::compute(crc, data);
    if data.len() > 1000 { crc ^ 1 } else { crc }
  }

  // Right on whole 8-byte words, wrong once a long buffer leaves a ragged tail.
  fn faulty_tail(crc: u32, data: &[u8]) -> u32 {
    let crc = crate::portable::compute(crc, data);
    if data.len() > LANES * SHORT && data.len() % 8 != 0 { crc.rotate_left(1) } else { crc }
  }

  #[test]
  fn faulty_kernels_pass_the_fixed_vectors() {
    for kernel in [faulty_long as backend::Crc32Fn, faulty_tail] {
      let engine = Engine::from_kernel("faulty", kernel);
      for &(input, expected) in VECTORS {
        assert_eq!(engine.checksum(input, 0), expected);
      }
    }
  }

  #[test]
  fn self_test_rejects_long_buffer_fault() {
    assert!(!self_test(&Engine::from_kernel("faulty/long", faulty_long)));
  }

  #[test]
  fn self_test_rejects_tail_fault() {
    assert!(!self_test(&Engine::from_kernel("faulty/tail", faulty_tail)));
  }

  #[test]
  fn failed_self_test_means_not_capable() {
    let faulty = Engine::from_kernel("faulty/long", faulty_long);
    assert!(!detect_with(Some(faulty), false));
    // Skipping the probe trusts the feature bits.
    assert!(detect_with(Some(faulty), true));
    assert!(!detect_with(None, true));
  }

  #[test]
  fn detect_matches_static_availability() {
    let available = Engine::hardware().is_some();
    assert_eq!(detect(true), available);
    // A correct kernel passes the probe too.
    assert_eq!(detect(false), available);
  }

  #[test]
  fn cached_is_stable() {
    let first = cached(false);
    assert_eq!(cached(true), first);
    assert_eq!(is_capable(), first);
  }
}
