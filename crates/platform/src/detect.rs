//! Runtime CPU detection.
//!
//! Handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `is_x86_feature_detected!` / `is_aarch64_feature_detected!`)
//! - Caching (via `OnceLock` with `std`)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns empty caps)
//!
//! # Overrides
//!
//! ```ignore
//! // Pretend the host has no acceleration at all.
//! platform::set_caps_override(Some(platform::Detected::portable()));
//! ```

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::{Arch, Caps};

// ─────────────────────────────────────────────────────────────────────────────
// Detected
// ─────────────────────────────────────────────────────────────────────────────

/// Result of CPU detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  pub caps: Caps,
  pub arch: Arch,
}

impl Detected {
  /// No acceleration on an unknown architecture.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      caps: Caps::NONE,
      arch: Arch::Other,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────
//
// The override is stored in atomics so it can be set, replaced, and cleared
// on both std and no_std builds. It takes precedence over detection.

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: [AtomicU64; 2] = [AtomicU64::new(0), AtomicU64::new(0)];
static OVERRIDE_ARCH: core::sync::atomic::AtomicU8 = core::sync::atomic::AtomicU8::new(0);

const fn arch_to_u8(arch: Arch) -> u8 {
  match arch {
    Arch::Other => 0,
    Arch::X86_64 => 1,
    Arch::Aarch64 => 2,
  }
}

const fn arch_from_u8(v: u8) -> Arch {
  match v {
    1 => Arch::X86_64,
    2 => Arch::Aarch64,
    _ => Arch::Other,
  }
}

/// Set or clear the capabilities override.
///
/// When set, [`get()`] returns the override value instead of detecting.
/// Pass `None` to resume detection.
///
/// Consumers that cache their own decisions derived from [`get()`] will
/// only observe an override installed before their first query.
pub fn set_caps_override(value: Option<Detected>) {
  match value {
    Some(det) => {
      let [lo, hi] = *det.caps.as_raw();
      OVERRIDE_BITS[0].store(lo, Ordering::Release);
      OVERRIDE_BITS[1].store(hi, Ordering::Release);
      OVERRIDE_ARCH.store(arch_to_u8(det.arch), Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<Detected> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }

  let caps = Caps([
    OVERRIDE_BITS[0].load(Ordering::Acquire),
    OVERRIDE_BITS[1].load(Ordering::Acquire),
  ]);
  let arch = arch_from_u8(OVERRIDE_ARCH.load(Ordering::Acquire));
  Some(Detected { caps, arch })
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities.
///
/// With `std` the first detection is cached in a `OnceLock`. Without `std`
/// only compile-time features are visible, so detection is a constant.
#[inline]
#[must_use]
pub fn get() -> Detected {
  // Miri cannot interpret SIMD intrinsics.
  #[cfg(miri)]
  {
    return Detected::portable();
  }

  #[cfg(not(miri))]
  {
    if let Some(det) = get_override() {
      return det;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Detected> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      detect_uncached()
    }
  }
}

#[inline]
#[must_use]
pub fn caps() -> Caps {
  get().caps
}

#[inline]
#[must_use]
pub fn arch() -> Arch {
  get().arch
}

/// Capabilities known at compile time.
///
/// Usable in const context. Never includes runtime-detected features.
#[inline]
#[must_use]
pub const fn caps_static() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    compile_time_x86_64()
  }

  #[cfg(target_arch = "aarch64")]
  {
    compile_time_aarch64()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

/// Detect capabilities without caching and without consulting the override.
#[inline]
#[must_use]
pub fn detect_uncached() -> Detected {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(all(feature = "std", target_arch = "x86_64"))]
  {
    caps |= runtime_x86_64();
  }

  #[cfg(all(feature = "std", target_arch = "aarch64"))]
  {
    caps |= runtime_aarch64();
  }

  Detected {
    caps,
    arch: Arch::current(),
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
const fn compile_time_x86_64() -> Caps {
  use crate::caps::x86;

  // SSE2 is part of the x86_64 baseline.
  #[allow(unused_mut)]
  let mut caps = x86::SSE2;

  #[cfg(target_feature = "sse4.1")]
  {
    caps = caps.union(x86::SSE41);
  }

  #[cfg(target_feature = "sse4.2")]
  {
    caps = caps.union(x86::SSE42);
  }

  #[cfg(target_feature = "pclmulqdq")]
  {
    caps = caps.union(x86::PCLMULQDQ);
  }

  caps
}

#[cfg(all(feature = "std", target_arch = "x86_64"))]
fn runtime_x86_64() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;

  if std::arch::is_x86_feature_detected!("sse4.1") {
    caps |= x86::SSE41;
  }
  if std::arch::is_x86_feature_detected!("sse4.2") {
    caps |= x86::SSE42;
  }
  if std::arch::is_x86_feature_detected!("pclmulqdq") {
    caps |= x86::PCLMULQDQ;
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "aarch64")]
const fn compile_time_aarch64() -> Caps {
  use crate::caps::aarch64;

  #[allow(unused_mut)]
  let mut caps = aarch64::NEON;

  #[cfg(target_feature = "aes")]
  {
    caps = caps.union(aarch64::AES);
    caps = caps.union(aarch64::PMULL); // PMULL is bundled with AES
  }

  #[cfg(target_feature = "crc")]
  {
    caps = caps.union(aarch64::CRC);
  }

  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn runtime_aarch64() -> Caps {
  use crate::caps::aarch64;

  let mut caps = Caps::NONE;

  if std::arch::is_aarch64_feature_detected!("aes") {
    caps |= aarch64::AES;
  }
  if std::arch::is_aarch64_feature_detected!("pmull") {
    caps |= aarch64::PMULL;
  }
  if std::arch::is_aarch64_feature_detected!("crc") {
    caps |= aarch64::CRC;
  }

  caps
}
