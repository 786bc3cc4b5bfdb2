//! Engine handles.
//!
//! An [`Engine`] is an immutable pairing of a kernel with the choice that
//! produced it. Kernels work on the raw register; the handle applies the
//! all-ones pre/post XOR so every value a caller sees is canonical.

use backend::{Candidate, Crc32Dispatcher, Crc32Fn, EngineChoice, Selected, select};

use crate::{
  portable,
  release::{HostLock, ReleasePolicy},
};

/// Kernel name for the software engine.
pub const PORTABLE_NAME: &str = "portable/slice8";

// ─────────────────────────────────────────────────────────────────────────────
// Hardware kernel selection
// ─────────────────────────────────────────────────────────────────────────────

fn select_hardware() -> Option<Selected<Crc32Fn>> {
  let candidates: &[Candidate<Crc32Fn>] = &[
    #[cfg(target_arch = "x86_64")]
    Candidate::new(
      crate::x86_64::NAME,
      platform::caps::x86::CRC32C_READY,
      crate::x86_64::crc32c_sse42_pclmul_safe,
    ),
    #[cfg(target_arch = "aarch64")]
    Candidate::new(
      crate::aarch64::NAME,
      platform::caps::aarch64::CRC32C_READY,
      crate::aarch64::crc32c_armv8_pmull_safe,
    ),
  ];

  select(platform::caps(), candidates)
}

static HARDWARE: Crc32Dispatcher = Crc32Dispatcher::new(select_hardware);

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

/// A resolved CRC32C engine.
///
/// Cheap to copy; computation through it is infallible.
#[derive(Clone, Copy)]
pub struct Engine {
  choice: EngineChoice,
  name: &'static str,
  kernel: Crc32Fn,
}

impl Engine {
  /// The table-driven software engine. Always available.
  #[inline]
  #[must_use]
  pub const fn software() -> Self {
    Self {
      choice: EngineChoice::Software,
      name: PORTABLE_NAME,
      kernel: portable::compute,
    }
  }

  /// The hardware engine, if this CPU has the instructions it needs.
  ///
  /// This reflects static detection only; [`crate::capability::detect`]
  /// additionally self-tests the kernel.
  #[inline]
  #[must_use]
  pub fn hardware() -> Option<Self> {
    HARDWARE.get().map(|selected| Self {
      choice: EngineChoice::Hardware,
      name: selected.name,
      kernel: selected.func,
    })
  }

  /// Hardware-tagged engine over an arbitrary kernel.
  #[cfg(test)]
  pub(crate) const fn from_kernel(name: &'static str, kernel: Crc32Fn) -> Self {
    Self {
      choice: EngineChoice::Hardware,
      name,
      kernel,
    }
  }

  /// Engine for a resolved choice. Falls back to software if the hardware
  /// kernel is unavailable, which resolution already rules out.
  #[must_use]
  pub fn for_choice(choice: EngineChoice) -> Self {
    match choice {
      EngineChoice::Hardware => Self::hardware().unwrap_or_else(Self::software),
      EngineChoice::Software => Self::software(),
    }
  }

  /// Checksum `data` continuing from `seed` (0 for a fresh checksum).
  #[inline]
  #[must_use]
  pub fn checksum(&self, data: &[u8], seed: u32) -> u32 {
    !(self.kernel)(!seed, data)
  }

  /// Like [`Engine::checksum`], running the kernel inside `host.unlocked`
  /// when `policy` asks for it.
  #[inline]
  pub fn checksum_with<H: HostLock>(&self, data: &[u8], seed: u32, policy: &ReleasePolicy, host: &H) -> u32 {
    if policy.should_release(data.len()) {
      host.unlocked(|| self.checksum(data, seed))
    } else {
      self.checksum(data, seed)
    }
  }

  #[inline]
  #[must_use]
  pub const fn choice(&self) -> EngineChoice {
    self.choice
  }

  /// `true` for the hardware engine.
  #[inline]
  #[must_use]
  pub const fn is_hardware(&self) -> bool {
    self.choice.is_hardware()
  }

  /// Kernel name, e.g. `"x86_64/sse4.2+pclmul"` or `"portable/slice8"`.
  #[inline]
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.name
  }
}

impl core::fmt::Debug for Engine {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Engine")
      .field("choice", &self.choice)
      .field("name", &self.name)
      .finish()
  }
}

impl PartialEq for Engine {
  fn eq(&self, other: &Self) -> bool {
    self.choice == other.choice && self.name == other.name
  }
}

impl Eq for Engine {}

// ─────────────────────────────────────────────────────────────────────────────
// Byte order
// ─────────────────────────────────────────────────────────────────────────────

/// Host byte order, reported for diagnostics.
///
/// Checksum values never depend on it: digests are always big-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
  Big,
  Little,
}

impl ByteOrder {
  #[inline]
  #[must_use]
  pub const fn native() -> Self {
    if cfg!(target_endian = "big") { Self::Big } else { Self::Little }
  }

  #[inline]
  #[must_use]
  pub const fn is_big(self) -> bool {
    matches!(self, Self::Big)
  }
}

#[cfg(test)]
mod tests {
  use core::cell::Cell;

  use super::*;
  use crate::release::{NoHostLock, ReleaseMode};

  struct CountingLock(Cell<usize>);

  impl HostLock for CountingLock {
    fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R {
      self.0.set(self.0.get() + 1);
      f()
    }
  }

  #[test]
  fn software_check_value() {
    let engine = Engine::software();
    assert_eq!(engine.checksum(b"123456789", 0), 0xE306_9283);
    assert!(!engine.is_hardware());
    assert_eq!(engine.name(), PORTABLE_NAME);
  }

  #[test]
  fn seed_continues_checksum() {
    let engine = Engine::software();
    let first = engine.checksum(b"1234", 0);
    assert_eq!(engine.checksum(b"56789", first), 0xE306_9283);
  }

  #[test]
  fn empty_input_returns_seed() {
    let engine = Engine::software();
    assert_eq!(engine.checksum(b"", 0), 0);
    assert_eq!(engine.checksum(b"", 0x1234_5678), 0x1234_5678);
  }

  #[test]
  fn hardware_agrees_when_present() {
    let Some(hw) = Engine::hardware() else {
      return;
    };
    assert!(hw.is_hardware());
    let sw = Engine::software();
    let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 + 3) as u8).collect();
    for len in [0, 1, 7, 8, 9, 255, 768, 769, 4096] {
      assert_eq!(hw.checksum(&data[..len], 0), sw.checksum(&data[..len], 0), "len={len}");
    }
  }

  #[test]
  fn for_choice_software() {
    assert_eq!(Engine::for_choice(EngineChoice::Software), Engine::software());
  }

  #[test]
  fn checksum_with_releases_only_when_asked() {
    let engine = Engine::software();
    let lock = CountingLock(Cell::new(0));
    let data = [0u8; 64];

    let never = ReleasePolicy::new(ReleaseMode::Never, 0);
    let always = ReleasePolicy::new(ReleaseMode::Always, 0);
    let above = ReleasePolicy::new(ReleaseMode::AboveThreshold, 32);

    let expected = engine.checksum(&data, 0);
    assert_eq!(engine.checksum_with(&data, 0, &never, &lock), expected);
    assert_eq!(lock.0.get(), 0);
    assert_eq!(engine.checksum_with(&data, 0, &always, &lock), expected);
    assert_eq!(lock.0.get(), 1);
    assert_eq!(engine.checksum_with(&data, 0, &above, &lock), expected);
    assert_eq!(lock.0.get(), 2);
    assert_eq!(engine.checksum_with(&data[..31], 0, &above, &lock), engine.checksum(&data[..31], 0));
    assert_eq!(lock.0.get(), 2);
  }

  #[test]
  fn no_host_lock_is_transparent() {
    let engine = Engine::software();
    let policy = ReleasePolicy::new(ReleaseMode::Always, 0);
    assert_eq!(engine.checksum_with(b"123456789", 0, &policy, &NoHostLock), 0xE306_9283);
  }

  #[test]
  fn native_byte_order() {
    assert_eq!(ByteOrder::native().is_big(), cfg!(target_endian = "big"));
  }
}
