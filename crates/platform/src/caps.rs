//! CPU capability representation.
//!
//! [`Caps`] answers the question "which instructions can legally run here?"
//! Each bit corresponds to one ISA extension; the layout is architecture
//! specific but the API is uniform across targets.
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86_64 features
//! - Bits 64-127: aarch64 features
//!
//! # Usage
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::CRC32C_READY) {
//!     // SSE4.2 crc32 + PCLMULQDQ folding is available
//! }
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 128-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 2]);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self([0; 2]);

  /// Create a capability set from raw words.
  ///
  /// Only available in test builds or with the `testing` feature.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 2]) -> Self {
    Self(words)
  }

  /// Access the raw underlying words.
  #[inline]
  #[must_use]
  pub const fn as_raw(&self) -> &[u64; 2] {
    &self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0] && (self.0[1] & required.0[1]) == required.0[1]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self([self.0[0] & other.0[0], self.0[1] & other.0[1]])
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones()
  }

  /// Create a capability set with a single bit set.
  ///
  /// Bits at or above 128 fold into the upper word.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let bit_in_word = bit % 64;
    // match instead of indexing keeps this usable in const context
    match bit / 64 {
      0 => Self([1u64 << bit_in_word, 0]),
      _ => Self([0, 1u64 << bit_in_word]),
    }
  }

  /// Iterate over the names of the features present in this set.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_set().entries(self.feature_names()).finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture
// ─────────────────────────────────────────────────────────────────────────────

/// Instruction-set family of the running binary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
  /// Any target without a hardware CRC32C path.
  #[default]
  Other,
}

impl Arch {
  /// The architecture this binary was compiled for.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }

    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Features
// ─────────────────────────────────────────────────────────────────────────────

pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSE41: Caps = Caps::bit(1);
  /// SSE4.2 carries the `crc32` instruction (Castagnoli polynomial).
  pub const SSE42: Caps = Caps::bit(2);
  pub const PCLMULQDQ: Caps = Caps::bit(3);

  /// Everything the 3-lane `crc32` + `pclmulqdq` kernel needs.
  pub const CRC32C_READY: Caps = Caps([SSE42.0[0] | PCLMULQDQ.0[0], 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features
// ─────────────────────────────────────────────────────────────────────────────

pub mod aarch64 {
  use super::Caps;

  pub const NEON: Caps = Caps::bit(64); // baseline on AArch64
  pub const AES: Caps = Caps::bit(65);
  pub const PMULL: Caps = Caps::bit(66); // bundled with AES
  /// ARMv8 CRC32 extension (`crc32c{b,h,w,x}`).
  pub const CRC: Caps = Caps::bit(67);

  /// Everything the 3-lane `crc32cx` + `pmull` kernel needs.
  pub const CRC32C_READY: Caps = Caps([0, NEON.0[1] | PMULL.0[1] | CRC.0[1]]);
}

const FEATURE_NAMES: &[(Caps, &str)] = &[
  (x86::SSE2, "sse2"),
  (x86::SSE41, "sse4.1"),
  (x86::SSE42, "sse4.2"),
  (x86::PCLMULQDQ, "pclmulqdq"),
  (aarch64::NEON, "neon"),
  (aarch64::AES, "aes"),
  (aarch64::PMULL, "pmull"),
  (aarch64::CRC, "crc"),
];

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  #[test]
  fn none_is_empty() {
    assert!(Caps::NONE.is_empty());
    assert_eq!(Caps::NONE.count(), 0);
    assert!(Caps::NONE.has(Caps::NONE));
  }

  #[test]
  fn has_requires_every_bit() {
    let sse42 = x86::SSE42;
    assert!(!sse42.has(x86::CRC32C_READY));
    assert!((sse42 | x86::PCLMULQDQ).has(x86::CRC32C_READY));
    assert!(x86::CRC32C_READY.has(x86::SSE42));
  }

  #[test]
  fn bit_lands_in_correct_word() {
    assert_eq!(Caps::bit(3).as_raw(), &[1 << 3, 0]);
    assert_eq!(Caps::bit(67).as_raw(), &[0, 1 << 3]);
  }

  #[test]
  fn words_are_independent() {
    // same bit index in different words must not alias
    assert!(!x86::PCLMULQDQ.has(aarch64::CRC));
    assert!(!aarch64::CRC.has(x86::PCLMULQDQ));
    assert_eq!((x86::PCLMULQDQ & aarch64::CRC), Caps::NONE);
  }

  #[test]
  fn aarch64_ready_set() {
    let caps = aarch64::NEON | aarch64::AES | aarch64::PMULL | aarch64::CRC;
    assert!(caps.has(aarch64::CRC32C_READY));
    assert!(!(aarch64::NEON | aarch64::CRC).has(aarch64::CRC32C_READY));
    assert_eq!(aarch64::CRC32C_READY.count(), 3);
  }

  #[test]
  fn feature_names_lists_present_bits() {
    let names: Vec<_> = x86::CRC32C_READY.feature_names().collect();
    assert_eq!(names, ["sse4.2", "pclmulqdq"]);
  }

  #[test]
  fn bitor_assign_accumulates() {
    let mut caps = Caps::NONE;
    caps |= x86::SSE2;
    caps |= x86::SSE42;
    assert_eq!(caps.count(), 2);
    assert_eq!(caps, Caps::from_raw([0b101, 0]));
  }

  #[test]
  fn arch_display() {
    assert_eq!(alloc::format!("{}", Arch::X86_64), "x86_64");
    assert_eq!(Arch::Other.name(), "other");
  }
}
