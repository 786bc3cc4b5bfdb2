//! Kernel dispatch: selection and caching.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`]: choose the best kernel from a candidate list
//! - [`Crc32Dispatcher`]: caches a selection for the process lifetime
//!
//! # Usage
//!
//! Algorithm crates register their accelerated kernels as an ordered list of
//! `Candidate`s, best first:
//!
//! ```ignore
//! use backend::dispatch::{Candidate, Selected, select};
//! use platform::caps::x86;
//!
//! fn select_crc32c() -> Option<Selected<Crc32Fn>> {
//!     select(platform::caps(), &[
//!         Candidate::new("x86_64/sse4.2+pclmul", x86::CRC32C_READY, sse42_kernel),
//!     ])
//! }
//! ```
//!
//! Unlike a general-purpose dispatcher there is no implicit portable entry:
//! an empty selection means "no hardware engine", and the caller decides what
//! that implies through the [`policy`](crate::policy) module.

use platform::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/sse4.2+pclmul").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  pub name: &'static str,
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the first candidate whose `requires` is satisfied by `caps`.
///
/// Returns `None` when nothing matches (including an empty candidate list).
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates
    .iter()
    .find(|candidate| caps.has(candidate.requires))
    .map(|candidate| Selected::new(candidate.name, candidate.func))
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Signature for CRC32C kernels: `fn(crc: u32, data: &[u8]) -> u32`.
///
/// Kernels operate on the raw (pre-inverted) register.
pub type Crc32Fn = fn(u32, &[u8]) -> u32;

/// Dispatcher for CRC32C kernels.
///
/// Runs its selector once on first access under `std` and caches the answer,
/// including a `None`. Without `std` the selector runs on every call; it only
/// sees compile-time features there, so the answer is constant anyway.
///
/// ```ignore
/// static HARDWARE: Crc32Dispatcher = Crc32Dispatcher::new(select_crc32c);
///
/// if let Some(kernel) = HARDWARE.get() {
///     (kernel.func)(!0, data);
/// }
/// ```
pub struct Crc32Dispatcher {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<Option<Selected<Crc32Fn>>>,

  selector: fn() -> Option<Selected<Crc32Fn>>,
}

impl Crc32Dispatcher {
  #[must_use]
  pub const fn new(selector: fn() -> Option<Selected<Crc32Fn>>) -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),
      selector,
    }
  }

  /// Get the selected kernel, initializing on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<Selected<Crc32Fn>> {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(self.selector)
    }

    #[cfg(not(feature = "std"))]
    {
      (self.selector)()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn slow_crc32c(_crc: u32, _data: &[u8]) -> u32 {
    0xDEAD_BEEF
  }

  fn fast_crc32c(_crc: u32, _data: &[u8]) -> u32 {
    0xCAFE_BABE
  }

  #[test]
  fn candidate_creation() {
    let c: Candidate<Crc32Fn> = Candidate::new("test", Caps::NONE, slow_crc32c);
    assert_eq!(c.name, "test");
    assert_eq!(c.requires, Caps::NONE);
  }

  #[test]
  fn select_nothing_when_unsupported() {
    let candidates: &[Candidate<Crc32Fn>] = &[Candidate::new("fast", Caps::bit(0), fast_crc32c)];
    assert!(select(Caps::NONE, candidates).is_none());
  }

  #[test]
  fn select_empty_list() {
    let candidates: &[Candidate<Crc32Fn>] = &[];
    assert!(select(Caps::bit(0), candidates).is_none());
  }

  #[test]
  fn select_best_match() {
    let candidates: &[Candidate<Crc32Fn>] = &[
      Candidate::new("fast", Caps::bit(0), fast_crc32c),
      Candidate::new("slow", Caps::NONE, slow_crc32c),
    ];

    let selected = select(Caps::bit(0), candidates).unwrap();
    assert_eq!(selected.name, "fast");
    assert_eq!((selected.func)(0, &[]), 0xCAFE_BABE);
  }

  #[test]
  fn select_skips_unavailable() {
    let candidates: &[Candidate<Crc32Fn>] = &[
      Candidate::new("needs_bit1", Caps::bit(1), fast_crc32c),
      Candidate::new("needs_bit0", Caps::bit(0), fast_crc32c),
    ];

    let selected = select(Caps::bit(0), candidates).unwrap();
    assert_eq!(selected.name, "needs_bit0");
  }

  #[test]
  fn dispatcher_caches_selection() {
    fn selector() -> Option<Selected<Crc32Fn>> {
      Some(Selected::new("fast", fast_crc32c))
    }
    static DISPATCH: Crc32Dispatcher = Crc32Dispatcher::new(selector);

    let kernel = DISPATCH.get().unwrap();
    assert_eq!(kernel.name, "fast");
    assert_eq!((kernel.func)(0, b"abc"), 0xCAFE_BABE);
  }

  #[test]
  fn dispatcher_caches_absence() {
    fn selector() -> Option<Selected<Crc32Fn>> {
      None
    }
    static DISPATCH: Crc32Dispatcher = Crc32Dispatcher::new(selector);

    assert!(DISPATCH.get().is_none());
    assert!(DISPATCH.get().is_none());
  }
}
