//! CPU feature detection for the crc32c workspace.
//!
//! This crate is the single source of truth for "can this machine run the
//! accelerated CRC32C kernels?" Algorithm crates query [`caps()`] instead of
//! doing ad-hoc detection.
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::CRC32C_READY) {
//!     // SSE4.2 + PCLMULQDQ kernel
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: everything goes through [`get()`].
//! 2. **Zero-cost when possible**: compile-time features are read via `cfg!`.
//! 3. **Cached otherwise**: runtime detection is cached in a `OnceLock` (std).
//! 4. **Overridable**: [`set_caps_override`] lets tests and bare-metal hosts pin the answer.
//! 5. **Miri-safe**: under Miri, always reports no acceleration.
#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};
pub use detect::{Detected, arch, caps, caps_static, detect_uncached, get, has_override, set_caps_override};
