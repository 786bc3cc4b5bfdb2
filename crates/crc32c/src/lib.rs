//! CRC32C (Castagnoli) with runtime engine selection.
//!
//! Two engines compute the same function:
//!
//! | Engine | Implementation |
//! |--------|----------------|
//! | Hardware | SSE4.2 `crc32` + PCLMULQDQ (x86_64), ARMv8 CRC + PMULL (aarch64); three lanes merged by carry-less multiply |
//! | Software | slicing-by-8 over compile-time tables |
//!
//! The engine is chosen once per process from the detected CPU features and
//! the `CRC32C_SW_MODE` override, then cached.
//!
//! # Quick Start
//!
//! ```
//! // One-shot
//! let crc = crc32c::checksum(b"123456789", 0)?;
//! assert_eq!(crc, 0xE306_9283);
//!
//! // Chained: pass the previous value as the seed
//! let first = crc32c::checksum(b"1234", 0)?;
//! assert_eq!(crc32c::checksum(b"56789", first)?, crc);
//!
//! // Incremental
//! let mut hasher = crc32c::Crc32cHash::new()?;
//! hasher.update(b"123456789");
//! assert_eq!(hasher.digest(), [0xE3, 0x06, 0x92, 0x83]);
//! # Ok::<(), crc32c::Error>(())
//! ```
//!
//! # Environment
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `CRC32C_SW_MODE` | `auto`, `force-software`, `force-hardware-or-fail`, `none` | `auto` |
//! | `CRC32C_SKIP_HW_PROBE` | `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` | `0` |
//!
//! Both are read once, on first use. An unrecognized value makes every call
//! fail with [`Error::Configuration`].
// Fallibility discipline: deny unwrap/expect in production, allow in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod bitwise;
pub mod capability;
pub mod config;
pub mod engine;
mod error;
mod fold;
mod hash;
mod portable;
pub mod release;
pub mod runtime;
mod tables;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use backend::{CapabilityError, ConfigurationError, Mode};
pub use engine::{ByteOrder, Engine};
pub use error::Error;
pub use hash::Crc32cHash;
pub use release::{HostLock, NoHostLock, ReleaseMode, ReleasePolicy};
pub use traits::{Checksum, HashObject};

/// Table-less reference implementation, for differential testing.
///
/// `crc` is the canonical value to continue from, like the `seed` of
/// [`checksum`].
#[doc(hidden)]
#[must_use]
pub fn reference(data: &[u8], crc: u32) -> u32 {
  !bitwise::compute(!crc, data)
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// CRC32C of `data`, continuing from `seed` (0 for a fresh checksum).
///
/// # Errors
///
/// Fails only if engine resolution fails; see [`runtime::resolved`].
#[inline]
pub fn checksum(data: &[u8], seed: u32) -> Result<u32, Error> {
  Ok(engine()?.checksum(data, seed))
}

/// [`checksum`] that may release `host`'s lock around the computation.
///
/// # Errors
///
/// Fails only if engine resolution fails.
#[inline]
pub fn checksum_with_lock<H: HostLock>(
  data: &[u8],
  seed: u32,
  policy: &ReleasePolicy,
  host: &H,
) -> Result<u32, Error> {
  Ok(engine()?.checksum_with(data, seed, policy, host))
}

// ─────────────────────────────────────────────────────────────────────────────
// Introspection
// ─────────────────────────────────────────────────────────────────────────────

/// The process-wide engine.
///
/// # Errors
///
/// Fails if engine resolution fails.
#[inline]
pub fn engine() -> Result<Engine, Error> {
  runtime::resolved().map(|runtime| runtime.engine)
}

/// The effective mode (`Auto` when no override is set).
///
/// # Errors
///
/// Fails if engine resolution fails.
#[inline]
pub fn mode() -> Result<Mode, Error> {
  runtime::resolved().map(|runtime| runtime.mode())
}

/// Whether checksums are computed by the hardware engine.
///
/// # Errors
///
/// Fails if engine resolution fails.
#[inline]
pub fn is_hardware_backed() -> Result<bool, Error> {
  engine().map(|engine| engine.is_hardware())
}

/// Host byte order. Checksum values and digests do not depend on it.
#[inline]
#[must_use]
pub const fn byte_order() -> ByteOrder {
  ByteOrder::native()
}

/// `true` on big-endian hosts.
#[inline]
#[must_use]
pub const fn big_endian() -> bool {
  byte_order().is_big()
}
