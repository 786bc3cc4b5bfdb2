//! Message-digest shaped objects.
//!
//! [`HashObject`] mirrors the conventional "hash object" surface found in
//! scripting-language standard libraries: a fixed name, digest size and
//! block size, streaming `update`, raw `digest`, hex `hexdigest`, and `copy`.
//! It lets a checksum be dropped in wherever such an object is expected.

use core::fmt::Debug;

/// A streaming hash object with a fixed-size digest.
pub trait HashObject: Clone {
  /// Canonical lowercase algorithm name.
  const NAME: &'static str;

  /// Size of [`digest`](Self::digest) in bytes.
  const DIGEST_SIZE: usize;

  /// Internal block size in bytes. Byte-oriented algorithms report 1.
  const BLOCK_SIZE: usize;

  /// Raw digest bytes, typically `[u8; DIGEST_SIZE]`.
  type Digest: AsRef<[u8]> + Copy + Eq + Debug;

  /// Feed more data.
  fn update(&mut self, data: &[u8]);

  /// Digest of everything fed so far. Does not consume or reset the object.
  #[must_use]
  fn digest(&self) -> Self::Digest;

  /// [`digest`](Self::digest) as lowercase hex, two characters per byte.
  #[cfg(feature = "alloc")]
  #[must_use]
  fn hexdigest(&self) -> alloc::string::String {
    to_hex(self.digest().as_ref())
  }

  /// An independent copy; updates to either side do not affect the other.
  #[inline]
  #[must_use]
  fn copy(&self) -> Self {
    self.clone()
  }
}

/// Lowercase hex encoding.
#[cfg(feature = "alloc")]
#[must_use]
pub fn to_hex(bytes: &[u8]) -> alloc::string::String {
  use core::fmt::Write as _;

  let mut out = alloc::string::String::with_capacity(bytes.len().strict_mul(2));
  for b in bytes {
    // Writing into a String cannot fail.
    let _ = write!(out, "{b:02x}");
  }
  out
}
