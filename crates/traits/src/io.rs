//! I/O adapters that feed a [`Checksum`](crate::Checksum) as data flows.
//!
//! ```rust,ignore
//! use std::io::Write;
//!
//! let mut writer = Crc32cHash::new()?.writer(Vec::new());
//! writer.write_all(b"hello world")?;
//! let (out, crc) = writer.into_parts();
//! ```

use std::io;

use crate::Checksum;

#[inline]
fn read_and_update<R>(inner: &mut R, buf: &mut [u8], mut on_data: impl FnMut(&[u8])) -> io::Result<usize>
where
  R: io::Read,
{
  let n = inner.read(buf)?;
  if let Some(data) = buf.get(..n) {
    on_data(data);
  }
  Ok(n)
}

#[inline]
fn read_vectored_and_update<R>(
  inner: &mut R,
  bufs: &mut [io::IoSliceMut<'_>],
  mut on_data: impl FnMut(&[u8]),
) -> io::Result<usize>
where
  R: io::Read,
{
  let n = inner.read_vectored(bufs)?;
  let mut remaining = n;
  for buf in bufs {
    let to_hash = remaining.min(buf.len());
    if to_hash == 0 {
      break;
    }
    if let Some(data) = buf.get(..to_hash) {
      on_data(data);
    }
    remaining -= to_hash;
  }
  Ok(n)
}

// Only the bytes the inner writer accepted are hashed, so a short write
// leaves the checksum in step with what actually reached the sink.
#[inline]
fn write_and_update<W>(inner: &mut W, buf: &[u8], mut on_data: impl FnMut(&[u8])) -> io::Result<usize>
where
  W: io::Write,
{
  let n = inner.write(buf)?;
  if let Some(data) = buf.get(..n) {
    on_data(data);
  }
  Ok(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Checksum I/O Adapters
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps a [`Read`](io::Read) and computes a checksum transparently.
///
/// All reads pass through to the inner reader while updating the checksum
/// with the bytes actually read (short reads included).
#[derive(Clone, Debug)]
pub struct ChecksumReader<R, C: Checksum> {
  inner: R,
  hasher: C,
}

impl<R, C: Checksum> ChecksumReader<R, C> {
  #[inline]
  #[must_use]
  pub fn new(inner: R, hasher: C) -> Self {
    Self { inner, hasher }
  }

  /// Current checksum. Further reads continue updating it.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> C::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher(&self) -> &C {
    &self.hasher
  }

  /// Unwrap, returning the inner reader and the final checksum.
  #[inline]
  pub fn into_parts(self) -> (R, C::Output) {
    (self.inner, self.hasher.finalize())
  }

  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: io::Read, C: Checksum> io::Read for ChecksumReader<R, C> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    read_and_update(&mut self.inner, buf, |data| self.hasher.update(data))
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [io::IoSliceMut<'_>]) -> io::Result<usize> {
    read_vectored_and_update(&mut self.inner, bufs, |data| self.hasher.update(data))
  }
}

/// Wraps a [`Write`](io::Write) and computes a checksum transparently.
#[derive(Clone, Debug)]
pub struct ChecksumWriter<W, C: Checksum> {
  inner: W,
  hasher: C,
}

impl<W, C: Checksum> ChecksumWriter<W, C> {
  #[inline]
  #[must_use]
  pub fn new(inner: W, hasher: C) -> Self {
    Self { inner, hasher }
  }

  /// Current checksum of the bytes accepted so far.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> C::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher(&self) -> &C {
    &self.hasher
  }

  /// Unwrap, returning the inner writer and the final checksum.
  #[inline]
  pub fn into_parts(self) -> (W, C::Output) {
    (self.inner, self.hasher.finalize())
  }

  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut W {
    &mut self.inner
  }
}

impl<W: io::Write, C: Checksum> io::Write for ChecksumWriter<W, C> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    write_and_update(&mut self.inner, buf, |data| self.hasher.update(data))
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}
