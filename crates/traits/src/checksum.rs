//! Non-cryptographic checksum traits.
//!
//! - **Performance**: zero-cost abstractions, inline-friendly
//! - **Streaming**: incremental updates for large data

use core::fmt::Debug;

/// Non-cryptographic checksum algorithm.
///
/// Provides the core interface for incremental checksum computation.
/// Construction is left to the implementor: engines that resolve their
/// backend at runtime may need a fallible constructor.
///
/// # Usage
///
/// ```rust,ignore
/// use crc32c::Crc32cHash;
/// use traits::Checksum;
///
/// let mut hasher = Crc32cHash::new()?;
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// let crc = hasher.finalize();
/// ```
///
/// # Implementor Requirements
///
/// - `finalize()` must be idempotent (calling multiple times returns same value)
/// - `reset()` must restore the hasher to its initial state
/// - `clone()` must produce a hasher that shares no mutable state with the original
pub trait Checksum: Clone {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum output type (e.g. `u32` for CRC32C).
  type Output: Copy + Eq + Debug + Default;

  /// Update the hasher with additional data.
  ///
  /// This method can be called multiple times to process data incrementally.
  fn update(&mut self, data: &[u8]);

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// Semantics are identical to calling [`update`](Self::update) on each buffer
  /// in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Update the hasher with `std::io::IoSlice` buffers.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Return the checksum of everything processed so far.
  ///
  /// Does not consume the hasher; further updates continue from this value.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the hasher to its initial state.
  fn reset(&mut self);

  /// Wrap a reader so that every byte read is fed to this hasher.
  ///
  /// ```rust,ignore
  /// let mut reader = Crc32cHash::new()?.reader(File::open("data.bin")?);
  /// std::io::copy(&mut reader, &mut std::io::sink())?;
  /// println!("CRC: {:08x}", reader.crc());
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(self, inner: R) -> crate::io::ChecksumReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumReader::new(inner, self)
  }

  /// Wrap a writer so that every byte accepted by it is fed to this hasher.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(self, inner: W) -> crate::io::ChecksumWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumWriter::new(inner, self)
  }
}
