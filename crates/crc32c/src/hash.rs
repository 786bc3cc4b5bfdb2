//! Incremental CRC32C hasher.

use traits::{Checksum, HashObject};

use crate::{
  Error,
  engine::Engine,
  release::{HostLock, ReleasePolicy},
  runtime,
};

/// Incremental CRC32C.
///
/// Holds the engine it was built with, so every update goes through the same
/// kernel. Cloning yields a fully independent hasher.
///
/// # Example
///
/// ```
/// use crc32c::Crc32cHash;
///
/// let mut hasher = Crc32cHash::new()?;
/// hasher.update(b"1234");
/// hasher.update(b"56789");
/// assert_eq!(hasher.value(), 0xE306_9283);
/// assert_eq!(hasher.hexdigest(), "e3069283");
/// # Ok::<(), crc32c::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crc32cHash {
  engine: Engine,
  value: u32,
  initial: u32,
  release: ReleasePolicy,
}

impl Crc32cHash {
  /// Fresh hasher on the process-wide engine.
  ///
  /// # Errors
  ///
  /// Fails if engine resolution fails (see [`runtime::resolved`]).
  pub fn new() -> Result<Self, Error> {
    Self::with_seed(0)
  }

  /// Hasher continuing from a previous checksum `seed`.
  ///
  /// # Errors
  ///
  /// Fails if engine resolution fails.
  pub fn with_seed(seed: u32) -> Result<Self, Error> {
    Ok(Self::with_engine(runtime::resolved()?.engine, seed))
  }

  /// Hasher already fed with `data`.
  ///
  /// # Errors
  ///
  /// Fails if engine resolution fails.
  pub fn with_data(data: &[u8]) -> Result<Self, Error> {
    let mut hasher = Self::new()?;
    hasher.update(data);
    Ok(hasher)
  }

  /// Hasher on an explicit engine. Never fails.
  #[inline]
  #[must_use]
  pub const fn with_engine(engine: Engine, seed: u32) -> Self {
    Self {
      engine,
      value: seed,
      initial: seed,
      release: ReleasePolicy::DEFAULT,
    }
  }

  /// Policy used by [`update_with`](Self::update_with).
  #[inline]
  #[must_use]
  pub const fn with_release_policy(mut self, release: ReleasePolicy) -> Self {
    self.release = release;
    self
  }

  /// Feed more data.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.value = self.engine.checksum(data, self.value);
  }

  /// Feed more data, releasing `host`'s lock if the policy says so.
  #[inline]
  pub fn update_with<H: HostLock>(&mut self, host: &H, data: &[u8]) {
    self.value = self.engine.checksum_with(data, self.value, &self.release, host);
  }

  /// Checksum of everything fed so far.
  #[inline]
  #[must_use]
  pub const fn value(&self) -> u32 {
    self.value
  }

  /// Go back to the seed this hasher was created with.
  #[inline]
  pub fn reset(&mut self) {
    self.value = self.initial;
  }

  /// Big-endian checksum bytes.
  #[inline]
  #[must_use]
  pub const fn digest(&self) -> [u8; 4] {
    self.value.to_be_bytes()
  }

  /// [`digest`](Self::digest) as 8 lowercase hex characters.
  #[must_use]
  pub fn hexdigest(&self) -> String {
    traits::to_hex(&self.digest())
  }

  #[inline]
  #[must_use]
  pub const fn engine(&self) -> Engine {
    self.engine
  }

  #[inline]
  #[must_use]
  pub const fn release_policy(&self) -> ReleasePolicy {
    self.release
  }

  /// `true` when updates run on the hardware engine.
  #[inline]
  #[must_use]
  pub const fn is_hardware_backed(&self) -> bool {
    self.engine.is_hardware()
  }
}

impl Checksum for Crc32cHash {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32cHash::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.value
  }

  #[inline]
  fn reset(&mut self) {
    Crc32cHash::reset(self);
  }
}

impl HashObject for Crc32cHash {
  const NAME: &'static str = "crc32c";
  const DIGEST_SIZE: usize = 4;
  const BLOCK_SIZE: usize = 1;
  type Digest = [u8; 4];

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32cHash::update(self, data);
  }

  #[inline]
  fn digest(&self) -> [u8; 4] {
    Crc32cHash::digest(self)
  }
}

impl std::io::Write for Crc32cHash {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}
