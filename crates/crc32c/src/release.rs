//! Host lock-release policy.
//!
//! Some embedders run Rust code while holding a global execution lock. For
//! big buffers they can hand the lock back for the duration of the kernel
//! call. The kernel never calls back into the host, so that is always sound;
//! whether it pays off is the caller's decision, expressed as a
//! [`ReleasePolicy`].

/// Default size at which [`ReleaseMode::AboveThreshold`] starts releasing.
pub const DEFAULT_THRESHOLD: usize = 32 * 1024;

/// When to release the host lock around a kernel call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReleaseMode {
  /// Keep the lock.
  Never,
  /// Release on every call.
  Always,
  /// Release when the buffer is at least `threshold` bytes.
  #[default]
  AboveThreshold,
}

impl ReleaseMode {
  /// Map the integer convention used by older bindings:
  /// negative is [`AboveThreshold`](Self::AboveThreshold), zero is
  /// [`Never`](Self::Never), positive is [`Always`](Self::Always).
  #[inline]
  #[must_use]
  pub const fn from_code(code: i32) -> Self {
    match code {
      i32::MIN..=-1 => Self::AboveThreshold,
      0 => Self::Never,
      _ => Self::Always,
    }
  }
}

/// Release mode plus the size threshold it applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReleasePolicy {
  mode: ReleaseMode,
  threshold: usize,
}

impl Default for ReleasePolicy {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl ReleasePolicy {
  #[inline]
  #[must_use]
  pub const fn new(mode: ReleaseMode, threshold: usize) -> Self {
    Self { mode, threshold }
  }

  /// Release at [`DEFAULT_THRESHOLD`] bytes and above.
  pub const DEFAULT: Self = Self::new(ReleaseMode::AboveThreshold, DEFAULT_THRESHOLD);

  #[inline]
  #[must_use]
  pub const fn mode(&self) -> ReleaseMode {
    self.mode
  }

  #[inline]
  #[must_use]
  pub const fn threshold(&self) -> usize {
    self.threshold
  }

  /// Whether a call over `len` bytes should run with the host lock released.
  #[inline]
  #[must_use]
  pub fn should_release(&self, len: usize) -> bool {
    let release = match self.mode {
      ReleaseMode::Never => false,
      ReleaseMode::Always => true,
      ReleaseMode::AboveThreshold => len >= self.threshold,
    };
    tracing::trace!(len, mode = ?self.mode, threshold = self.threshold, release, "host lock decision");
    release
  }
}

/// Hook for embedders that hold a global execution lock.
///
/// `unlocked` must run `f` to completion and return its result; it may drop
/// and re-acquire the host lock around the call.
pub trait HostLock {
  fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// A host without a lock: runs `f` in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHostLock;

impl HostLock for NoHostLock {
  #[inline]
  fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R {
    f()
  }
}
