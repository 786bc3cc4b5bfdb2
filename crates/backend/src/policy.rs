//! Engine selection policy.
//!
//! [`resolve`] is a pure function of an optional [`Mode`] override and the
//! host's capability fact. Callers run it once and cache the [`Resolution`];
//! no per-call capability branching happens after that.
//!
//! | Mode | capable | Engine |
//! |------|---------|--------|
//! | `Auto` | yes | Hardware |
//! | `Auto` | no | Software |
//! | `ForceSoftware` | any | Software |
//! | `ForceHardwareOrFail` | yes | Hardware |
//! | `ForceHardwareOrFail` | no | [`CapabilityError`] |
//! | `ForceNone` | any | Software |

use crate::error::CapabilityError;

// ─────────────────────────────────────────────────────────────────────────────
// Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Override for automatic engine selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
  /// Hardware when the host supports it, software otherwise (default).
  #[default]
  Auto,

  /// Always use the software engine.
  ForceSoftware,

  /// Use the hardware engine, failing fast when the host cannot.
  ForceHardwareOrFail,

  /// Software engine, reported separately from `ForceSoftware` so tests can
  /// tell which override produced the decision.
  ForceNone,
}

impl Mode {
  /// Accepted spellings, for error messages.
  pub const EXPECTED: &'static str = "auto, force-software, force-hardware-or-fail, none";

  /// Parse from string (for env var support).
  ///
  /// Accepts case-insensitive names, ignoring surrounding whitespace:
  /// - `"auto"`
  /// - `"force-software"`
  /// - `"force-hardware-or-fail"`
  /// - `"none"`
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if s.eq_ignore_ascii_case("force-software") {
      return Some(Self::ForceSoftware);
    }
    if s.eq_ignore_ascii_case("force-hardware-or-fail") {
      return Some(Self::ForceHardwareOrFail);
    }
    if s.eq_ignore_ascii_case("none") {
      return Some(Self::ForceNone);
    }

    None
  }

  /// Canonical name, the inverse of [`parse`](Self::parse).
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::ForceSoftware => "force-software",
      Self::ForceHardwareOrFail => "force-hardware-or-fail",
      Self::ForceNone => "none",
    }
  }
}

impl core::fmt::Display for Mode {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Which engine services checksum calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineChoice {
  Hardware,
  Software,
}

impl EngineChoice {
  #[inline]
  #[must_use]
  pub const fn is_hardware(self) -> bool {
    matches!(self, Self::Hardware)
  }
}

/// Outcome of [`resolve`]: the engine plus the mode that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
  pub engine: EngineChoice,
  /// The effective mode. A missing override is reported as `Auto`.
  pub mode: Mode,
}

/// Decide which engine to use.
///
/// # Errors
///
/// Returns [`CapabilityError`] when `ForceHardwareOrFail` is requested on a
/// host without hardware support.
pub fn resolve(mode: Option<Mode>, capable: bool) -> Result<Resolution, CapabilityError> {
  let mode = mode.unwrap_or_default();
  let engine = match mode {
    Mode::Auto if capable => EngineChoice::Hardware,
    Mode::Auto => EngineChoice::Software,
    Mode::ForceSoftware | Mode::ForceNone => EngineChoice::Software,
    Mode::ForceHardwareOrFail if capable => EngineChoice::Hardware,
    Mode::ForceHardwareOrFail => return Err(CapabilityError { mode }),
  };

  Ok(Resolution { engine, mode })
}
