//! CRC32C runtime configuration (environment overrides).
//!
//! Two independent knobs:
//! - `CRC32C_SW_MODE`: engine selection mode (see [`Mode`])
//! - `CRC32C_SKIP_HW_PROBE`: skip the hardware self-test during capability detection
//!
//! Empty or whitespace-only values count as unset. Anything unrecognized is a
//! [`ConfigurationError`]; it is never silently replaced by the default.

use backend::{ConfigurationError, Mode};

/// Environment variable selecting the engine mode.
pub const MODE_VAR: &str = "CRC32C_SW_MODE";

/// Environment variable disabling the hardware self-test.
pub const SKIP_PROBE_VAR: &str = "CRC32C_SKIP_HW_PROBE";

const BOOL_EXPECTED: &str = "1, 0, true, false, yes, no, on, off";

/// Parsed overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
  /// Requested mode; `None` when unset (behaves as [`Mode::Auto`]).
  pub mode: Option<Mode>,
  /// Skip the hardware self-test.
  pub skip_probe: bool,
}

impl Config {
  /// Read overrides from the process environment.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigurationError`] for an unrecognized value.
  pub fn from_env() -> Result<Self, ConfigurationError> {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Read overrides through `lookup`, which maps a variable name to its value.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigurationError`] for an unrecognized value.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
    fn non_empty(value: Option<String>) -> Option<String> {
      value.filter(|v| !v.trim().is_empty())
    }

    let mode = match non_empty(lookup(MODE_VAR)) {
      Some(raw) => Some(Mode::parse(&raw).ok_or_else(|| ConfigurationError::new(MODE_VAR, raw, Mode::EXPECTED))?),
      None => None,
    };

    let skip_probe = match non_empty(lookup(SKIP_PROBE_VAR)) {
      Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigurationError::new(SKIP_PROBE_VAR, raw, BOOL_EXPECTED))?,
      None => false,
    };

    Ok(Self { mode, skip_probe })
  }
}

fn parse_bool(value: &str) -> Option<bool> {
  let value = value.trim();
  if ["1", "true", "yes", "on"].iter().any(|s| value.eq_ignore_ascii_case(s)) {
    return Some(true);
  }
  if ["0", "false", "no", "off"].iter().any(|s| value.eq_ignore_ascii_case(s)) {
    return Some(false);
  }
  None
}
