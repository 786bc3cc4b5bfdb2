//! Errors raised while deciding which engine services checksum calls.
//!
//! Both are fatal: they surface at the first call that needs the decision and
//! are never retried. Computation itself cannot fail once a decision exists.

use alloc::string::String;

use crate::policy::Mode;

/// An override input held a value that is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {variable} (expected one of: {expected})")]
pub struct ConfigurationError {
  /// Name of the override input, e.g. `CRC32C_SW_MODE`.
  pub variable: &'static str,
  /// The raw value that failed to parse.
  pub value: String,
  /// Human-readable list of accepted values.
  pub expected: &'static str,
}

impl ConfigurationError {
  #[must_use]
  pub fn new(variable: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
    Self {
      variable,
      value: value.into(),
      expected,
    }
  }
}

/// A mode demanded the hardware engine but the host cannot provide it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("mode `{mode}` requires hardware CRC32C support, which this CPU does not provide")]
pub struct CapabilityError {
  pub mode: Mode,
}

#[cfg(test)]
mod tests {
  use alloc::string::ToString;

  use super::*;

  #[test]
  fn configuration_error_display() {
    let err = ConfigurationError::new("CRC32C_SW_MODE", "bogus", "auto, none");
    assert_eq!(
      err.to_string(),
      "invalid value \"bogus\" for CRC32C_SW_MODE (expected one of: auto, none)"
    );
  }

  #[test]
  fn capability_error_display() {
    let err = CapabilityError {
      mode: Mode::ForceHardwareOrFail,
    };
    assert_eq!(
      err.to_string(),
      "mode `force-hardware-or-fail` requires hardware CRC32C support, which this CPU does not provide"
    );
  }

  #[test]
  fn errors_are_comparable() {
    let a = ConfigurationError::new("X", "1", "y");
    assert_eq!(a.clone(), a);
    assert_ne!(a, ConfigurationError::new("X", "2", "y"));
  }
}
