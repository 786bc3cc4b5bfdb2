//! Error type for the checksum façade.

use backend::{CapabilityError, ConfigurationError};

/// Why the engine could not be resolved.
///
/// Resolution happens once per process; the same error is returned to every
/// caller afterwards.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  /// An environment override held an unrecognized value.
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),

  /// The mode requires hardware support this host does not have.
  #[error(transparent)]
  Capability(#[from] CapabilityError),
}

#[cfg(test)]
mod tests {
  use backend::Mode;

  use super::*;

  #[test]
  fn display_is_transparent() {
    let inner = CapabilityError {
      mode: Mode::ForceHardwareOrFail,
    };
    let err = Error::from(inner);
    assert_eq!(err.to_string(), inner.to_string());
  }

  #[test]
  fn question_mark_converts() {
    fn fails() -> Result<(), Error> {
      Err(ConfigurationError::new("CRC32C_SW_MODE", "x", "auto"))?;
      Ok(())
    }
    assert!(matches!(fails(), Err(Error::Configuration(_))));
  }
}
