//! Process-wide engine resolution.
//!
//! The environment is read and capability detected exactly once, on the
//! first call that needs an engine. The outcome, failure included, is cached
//! and every later call sees the same answer.

use std::sync::OnceLock;

use backend::{Mode, Resolution, resolve};

use crate::{Error, capability, config::Config, engine::Engine};

/// A successful resolution: the effective mode and the engine it selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Runtime {
  pub resolution: Resolution,
  pub engine: Engine,
}

impl Runtime {
  #[inline]
  #[must_use]
  pub const fn mode(&self) -> Mode {
    self.resolution.mode
  }
}

fn resolve_from(config: Config, capable: bool) -> Result<Runtime, Error> {
  let resolution = resolve(config.mode, capable)?;
  let engine = Engine::for_choice(resolution.engine);
  Ok(Runtime { resolution, engine })
}

fn initialize() -> Result<Runtime, Error> {
  let outcome = Config::from_env()
    .map_err(Error::from)
    .and_then(|config| resolve_from(config, capability::cached(config.skip_probe)));

  match &outcome {
    Ok(runtime) => tracing::debug!(
      mode = %runtime.mode(),
      engine = runtime.engine.name(),
      hardware = runtime.engine.is_hardware(),
      "crc32c engine resolved"
    ),
    Err(err) => tracing::debug!(error = %err, "crc32c engine resolution failed"),
  }

  outcome
}

static RESOLVED: OnceLock<Result<Runtime, Error>> = OnceLock::new();

/// The cached resolution, performing it on first call.
///
/// # Errors
///
/// [`Error::Configuration`] for an unrecognized override value,
/// [`Error::Capability`] when hardware is demanded but unavailable.
pub fn resolved() -> Result<Runtime, Error> {
  RESOLVED.get_or_init(initialize).clone()
}
