//! Backend crate: engine selection and kernel dispatch for crc32c.
//!
//! - **Dispatch**: cached (runtime) selection of the best hardware kernel
//! - **Policy**: the pure mode + capability decision table
//! - **Errors**: the two fatal resolution failures
//!
//! # Usage
//!
//! ```ignore
//! use backend::policy::{Mode, resolve};
//!
//! let resolution = resolve(Mode::parse("auto"), capable)?;
//! if resolution.engine.is_hardware() {
//!     // dispatch to the accelerated kernel
//! }
//! ```
//!
// Fallibility discipline: deny unwrap/expect in production, allow in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;
pub mod error;
pub mod policy;

pub use dispatch::{Candidate, Crc32Dispatcher, Crc32Fn, Selected, select};
pub use error::{CapabilityError, ConfigurationError};
pub use policy::{EngineChoice, Mode, Resolution, resolve};
