//! Core traits for the crc32c workspace.
//!
//! `no_std` compatible with zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Incremental non-cryptographic checksum |
//! | [`HashObject`] | Name / digest size / block size / hex digest surface |
//!
//! With `std`, [`io::ChecksumReader`] and [`io::ChecksumWriter`] feed a
//! checksum from any `Read` or `Write`.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod checksum;
mod hash_object;
#[cfg(feature = "std")]
pub mod io;

pub use checksum::Checksum;
#[cfg(feature = "alloc")]
pub use hash_object::to_hex;
pub use hash_object::HashObject;
