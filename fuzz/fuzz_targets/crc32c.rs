//! Fuzz target for the CRC32C façade.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Incremental updates produce same result as one-shot
//! - Seeding with a prefix checksum continues it correctly
//! - Chunked updates are independent of chunk size

#![no_main]

use arbitrary::Arbitrary;
use crc32c::{Crc32cHash, checksum};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
  chunk_size: u8,
}

fuzz_target!(|input: Input| {
  let Ok(oneshot) = checksum(&input.data, 0) else {
    return;
  };
  let data = &input.data;
  let split = input.split_point % (data.len() + 1);

  // Incremental computation
  let (a, b) = data.split_at(split);
  let Ok(mut hasher) = Crc32cHash::new() else {
    return;
  };
  hasher.update(a);
  hasher.update(b);
  assert_eq!(oneshot, hasher.value(), "incremental mismatch");

  // Seeded continuation
  let Ok(crc_a) = checksum(a, 0) else { return };
  assert_eq!(checksum(b, crc_a).ok(), Some(oneshot), "seeded mismatch");

  // Chunked
  let chunk = usize::from(input.chunk_size.max(1));
  let chunked = data.chunks(chunk).fold(0, |crc, part| checksum(part, crc).unwrap_or(crc));
  assert_eq!(oneshot, chunked, "chunked mismatch");
});
