//! Differential fuzzing between engines.
//!
//! The software engine, the hardware engine (when present) and the
//! table-less reference must agree on every input and seed.

#![no_main]

use arbitrary::Arbitrary;
use crc32c::Engine;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  seed: u32,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let software = Engine::software().checksum(&input.data, input.seed);
  let reference = crc32c::reference(&input.data, input.seed);

  assert_eq!(
    software,
    reference,
    "software/reference mismatch: software={software:#010x}, reference={reference:#010x}, len={}",
    input.data.len()
  );

  if let Some(hardware) = Engine::hardware() {
    let ours = hardware.checksum(&input.data, input.seed);
    assert_eq!(
      ours,
      software,
      "{} mismatch: hardware={ours:#010x}, software={software:#010x}, len={}",
      hardware.name(),
      input.data.len()
    );
  }
});
