//! Property tests: engines, chaining and an external reference.

// Proptest uses getcwd() which fails under Miri isolation.
#![cfg(not(miri))]

use crc_fast::CrcAlgorithm;
use crc32c::{Crc32cHash, Engine, checksum, reference};
use proptest::prelude::*;

proptest! {
  #[test]
  fn software_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let expected = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, &data) as u32;
    prop_assert_eq!(Engine::software().checksum(&data, 0), expected);
  }

  #[test]
  fn one_shot_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..=2048), seed in any::<u32>()) {
    prop_assert_eq!(checksum(&data, seed).unwrap(), reference(&data, seed));
  }

  #[test]
  fn hardware_matches_software(data in proptest::collection::vec(any::<u8>(), 0..=8192), seed in any::<u32>()) {
    if let Some(hardware) = Engine::hardware() {
      prop_assert_eq!(hardware.checksum(&data, seed), Engine::software().checksum(&data, seed));
    }
  }

  #[test]
  fn split_anywhere(data in proptest::collection::vec(any::<u8>(), 0..=4096), split in any::<prop::sample::Index>()) {
    let at = split.index(data.len() + 1);
    let (head, tail) = data.split_at(at);
    let chained = checksum(tail, checksum(head, 0).unwrap()).unwrap();
    prop_assert_eq!(chained, checksum(&data, 0).unwrap());
  }

  #[test]
  fn streaming_any_chunk(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let mut hasher = Crc32cHash::new().unwrap();
    for part in data.chunks(chunk) {
      hasher.update(part);
    }
    prop_assert_eq!(hasher.value(), checksum(&data, 0).unwrap());
  }

  #[test]
  fn hexdigest_parses_back(data in proptest::collection::vec(any::<u8>(), 0..=256)) {
    let hasher = Crc32cHash::with_data(&data).unwrap();
    let hex = hasher.hexdigest();
    prop_assert_eq!(hex.len(), 8);
    prop_assert_eq!(u32::from_str_radix(&hex, 16).unwrap(), hasher.value());
  }
}
