//! Known-answer vectors through the one-shot API and every engine.

use crc32c::{Engine, checksum, reference};

const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nunc omni virtuti vitium contrario nomine opponitur. \
Conferam tecum, quam cuique verso rem subicias; Te ipsum, dignissimum maioribus tuis, voluptasne induxit, ut adolescentulus eriperes \
P. Conclusum est enim contra Cyrenaicos satis acute, nihil ad Epicurum. Duo Reges: constructio interrete. Tum Torquatus: Prorsus, inquit, assentior;\n\
Quando enim Socrates, qui parens philosophiae iure dici potest, quicquam tale fecit? Sed quid sentiat, non videtis. Haec quo modo conveniant, non \
sane intellego. Sed ille, ut dixi, vitiose. Dic in quovis conventu te omnia facere, ne doleas. Quod si ita se habeat, non possit beatam praestare \
vitam sapientia. Quis suae urbis conservatorem Codrum, quis Erechthei filias non maxime laudat? Primum divisit ineleganter; Huic mori optimum esse \
propter desperationem sapientiae, illi propter spem vivere.";

const VECTORS: &[(&str, &[u8], u32)] = &[
  ("numbers1", b"123456789", 0xE306_9283),
  ("numbers2", b"23456789", 0xBFE9_2A83),
  ("phrase", b"The quick brown fox jumps over the lazy dog", 0x2262_0404),
  ("long_phrase", LOREM, 0xFCB7_575A),
  ("empty", b"", 0),
  ("zeros", &[0u8; 32], 0x8A91_36AA),
  ("ones", &[0xFFu8; 32], 0x62A8_AB43),
  ("single_zero", &[0x00], 0x527D_5351),
  ("single_a", b"a", 0xC1D0_4330),
];

fn engines() -> Vec<Engine> {
  let mut engines = vec![Engine::software()];
  engines.extend(Engine::hardware());
  engines
}

#[test]
fn one_shot_vectors() {
  for &(name, data, expected) in VECTORS {
    assert_eq!(checksum(data, 0).unwrap(), expected, "{name}");
  }
}

#[test]
fn every_engine_vectors() {
  for engine in engines() {
    for &(name, data, expected) in VECTORS {
      assert_eq!(engine.checksum(data, 0), expected, "{name} on {}", engine.name());
    }
  }
}

#[test]
fn reference_vectors() {
  for &(name, data, expected) in VECTORS {
    assert_eq!(reference(data, 0), expected, "{name}");
  }
}

#[test]
fn empty_input_returns_seed() {
  for seed in [0u32, 1, 10, 0xDEAD_BEEF, u32::MAX] {
    assert_eq!(checksum(b"", seed).unwrap(), seed);
    for engine in engines() {
      assert_eq!(engine.checksum(b"", seed), seed, "{}", engine.name());
    }
  }
}

/// Examples published for the MSVC `_mm_crc32_*` intrinsics. They use the
/// raw register, so the all-ones XOR is applied on both sides.
#[test]
fn msvc_intrinsic_examples() {
  let max = u32::MAX;
  let cases: [(Vec<u8>, u32, u32); 4] = [
    (100u8.to_le_bytes().to_vec(), 1, 1_412_925_310),
    (1000u16.to_le_bytes().to_vec(), 1, 3_870_914_500),
    (50000u32.to_le_bytes().to_vec(), 1, 971_731_851),
    (0x8888_9999_EEEE_3333u64.to_le_bytes().to_vec(), 0x5555_AAAA, 0x16F5_7621),
  ];

  for (data, crc, expected) in &cases {
    assert_eq!(checksum(data, crc ^ max).unwrap(), expected ^ max, "{data:?}");
    for engine in engines() {
      assert_eq!(engine.checksum(data, crc ^ max), expected ^ max, "{}", engine.name());
    }
  }
}
