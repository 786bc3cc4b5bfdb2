//! Print how this process resolved its CRC32C engine, then checksum stdin.
//!
//! ```text
//! echo -n 123456789 | cargo run -p crc32c --example introspect
//! CRC32C_SW_MODE=force-software cargo run -p crc32c --example introspect < file.bin
//! RUST_LOG=crc32c=trace cargo run -p crc32c --example introspect < file.bin
//! ```

use std::io::{self, Read};

use crc32c::{Checksum, Crc32cHash, HashObject};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crc32c=debug")))
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  let engine = crc32c::engine()?;
  eprintln!("mode:       {}", crc32c::mode()?);
  eprintln!("engine:     {}", engine.name());
  eprintln!("hardware:   {}", engine.is_hardware());
  eprintln!("capable:    {}", crc32c::capability::is_capable());
  eprintln!("big endian: {}", crc32c::big_endian());
  eprintln!("cpu:        {} {:?}", platform::arch(), platform::caps());

  let mut reader = Crc32cHash::new()?.reader(io::stdin().lock());
  let mut sink = Vec::new();
  reader.read_to_end(&mut sink)?;

  let hasher = reader.hasher();
  println!("{}  {} bytes  ({})", hasher.hexdigest(), sink.len(), <Crc32cHash as HashObject>::NAME);
  Ok(())
}
