use anyhow::Result;
use byte_ring::ByteRing;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
struct Params {
    /// Ring capacity in bytes.
    #[clap(short, long, default_value_t = 4)]
    capacity: usize,
}

/// Deliberately over-commits the ring in both directions: twice as many
/// pushes as fit, then three times as many pops as were stored.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let params = Params::parse();
    let mut ring = ByteRing::new(params.capacity)?;

    for i in 0..ring.capacity() * 2 {
        // '@', 'A', 'B', ... so the log output stays readable.
        let byte = u8::try_from((i + 64) % 256).unwrap();
        match ring.push(byte) {
            Ok(()) => info!(index = i, byte = %char::from(byte), "pushed"),
            Err(err) => warn!(index = i, byte = %char::from(byte), %err, "push rejected"),
        }
    }

    for i in 0..ring.capacity() * 3 {
        match ring.pop() {
            Ok(byte) => info!(index = i, byte = %char::from(byte), "read"),
            Err(err) => warn!(index = i, %err, "read failed"),
        }
    }

    Ok(())
}
