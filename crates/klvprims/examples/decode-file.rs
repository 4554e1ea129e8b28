//! Walk the packets in a file and print every field of the ones we know.
//!
//! Run with:
//!   cargo run --example decode-file -- /tmp/flight.klv

use klvprims::codec::{key_name, split_packet};
use klvprims::localset::{parse_packet, KlvValue, LocalSet, ParseConfig};
use klvprims::misb::registry_for_key;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: decode-file <FILE>")?;
    let data = std::fs::read(&path)?;
    let config = ParseConfig::default();

    let mut offset = 0;
    let mut index = 0;
    while offset < data.len() {
        // Packet checksums cover the header as written, so parse the
        // original bytes rather than a re-framed copy.
        let (key, header, value) = split_packet(&data[offset..])?;
        let packet = &data[offset..offset + header + value.len()];
        offset += packet.len();
        index += 1;

        let Some(registry) = registry_for_key(&key) else {
            eprintln!("packet {}: skipping {}", index - 1, key_name(&key));
            continue;
        };
        let (_, set) = parse_packet(packet, registry, &config)?;

        println!(
            "packet {}: {} ({:?})",
            index - 1,
            registry.name(),
            set.checksum_status()
        );
        print_set(&set, 1);
    }
    Ok(())
}

fn print_set(set: &LocalSet, depth: usize) {
    for (tag, value) in set.iter() {
        println!(
            "{:indent$}{tag:>3} {:<36} {}",
            "",
            value.display_name(),
            value.display_value(),
            indent = depth * 2
        );
        if let Some(nested) = value.as_local_set() {
            print_set(nested, depth + 1);
        }
    }
}
