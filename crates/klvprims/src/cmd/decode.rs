use klvprims_codec::key::key_to_string;
use klvprims_localset::parse_packet;
use klvprims_misb::registry_for_key;
use tracing::{debug, warn};

use crate::cmd::{read_input, split_packets, DecodeArgs};
use crate::exit::{localset_error, CliResult, SUCCESS};
use crate::output::{print_packet, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.config()?;
    let data = read_input(&args.file)?;
    let packets = split_packets(&data)?;
    debug!(count = packets.len(), path = %args.file.display(), "framed input");

    for packet in packets {
        let Some(registry) = registry_for_key(&packet.key) else {
            warn!(
                index = packet.index,
                offset = packet.offset,
                key = %key_to_string(&packet.key),
                "skipping unknown packet"
            );
            continue;
        };

        let (key, set) = parse_packet(packet.bytes, registry, &config)
            .map_err(|err| localset_error(&format!("packet {}", packet.index), err))?;
        print_packet(packet.index, &key, &set, packet.bytes, format);
    }

    Ok(SUCCESS)
}
