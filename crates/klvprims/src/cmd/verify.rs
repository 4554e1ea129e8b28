use klvprims_codec::key_name;
use klvprims_localset::{parse_packet, ChecksumStatus};
use klvprims_misb::registry_for_key;
use tracing::warn;

use crate::cmd::{read_input, split_packets, VerifyArgs};
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{checksum_label, print_report, ChecksumReport, OutputFormat};

pub fn run(args: VerifyArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.config()?;
    let data = read_input(&args.file)?;
    let packets = split_packets(&data)?;

    let mut failed = 0usize;
    for packet in &packets {
        let mut report = ChecksumReport {
            index: packet.index,
            key_name: key_name(&packet.key),
            status: "unknown",
            computed: None,
            stored: None,
            error: None,
        };

        // Parse failures are per packet; framing was already checked.
        if let Some(registry) = registry_for_key(&packet.key) {
            match parse_packet(packet.bytes, registry, &config) {
                Ok((_, set)) => {
                    let status = set.checksum_status();
                    report.status = checksum_label(status);
                    match status {
                        ChecksumStatus::Mismatch { computed, stored } => {
                            report.computed = Some(computed);
                            report.stored = Some(stored);
                            failed += 1;
                        }
                        // A registry that defines a checksum requires one.
                        ChecksumStatus::Absent if registry.checksum_tag().is_some() => {
                            failed += 1;
                        }
                        _ => {}
                    }
                }
                Err(err) => {
                    report.status = "error";
                    report.error = Some(err.to_string());
                    failed += 1;
                }
            }
        }

        print_report(&report, format);
    }

    if failed > 0 {
        warn!(failed, total = packets.len(), "checksum verification failed");
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}
