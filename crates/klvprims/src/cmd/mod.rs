use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use klvprims_codec::{split_packet, UniversalKey};
use klvprims_localset::{ChecksumPolicy, EncodingMode, ParseConfig, DEFAULT_MAX_DEPTH};

use crate::exit::{codec_error, io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod verify;
pub mod version;

/// Upper bound accepted for `--max-depth`.
const MAX_DEPTH_LIMIT: usize = 64;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode every packet in a file and print its fields.
    Decode(DecodeArgs),
    /// Report the checksum status of every packet in a file.
    Verify(VerifyArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Verify(args) => verify::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Parser options shared by the file commands.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Decode real-valued fields with the pre-IMAPB linear mapping.
    #[arg(long)]
    pub legacy: bool,
    /// Deepest nested Local Set accepted.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl ParseArgs {
    fn config(&self, checksum: ChecksumPolicy) -> CliResult<ParseConfig> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(CliError::new(
                USAGE,
                format!("--max-depth must be at most {MAX_DEPTH_LIMIT}"),
            ));
        }
        Ok(ParseConfig {
            checksum,
            encoding_mode: if self.legacy {
                EncodingMode::Legacy
            } else {
                EncodingMode::Imapb
            },
            max_depth: self.max_depth,
        })
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File of concatenated KLV packets.
    pub file: PathBuf,
    /// Fail on the first checksum mismatch.
    #[arg(long)]
    pub strict: bool,
    #[command(flatten)]
    pub parse: ParseArgs,
}

impl DecodeArgs {
    pub fn config(&self) -> CliResult<ParseConfig> {
        let policy = if self.strict {
            ChecksumPolicy::Strict
        } else {
            ChecksumPolicy::Permissive
        };
        self.parse.config(policy)
    }
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// File of concatenated KLV packets.
    pub file: PathBuf,
    #[command(flatten)]
    pub parse: ParseArgs,
}

impl VerifyArgs {
    /// Mismatches are collected and reported, never raised.
    pub fn config(&self) -> CliResult<ParseConfig> {
        self.parse.config(ChecksumPolicy::Permissive)
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// One framed packet inside an input file.
pub struct RawPacket<'a> {
    pub index: usize,
    pub offset: usize,
    pub key: UniversalKey,
    pub bytes: &'a [u8],
}

pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    std::fs::read(path).map_err(|err| io_error(&format!("read {}", path.display()), err))
}

/// Split a buffer of back-to-back packets. A framing error ends the walk
/// since no later packet boundary can be trusted.
pub fn split_packets(data: &[u8]) -> CliResult<Vec<RawPacket<'_>>> {
    let mut packets = Vec::new();
    let mut offset = 0;
    while offset < data.len() {
        let rest = &data[offset..];
        let (key, header, value) = split_packet(rest).map_err(|err| {
            codec_error(
                &format!("packet {} at offset {offset}", packets.len()),
                err,
            )
        })?;
        let size = header + value.len();
        packets.push(RawPacket {
            index: packets.len(),
            offset,
            key,
            bytes: &rest[..size],
        });
        offset += size;
    }
    Ok(packets)
}
