mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "klvprims", version, about = "MISB KLV metadata inspector")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use klvprims_localset::{ChecksumPolicy, EncodingMode};

    use super::*;

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from([
            "klvprims",
            "--format",
            "json",
            "decode",
            "/tmp/flight.klv",
            "--strict",
            "--legacy",
            "--max-depth",
            "4",
        ])
        .expect("decode args should parse");

        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        let config = args.config().expect("config should build");
        assert_eq!(config.checksum, ChecksumPolicy::Strict);
        assert_eq!(config.encoding_mode, EncodingMode::Legacy);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn verify_does_not_take_strict() {
        let err = Cli::try_parse_from(["klvprims", "verify", "/tmp/flight.klv", "--strict"])
            .expect_err("verify has no --strict flag");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Cli::try_parse_from(["klvprims", "--format", "xml", "version"])
            .expect_err("xml is not an output format");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn parses_version_subcommand() {
        let cli = Cli::try_parse_from(["klvprims", "version", "--extended"])
            .expect("version args should parse");
        assert!(matches!(cli.command, Command::Version(args) if args.extended));
    }
}
