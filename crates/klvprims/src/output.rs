use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use klvprims_codec::key::key_to_string;
use klvprims_codec::{key_name, TagId, UniversalKey};
use klvprims_localset::{ChecksumStatus, KlvValue, LocalSet};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FieldOutput {
    tag: TagId,
    name: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldOutput>>,
}

#[derive(Serialize)]
struct PacketOutput<'a> {
    index: usize,
    key: String,
    key_name: &'a str,
    checksum: &'static str,
    fields: Vec<FieldOutput>,
}

#[derive(Serialize)]
pub struct ChecksumReport {
    pub index: usize,
    pub key_name: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn checksum_label(status: ChecksumStatus) -> &'static str {
    match status {
        ChecksumStatus::Absent => "absent",
        ChecksumStatus::Valid => "valid",
        ChecksumStatus::Mismatch { .. } => "mismatch",
    }
}

pub fn print_packet(
    index: usize,
    key: &UniversalKey,
    set: &LocalSet,
    raw: &[u8],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = PacketOutput {
                index,
                key: key_to_string(key),
                key_name: key_name(key),
                checksum: checksum_label(set.checksum_status()),
                fields: field_outputs(set),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TAG", "NAME", "VALUE"]);
            add_rows(&mut table, set, 0);
            println!(
                "packet {index}: {} (checksum {})",
                key_name(key),
                checksum_label(set.checksum_status())
            );
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "packet {index}: {} [{}] checksum={}",
                key_name(key),
                key_to_string(key),
                checksum_label(set.checksum_status())
            );
            print_pretty(set, 1);
        }
        OutputFormat::Raw => print_raw(raw),
    }
}

pub fn print_report(report: &ChecksumReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty | OutputFormat::Raw => {
            let detail = match (report.computed, report.stored, &report.error) {
                (_, _, Some(error)) => format!(" ({error})"),
                (Some(computed), Some(stored), None) => {
                    format!(" (computed 0x{computed:04X}, stored 0x{stored:04X})")
                }
                _ => String::new(),
            };
            println!(
                "packet {}: {} checksum {}{detail}",
                report.index, report.key_name, report.status
            );
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn field_outputs(set: &LocalSet) -> Vec<FieldOutput> {
    set.iter()
        .map(|(tag, value)| FieldOutput {
            tag,
            name: value.display_name().to_string(),
            value: value.display_value(),
            fields: value.as_local_set().map(field_outputs),
        })
        .collect()
}

fn add_rows(table: &mut Table, set: &LocalSet, depth: usize) {
    let indent = "  ".repeat(depth);
    for (tag, value) in set.iter() {
        table.add_row(vec![
            format!("{indent}{tag}"),
            format!("{indent}{}", value.display_name()),
            value.display_value(),
        ]);
        if let Some(nested) = value.as_local_set() {
            add_rows(table, nested, depth + 1);
        }
    }
}

fn print_pretty(set: &LocalSet, depth: usize) {
    let indent = "  ".repeat(depth);
    for (tag, value) in set.iter() {
        match value.as_local_set() {
            Some(nested) => {
                println!("{indent}{tag} {}:", value.display_name());
                print_pretty(nested, depth + 1);
            }
            None => println!(
                "{indent}{tag} {}: {}",
                value.display_name(),
                value.display_value()
            ),
        }
    }
}
