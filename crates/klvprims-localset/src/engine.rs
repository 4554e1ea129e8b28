//! Local Set parse and serialize.
//!
//! ```text
//! [ tag | BER length | value ]*  [ checksum tag | 0x02 | sum (u16 BE) ]?
//! ```
//!
//! Every claimed length is checked against the remaining input before the
//! value is sliced, and nested sets are bounded by `ParseConfig::max_depth`.

use bytes::{BufMut, Bytes};
use klvprims_codec::checksum::{self, Checksum};
use klvprims_codec::length::{checked_length, encode_length, length_to_vec};
use klvprims_codec::tag::{encode_tag, encoded_tag_size};
use klvprims_codec::{
    decode_length, decode_tag, split_packet, CodecError, TagId, UniversalKey, CHECKSUM_LEN,
};
use tracing::{debug, warn};

use crate::config::{ChecksumPolicy, ParseConfig};
use crate::error::{LocalSetError, Result};
use crate::local_set::{ChecksumStatus, LocalSet};
use crate::registry::ValueRegistry;
use crate::value::KlvValue;

/// Parse a Local Set body, checksum scoped to the set itself.
pub fn parse(bytes: &[u8], registry: &ValueRegistry, config: &ParseConfig) -> Result<LocalSet> {
    parse_scoped(bytes, &[], registry, config, 0)
}

pub(crate) fn parse_nested(
    bytes: &[u8],
    registry: &ValueRegistry,
    config: &ParseConfig,
    depth: usize,
) -> Result<LocalSet> {
    parse_scoped(bytes, &[], registry, config, depth)
}

/// Parse one complete top-level packet (key, BER length, Local Set).
///
/// The checksum covers the packet key and length as well as the set.
pub fn parse_packet(
    bytes: &[u8],
    registry: &ValueRegistry,
    config: &ParseConfig,
) -> Result<(UniversalKey, LocalSet)> {
    let (key, header_len, value) = split_packet(bytes)?;
    let consumed = header_len + value.len();
    if consumed < bytes.len() {
        return Err(LocalSetError::TrailingData {
            remaining: bytes.len() - consumed,
        });
    }

    let set = parse_scoped(value, &bytes[..header_len], registry, config, 0)?;
    Ok((key, set))
}

fn parse_scoped(
    bytes: &[u8],
    prefix: &[u8],
    registry: &ValueRegistry,
    config: &ParseConfig,
    depth: usize,
) -> Result<LocalSet> {
    if depth > config.max_depth {
        return Err(LocalSetError::RecursionLimitExceeded {
            limit: config.max_depth,
        });
    }

    let mut set = LocalSet::new();
    let mut offset = 0usize;

    while offset < bytes.len() {
        let (tag, tag_len) = decode_tag(bytes, offset)?;
        offset += tag_len;
        let (len, len_size) = decode_length(bytes, offset)?;
        offset += len_size;

        let len = len as usize;
        let available = bytes.len() - offset;
        if len > available {
            return Err(CodecError::TruncatedInput {
                needed: len,
                available,
            }
            .into());
        }
        let value = &bytes[offset..offset + len];
        offset += len;

        if Some(tag) == registry.checksum_tag() {
            if offset < bytes.len() {
                return Err(LocalSetError::TrailingData {
                    remaining: bytes.len() - offset,
                });
            }
            let status = verify_checksum(tag, value, prefix, &bytes[..offset - len], config)?;
            set.set_checksum_status(tag, status);
            break;
        }

        let decoded = registry.decode_at(tag, value, config, depth)?;
        if set.insert(tag, decoded).is_some() {
            debug!(registry = registry.name(), tag, "duplicate tag, keeping last value");
        }
    }

    Ok(set)
}

fn verify_checksum(
    tag: TagId,
    value: &[u8],
    prefix: &[u8],
    covered: &[u8],
    config: &ParseConfig,
) -> Result<ChecksumStatus> {
    let stored = match value {
        [high, low] => u16::from_be_bytes([*high, *low]),
        _ => {
            return Err(LocalSetError::invalid(
                tag,
                format!("checksum length {} bytes (expected {CHECKSUM_LEN})", value.len()),
            ))
        }
    };
    let computed = Checksum::new().update(prefix).update(covered).value();

    if stored == computed {
        return Ok(ChecksumStatus::Valid);
    }
    match config.checksum {
        ChecksumPolicy::Strict => Err(LocalSetError::ChecksumMismatch {
            expected: computed,
            actual: stored,
        }),
        ChecksumPolicy::Permissive => {
            warn!(computed, stored, "checksum mismatch, keeping set");
            Ok(ChecksumStatus::Mismatch { computed, stored })
        }
    }
}

/// Serialize a Local Set in stored order, appending a checksum entry when the
/// set has a checksum tag.
pub fn serialize(set: &LocalSet) -> Result<Bytes> {
    let mut out = Vec::new();
    write_entries(set, &mut out)?;
    if let Some(tag) = set.checksum_tag() {
        checksum::append(tag, &mut out);
    }
    Ok(Bytes::from(out))
}

/// Serialize a complete top-level packet under `key`.
///
/// The checksum, if any, covers the key and BER length as well as the set.
pub fn serialize_packet(key: &UniversalKey, set: &LocalSet) -> Result<Bytes> {
    let mut body = Vec::new();
    write_entries(set, &mut body)?;

    let trailer_len = set
        .checksum_tag()
        .map_or(0, |tag| encoded_tag_size(tag) + 1 + CHECKSUM_LEN);
    let value_len = checked_length(body.len() + trailer_len)?;

    let mut out = Vec::with_capacity(key.len() + 9 + body.len() + trailer_len);
    out.extend_from_slice(key);
    out.extend_from_slice(&length_to_vec(value_len));
    out.extend_from_slice(&body);
    if let Some(tag) = set.checksum_tag() {
        checksum::append(tag, &mut out);
    }
    Ok(Bytes::from(out))
}

fn write_entries(set: &LocalSet, out: &mut Vec<u8>) -> Result<()> {
    for (tag, value) in set.iter() {
        // The checksum entry is generated, never stored.
        if Some(tag) == set.checksum_tag() {
            return Err(LocalSetError::invalid(
                tag,
                "checksum tag cannot carry a stored value",
            ));
        }
        let bytes = value.to_bytes();
        encode_tag(tag, out);
        encode_length(checked_length(bytes.len())?, out);
        out.put_slice(&bytes);
    }
    Ok(())
}
