use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};
use crate::key::{has_smpte_designator, UniversalKey, KEY_LEN, SMPTE_DESIGNATOR};
use crate::length::{checked_length, decode_length, encode_length, encoded_length_size};

/// Default maximum packet value size: 16 MiB.
pub const DEFAULT_MAX_VALUE: usize = 16 * 1024 * 1024;

/// A top-level KLV packet: Universal Label key plus value bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// The Universal Label identifying the value's standard.
    pub key: UniversalKey,
    /// The packet value (usually a Local Set).
    pub value: Bytes,
}

impl Packet {
    /// Create a new packet.
    pub fn new(key: UniversalKey, value: impl Into<Bytes>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// The total wire size of this packet (key + BER length + value).
    pub fn wire_size(&self) -> usize {
        let len = u32::try_from(self.value.len()).unwrap_or(u32::MAX);
        KEY_LEN + encoded_length_size(len) + self.value.len()
    }
}

/// Encode a packet into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────────┬──────────────────┐
/// │ Key (16B)        │ BER length   │ Value            │
/// │ 06 0E 2B 34 ...  │ (1-9B)       │ (length bytes)   │
/// └──────────────────┴──────────────┴──────────────────┘
/// ```
pub fn encode_packet(key: &UniversalKey, value: &[u8], dst: &mut BytesMut) -> Result<()> {
    let len = checked_length(value.len())?;
    dst.reserve(KEY_LEN + encoded_length_size(len) + value.len());
    dst.put_slice(key);
    encode_length(len, dst);
    dst.put_slice(value);
    Ok(())
}

/// Decode a packet from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete packet yet.
/// On success, consumes the packet bytes from the buffer. The claimed length
/// is checked against `max_value` before anything is buffered for it.
pub fn decode_packet(src: &mut BytesMut, max_value: usize) -> Result<Option<Packet>> {
    if src.len() < SMPTE_DESIGNATOR.len() {
        if !SMPTE_DESIGNATOR.starts_with(&src[..]) {
            return Err(CodecError::InvalidKey);
        }
        return Ok(None); // Need more data
    }
    if !has_smpte_designator(&src[..]) {
        return Err(CodecError::InvalidKey);
    }
    if src.len() < KEY_LEN + 1 {
        return Ok(None);
    }

    let (value_len, len_size) = match decode_length(&src[..], KEY_LEN) {
        Ok(decoded) => decoded,
        Err(CodecError::TruncatedInput { .. }) => return Ok(None),
        Err(err) => return Err(err),
    };
    let value_len = value_len as usize;

    if value_len > max_value {
        return Err(CodecError::PacketTooLarge {
            size: value_len,
            max: max_value,
        });
    }

    let header = KEY_LEN + len_size;
    if src.len() < header + value_len {
        return Ok(None); // Need more data
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&src[..KEY_LEN]);
    src.advance(header);
    let value = src.split_to(value_len).freeze();

    Ok(Some(Packet { key, value }))
}

/// Split a complete, already-buffered packet into its key, header length and
/// value, failing on truncation rather than waiting for more bytes.
pub fn split_packet(bytes: &[u8]) -> Result<(UniversalKey, usize, &[u8])> {
    if bytes.len() < KEY_LEN {
        return Err(CodecError::TruncatedInput {
            needed: KEY_LEN,
            available: bytes.len(),
        });
    }
    if !has_smpte_designator(bytes) {
        return Err(CodecError::InvalidKey);
    }
    let (value_len, len_size) = decode_length(bytes, KEY_LEN)?;
    let header = KEY_LEN + len_size;
    let available = bytes.len() - header;
    let value_len = value_len as usize;
    if available < value_len {
        return Err(CodecError::TruncatedInput {
            needed: value_len,
            available,
        });
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes[..KEY_LEN]);
    Ok((key, header, &bytes[header..header + value_len]))
}

/// Configuration for the packet codec.
#[derive(Debug, Clone)]
pub struct PacketConfig {
    /// Maximum value size in bytes. Default: 16 MiB.
    pub max_value_size: usize,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            max_value_size: DEFAULT_MAX_VALUE,
        }
    }
}
