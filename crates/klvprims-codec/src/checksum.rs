//! Trailing 16-bit checksum of a Local Set.
//!
//! The checksum is the wrapping sum of the covered bytes taken as big-endian
//! 16-bit words: bytes at even positions contribute their high byte, bytes at
//! odd positions their low byte. Coverage runs up to, but not including, the
//! two checksum value bytes, so the checksum entry's own tag and length are
//! part of the sum.

use bytes::BufMut;

use crate::length::encode_length;
use crate::tag::{encode_tag, TagId};

/// Size of the checksum value in bytes.
pub const CHECKSUM_LEN: usize = 2;

/// Incremental checksum accumulator.
///
/// Keeps track of the absolute byte position so covered bytes can be fed in
/// several slices (for example a packet key followed by the Local Set body).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    sum: u16,
    position: usize,
}

impl Checksum {
    /// Start an empty accumulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bytes` to the running sum.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            let word = if self.position % 2 == 0 {
                u16::from(byte) << 8
            } else {
                u16::from(byte)
            };
            self.sum = self.sum.wrapping_add(word);
            self.position += 1;
        }
        self
    }

    /// Current checksum value.
    pub fn value(&self) -> u16 {
        self.sum
    }
}

/// Checksum over `bytes`.
pub fn compute(bytes: &[u8]) -> u16 {
    Checksum::new().update(bytes).value()
}

/// Append a checksum entry (`tag`, length 2, value) to `buf`.
///
/// The value covers everything already in `buf` plus the entry's own tag and
/// length bytes.
pub fn append(checksum_tag: TagId, buf: &mut Vec<u8>) {
    encode_tag(checksum_tag, buf);
    encode_length(CHECKSUM_LEN as u32, buf);
    let value = compute(buf);
    buf.put_u16(value);
}

/// Stored and recomputed checksum of `full_bytes`, or `None` if it is too short
/// to carry one.
pub fn split(full_bytes: &[u8]) -> Option<(u16, u16)> {
    let body_len = full_bytes.len().checked_sub(CHECKSUM_LEN)?;
    let stored = u16::from_be_bytes([full_bytes[body_len], full_bytes[body_len + 1]]);
    Some((stored, compute(&full_bytes[..body_len])))
}

/// Returns true if the trailing two bytes match the checksum of everything
/// before them.
pub fn validate(full_bytes: &[u8]) -> bool {
    matches!(split(full_bytes), Some((stored, computed)) if stored == computed)
}
