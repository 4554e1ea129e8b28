//! BER length field.
//!
//! ```text
//! short form:  0LLLLLLL                      (0..=127)
//! long form:   1NNNNNNN  L1 L2 .. LN         (N big-endian length bytes, 1..=8)
//! ```

use bytes::BufMut;

use crate::error::{CodecError, Result};

/// Largest value representable in the short form.
pub const SHORT_FORM_MAX: u32 = 0x7F;

/// Maximum number of long-form length bytes accepted on decode.
pub const MAX_LENGTH_BYTES: usize = 8;

/// Decode a BER length starting at `offset`.
///
/// Returns `(length, bytes_consumed)`. Long forms with leading zero bytes are
/// accepted as long as the value still fits in a `u32`.
pub fn decode_length(bytes: &[u8], offset: usize) -> Result<(u32, usize)> {
    let available = bytes.len().saturating_sub(offset);
    let first = *bytes
        .get(offset)
        .ok_or_else(|| CodecError::truncated(1, available))?;

    if first & 0x80 == 0 {
        return Ok((u32::from(first), 1));
    }

    let count = usize::from(first & 0x7F);
    if count == 0 {
        return Err(CodecError::UnsupportedLength {
            field: "length",
            reason: "indefinite form (0x80) is not allowed".to_string(),
        });
    }
    if count > MAX_LENGTH_BYTES {
        return Err(CodecError::UnsupportedLength {
            field: "length",
            reason: format!("{count} length bytes (max {MAX_LENGTH_BYTES})"),
        });
    }
    if available < 1 + count {
        return Err(CodecError::truncated(1 + count, available));
    }

    let value = bytes[offset + 1..offset + 1 + count]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let length = u32::try_from(value).map_err(|_| CodecError::UnsupportedLength {
        field: "length",
        reason: format!("{value} does not fit in 32 bits"),
    })?;

    Ok((length, 1 + count))
}

/// Number of bytes [`encode_length`] emits for `length`.
pub fn encoded_length_size(length: u32) -> usize {
    if length <= SHORT_FORM_MAX {
        1
    } else {
        1 + significant_bytes(length)
    }
}

/// Encode a BER length, short form when possible, otherwise minimal long form.
pub fn encode_length(length: u32, dst: &mut impl BufMut) {
    if length <= SHORT_FORM_MAX {
        dst.put_u8(length as u8);
        return;
    }

    let count = significant_bytes(length);
    dst.put_u8(0x80 | count as u8);
    dst.put_slice(&length.to_be_bytes()[4 - count..]);
}

/// Encode a BER length into a fresh vector.
pub fn length_to_vec(length: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_length_size(length));
    encode_length(length, &mut out);
    out
}

/// Convert a buffer length into a BER-encodable `u32`.
pub fn checked_length(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CodecError::UnsupportedLength {
        field: "length",
        reason: format!("{len} does not fit in 32 bits"),
    })
}

fn significant_bytes(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}
