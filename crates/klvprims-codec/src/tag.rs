//! BER-OID tag identifiers.
//!
//! Each byte carries 7 value bits, most significant group first. The high bit
//! is set on every byte except the last.

use bytes::BufMut;

use crate::error::{CodecError, Result};

/// Local Set tag identifier.
pub type TagId = u32;

/// Maximum number of bytes in an encoded tag (`ceil(32 / 7)`).
pub const MAX_TAG_BYTES: usize = 5;

/// Decode a tag identifier starting at `offset`.
///
/// Returns `(tag, bytes_consumed)`.
pub fn decode_tag(bytes: &[u8], offset: usize) -> Result<(TagId, usize)> {
    let available = bytes.len().saturating_sub(offset);
    let mut value: u64 = 0;

    for consumed in 1..=MAX_TAG_BYTES {
        let byte = *bytes
            .get(offset + consumed - 1)
            .ok_or_else(|| CodecError::truncated(consumed, available))?;
        value = (value << 7) | u64::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            let tag = TagId::try_from(value).map_err(|_| CodecError::UnsupportedLength {
                field: "tag",
                reason: format!("{value} does not fit in 32 bits"),
            })?;
            return Ok((tag, consumed));
        }
    }

    Err(CodecError::UnsupportedLength {
        field: "tag",
        reason: format!("continuation beyond {MAX_TAG_BYTES} bytes"),
    })
}

/// Number of bytes [`encode_tag`] emits for `tag`.
pub fn encoded_tag_size(tag: TagId) -> usize {
    let bits = 32 - tag.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Encode a tag identifier in its minimal BER-OID form.
pub fn encode_tag(tag: TagId, dst: &mut impl BufMut) {
    let count = encoded_tag_size(tag);
    for index in (0..count).rev() {
        let group = ((tag >> (7 * index)) & 0x7F) as u8;
        if index == 0 {
            dst.put_u8(group);
        } else {
            dst.put_u8(group | 0x80);
        }
    }
}

/// Encode a tag identifier into a fresh vector.
pub fn tag_to_vec(tag: TagId) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_tag_size(tag));
    encode_tag(tag, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn single_byte_tags() {
        assert_eq!(tag_to_vec(0), vec![0x00]);
        assert_eq!(tag_to_vec(1), vec![0x01]);
        assert_eq!(tag_to_vec(127), vec![0x7F]);
        assert_eq!(decode_tag(&[0x41], 0).unwrap(), (65, 1));
    }

    #[test]
    fn multi_byte_tags() {
        assert_eq!(tag_to_vec(128), vec![0x81, 0x00]);
        assert_eq!(tag_to_vec(144), vec![0x81, 0x10]);
        assert_eq!(tag_to_vec(16_383), vec![0xFF, 0x7F]);
        assert_eq!(tag_to_vec(16_384), vec![0x81, 0x80, 0x00]);
        assert_eq!(decode_tag(&[0x81, 0x10], 0).unwrap(), (144, 2));
        assert_eq!(
            decode_tag(&[0x8F, 0xFF, 0xFF, 0xFF, 0x7F], 0).unwrap(),
            (u32::MAX, 5)
        );
    }

    #[test]
    fn decode_at_offset() {
        let bytes = [0x02, 0x01, 0x81, 0x00];
        assert_eq!(decode_tag(&bytes, 2).unwrap(), (128, 2));
    }

    #[test]
    fn truncated_continuation() {
        assert!(matches!(
            decode_tag(&[0x81], 0),
            Err(CodecError::TruncatedInput {
                needed: 2,
                available: 1
            })
        ));
        assert!(matches!(
            decode_tag(&[], 0),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn overlong_continuation_is_unsupported() {
        assert!(matches!(
            decode_tag(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01], 0),
            Err(CodecError::UnsupportedLength { .. })
        ));
        assert!(matches!(
            decode_tag(&[0x9F, 0xFF, 0xFF, 0xFF, 0x7F], 0),
            Err(CodecError::UnsupportedLength { .. })
        ));
    }

    proptest! {
        #[test]
        fn tag_roundtrip(tag in any::<u32>()) {
            let encoded = tag_to_vec(tag);
            prop_assert_eq!(encoded.len() == 1, tag <= 127);
            prop_assert_eq!(decode_tag(&encoded, 0).unwrap(), (tag, encoded.len()));
        }
    }
}
