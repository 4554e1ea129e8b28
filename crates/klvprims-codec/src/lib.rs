//! Byte-level framing for MISB KLV metadata.
//!
//! This is the lowest layer of klvprims. It knows how every KLV entry is
//! delimited, but nothing about what the values mean:
//! - BER lengths (short form up to 127, otherwise minimal long form)
//! - BER-OID tag identifiers (7 bits per byte, continuation bit)
//! - The trailing 16-bit Local Set checksum
//! - Top-level packets: 16-byte Universal Label key + BER length + value
//!
//! Decoders never allocate based on a claimed length; every length is checked
//! against the bytes actually available first.

pub mod checksum;
pub mod error;
pub mod key;
pub mod length;
pub mod packet;
pub mod reader;
pub mod tag;
pub mod writer;

#[cfg(feature = "async")]
pub mod async_codec;

pub use checksum::{Checksum, CHECKSUM_LEN};
pub use error::{CodecError, Result};
pub use key::{
    key_name, UniversalKey, KEY_LEN, SECURITY_METADATA_LS, UAS_DATALINK_LS, VMTI_LS,
};
pub use length::{decode_length, encode_length, length_to_vec};
pub use packet::{
    decode_packet, encode_packet, split_packet, Packet, PacketConfig, DEFAULT_MAX_VALUE,
};
pub use reader::PacketReader;
pub use tag::{decode_tag, encode_tag, tag_to_vec, TagId};
pub use writer::PacketWriter;

#[cfg(feature = "async")]
pub use async_codec::PacketCodec;
