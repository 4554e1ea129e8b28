use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::CodecError;
use crate::packet::{decode_packet, encode_packet, Packet, PacketConfig};

/// `tokio_util` codec for a stream of top-level KLV packets.
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: PacketConfig,
}

impl PacketCodec {
    /// Create a codec with explicit configuration.
    pub fn with_config(config: PacketConfig) -> Self {
        Self { config }
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, CodecError> {
        decode_packet(src, self.config.max_value_size)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, CodecError> {
        match self.decode(src)? {
            Some(packet) => Ok(Some(packet)),
            None if src.is_empty() => Ok(None),
            None => Err(CodecError::ConnectionClosed),
        }
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<(), CodecError> {
        if item.value.len() > self.config.max_value_size {
            return Err(CodecError::PacketTooLarge {
                size: item.value.len(),
                max: self.config.max_value_size,
            });
        }
        encode_packet(&item.key, &item.value, dst)
    }
}
