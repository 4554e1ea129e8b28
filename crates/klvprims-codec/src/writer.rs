use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::error::{CodecError, Result};
use crate::key::UniversalKey;
use crate::packet::{encode_packet, Packet, PacketConfig};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete KLV packets to any `Write` sink.
pub struct PacketWriter<T> {
    inner: T,
    buf: BytesMut,
    config: PacketConfig,
}

impl<T: Write> PacketWriter<T> {
    /// Create a new packet writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, PacketConfig::default())
    }

    /// Create a new packet writer with explicit configuration.
    pub fn with_config(inner: T, config: PacketConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Write a complete packet (blocking).
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        self.send(&packet.key, packet.value.as_ref())
    }

    /// Encode and write a value under `key`.
    pub fn send(&mut self, key: &UniversalKey, value: &[u8]) -> Result<()> {
        if value.len() > self.config.max_value_size {
            return Err(CodecError::PacketTooLarge {
                size: value.len(),
                max: self.config.max_value_size,
            });
        }

        self.buf.clear();
        encode_packet(key, value, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(CodecError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
