/// Errors that can occur while encoding or decoding KLV framing.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes are available than a header claims.
    #[error("truncated input ({needed} bytes needed, {available} available)")]
    TruncatedInput { needed: usize, available: usize },

    /// A length or tag field uses more bytes than this codec supports.
    #[error("unsupported {field} encoding: {reason}")]
    UnsupportedLength {
        field: &'static str,
        reason: String,
    },

    /// The packet does not start with an SMPTE Universal Label.
    #[error("invalid packet key (expected SMPTE designator 06 0E 2B 34)")]
    InvalidKey,

    /// The packet value exceeds the configured maximum size.
    #[error("packet too large ({size} bytes, max {max})")]
    PacketTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing packets.
    #[error("packet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete packet was received.
    #[error("stream closed (incomplete packet)")]
    ConnectionClosed,
}

impl CodecError {
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        Self::TruncatedInput { needed, available }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
