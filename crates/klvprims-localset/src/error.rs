use klvprims_codec::{CodecError, TagId};
use klvprims_numeric::NumericError;

/// Errors that can occur while parsing, building or serializing a Local Set.
#[derive(Debug, thiserror::Error)]
pub enum LocalSetError {
    /// Tag, length or checksum framing failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A quantized value could not be encoded.
    #[error(transparent)]
    Numeric(#[from] NumericError),

    /// Bytes remain after the final entry.
    #[error("trailing data after local set ({remaining} bytes)")]
    TrailingData { remaining: usize },

    /// A value's bytes violate its field's length or range preconditions.
    #[error("invalid value for tag {tag}: {reason}")]
    InvalidValueEncoding { tag: TagId, reason: String },

    /// Nested Local Sets exceed the configured depth.
    #[error("nested local sets exceed depth limit {limit}")]
    RecursionLimitExceeded { limit: usize },

    /// The stored checksum does not match the computed one.
    #[error("checksum mismatch (computed 0x{expected:04X}, stored 0x{actual:04X})")]
    ChecksumMismatch { expected: u16, actual: u16 },

    /// The registry has no definition for this tag.
    #[error("tag {0} is not defined in this registry")]
    UnknownTag(TagId),

    /// The input supplied for a field does not match its kind.
    #[error("tag {tag} expects {expected} input")]
    KindMismatch { tag: TagId, expected: &'static str },
}

impl LocalSetError {
    pub(crate) fn invalid(tag: TagId, reason: impl ToString) -> Self {
        Self::InvalidValueEncoding {
            tag,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LocalSetError>;
