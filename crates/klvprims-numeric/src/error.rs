/// Errors that can occur in the quantized numeric codecs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// The encoded value has the wrong number of bytes.
    #[error("invalid length ({actual} bytes, expected {expected})")]
    InvalidLength { expected: String, actual: usize },

    /// A domain value lies outside the field's declared range.
    #[error("value {value} outside range [{min}, {max}]")]
    DomainRange { value: f64, min: f64, max: f64 },

    /// The codeword is not valid for the codec parameters.
    #[error("invalid codeword: {0}")]
    InvalidCodeword(String),

    /// The codec parameters themselves are unusable.
    #[error("invalid codec parameters: {0}")]
    InvalidParameters(String),
}

impl NumericError {
    pub(crate) fn length(expected: impl ToString, actual: usize) -> Self {
        Self::InvalidLength {
            expected: expected.to_string(),
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, NumericError>;
