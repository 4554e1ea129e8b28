//! Quantized numeric codecs used by MISB KLV values.
//!
//! - [`LinearRange`]: integer codewords mapped linearly onto a real range,
//!   optionally with an "error" sentinel (ST 0601 style)
//! - [`Imapb`]: the ST 1201 floating point to integer mapping
//! - [`PrecisionTimestamp`]: 8-byte microsecond timestamps

pub mod error;
pub mod imapb;
pub mod linear;
pub mod timestamp;

pub use error::{NumericError, Result};
pub use imapb::Imapb;
pub use linear::LinearRange;
pub use timestamp::{PrecisionTimestamp, TIMESTAMP_LEN};
