//! MISP precision timestamps: microseconds since the Unix epoch, carried as
//! an 8-byte big-endian unsigned integer.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{NumericError, Result};

/// Encoded size of a precision timestamp.
pub const TIMESTAMP_LEN: usize = 8;

/// Microseconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrecisionTimestamp(u64);

impl PrecisionTimestamp {
    pub const fn from_unsigned(micros: u64) -> Self {
        Self(micros)
    }

    /// Build from signed microseconds; instants before the epoch are rejected.
    pub fn from_micros(micros: i64) -> Result<Self> {
        u64::try_from(micros)
            .map(Self)
            .map_err(|_| NumericError::DomainRange {
                value: micros as f64,
                min: 0.0,
                max: u64::MAX as f64,
            })
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Result<Self> {
        Self::from_micros(instant.timestamp_micros())
    }

    pub fn micros(&self) -> u64 {
        self.0
    }

    /// `None` when the value is past chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::from_timestamp_micros)
    }

    pub fn encode(&self) -> [u8; TIMESTAMP_LEN] {
        self.0.to_be_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; TIMESTAMP_LEN] = bytes
            .try_into()
            .map_err(|_| NumericError::length(TIMESTAMP_LEN, bytes.len()))?;
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

impl fmt::Display for PrecisionTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(instant) => f.write_str(&instant.to_rfc3339_opts(SecondsFormat::Micros, true)),
            None => write!(f, "{} us", self.0),
        }
    }
}
