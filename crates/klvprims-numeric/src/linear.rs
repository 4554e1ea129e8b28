//! Linear range mapping between fixed-width integer codewords and reals.
//!
//! Signed fields map `-(2^(W-1)-1)..=2^(W-1)-1` onto `[min, max]` and reserve
//! `-(2^(W-1))` as the "error" sentinel, surfaced as positive infinity.
//! Unsigned fields map `0..=2^W-1` onto `[min, max]` with no sentinel.

use crate::error::{NumericError, Result};

/// Maximum codeword width in bytes.
pub const MAX_WIDTH: usize = 8;

/// A linear mapping between a real domain range and integer codewords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRange {
    min: f64,
    max: f64,
    width: usize,
    signed: bool,
}

impl LinearRange {
    /// Signed mapping with an error sentinel at the most negative codeword.
    pub fn signed(min: f64, max: f64, width: usize) -> Result<Self> {
        Self::new(min, max, width, true)
    }

    /// Unsigned mapping over the full codeword range.
    pub fn unsigned(min: f64, max: f64, width: usize) -> Result<Self> {
        Self::new(min, max, width, false)
    }

    fn new(min: f64, max: f64, width: usize, signed: bool) -> Result<Self> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(NumericError::InvalidParameters(format!(
                "codeword width {width} bytes (expected 1..={MAX_WIDTH})"
            )));
        }
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(NumericError::InvalidParameters(format!(
                "range [{min}, {max}] must be finite and non-empty"
            )));
        }
        Ok(Self {
            min,
            max,
            width,
            signed,
        })
    }

    /// Lower bound of the domain range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the domain range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Codeword width in bytes.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether codewords are two's complement with an error sentinel.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Domain distance between adjacent codewords.
    pub fn resolution(&self) -> f64 {
        let (low, high) = self.codeword_bounds();
        (self.max - self.min) / (high - low) as f64
    }

    /// The reserved error codeword, for signed mappings.
    pub fn sentinel(&self) -> Option<i128> {
        self.signed.then(|| -(1i128 << (self.bits() - 1)))
    }

    /// Decode a big-endian codeword of exactly `width` bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<f64> {
        if bytes.len() != self.width {
            return Err(NumericError::length(self.width, bytes.len()));
        }

        let raw = bytes
            .iter()
            .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
        let codeword = if self.signed {
            let shift = 128 - self.bits();
            ((raw << shift) as i128) >> shift
        } else {
            raw as i128
        };

        if Some(codeword) == self.sentinel() {
            return Ok(f64::INFINITY);
        }

        let (low, high) = self.codeword_bounds();
        let fraction = (codeword - low) as f64 / (high - low) as f64;
        Ok(self.min + fraction * (self.max - self.min))
    }

    /// Encode a domain value, rounding to the nearest codeword.
    ///
    /// Positive infinity encodes to the sentinel on signed mappings.
    pub fn encode(&self, value: f64) -> Result<Vec<u8>> {
        let codeword = match self.sentinel() {
            Some(sentinel) if value == f64::INFINITY => sentinel,
            _ => self.codeword_for(value)?,
        };
        let bytes = codeword.to_be_bytes();
        Ok(bytes[bytes.len() - self.width..].to_vec())
    }

    fn codeword_for(&self, value: f64) -> Result<i128> {
        if value.is_nan() || value < self.min || value > self.max {
            return Err(NumericError::DomainRange {
                value,
                min: self.min,
                max: self.max,
            });
        }

        let (low, high) = self.codeword_bounds();
        let fraction = (value - self.min) / (self.max - self.min);
        let offset = (fraction * (high - low) as f64).round() as i128;
        Ok((low + offset).clamp(low, high))
    }

    fn codeword_bounds(&self) -> (i128, i128) {
        if self.signed {
            let high = (1i128 << (self.bits() - 1)) - 1;
            (-high, high)
        } else {
            (0, (1i128 << self.bits()) - 1)
        }
    }

    fn bits(&self) -> u32 {
        8 * self.width as u32
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn latitude() -> LinearRange {
        LinearRange::signed(-90.0, 90.0, 4).unwrap()
    }

    #[test]
    fn sentinel_decodes_to_infinity() {
        let range = latitude();
        assert_eq!(range.sentinel(), Some(-0x8000_0000));
        assert_eq!(range.decode(&[0x80, 0x00, 0x00, 0x00]).unwrap(), f64::INFINITY);
    }

    #[test]
    fn infinity_encodes_to_sentinel() {
        assert_eq!(
            latitude().encode(f64::INFINITY).unwrap(),
            vec![0x80, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn zero_roundtrips_within_resolution() {
        let range = latitude();
        assert!(range.resolution() < 42e-9 + 1e-12);
        let bytes = range.encode(0.0).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00]);
        let decoded = range.decode(&bytes).unwrap();
        assert!(decoded.abs() <= range.resolution());
    }

    #[test]
    fn extremes_map_to_codeword_bounds() {
        let range = latitude();
        assert_eq!(range.encode(90.0).unwrap(), vec![0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(range.encode(-90.0).unwrap(), vec![0x80, 0x00, 0x00, 0x01]);
        assert_eq!(range.decode(&[0x7F, 0xFF, 0xFF, 0xFF]).unwrap(), 90.0);
        assert_eq!(range.decode(&[0x80, 0x00, 0x00, 0x01]).unwrap(), -90.0);
    }

    #[test]
    fn st0601_sensor_latitude_example() {
        // ST 0601 item 13 example: 0x5595B66D -> 60.1768229669783
        let range = latitude();
        let decoded = range.decode(&[0x55, 0x95, 0xB6, 0x6D]).unwrap();
        assert!((decoded - 60.176_822_966_978_3).abs() < 1e-9);
        assert_eq!(range.encode(60.176_822_966_978_3).unwrap(), vec![0x55, 0x95, 0xB6, 0x6D]);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let range = latitude();
        assert!(matches!(
            range.encode(90.5),
            Err(NumericError::DomainRange { .. })
        ));
        assert!(matches!(
            range.encode(f64::NEG_INFINITY),
            Err(NumericError::DomainRange { .. })
        ));
        assert!(matches!(
            range.encode(f64::NAN),
            Err(NumericError::DomainRange { .. })
        ));
    }

    #[test]
    fn wrong_width_is_rejected() {
        assert!(matches!(
            latitude().decode(&[0x00, 0x00]),
            Err(NumericError::InvalidLength { .. })
        ));
    }

    #[test]
    fn unsigned_heading() {
        // ST 0601 item 5 example: 0x71C2 -> 159.9744
        let heading = LinearRange::unsigned(0.0, 360.0, 2).unwrap();
        assert_eq!(heading.sentinel(), None);
        let decoded = heading.decode(&[0x71, 0xC2]).unwrap();
        assert!((decoded - 159.974_364_843_213).abs() < 1e-9);
        assert_eq!(heading.encode(159.974_364_843_213).unwrap(), vec![0x71, 0xC2]);
        assert_eq!(heading.encode(360.0).unwrap(), vec![0xFF, 0xFF]);
        assert!(matches!(
            heading.encode(f64::INFINITY),
            Err(NumericError::DomainRange { .. })
        ));
    }

    #[test]
    fn invalid_parameters() {
        assert!(LinearRange::signed(1.0, 1.0, 2).is_err());
        assert!(LinearRange::signed(0.0, 1.0, 0).is_err());
        assert!(LinearRange::unsigned(0.0, 1.0, 9).is_err());
        assert!(LinearRange::unsigned(f64::NEG_INFINITY, 1.0, 2).is_err());
    }

    #[test]
    fn span_must_be_finite() {
        assert!(matches!(
            LinearRange::signed(-1e308, 1e308, 4),
            Err(NumericError::InvalidParameters(_))
        ));
        assert!(matches!(
            LinearRange::unsigned(-f64::MAX, f64::MAX, 8),
            Err(NumericError::InvalidParameters(_))
        ));
        let wide = LinearRange::unsigned(-8e307, 8e307, 2).unwrap();
        assert!(wide.resolution().is_finite());
        assert!(wide.decode(&[0x80, 0x00]).unwrap().is_finite());
    }

    #[test]
    fn eight_byte_width() {
        let range = LinearRange::signed(-1.0, 1.0, 8).unwrap();
        assert_eq!(range.encode(f64::INFINITY).unwrap()[0], 0x80);
        let decoded = range.decode(&range.encode(0.5).unwrap()).unwrap();
        assert!((decoded - 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn value_roundtrip_within_resolution(value in -90.0f64..=90.0, width in 1usize..=4) {
            let range = LinearRange::signed(-90.0, 90.0, width).unwrap();
            let decoded = range.decode(&range.encode(value).unwrap()).unwrap();
            prop_assert!((decoded - value).abs() <= range.resolution());
        }
    }
}
