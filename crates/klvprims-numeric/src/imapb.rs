//! MISB ST 1201 floating point to integer mapping (IMAPB).
//!
//! A value `x` in `[min, max]` maps to the integer
//! `y = floor(sF * (x - min) + zOffset)` carried in `L` big-endian bytes. The
//! most significant bit of the codeword is reserved: when set, the first byte
//! names a special value (infinities and NaNs) instead of a number.

use crate::error::{NumericError, Result};

/// Largest supported codeword length in bytes.
pub const MAX_LENGTH: usize = 8;

const POSITIVE_INFINITY: u8 = 0xC8;
const NEGATIVE_INFINITY: u8 = 0xE8;
const POSITIVE_QUIET_NAN: u8 = 0xD0;
const NEGATIVE_QUIET_NAN: u8 = 0xF0;
const POSITIVE_SIGNAL_NAN: u8 = 0xD8;
const NEGATIVE_SIGNAL_NAN: u8 = 0xF8;

/// IMAPB parameters for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imapb {
    min: f64,
    max: f64,
    length: usize,
    s_f: f64,
    s_r: f64,
    z_offset: f64,
    max_codeword: u64,
}

impl Imapb {
    /// Derive the codeword length from the required precision.
    pub fn with_precision(min: f64, max: f64, precision: f64) -> Result<Self> {
        check_range(min, max)?;
        if !precision.is_finite() || precision <= 0.0 {
            return Err(NumericError::InvalidParameters(format!(
                "precision {precision} must be positive"
            )));
        }

        let b_pow = (max - min).log2().ceil() as i64;
        let bits = b_pow
            .checked_sub(precision.log2().floor() as i64)
            .and_then(|bits| bits.checked_add(1))
            .ok_or_else(|| {
                NumericError::InvalidParameters(format!(
                    "precision {precision} over [{min}, {max}] needs too many bits"
                ))
            })?;
        let length = usize::try_from(bits.max(1))
            .map(|bits| bits.div_ceil(8))
            .unwrap_or(usize::MAX);
        Self::with_length(min, max, length)
    }

    /// Use an explicit codeword length.
    pub fn with_length(min: f64, max: f64, length: usize) -> Result<Self> {
        check_range(min, max)?;
        if !(1..=MAX_LENGTH).contains(&length) {
            return Err(NumericError::InvalidParameters(format!(
                "codeword length {length} bytes (expected 1..={MAX_LENGTH})"
            )));
        }

        let b_pow = (max - min).log2().ceil() as i32;
        let d_pow = 8 * length as i32 - 1;
        let s_f = 2f64.powi(d_pow - b_pow);
        let s_r = 2f64.powi(b_pow - d_pow);
        if !s_f.is_normal() || !s_r.is_normal() {
            return Err(NumericError::InvalidParameters(format!(
                "range [{min}, {max}] cannot be scaled to {length} bytes"
            )));
        }
        let z_offset = if min < 0.0 {
            let scaled = s_f * min;
            scaled - scaled.floor()
        } else {
            0.0
        };

        // The reserved bit stays clear for every in-range value.
        let ceiling = (1u64 << d_pow) - 1;
        let max_codeword = ((s_f * (max - min) + z_offset).floor() as u64).min(ceiling);

        Ok(Self {
            min,
            max,
            length,
            s_f,
            s_r,
            z_offset,
            max_codeword,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Codeword length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Domain distance between adjacent codewords.
    pub fn resolution(&self) -> f64 {
        self.s_r
    }

    /// Encode a value. Infinities and NaNs use the special codewords.
    pub fn encode(&self, value: f64) -> Result<Vec<u8>> {
        if let Some(first) = special_for(value) {
            let mut bytes = vec![0u8; self.length];
            bytes[0] = first;
            return Ok(bytes);
        }
        if value < self.min || value > self.max {
            return Err(NumericError::DomainRange {
                value,
                min: self.min,
                max: self.max,
            });
        }

        let codeword =
            ((self.s_f * (value - self.min) + self.z_offset).floor() as u64).min(self.max_codeword);
        let bytes = codeword.to_be_bytes();
        Ok(bytes[bytes.len() - self.length..].to_vec())
    }

    /// Decode exactly `length` bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<f64> {
        if bytes.len() != self.length {
            return Err(NumericError::length(self.length, bytes.len()));
        }

        let first = bytes[0];
        if first & 0x80 != 0 {
            if bytes[1..].iter().any(|&b| b != 0) {
                return Err(NumericError::InvalidCodeword(format!(
                    "special value 0x{first:02X} with non-zero trailing bytes"
                )));
            }
            return match first {
                POSITIVE_INFINITY => Ok(f64::INFINITY),
                NEGATIVE_INFINITY => Ok(f64::NEG_INFINITY),
                POSITIVE_QUIET_NAN | POSITIVE_SIGNAL_NAN => Ok(f64::NAN),
                NEGATIVE_QUIET_NAN | NEGATIVE_SIGNAL_NAN => Ok(-f64::NAN),
                other => Err(NumericError::InvalidCodeword(format!(
                    "reserved bit pattern 0x{other:02X}"
                ))),
            };
        }

        let codeword = bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        if codeword > self.max_codeword {
            return Err(NumericError::InvalidCodeword(format!(
                "codeword {codeword} exceeds {} for range [{}, {}]",
                self.max_codeword, self.min, self.max
            )));
        }

        Ok(self.s_r * (codeword as f64 - self.z_offset) + self.min)
    }
}

fn check_range(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
        return Err(NumericError::InvalidParameters(format!(
            "range [{min}, {max}] must be finite and non-empty"
        )));
    }
    Ok(())
}

fn special_for(value: f64) -> Option<u8> {
    if value == f64::INFINITY {
        Some(POSITIVE_INFINITY)
    } else if value == f64::NEG_INFINITY {
        Some(NEGATIVE_INFINITY)
    } else if value.is_nan() {
        Some(if value.is_sign_negative() {
            NEGATIVE_QUIET_NAN
        } else {
            POSITIVE_QUIET_NAN
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn field_of_view() -> Imapb {
        Imapb::with_length(0.0, 180.0, 2).unwrap()
    }

    #[test]
    fn length_from_precision() {
        // ceil(log2(180)) = 8, floor(log2(0.5)) = -1 -> 10 bits -> 2 bytes
        assert_eq!(Imapb::with_precision(0.0, 180.0, 0.5).unwrap().length(), 2);
        // ceil(log2(19900)) = 15, floor(log2(0.03125)) = -5 -> 21 bits -> 3 bytes
        assert_eq!(
            Imapb::with_precision(-900.0, 19000.0, 0.03125).unwrap().length(),
            3
        );
        assert_eq!(Imapb::with_precision(0.0, 1.0, 1.0).unwrap().length(), 1);
    }

    #[test]
    fn known_codewords() {
        let fov = field_of_view();
        assert_eq!(fov.encode(90.0).unwrap(), vec![0x2D, 0x00]);
        assert_eq!(fov.encode(12.5).unwrap(), vec![0x06, 0x40]);
        assert_eq!(fov.decode(&[0x2D, 0x00]).unwrap(), 90.0);
        assert_eq!(fov.resolution(), 1.0 / 128.0);
    }

    #[test]
    fn negative_minimum() {
        let height = Imapb::with_length(-900.0, 19000.0, 3).unwrap();
        assert_eq!(height.encode(-900.0).unwrap(), vec![0x00, 0x00, 0x00]);
        assert_eq!(height.encode(10000.0).unwrap(), vec![0x2A, 0x94, 0x00]);
        assert_eq!(height.decode(&[0x2A, 0x94, 0x00]).unwrap(), 10000.0);
    }

    #[test]
    fn fractional_offset_is_applied() {
        // sF * min = -2^13 / 3 is not an integer, so zOffset is non-zero.
        let codec = Imapb::with_length(-1.0 / 3.0, 1.0, 2).unwrap();
        let zero = codec.encode(0.0).unwrap();
        let decoded = codec.decode(&zero).unwrap();
        assert!(decoded.abs() <= codec.resolution());
    }

    #[test]
    fn special_values() {
        let fov = field_of_view();
        assert_eq!(fov.encode(f64::INFINITY).unwrap(), vec![0xC8, 0x00]);
        assert_eq!(fov.encode(f64::NEG_INFINITY).unwrap(), vec![0xE8, 0x00]);
        assert_eq!(fov.encode(f64::NAN).unwrap(), vec![0xD0, 0x00]);
        assert_eq!(fov.encode(-f64::NAN).unwrap(), vec![0xF0, 0x00]);

        assert_eq!(fov.decode(&[0xC8, 0x00]).unwrap(), f64::INFINITY);
        assert_eq!(fov.decode(&[0xE8, 0x00]).unwrap(), f64::NEG_INFINITY);
        assert!(fov.decode(&[0xD0, 0x00]).unwrap().is_nan());
        assert!(fov.decode(&[0xD8, 0x00]).unwrap().is_nan());
        let negative = fov.decode(&[0xF8, 0x00]).unwrap();
        assert!(negative.is_nan() && negative.is_sign_negative());
    }

    #[test]
    fn reserved_pattern_is_invalid() {
        assert!(matches!(
            field_of_view().decode(&[0x80, 0x00]),
            Err(NumericError::InvalidCodeword(_))
        ));
    }

    #[test]
    fn special_value_needs_zero_tail() {
        let fov = field_of_view();
        for bytes in [[0xC8, 0x01], [0xE8, 0x80], [0xD0, 0x01], [0xF8, 0xFF]] {
            assert!(matches!(
                fov.decode(&bytes),
                Err(NumericError::InvalidCodeword(_))
            ));
        }
        let wide = Imapb::with_length(0.0, 180.0, 4).unwrap();
        assert!(matches!(
            wide.decode(&[0xC8, 0x00, 0x00, 0x01]),
            Err(NumericError::InvalidCodeword(_))
        ));
        assert_eq!(wide.decode(&[0xC8, 0x00, 0x00, 0x00]).unwrap(), f64::INFINITY);
    }

    #[test]
    fn codeword_above_max_is_invalid() {
        // 180 * 128 = 0x5A00
        let fov = field_of_view();
        assert_eq!(fov.decode(&[0x5A, 0x00]).unwrap(), 180.0);
        assert!(matches!(
            fov.decode(&[0x5A, 0x01]),
            Err(NumericError::InvalidCodeword(_))
        ));
    }

    #[test]
    fn wrong_length_and_range() {
        let fov = field_of_view();
        assert!(matches!(
            fov.decode(&[0x00]),
            Err(NumericError::InvalidLength { .. })
        ));
        assert!(matches!(
            fov.encode(180.5),
            Err(NumericError::DomainRange { .. })
        ));
        assert!(matches!(
            fov.encode(-0.1),
            Err(NumericError::DomainRange { .. })
        ));
    }

    #[test]
    fn power_of_two_span_keeps_reserved_bit_clear() {
        let codec = Imapb::with_length(0.0, 256.0, 2).unwrap();
        let bytes = codec.encode(256.0).unwrap();
        assert_eq!(bytes[0] & 0x80, 0);
        assert!((codec.decode(&bytes).unwrap() - 256.0).abs() <= codec.resolution());
    }

    #[test]
    fn invalid_parameters() {
        assert!(Imapb::with_length(0.0, 0.0, 2).is_err());
        assert!(Imapb::with_length(0.0, 1.0, 9).is_err());
        assert!(Imapb::with_precision(0.0, 1.0, 0.0).is_err());
        assert!(matches!(
            Imapb::with_precision(0.0, 1e6, 1e-30),
            Err(NumericError::InvalidParameters(_))
        ));
    }

    #[test]
    fn overflowing_span_is_rejected() {
        assert!(matches!(
            Imapb::with_precision(-1e308, 1e308, 1.0),
            Err(NumericError::InvalidParameters(_))
        ));
        assert!(matches!(
            Imapb::with_length(-f64::MAX, f64::MAX, 8),
            Err(NumericError::InvalidParameters(_))
        ));
        assert!(matches!(
            Imapb::with_precision(0.0, 1.0, f64::MIN_POSITIVE),
            Err(NumericError::InvalidParameters(_))
        ));
        assert!(matches!(
            Imapb::with_length(0.0, 1e-300, 8),
            Err(NumericError::InvalidParameters(_))
        ));
    }

    proptest! {
        #[test]
        fn value_roundtrip_within_resolution(value in -900.0f64..=19000.0) {
            let codec = Imapb::with_length(-900.0, 19000.0, 3).unwrap();
            let decoded = codec.decode(&codec.encode(value).unwrap()).unwrap();
            prop_assert!((decoded - value).abs() <= codec.resolution());
        }
    }
}
