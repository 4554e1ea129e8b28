use std::collections::HashMap;

use bytes::Bytes;
use klvprims_codec::TagId;
use klvprims_numeric::{Imapb, LinearRange, NumericError, PrecisionTimestamp};
use tracing::debug;

use crate::config::{EncodingMode, ParseConfig};
use crate::engine;
use crate::error::{LocalSetError, Result};
use crate::local_set::LocalSet;
use crate::value::{Value, ValueData};

/// Widest integer a field may carry.
const MAX_INTEGER_LEN: usize = 8;

/// How the bytes of one field are interpreted.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Big-endian unsigned integer of `min_len..=max_len` bytes.
    Unsigned { min_len: usize, max_len: usize },
    /// Fixed-width unsigned integer with display labels.
    Enumerated {
        len: usize,
        names: &'static [(u64, &'static str)],
    },
    /// UTF-8 text of at most `max_len` bytes.
    Text { max_len: usize },
    /// 8-byte precision timestamp.
    Timestamp,
    /// Signed linear range with error sentinel.
    SignedLinear { min: f64, max: f64, len: usize },
    /// Unsigned linear range.
    UnsignedLinear { min: f64, max: f64, len: usize },
    /// ST 1201 IMAPB with an explicit length.
    Imapb { min: f64, max: f64, len: usize },
    /// IMAPB or legacy unsigned linear range, chosen by [`EncodingMode`].
    Real { min: f64, max: f64, len: usize },
    /// Nested Local Set decoded with another registry.
    Nested(fn() -> &'static ValueRegistry),
    /// Opaque bytes of a fixed length.
    Raw { len: usize },
}

impl FieldKind {
    fn real_codec(&self, mode: EncodingMode) -> Option<std::result::Result<RealCodec, NumericError>> {
        let codec = match *self {
            Self::SignedLinear { min, max, len } => LinearRange::signed(min, max, len).map(RealCodec::Linear),
            Self::UnsignedLinear { min, max, len } => {
                LinearRange::unsigned(min, max, len).map(RealCodec::Linear)
            }
            Self::Imapb { min, max, len } => Imapb::with_length(min, max, len).map(RealCodec::Imapb),
            Self::Real { min, max, len } => match mode {
                EncodingMode::Imapb => Imapb::with_length(min, max, len).map(RealCodec::Imapb),
                EncodingMode::Legacy => LinearRange::unsigned(min, max, len).map(RealCodec::Linear),
            },
            _ => return None,
        };
        Some(codec)
    }

    fn is_real(&self) -> bool {
        matches!(
            self,
            Self::SignedLinear { .. }
                | Self::UnsignedLinear { .. }
                | Self::Imapb { .. }
                | Self::Real { .. }
        )
    }

    /// Name of the [`FieldInput`] variant this kind accepts.
    pub fn input_name(&self) -> &'static str {
        match self {
            Self::Unsigned { .. } | Self::Enumerated { .. } => "unsigned",
            Self::Text { .. } => "text",
            Self::Timestamp => "timestamp",
            kind if kind.is_real() => "real",
            Self::Nested(_) => "local set",
            _ => "bytes",
        }
    }
}

enum RealCodec {
    Linear(LinearRange),
    Imapb(Imapb),
}

impl RealCodec {
    fn decode(&self, bytes: &[u8]) -> std::result::Result<f64, NumericError> {
        match self {
            Self::Linear(codec) => codec.decode(bytes),
            Self::Imapb(codec) => codec.decode(bytes),
        }
    }

    fn encode(&self, value: f64) -> std::result::Result<Vec<u8>, NumericError> {
        match self {
            Self::Linear(codec) => codec.encode(value),
            Self::Imapb(codec) => codec.encode(value),
        }
    }
}

/// Definition of one tag.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Producer-side input for [`ValueRegistry::make`].
#[derive(Debug, Clone)]
pub enum FieldInput {
    Unsigned(u64),
    Text(String),
    Timestamp(PrecisionTimestamp),
    Real(f64),
    Set(LocalSet),
    Bytes(Bytes),
}

impl From<u64> for FieldInput {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<PrecisionTimestamp> for FieldInput {
    fn from(value: PrecisionTimestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<LocalSet> for FieldInput {
    fn from(value: LocalSet) -> Self {
        Self::Set(value)
    }
}

/// Tag-keyed field definitions for one Local Set standard.
///
/// Registries hold no mutable state once built and can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct ValueRegistry {
    name: &'static str,
    checksum_tag: Option<TagId>,
    fields: HashMap<TagId, FieldDef>,
}

impl ValueRegistry {
    /// Create an empty registry for sets without a checksum.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            checksum_tag: None,
            fields: HashMap::new(),
        }
    }

    /// Reserve `tag` for the trailing checksum entry.
    pub fn with_checksum(mut self, tag: TagId) -> Self {
        self.checksum_tag = Some(tag);
        self
    }

    /// Define (or redefine) a tag.
    pub fn register(&mut self, tag: TagId, name: &'static str, kind: FieldKind) -> &mut Self {
        self.fields.insert(tag, FieldDef { name, kind });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn checksum_tag(&self) -> Option<TagId> {
        self.checksum_tag
    }

    pub fn field(&self, tag: TagId) -> Option<&FieldDef> {
        self.fields.get(&tag)
    }

    /// Check if a tag has a definition.
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.fields.contains_key(&tag)
    }

    /// Defined tags in ascending order.
    pub fn tags(&self) -> Vec<TagId> {
        let mut tags: Vec<TagId> = self.fields.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Decode the value bytes of one entry.
    ///
    /// Unknown tags yield [`Value::unknown`] rather than an error.
    pub fn decode(&self, tag: TagId, bytes: &[u8], config: &ParseConfig) -> Result<Value> {
        self.decode_at(tag, bytes, config, 0)
    }

    pub(crate) fn decode_at(
        &self,
        tag: TagId,
        bytes: &[u8],
        config: &ParseConfig,
        depth: usize,
    ) -> Result<Value> {
        let Some(field) = self.fields.get(&tag) else {
            debug!(registry = self.name, tag, len = bytes.len(), "unknown tag, keeping raw bytes");
            return Ok(Value::unknown(Bytes::copy_from_slice(bytes)));
        };

        let data = match field.kind {
            FieldKind::Unsigned { min_len, max_len } => {
                check_len(tag, bytes.len(), min_len, max_len.min(MAX_INTEGER_LEN))?;
                ValueData::Unsigned {
                    value: be_u64(bytes),
                    len: bytes.len(),
                }
            }
            FieldKind::Enumerated { len, names } => {
                check_len(tag, bytes.len(), len, len.min(MAX_INTEGER_LEN))?;
                let value = be_u64(bytes);
                ValueData::Enumerated {
                    value,
                    len,
                    label: label_for(names, value),
                }
            }
            FieldKind::Text { max_len } => {
                check_len(tag, bytes.len(), 0, max_len)?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|err| LocalSetError::invalid(tag, err))?;
                ValueData::Text(text.to_string())
            }
            FieldKind::Timestamp => ValueData::Timestamp(
                PrecisionTimestamp::decode(bytes).map_err(|err| LocalSetError::invalid(tag, err))?,
            ),
            FieldKind::Raw { len } => {
                check_len(tag, bytes.len(), len, len)?;
                ValueData::Raw(Bytes::copy_from_slice(bytes))
            }
            FieldKind::Nested(registry) => {
                let registry = registry();
                debug!(tag, registry = registry.name(), depth = depth + 1, "decoding nested set");
                ValueData::Nested {
                    set: engine::parse_nested(bytes, registry, config, depth + 1)?,
                    encoded: Bytes::copy_from_slice(bytes),
                }
            }
            kind => {
                let value = kind
                    .real_codec(config.encoding_mode)
                    .ok_or_else(|| LocalSetError::invalid(tag, "field kind has no numeric codec"))?
                    .and_then(|codec| codec.decode(bytes))
                    .map_err(|err| LocalSetError::invalid(tag, err))?;
                ValueData::Real {
                    value,
                    codeword: Bytes::copy_from_slice(bytes),
                }
            }
        };

        Ok(Value::new(field.name, data))
    }

    /// Build a value for `tag` from producer input, applying the same length
    /// and range rules as decoding.
    pub fn make(
        &self,
        tag: TagId,
        input: impl Into<FieldInput>,
        config: &ParseConfig,
    ) -> Result<Value> {
        let field = self.fields.get(&tag).ok_or(LocalSetError::UnknownTag(tag))?;

        let data = match (field.kind, input.into()) {
            (FieldKind::Unsigned { min_len, max_len }, FieldInput::Unsigned(value)) => {
                let len = significant_bytes(value).max(min_len);
                check_len(tag, len, min_len, max_len.min(MAX_INTEGER_LEN))?;
                ValueData::Unsigned { value, len }
            }
            (FieldKind::Enumerated { len, names }, FieldInput::Unsigned(value)) => {
                check_len(tag, significant_bytes(value), 0, len.min(MAX_INTEGER_LEN))?;
                ValueData::Enumerated {
                    value,
                    len,
                    label: label_for(names, value),
                }
            }
            (FieldKind::Text { max_len }, FieldInput::Text(text)) => {
                check_len(tag, text.len(), 0, max_len)?;
                ValueData::Text(text)
            }
            (FieldKind::Timestamp, FieldInput::Timestamp(ts)) => ValueData::Timestamp(ts),
            (FieldKind::Raw { len }, FieldInput::Bytes(bytes)) => {
                check_len(tag, bytes.len(), len, len)?;
                ValueData::Raw(bytes)
            }
            (FieldKind::Nested(_), FieldInput::Set(set)) => {
                let encoded = engine::serialize(&set)?;
                ValueData::Nested { set, encoded }
            }
            (kind, FieldInput::Real(value)) if kind.is_real() => {
                let codec = kind
                    .real_codec(config.encoding_mode)
                    .ok_or(LocalSetError::KindMismatch {
                        tag,
                        expected: kind.input_name(),
                    })??;
                let codeword = codec.encode(value)?;
                ValueData::Real {
                    value: codec.decode(&codeword)?,
                    codeword: Bytes::from(codeword),
                }
            }
            (kind, _) => {
                return Err(LocalSetError::KindMismatch {
                    tag,
                    expected: kind.input_name(),
                })
            }
        };

        Ok(Value::new(field.name, data))
    }
}

fn check_len(tag: TagId, actual: usize, min: usize, max: usize) -> Result<()> {
    if actual < min || actual > max {
        let expected = if min == max {
            format!("{min}")
        } else {
            format!("{min}..={max}")
        };
        return Err(LocalSetError::invalid(
            tag,
            format!("length {actual} bytes (expected {expected})"),
        ));
    }
    Ok(())
}

fn be_u64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

fn significant_bytes(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

fn label_for(names: &'static [(u64, &'static str)], value: u64) -> Option<&'static str> {
    names
        .iter()
        .find_map(|(code, name)| (*code == value).then_some(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::KlvValue;

    const LEVELS: &[(u64, &str)] = &[(1, "LOW"), (2, "HIGH")];

    fn registry() -> ValueRegistry {
        let mut registry = ValueRegistry::new("test").with_checksum(1);
        registry
            .register(2, "Time", FieldKind::Timestamp)
            .register(3, "Name", FieldKind::Text { max_len: 8 })
            .register(4, "Level", FieldKind::Enumerated { len: 1, names: LEVELS })
            .register(
                5,
                "Latitude",
                FieldKind::SignedLinear {
                    min: -90.0,
                    max: 90.0,
                    len: 4,
                },
            )
            .register(
                6,
                "Field of View",
                FieldKind::Real {
                    min: 0.0,
                    max: 180.0,
                    len: 2,
                },
            )
            .register(7, "Blob", FieldKind::Raw { len: 3 })
            .register(
                65,
                "Version",
                FieldKind::Unsigned {
                    min_len: 1,
                    max_len: 1,
                },
            );
        registry
    }

    #[test]
    fn version_leaf() {
        let config = ParseConfig::default();
        let value = registry().decode(65, &[0x0D], &config).unwrap();
        assert_eq!(value.as_u64(), Some(13));
        assert_eq!(value.display_value(), "13");
        assert_eq!(value.display_name(), "Version");
        assert_eq!(value.to_bytes().as_ref(), &[0x0D]);

        let zero = registry().decode(65, &[0x00], &config).unwrap();
        assert_eq!(zero.as_u64(), Some(0));
    }

    #[test]
    fn version_leaf_wrong_length() {
        let err = registry()
            .decode(65, &[0x00, 0x0D], &ParseConfig::default())
            .unwrap_err();
        assert!(matches!(err, LocalSetError::InvalidValueEncoding { tag: 65, .. }));
    }

    #[test]
    fn unknown_tag_is_opaque() {
        let value = registry()
            .decode(99, &[0xDE, 0xAD], &ParseConfig::default())
            .unwrap();
        assert!(value.is_unknown());
        assert_eq!(value.to_bytes().as_ref(), &[0xDE, 0xAD]);
    }

    #[test]
    fn text_must_be_utf8_and_bounded() {
        let config = ParseConfig::default();
        assert_eq!(
            registry().decode(3, b"MISSION", &config).unwrap().as_str(),
            Some("MISSION")
        );
        assert!(matches!(
            registry().decode(3, &[0xFF, 0xFE], &config),
            Err(LocalSetError::InvalidValueEncoding { tag: 3, .. })
        ));
        assert!(matches!(
            registry().decode(3, b"TOO LONG NAME", &config),
            Err(LocalSetError::InvalidValueEncoding { tag: 3, .. })
        ));
    }

    #[test]
    fn timestamp_length_checked() {
        assert!(matches!(
            registry().decode(2, &[0, 0, 0, 1], &ParseConfig::default()),
            Err(LocalSetError::InvalidValueEncoding { tag: 2, .. })
        ));
    }

    #[test]
    fn enumerated_label() {
        let value = registry().decode(4, &[0x02], &ParseConfig::default()).unwrap();
        assert_eq!(value.display_value(), "HIGH");
    }

    #[test]
    fn latitude_sentinel() {
        let value = registry()
            .decode(5, &[0x80, 0x00, 0x00, 0x00], &ParseConfig::default())
            .unwrap();
        assert_eq!(value.as_f64(), Some(f64::INFINITY));
        assert_eq!(value.to_bytes().as_ref(), &[0x80, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn encoding_mode_selects_codec() {
        let imapb = ParseConfig::default();
        let legacy = ParseConfig {
            encoding_mode: EncodingMode::Legacy,
            ..ParseConfig::default()
        };

        // IMAPB(0, 180, 2): 90 * 128 = 0x2D00
        let value = registry().decode(6, &[0x2D, 0x00], &imapb).unwrap();
        assert_eq!(value.as_f64(), Some(90.0));

        // Unsigned linear over 0..=0xFFFF
        let value = registry().decode(6, &[0xFF, 0xFF], &legacy).unwrap();
        assert_eq!(value.as_f64(), Some(180.0));

        // 0xFFFF has the IMAPB reserved bit set without naming a special value.
        assert!(matches!(
            registry().decode(6, &[0xFF, 0xFF], &imapb),
            Err(LocalSetError::InvalidValueEncoding { tag: 6, .. })
        ));
    }

    #[test]
    fn make_version() {
        let value = registry().make(65, 13u64, &ParseConfig::default()).unwrap();
        assert_eq!(value.to_bytes().as_ref(), &[0x0D]);

        assert!(matches!(
            registry().make(65, 300u64, &ParseConfig::default()),
            Err(LocalSetError::InvalidValueEncoding { tag: 65, .. })
        ));
    }

    #[test]
    fn make_real_rejects_out_of_range() {
        let config = ParseConfig::default();
        let value = registry().make(5, 45.0, &config).unwrap();
        assert!((value.as_f64().unwrap() - 45.0).abs() < 1e-7);
        assert_eq!(value.to_bytes().len(), 4);

        assert!(matches!(
            registry().make(5, 91.0, &config),
            Err(LocalSetError::Numeric(NumericError::DomainRange { .. }))
        ));
    }

    #[test]
    fn make_checks_kind_and_tag() {
        let config = ParseConfig::default();
        assert!(matches!(
            registry().make(3, 1u64, &config),
            Err(LocalSetError::KindMismatch { tag: 3, expected: "text" })
        ));
        assert!(matches!(
            registry().make(42, 1u64, &config),
            Err(LocalSetError::UnknownTag(42))
        ));
        assert!(matches!(
            registry().make(7, FieldInput::Bytes(Bytes::from_static(b"ab")), &config),
            Err(LocalSetError::InvalidValueEncoding { tag: 7, .. })
        ));
    }

    #[test]
    fn tags_sorted() {
        let registry = registry();
        assert_eq!(registry.tags(), vec![2, 3, 4, 5, 6, 7, 65]);
        assert!(registry.has_tag(65));
        assert!(!registry.has_tag(1));
        assert_eq!(registry.checksum_tag(), Some(1));
        assert_eq!(registry.field(3).map(|f| f.name), Some("Name"));
    }
}
