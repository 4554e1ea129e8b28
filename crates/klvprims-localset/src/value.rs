use bytes::Bytes;
use klvprims_codec::TagId;
use klvprims_numeric::PrecisionTimestamp;

use crate::local_set::LocalSet;

/// Capabilities shared by every decoded Local Set item.
pub trait KlvValue {
    /// Value bytes exactly as they appear on the wire (without tag or length).
    fn to_bytes(&self) -> Bytes;

    /// Human-readable rendering of the value.
    fn display_value(&self) -> String;

    /// Field name from the defining standard.
    fn display_name(&self) -> &str;
}

/// Name given to values whose tag the registry does not define.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A decoded Local Set item.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    name: &'static str,
    data: ValueData,
}

/// The typed content of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    /// Big-endian unsigned integer; `len` is its encoded width.
    Unsigned { value: u64, len: usize },
    /// Unsigned integer with a symbolic label.
    Enumerated {
        value: u64,
        len: usize,
        label: Option<&'static str>,
    },
    Text(String),
    Timestamp(PrecisionTimestamp),
    /// Quantized real: the domain value and the codeword it came from.
    Real { value: f64, codeword: Bytes },
    /// Nested Local Set with its encoded form.
    Nested { set: LocalSet, encoded: Bytes },
    /// Opaque bytes of a defined field.
    Raw(Bytes),
    /// Bytes of a tag the registry does not define.
    Unknown(Bytes),
}

impl Value {
    pub fn new(name: &'static str, data: ValueData) -> Self {
        Self { name, data }
    }

    pub fn unknown(bytes: impl Into<Bytes>) -> Self {
        Self::new(UNKNOWN_NAME, ValueData::Unknown(bytes.into()))
    }

    pub fn data(&self) -> &ValueData {
        &self.data
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.data, ValueData::Unknown(_))
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.data {
            ValueData::Unsigned { value, .. } | ValueData::Enumerated { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.data {
            ValueData::Real { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<PrecisionTimestamp> {
        match self.data {
            ValueData::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// The nested container, if this value is one.
    pub fn as_local_set(&self) -> Option<&LocalSet> {
        match &self.data {
            ValueData::Nested { set, .. } => Some(set),
            _ => None,
        }
    }

    /// Look up a field of a nested container.
    pub fn field(&self, tag: TagId) -> Option<&Value> {
        self.as_local_set().and_then(|set| set.get(tag))
    }
}

impl KlvValue for Value {
    fn to_bytes(&self) -> Bytes {
        match &self.data {
            ValueData::Unsigned { value, len } | ValueData::Enumerated { value, len, .. } => {
                let bytes = value.to_be_bytes();
                let len = (*len).min(bytes.len());
                Bytes::copy_from_slice(&bytes[bytes.len() - len..])
            }
            ValueData::Text(text) => Bytes::copy_from_slice(text.as_bytes()),
            ValueData::Timestamp(ts) => Bytes::copy_from_slice(&ts.encode()),
            ValueData::Real { codeword, .. } => codeword.clone(),
            ValueData::Nested { encoded, .. } => encoded.clone(),
            ValueData::Raw(bytes) | ValueData::Unknown(bytes) => bytes.clone(),
        }
    }

    fn display_value(&self) -> String {
        match &self.data {
            ValueData::Unsigned { value, .. } => value.to_string(),
            ValueData::Enumerated { value, label, .. } => match label {
                Some(label) => (*label).to_string(),
                None => format!("Unknown ({value})"),
            },
            ValueData::Text(text) => text.clone(),
            ValueData::Timestamp(ts) => ts.to_string(),
            ValueData::Real { value, .. } => value.to_string(),
            ValueData::Nested { set, .. } => format!("[{} fields]", set.len()),
            ValueData::Raw(bytes) | ValueData::Unknown(bytes) => hex(bytes),
        }
    }

    fn display_name(&self) -> &str {
        self.name
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_keeps_width() {
        let value = Value::new("Version", ValueData::Unsigned { value: 13, len: 1 });
        assert_eq!(value.to_bytes().as_ref(), &[0x0D]);
        assert_eq!(value.display_value(), "13");
        assert_eq!(value.display_name(), "Version");

        let wide = Value::new("Frame Number", ValueData::Unsigned { value: 1, len: 3 });
        assert_eq!(wide.to_bytes().as_ref(), &[0x00, 0x00, 0x01]);
    }

    #[test]
    fn enumerated_display() {
        let known = Value::new(
            "Classification",
            ValueData::Enumerated {
                value: 1,
                len: 1,
                label: Some("UNCLASSIFIED//"),
            },
        );
        assert_eq!(known.display_value(), "UNCLASSIFIED//");
        assert_eq!(known.as_u64(), Some(1));

        let unlabelled = Value::new(
            "Classification",
            ValueData::Enumerated {
                value: 9,
                len: 1,
                label: None,
            },
        );
        assert_eq!(unlabelled.display_value(), "Unknown (9)");
    }

    #[test]
    fn unknown_displays_hex() {
        let value = Value::unknown(vec![0x0A, 0xFF]);
        assert!(value.is_unknown());
        assert_eq!(value.display_name(), UNKNOWN_NAME);
        assert_eq!(value.display_value(), "0A FF");
        assert_eq!(value.to_bytes().as_ref(), &[0x0A, 0xFF]);
    }

    #[test]
    fn real_reemits_codeword() {
        let value = Value::new(
            "Sensor Latitude",
            ValueData::Real {
                value: f64::INFINITY,
                codeword: Bytes::from_static(&[0x80, 0x00, 0x00, 0x00]),
            },
        );
        assert_eq!(value.as_f64(), Some(f64::INFINITY));
        assert_eq!(value.display_value(), "inf");
        assert_eq!(value.to_bytes().as_ref(), &[0x80, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let text = Value::new("Mission ID", ValueData::Text("MISSION01".into()));
        assert_eq!(text.as_str(), Some("MISSION01"));
        assert_eq!(text.as_u64(), None);
        assert_eq!(text.as_local_set(), None);
        assert_eq!(text.field(1), None);
    }
}
