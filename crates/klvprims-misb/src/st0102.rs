//! MISB ST 0102 Security Metadata Local Set.
//!
//! Carried nested inside ST 0601 (tag 48) or as its own packet. No checksum.

use std::sync::LazyLock;

use klvprims_codec::TagId;
use klvprims_localset::{FieldKind, ValueRegistry};

pub const SECURITY_CLASSIFICATION: TagId = 1;
pub const CLASSIFYING_COUNTRY_CODING_METHOD: TagId = 2;
pub const CLASSIFYING_COUNTRY: TagId = 3;
pub const SCI_SHI_INFORMATION: TagId = 4;
pub const CAVEATS: TagId = 5;
pub const RELEASING_INSTRUCTIONS: TagId = 6;
pub const OBJECT_COUNTRY_CODING_METHOD: TagId = 12;
pub const OBJECT_COUNTRY_CODES: TagId = 13;
pub const VERSION: TagId = 22;

/// Security classification levels.
pub const CLASSIFICATIONS: &[(u64, &str)] = &[
    (0x01, "UNCLASSIFIED//"),
    (0x02, "RESTRICTED//"),
    (0x03, "CONFIDENTIAL//"),
    (0x04, "SECRET//"),
    (0x05, "TOP SECRET//"),
];

/// Country coding methods.
pub const COUNTRY_CODING_METHODS: &[(u64, &str)] = &[
    (0x01, "ISO-3166 Two Letter"),
    (0x02, "ISO-3166 Three Letter"),
    (0x03, "FIPS 10-4 Two Letter"),
    (0x04, "FIPS 10-4 Four Letter"),
    (0x05, "ISO-3166 Numeric"),
    (0x06, "1059 Two Letter"),
    (0x07, "1059 Three Letter"),
    (0x0A, "FIPS 10-4 Mixed"),
    (0x0B, "ISO 3166 Mixed"),
    (0x0C, "STANAG 1059 Mixed"),
    (0x0D, "GENC Two Letter"),
    (0x0E, "GENC Three Letter"),
    (0x0F, "GENC Numeric"),
    (0x10, "GENC Mixed"),
];

static REGISTRY: LazyLock<ValueRegistry> = LazyLock::new(|| {
    let mut registry = ValueRegistry::new("ST 0102 Security Metadata");
    registry
        .register(
            SECURITY_CLASSIFICATION,
            "Security Classification",
            FieldKind::Enumerated {
                len: 1,
                names: CLASSIFICATIONS,
            },
        )
        .register(
            CLASSIFYING_COUNTRY_CODING_METHOD,
            "Classifying Country Coding Method",
            FieldKind::Enumerated {
                len: 1,
                names: COUNTRY_CODING_METHODS,
            },
        )
        .register(
            CLASSIFYING_COUNTRY,
            "Classifying Country",
            FieldKind::Text { max_len: 14 },
        )
        .register(
            SCI_SHI_INFORMATION,
            "SCI/SHI Information",
            FieldKind::Text { max_len: 40 },
        )
        .register(CAVEATS, "Caveats", FieldKind::Text { max_len: 32 })
        .register(
            RELEASING_INSTRUCTIONS,
            "Releasing Instructions",
            FieldKind::Text { max_len: 40 },
        )
        .register(
            OBJECT_COUNTRY_CODING_METHOD,
            "Object Country Coding Method",
            FieldKind::Enumerated {
                len: 1,
                names: COUNTRY_CODING_METHODS,
            },
        )
        .register(
            OBJECT_COUNTRY_CODES,
            "Object Country Codes",
            FieldKind::Text { max_len: 40 },
        )
        .register(
            VERSION,
            "Version",
            FieldKind::Unsigned {
                min_len: 2,
                max_len: 2,
            },
        );
    registry
});

/// The ST 0102 Local Set registry.
pub fn registry() -> &'static ValueRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use klvprims_localset::{parse, KlvValue, ParseConfig};

    use super::*;

    #[test]
    fn decode_security_set() {
        let bytes = [
            0x01, 0x01, 0x01, // UNCLASSIFIED//
            0x02, 0x01, 0x01, // ISO-3166 Two Letter
            0x03, 0x04, b'/', b'/', b'U', b'S', // //US
            0x16, 0x02, 0x00, 0x0C, // version 12
        ];
        let set = parse(&bytes, registry(), &ParseConfig::default()).unwrap();

        let classification = set.get(SECURITY_CLASSIFICATION).unwrap();
        assert_eq!(classification.display_name(), "Security Classification");
        assert_eq!(classification.display_value(), "UNCLASSIFIED//");
        assert_eq!(
            set.get(CLASSIFYING_COUNTRY_CODING_METHOD)
                .map(KlvValue::display_value),
            Some("ISO-3166 Two Letter".to_string())
        );
        assert_eq!(set.get(CLASSIFYING_COUNTRY).and_then(|v| v.as_str()), Some("//US"));
        assert_eq!(set.get(VERSION).and_then(|v| v.as_u64()), Some(12));
        assert_eq!(set.checksum_tag(), None);
    }

    #[test]
    fn version_needs_two_bytes() {
        assert!(parse(&[0x16, 0x01, 0x0C], registry(), &ParseConfig::default()).is_err());
    }
}
