//! Well-known 16-byte Universal Label keys.
//!
//! Every top-level MISB packet starts with an SMPTE Universal Label. Only the
//! Local Set keys this workspace has registries for are listed here.

/// A 16-byte SMPTE Universal Label.
pub type UniversalKey = [u8; 16];

/// Size of a Universal Label in bytes.
pub const KEY_LEN: usize = 16;

/// SMPTE designator shared by every Universal Label.
pub const SMPTE_DESIGNATOR: [u8; 4] = [0x06, 0x0E, 0x2B, 0x34];

/// MISB ST 0601 UAS Datalink Local Set.
pub const UAS_DATALINK_LS: UniversalKey = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x0B, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x01, 0x01, 0x00, 0x00, 0x00,
];

/// MISB ST 0102 Security Metadata Local Set.
pub const SECURITY_METADATA_LS: UniversalKey = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x03, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x03, 0x02, 0x00, 0x00, 0x00,
];

/// MISB ST 0903 Video Moving Target Indicator Local Set.
pub const VMTI_LS: UniversalKey = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x0B, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x03, 0x06, 0x00, 0x00, 0x00,
];

/// Returns a human-readable name for a Universal Label.
pub fn key_name(key: &UniversalKey) -> &'static str {
    match *key {
        UAS_DATALINK_LS => "ST 0601 UAS Datalink LS",
        SECURITY_METADATA_LS => "ST 0102 Security Metadata LS",
        VMTI_LS => "ST 0903 VMTI LS",
        _ if has_smpte_designator(key) => "UNKNOWN",
        _ => "INVALID",
    }
}

/// Returns true if the bytes start with the SMPTE designator.
pub fn has_smpte_designator(bytes: &[u8]) -> bool {
    bytes.starts_with(&SMPTE_DESIGNATOR)
}

/// Render a key as dotted hex (`06.0E.2B.34...`).
pub fn key_to_string(key: &UniversalKey) -> String {
    key.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_keys() {
        assert_eq!(key_name(&UAS_DATALINK_LS), "ST 0601 UAS Datalink LS");
        assert_eq!(key_name(&VMTI_LS), "ST 0903 VMTI LS");
        let mut other = UAS_DATALINK_LS;
        other[15] = 0x7F;
        assert_eq!(key_name(&other), "UNKNOWN");
        assert_eq!(key_name(&[0u8; 16]), "INVALID");
    }

    #[test]
    fn key_string_is_dotted_hex() {
        let text = key_to_string(&UAS_DATALINK_LS);
        assert!(text.starts_with("06.0E.2B.34.02.0B"));
        assert_eq!(text.split('.').count(), KEY_LEN);
    }
}
