//! Concrete MISB Local Set registries.
//!
//! Each module defines tag constants and a lazily built, shared
//! [`ValueRegistry`]:
//! - [`st0601`]: UAS Datalink Local Set (nests ST 0102 at tag 48 and ST 0903
//!   at tag 74)
//! - [`st0102`]: Security Metadata Local Set
//! - [`st0903`]: VMTI Local Set

pub mod st0102;
pub mod st0601;
pub mod st0903;

use klvprims_codec::{UniversalKey, SECURITY_METADATA_LS, UAS_DATALINK_LS, VMTI_LS};
use klvprims_localset::ValueRegistry;

/// Registry for a top-level packet key, if one is defined.
pub fn registry_for_key(key: &UniversalKey) -> Option<&'static ValueRegistry> {
    match *key {
        UAS_DATALINK_LS => Some(st0601::registry()),
        SECURITY_METADATA_LS => Some(st0102::registry()),
        VMTI_LS => Some(st0903::registry()),
        _ => None,
    }
}
