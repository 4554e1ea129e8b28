//! MISB KLV metadata encoding and decoding.
//!
//! klvprims turns the KLV metadata carried alongside motion imagery into a
//! typed, tag-addressable object graph and back into bit-exact bytes.
//!
//! # Crate Structure
//!
//! - [`codec`]: BER lengths, BER-OID tags, checksums and Universal Label packets
//! - [`numeric`]: linear range, ST 1201 IMAPB and precision timestamp codecs
//! - [`localset`]: the recursive Local Set engine and value registries
//! - [`misb`]: ST 0601, ST 0102 and ST 0903 registries (behind `misb` feature)

/// Re-export codec types.
pub mod codec {
    pub use klvprims_codec::*;
}

/// Re-export numeric codec types.
pub mod numeric {
    pub use klvprims_numeric::*;
}

/// Re-export Local Set engine types.
pub mod localset {
    pub use klvprims_localset::*;
}

/// Re-export MISB registries (requires `misb` feature).
#[cfg(feature = "misb")]
pub mod misb {
    pub use klvprims_misb::*;
}
