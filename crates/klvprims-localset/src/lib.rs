//! Recursive MISB Local Set engine.
//!
//! A Local Set is a run of `tag | BER length | value` entries, optionally
//! closed by a 16-bit checksum entry. [`parse`] splits the bytes into entries
//! and hands each value to a [`ValueRegistry`], which turns it into a typed
//! [`Value`] (recursing for nested sets). [`serialize`] is the inverse.
//!
//! ```
//! use klvprims_localset::{parse, serialize, FieldKind, LocalSet, ParseConfig, ValueRegistry};
//!
//! let mut registry = ValueRegistry::new("example").with_checksum(1);
//! registry.register(65, "Version", FieldKind::Unsigned { min_len: 1, max_len: 1 });
//!
//! let config = ParseConfig::default();
//! let mut set = LocalSet::for_registry(&registry);
//! set.insert(65, registry.make(65, 13u64, &config).unwrap());
//!
//! let bytes = serialize(&set).unwrap();
//! let parsed = parse(&bytes, &registry, &config).unwrap();
//! assert_eq!(parsed.get(65).and_then(|v| v.as_u64()), Some(13));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod local_set;
pub mod registry;
pub mod value;

pub use config::{ChecksumPolicy, EncodingMode, ParseConfig, DEFAULT_MAX_DEPTH};
pub use engine::{parse, parse_packet, serialize, serialize_packet};
pub use error::{LocalSetError, Result};
pub use local_set::{ChecksumStatus, LocalSet};
pub use registry::{FieldDef, FieldInput, FieldKind, ValueRegistry};
pub use value::{KlvValue, Value, ValueData, UNKNOWN_NAME};
