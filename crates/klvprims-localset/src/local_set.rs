use bytes::Bytes;
use klvprims_codec::TagId;

use crate::engine;
use crate::error::Result;
use crate::registry::ValueRegistry;
use crate::value::Value;

/// Checksum outcome observed when a set was parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// No checksum entry was present (or the set was built in memory).
    #[default]
    Absent,
    Valid,
    /// Only reachable under `ChecksumPolicy::Permissive`.
    Mismatch { computed: u16, stored: u16 },
}

/// An ordered collection of `(tag, value)` entries.
///
/// Entries keep encounter order. Each tag appears at most once: inserting an
/// existing tag replaces its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalSet {
    entries: Vec<(TagId, Value)>,
    checksum_tag: Option<TagId>,
    checksum: ChecksumStatus,
}

impl LocalSet {
    /// Empty set serialized without a checksum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set serialized with a trailing checksum under `tag`.
    pub fn with_checksum(tag: TagId) -> Self {
        Self {
            checksum_tag: Some(tag),
            ..Self::default()
        }
    }

    /// Empty set framed the way `registry` expects.
    pub fn for_registry(registry: &ValueRegistry) -> Self {
        Self {
            checksum_tag: registry.checksum_tag(),
            ..Self::default()
        }
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, tag: TagId, value: Value) -> Option<Value> {
        match self.entries.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((tag, value));
                None
            }
        }
    }

    pub fn get(&self, tag: TagId) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(t, value)| (*t == tag).then_some(value))
    }

    pub fn remove(&mut self, tag: TagId) -> Option<Value> {
        let index = self.entries.iter().position(|(t, _)| *t == tag)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, tag: TagId) -> bool {
        self.get(tag).is_some()
    }

    /// Tags present, in encounter order.
    pub fn tags(&self) -> impl Iterator<Item = TagId> + '_ {
        self.entries.iter().map(|(tag, _)| *tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagId, &Value)> {
        self.entries.iter().map(|(tag, value)| (*tag, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tag under which [`serialize`](crate::serialize) appends a checksum.
    pub fn checksum_tag(&self) -> Option<TagId> {
        self.checksum_tag
    }

    pub fn set_checksum_tag(&mut self, tag: Option<TagId>) {
        self.checksum_tag = tag;
    }

    pub fn checksum_status(&self) -> ChecksumStatus {
        self.checksum
    }

    pub(crate) fn set_checksum_status(&mut self, tag: TagId, status: ChecksumStatus) {
        self.checksum_tag = Some(tag);
        self.checksum = status;
    }

    /// Encode the set; shorthand for [`crate::serialize`].
    pub fn to_bytes(&self) -> Result<Bytes> {
        engine::serialize(self)
    }
}
