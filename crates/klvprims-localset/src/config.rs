/// How a checksum mismatch is treated on parse.
///
/// Both policies accept a set that carries no checksum at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Log a warning and keep the decoded set.
    #[default]
    Permissive,
    /// Fail with `LocalSetError::ChecksumMismatch`.
    Strict,
}

/// Quantization used by fields whose encoding changed between revisions of
/// their standard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingMode {
    /// MISB ST 1201 IMAPB (current revisions).
    #[default]
    Imapb,
    /// Unsigned linear range mapping used before ST 1201 was adopted.
    Legacy,
}

/// Controls Local Set parsing and value construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    pub checksum: ChecksumPolicy,
    pub encoding_mode: EncodingMode,
    /// Deepest nesting level accepted; the outermost set is level 0.
    pub max_depth: usize,
}

/// Default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 8;

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            checksum: ChecksumPolicy::Permissive,
            encoding_mode: EncodingMode::Imapb,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseConfig {
    /// Default configuration with strict checksum validation.
    pub fn strict() -> Self {
        Self {
            checksum: ChecksumPolicy::Strict,
            ..Self::default()
        }
    }
}
