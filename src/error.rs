use thiserror::Error;

/// Unified error type for the data primitives.
#[derive(Error, Debug)]
pub enum Error {
    /// A key would exceed `KEY_MAX_LENGTH`.
    #[error("key of {len} bytes exceeds maximum key length {max}")]
    KeyTooLong { len: usize, max: usize },

    /// Predecessor requested for the minimum value (empty key, zero timestamp).
    #[error("{0} has no predecessor")]
    NoPredecessor(&'static str),

    /// A value carries both a byte payload and an integer.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Stored checksum doesn't match the value content and key.
    #[error("checksum mismatch: stored {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { expected: u32, computed: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// True when the error signals corrupted or misaddressed data rather than
    /// a caller bug. Read paths must surface these, never retry them away.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::ChecksumMismatch { .. })
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
