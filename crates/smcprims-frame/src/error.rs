/// Errors for malformed SMC keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Keys are exactly four bytes long.
    #[error("invalid key length {len} for {key:?} (must be 4 characters)")]
    InvalidLength { key: String, len: usize },

    /// Keys are plain ASCII.
    #[error("key {key:?} contains non-ASCII characters")]
    NonAscii { key: String },
}

/// Errors that can occur while building or decoding parameter records.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The key could not be encoded.
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    /// The payload exceeds the fixed 32-byte record field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The operation selector is not one this crate speaks.
    #[error("unknown operation selector {0}")]
    UnknownOperation(u8),
}

pub type Result<T> = std::result::Result<T, FrameError>;
