use std::fmt;

use smcprims_frame::{DataType, FrameError, KeyError, SmcKey, SmcStatus};
use smcprims_transport::{IoReturn, TransportError};

/// Step of a transaction at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The `GetKeyInfo` metadata call.
    KeyInfo,
    /// The `ReadKey` data call.
    ReadPayload,
    /// The `WriteKey` data call.
    WritePayload,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::KeyInfo => write!(f, "key info"),
            Phase::ReadPayload => write!(f, "read"),
            Phase::WritePayload => write!(f, "write"),
        }
    }
}

/// Errors from a single read or write transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The key is malformed. No call was made.
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    /// The channel call failed. Response contents were not looked at.
    #[error("channel failure during {phase} phase: {source}")]
    Channel {
        phase: Phase,
        source: TransportError,
    },

    /// The channel succeeded but the controller reported a failure status.
    #[error("controller reported {status} during {phase} phase")]
    Protocol { phase: Phase, status: SmcStatus },

    /// The value to write does not have the size the controller reports
    /// for the key. No write call was made.
    #[error("bad argument: value is {actual} bytes, controller expects {expected}")]
    BadArgument { expected: u32, actual: u32 },
}

impl TransactionError {
    /// Phase that failed, for channel and protocol failures.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            TransactionError::Channel { phase, .. } | TransactionError::Protocol { phase, .. } => {
                Some(*phase)
            }
            TransactionError::BadArgument { .. } | TransactionError::InvalidKey(_) => None,
        }
    }

    /// Channel status, if the channel failed.
    pub fn channel_status(&self) -> Option<IoReturn> {
        match self {
            TransactionError::Channel { source, .. } => source.io_return(),
            _ => None,
        }
    }

    /// Controller status, if the controller reported a failure.
    pub fn protocol_status(&self) -> Option<SmcStatus> {
        match self {
            TransactionError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_key_not_found(&self) -> bool {
        self.protocol_status() == Some(SmcStatus::KeyNotFound)
    }
}

/// Errors from typed sensor operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The key exists but its value is not shaped like the caller expects.
    #[error(
        "{key} is {actual_size} bytes of {actual_type:?}, expected {expected_size} bytes of {expected_type:?}"
    )]
    ShapeMismatch {
        key: SmcKey,
        expected_size: u32,
        expected_type: DataType,
        actual_size: u32,
        actual_type: DataType,
    },

    /// A caller-supplied value cannot be represented.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl From<KeyError> for SessionError {
    fn from(err: KeyError) -> Self {
        SessionError::Transaction(TransactionError::InvalidKey(err))
    }
}

impl SessionError {
    /// The underlying transaction error, if any.
    pub fn transaction(&self) -> Option<&TransactionError> {
        match self {
            SessionError::Transaction(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
