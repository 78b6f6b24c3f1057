use std::fmt;

/// Normalized IOKit return code for a channel call.
///
/// Raw kernel return values carry system and subsystem bits in the upper
/// range. Only the low 14 bits (the IOKit `err_get_code` rule) are kept, so
/// the same failure compares equal no matter which subsystem reported it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoReturn(u32);

impl IoReturn {
    /// `kIOReturnSuccess`.
    pub const SUCCESS: IoReturn = IoReturn(0);
    /// `kIOReturnError`: general error.
    pub const ERROR: IoReturn = IoReturn(0x2bc);
    /// `kIOReturnNotPrivileged`: privilege violation.
    pub const NOT_PRIVILEGED: IoReturn = IoReturn(0x2c1);
    /// `kIOReturnBadArgument`: invalid argument.
    pub const BAD_ARGUMENT: IoReturn = IoReturn(0x2c2);
    /// `kIOReturnNotOpen`: device not open.
    pub const NOT_OPEN: IoReturn = IoReturn(0x2cd);
    /// `kIOReturnNoDevice`: no such device.
    pub const NO_DEVICE: IoReturn = IoReturn(0x2c0);
    /// `kIOReturnNotFound`: data was not found.
    pub const NOT_FOUND: IoReturn = IoReturn(0x2f0);

    const CODE_MASK: u32 = 0x3fff;

    /// Normalize a raw `kern_return_t` value.
    ///
    /// Success is decided on the raw value. A nonzero value whose masked
    /// code is zero becomes [`IoReturn::ERROR`], never success.
    pub fn from_raw(raw: i32) -> Self {
        if raw == 0 {
            return Self::SUCCESS;
        }
        match raw as u32 & Self::CODE_MASK {
            0 => Self::ERROR,
            code => IoReturn(code),
        }
    }

    /// The normalized code.
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Self::SUCCESS => Some("success"),
            Self::ERROR => Some("general error"),
            Self::NOT_PRIVILEGED => Some("not privileged"),
            Self::BAD_ARGUMENT => Some("bad argument"),
            Self::NOT_OPEN => Some("not open"),
            Self::NO_DEVICE => Some("no device"),
            Self::NOT_FOUND => Some("not found"),
            _ => None,
        }
    }
}

impl fmt::Debug for IoReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IoReturn({:#x})", self.0)
    }
}

impl fmt::Display for IoReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:#x})", self.0),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

/// Errors that can occur on the SMC channel.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No IOKit service with the given name is registered.
    #[error("IOKit service {service} not found")]
    ServiceNotFound { service: String },

    /// Opening a user client on the service failed.
    #[error("failed to open {service}: {code}")]
    Open { service: String, code: IoReturn },

    /// The struct-method call itself failed. The response buffer is undefined.
    #[error("channel call failed: {code}")]
    Call { code: IoReturn },

    /// Closing the user client failed.
    #[error("failed to close connection: {code}")]
    Close { code: IoReturn },
}

impl TransportError {
    /// The channel status carried by this error, if any.
    pub fn io_return(&self) -> Option<IoReturn> {
        match self {
            TransportError::Open { code, .. }
            | TransportError::Call { code }
            | TransportError::Close { code } => Some(*code),
            TransportError::ServiceNotFound { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
