//! Fixed-frame call primitive for the Apple System Management Controller.
//!
//! The SMC is reached through the `AppleSMC` IOKit user client, which
//! exposes exactly one operation: hand the driver an 80-byte parameter
//! record and get one back. This crate provides:
//! - [`SmcTransport`], the call primitive every higher layer is written against
//! - [`IoReturn`], channel status codes normalized the way IOKit reports them
//! - [`AppleSmc`], the real IOKit connection (macOS only)
//!
//! This is the lowest layer of smcprims. It has no protocol knowledge.

pub mod error;
pub mod traits;

#[cfg(target_os = "macos")]
pub mod iokit;

pub use error::{IoReturn, Result, TransportError};
pub use traits::{ParamBuffer, SmcTransport, PARAM_STRUCT_SIZE};

#[cfg(target_os = "macos")]
pub use iokit::AppleSmc;
