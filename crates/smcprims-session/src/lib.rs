//! Two-phase SMC transactions and typed sensor access.
//!
//! This is the layer most callers use. Hand it an open SMC connection and
//! read temperatures and fan speeds, or set fan minimum speeds, by key.

pub mod config;
pub mod error;
pub mod keys;
mod sensors;
pub mod session;
pub mod shared;
pub mod transaction;
pub mod units;

#[cfg(test)]
mod testing;

pub use config::{FanKeyPolicy, FanSpeedDecoding, SessionConfig, TemperatureDecoding};
pub use error::{Phase, Result, SessionError, TransactionError};
pub use session::SmcSession;
pub use shared::SharedSession;
pub use transaction::{key_info, read_key, write_key};
pub use units::TemperatureUnit;
