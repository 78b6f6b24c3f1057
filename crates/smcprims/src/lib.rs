//! User-space access to the Apple System Management Controller.
//!
//! smcprims reads temperatures and fan speeds from the SMC, and sets fan
//! minimum speeds, through the `AppleSMC` driver's fixed-record protocol.
//!
//! # Crate Structure
//!
//! - [`transport`] — The single call primitive and the IOKit connection
//! - [`frame`] — Keys, numeric formats, and the parameter record layout
//! - [`session`] — Two-phase transactions and typed sensor access
//!
//! ```no_run
//! # #[cfg(target_os = "macos")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use smcprims::session::{keys, SmcSession, TemperatureUnit};
//! use smcprims::transport::AppleSmc;
//!
//! let mut smc = AppleSmc::open()?;
//! let mut session = SmcSession::new(&mut smc);
//! let celsius = session.read_temperature(keys::CPU_0_DIODE, TemperatureUnit::Celsius)?;
//! println!("{celsius:.1}°C");
//! drop(session);
//! smc.close()?;
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "macos"))]
//! # fn main() {}
//! ```

/// Re-export transport types.
pub mod transport {
    pub use smcprims_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use smcprims_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use smcprims_session::*;
}

pub use smcprims_session::{SessionConfig, SmcSession, TemperatureUnit};
