use std::sync::{Mutex, MutexGuard, PoisonError};

use smcprims_frame::{KeyError, KeyInfo, RawValue};
use smcprims_transport::SmcTransport;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::session::SmcSession;
use crate::units::TemperatureUnit;

/// A session shared between threads.
///
/// The lock is held for a whole transaction, so the metadata and data calls
/// of one caller are never interleaved with another caller's.
pub struct SharedSession<T> {
    inner: Mutex<SmcSession<T>>,
}

impl<T: SmcTransport> SharedSession<T> {
    pub fn new(transport: T) -> Self {
        Self::from_session(SmcSession::new(transport))
    }

    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self::from_session(SmcSession::with_config(transport, config))
    }

    pub fn from_session(session: SmcSession<T>) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut SmcSession<T>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn config(&self) -> SessionConfig {
        *self.lock().config()
    }

    pub fn set_config(&self, config: SessionConfig) {
        self.lock().set_config(config);
    }

    pub fn is_key_valid(&self, key: &str) -> std::result::Result<bool, KeyError> {
        self.lock().is_key_valid(key)
    }

    pub fn key_info(&self, key: &str) -> Result<KeyInfo> {
        self.lock().key_info(key)
    }

    pub fn read_raw(&self, key: &str) -> Result<RawValue> {
        self.lock().read_raw(key)
    }

    pub fn write_raw(&self, key: &str, value: &RawValue) -> Result<()> {
        self.lock().write_raw(key, value)
    }

    pub fn read_temperature(&self, key: &str, unit: TemperatureUnit) -> Result<f64> {
        self.lock().read_temperature(key, unit)
    }

    pub fn temperature(&self, key: &str, unit: TemperatureUnit) -> f64 {
        self.lock().temperature(key, unit)
    }

    pub fn read_fan_count(&self) -> Result<u8> {
        self.lock().read_fan_count()
    }

    pub fn fan_count(&self) -> i32 {
        self.lock().fan_count()
    }

    pub fn read_fan_rpm(&self, index: u32) -> Result<u32> {
        self.lock().read_fan_rpm(index)
    }

    pub fn fan_rpm(&self, index: u32) -> u32 {
        self.lock().fan_rpm(index)
    }

    pub fn write_fan_min_rpm(&self, index: u32, rpm: u32) -> Result<()> {
        self.lock().write_fan_min_rpm(index, rpm)
    }

    pub fn set_fan_min_rpm(&self, index: u32, rpm: u32, requires_auth: bool) -> bool {
        self.lock().set_fan_min_rpm(index, rpm, requires_auth)
    }

    pub fn into_inner(self) -> SmcSession<T> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Sessions keep no state between transactions, so a poisoned lock is reusable.
    fn lock(&self) -> MutexGuard<'_, SmcSession<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
