use smcprims_frame::{KeyError, KeyInfo, RawValue, SmcKey};
use smcprims_transport::SmcTransport;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::transaction;

/// Typed access to one SMC connection.
///
/// The session never opens or closes the connection; it only issues calls
/// through the transport it was given. Every method takes `&mut self`, so at
/// most one transaction is in flight per session.
pub struct SmcSession<T> {
    transport: T,
    config: SessionConfig,
}

impl<T: SmcTransport> SmcSession<T> {
    /// Create a session with default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    /// Borrow the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the session and return the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Whether `key` exists and can be read.
    ///
    /// A malformed key is a usage error and is returned as `Err`; any channel
    /// or controller failure while reading yields `Ok(false)`.
    pub fn is_key_valid(&mut self, key: &str) -> std::result::Result<bool, KeyError> {
        let key = SmcKey::new(key)?;
        match transaction::read_key(&mut self.transport, key) {
            Ok(_) => Ok(true),
            Err(err) => {
                debug!(%key, %err, "key check failed");
                Ok(false)
            }
        }
    }

    /// Read the raw value of `key`.
    pub fn read_raw(&mut self, key: &str) -> Result<RawValue> {
        let key = SmcKey::new(key)?;
        self.read_key(key)
    }

    /// Write a raw value to `key`.
    pub fn write_raw(&mut self, key: &str, value: &RawValue) -> Result<()> {
        let key = SmcKey::new(key)?;
        self.write_key(key, value)
    }

    /// Fetch the metadata of `key`.
    pub fn key_info(&mut self, key: &str) -> Result<KeyInfo> {
        let key = SmcKey::new(key)?;
        Ok(transaction::key_info(&mut self.transport, key)?)
    }

    pub(crate) fn read_key(&mut self, key: SmcKey) -> Result<RawValue> {
        Ok(transaction::read_key(&mut self.transport, key)?)
    }

    pub(crate) fn write_key(&mut self, key: SmcKey, value: &RawValue) -> Result<()> {
        Ok(transaction::write_key(&mut self.transport, key, value)?)
    }
}

impl<T> std::fmt::Debug for SmcSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmcSession")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
