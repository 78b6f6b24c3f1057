//! Typed temperature and fan operations.
//!
//! Each operation comes in two forms. The strict form returns a
//! [`Result`] and reports shape mismatches explicitly. The lenient form
//! degrades to a fixed sentinel (`0.0`, `-1`, `0`, `false`) and logs why.

use smcprims_frame::numeric::{
    decode_fpe2, decode_fpe2_exact, decode_sp78, decode_sp78_whole, encode_fpe2, FPE2_MAX,
};
use smcprims_frame::{DataType, RawValue, SmcKey};
use smcprims_transport::SmcTransport;
use tracing::{debug, warn};

use crate::config::{FanSpeedDecoding, TemperatureDecoding};
use crate::error::{Result, SessionError};
use crate::keys;
use crate::session::SmcSession;
use crate::units::TemperatureUnit;

impl<T: SmcTransport> SmcSession<T> {
    /// Read a `sp78` temperature sensor.
    pub fn read_temperature(&mut self, key: &str, unit: TemperatureUnit) -> Result<f64> {
        let key = SmcKey::new(key)?;
        let value = self.read_key(key)?;
        let bytes: [u8; 2] = expect_shape(key, &value, DataType::SP78)?;

        let celsius = match self.config().temperature {
            TemperatureDecoding::WholeDegree => decode_sp78_whole(bytes),
            TemperatureDecoding::Fractional => decode_sp78(bytes),
        };
        Ok(unit.convert_celsius(celsius))
    }

    /// Read a temperature, or `0.0` if it is unavailable.
    pub fn temperature(&mut self, key: &str, unit: TemperatureUnit) -> f64 {
        self.read_temperature(key, unit).unwrap_or_else(|err| {
            warn!(key, %err, "temperature unavailable");
            0.0
        })
    }

    /// Read the number of fans.
    pub fn read_fan_count(&mut self) -> Result<u8> {
        let key = SmcKey::new(keys::FAN_COUNT)?;
        let value = self.read_key(key)?;
        let [count] = expect_shape::<1>(key, &value, DataType::UI8)?;
        Ok(count)
    }

    /// Read the number of fans, or `-1` if it is unavailable.
    pub fn fan_count(&mut self) -> i32 {
        match self.read_fan_count() {
            Ok(count) => i32::from(count),
            Err(err) => {
                warn!(%err, "fan count unavailable");
                -1
            }
        }
    }

    /// Read the current speed of fan `index`, in RPM.
    pub fn read_fan_rpm(&mut self, index: u32) -> Result<u32> {
        let key = keys::fan_actual_speed(index, self.config().fan_keys)?;
        let value = self.read_key(key)?;
        let bytes: [u8; 2] = expect_shape(key, &value, DataType::FPE2)?;

        Ok(match self.config().fan_speed {
            FanSpeedDecoding::Reference => decode_fpe2(bytes),
            FanSpeedDecoding::Exact => decode_fpe2_exact(bytes),
        })
    }

    /// Read the current speed of fan `index`, or `0` if it is unavailable.
    pub fn fan_rpm(&mut self, index: u32) -> u32 {
        self.read_fan_rpm(index).unwrap_or_else(|err| {
            warn!(index, %err, "fan speed unavailable");
            0
        })
    }

    /// Set the minimum speed of fan `index`, in RPM.
    ///
    /// Writes need a privileged connection. Without one the channel rejects
    /// the call and the error carries `IoReturn::NOT_PRIVILEGED`.
    pub fn write_fan_min_rpm(&mut self, index: u32, rpm: u32) -> Result<()> {
        if rpm > FPE2_MAX {
            return Err(SessionError::InvalidValue(format!(
                "{rpm} rpm exceeds fpe2 maximum {FPE2_MAX}"
            )));
        }
        let key = keys::fan_min_speed(index, self.config().fan_keys)?;
        let value = RawValue::new(DataType::FPE2, &encode_fpe2(rpm))?;
        self.write_key(key, &value)
    }

    /// Set the minimum speed of fan `index`; `true` on success.
    ///
    /// `requires_auth` is accepted for interface compatibility only. Whether
    /// the write is allowed is decided by the channel, not by this layer.
    pub fn set_fan_min_rpm(&mut self, index: u32, rpm: u32, requires_auth: bool) -> bool {
        debug!(index, rpm, requires_auth, "setting fan minimum speed");
        match self.write_fan_min_rpm(index, rpm) {
            Ok(()) => true,
            Err(err) => {
                warn!(index, rpm, %err, "fan minimum speed not set");
                false
            }
        }
    }
}

fn expect_shape<const N: usize>(
    key: SmcKey,
    value: &RawValue,
    data_type: DataType,
) -> Result<[u8; N]> {
    let bytes = if value.data_type() == data_type {
        value.to_array::<N>()
    } else {
        None
    };
    bytes.ok_or(SessionError::ShapeMismatch {
        key,
        expected_size: N as u32,
        expected_type: data_type,
        actual_size: value.data_size(),
        actual_type: value.data_type(),
    })
}
