#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a fan index selects the fan's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum FanKeyPolicy {
    /// `F<index>Ac`, `F<index>Mn`.
    #[default]
    PerFan,
    /// Always fan 0's keys, whatever the index. c-smc's `get_fan_rpm` and
    /// `set_fan_min_rpm` build `F0Ac`/`F0Mn` regardless of the fan number.
    FanZeroOnly,
}

/// How `sp78` temperatures are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum TemperatureDecoding {
    /// Integer byte only.
    #[default]
    WholeDegree,
    /// Full 8.8 fixed point.
    Fractional,
}

/// How `fpe2` fan speeds are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum FanSpeedDecoding {
    /// `(b0 << 6) + (b1 << 2)`, bit-compatible with c-smc's `from_fpe2`.
    #[default]
    Reference,
    /// `(b0 << 6) + (b1 >> 2)`, the inverse of the encoder.
    Exact,
}

/// Controls how a session maps and decodes sensor values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SessionConfig {
    pub fan_keys: FanKeyPolicy,
    pub temperature: TemperatureDecoding,
    pub fan_speed: FanSpeedDecoding,
}

impl SessionConfig {
    pub fn with_fan_keys(mut self, fan_keys: FanKeyPolicy) -> Self {
        self.fan_keys = fan_keys;
        self
    }

    pub fn with_temperature(mut self, temperature: TemperatureDecoding) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_fan_speed(mut self, fan_speed: FanSpeedDecoding) -> Self {
        self.fan_speed = fan_speed;
        self
    }
}
