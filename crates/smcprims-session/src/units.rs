#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit a temperature is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit.
    pub fn convert_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 1.8 + 32.0,
            TemperatureUnit::Kelvin => celsius + 273.15,
        }
    }
}
