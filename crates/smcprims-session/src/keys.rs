//! Well-known SMC keys.

use smcprims_frame::{KeyError, SmcKey};

use crate::config::FanKeyPolicy;

/// CPU 0 die temperature.
pub const CPU_0_DIODE: &str = "TC0D";
/// CPU 0 proximity temperature.
pub const CPU_0_PROXIMITY: &str = "TC0P";
/// GPU 0 die temperature.
pub const GPU_0_DIODE: &str = "TG0D";
/// Number of fans.
pub const FAN_COUNT: &str = "FNum";

const FAN_ACTUAL_SPEED: &str = "Ac";
const FAN_MIN_SPEED: &str = "Mn";

/// Current speed key of a fan (`F<n>Ac`).
///
/// Indices of 10 and above do not fit a four-character key.
pub fn fan_actual_speed(index: u32, policy: FanKeyPolicy) -> Result<SmcKey, KeyError> {
    fan_key(index, FAN_ACTUAL_SPEED, policy)
}

/// Minimum speed key of a fan (`F<n>Mn`).
pub fn fan_min_speed(index: u32, policy: FanKeyPolicy) -> Result<SmcKey, KeyError> {
    fan_key(index, FAN_MIN_SPEED, policy)
}

fn fan_key(index: u32, suffix: &str, policy: FanKeyPolicy) -> Result<SmcKey, KeyError> {
    let index = match policy {
        FanKeyPolicy::PerFan => index,
        FanKeyPolicy::FanZeroOnly => 0,
    };
    SmcKey::new(&format!("F{index}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_fan_keys_use_index() {
        let key = fan_actual_speed(1, FanKeyPolicy::PerFan).unwrap();
        assert_eq!(key.to_string(), "F1Ac");
        let key = fan_min_speed(9, FanKeyPolicy::PerFan).unwrap();
        assert_eq!(key.to_string(), "F9Mn");
    }

    #[test]
    fn fan_zero_policy_ignores_index() {
        let key = fan_actual_speed(3, FanKeyPolicy::FanZeroOnly).unwrap();
        assert_eq!(key.to_string(), "F0Ac");
        let key = fan_min_speed(42, FanKeyPolicy::FanZeroOnly).unwrap();
        assert_eq!(key.to_string(), "F0Mn");
    }

    #[test]
    fn two_digit_index_is_invalid_key() {
        assert!(matches!(
            fan_actual_speed(10, FanKeyPolicy::PerFan),
            Err(KeyError::InvalidLength { len: 5, .. })
        ));
    }
}
