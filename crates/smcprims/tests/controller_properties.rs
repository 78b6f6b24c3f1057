mod common;

use common::SimulatedSmc;
use smcprims::frame::numeric::{decode_fpe2, decode_fpe2_exact, encode_fpe2};
use smcprims::frame::{DataType, KeyError, RawValue, SmcKey, SmcStatus};
use smcprims::session::{
    read_key, write_key, FanKeyPolicy, Phase, SessionError, TransactionError,
};
use smcprims::transport::IoReturn;
use smcprims::{SessionConfig, SmcSession, TemperatureUnit};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn key_codec_round_trips_printable_keys() {
    for text in ["TC0D", "FNum", "F0Ac", "F0Mn", "flt ", "~!@#", "    ", "a1B2"] {
        let key = SmcKey::new(text).unwrap();
        assert_eq!(SmcKey::from_u32(key.to_u32()).to_string(), text);
    }
}

#[test]
fn fpe2_round_trip_bands() {
    for v in (0..=16383u32).step_by(64) {
        assert_eq!(decode_fpe2(encode_fpe2(v)), v);
    }
    for v in (0..=16383u32).step_by(4) {
        assert_eq!(decode_fpe2_exact(encode_fpe2(v)), v);
    }
}

#[test]
fn fan_count_matches_byte() {
    let mut session = SmcSession::new(SimulatedSmc::laptop());
    assert_eq!(session.fan_count(), 2);
}

#[test]
fn fan_count_with_wrong_shape_is_minus_one() {
    let smc = SimulatedSmc::new().key("FNum", DataType::UI16, &[0, 2]);
    let mut session = SmcSession::new(smc);
    assert_eq!(session.fan_count(), -1);
    assert!(matches!(
        session.read_fan_count(),
        Err(SessionError::ShapeMismatch { actual_size: 2, .. })
    ));
}

#[test]
fn fan_zero_rpm_from_fpe2_bytes() {
    let mut session = SmcSession::new(SimulatedSmc::laptop());
    assert_eq!(session.fan_rpm(0), 0x10 << 6);
    assert_eq!(session.fan_rpm(1), 0x18 << 6);
}

#[test]
fn fan_index_compatibility_switch() {
    let config = SessionConfig::default().with_fan_keys(FanKeyPolicy::FanZeroOnly);
    let mut session = SmcSession::with_config(SimulatedSmc::laptop(), config);
    assert_eq!(session.fan_rpm(1), 1024);
}

#[test]
fn temperature_in_each_unit() {
    let mut session = SmcSession::new(SimulatedSmc::laptop());
    assert!(close(session.temperature("TC0D", TemperatureUnit::Celsius), 50.0));
    assert!(close(session.temperature("TC0D", TemperatureUnit::Fahrenheit), 122.0));
    assert!(close(session.temperature("TC0D", TemperatureUnit::Kelvin), 323.15));
}

#[test]
fn unavailable_temperature_is_zero() {
    let mut session = SmcSession::new(SimulatedSmc::laptop());
    assert_eq!(session.temperature("TG0D", TemperatureUnit::Celsius), 0.0);
}

#[test]
fn write_size_mismatch_makes_one_call() {
    let mut smc = SimulatedSmc::laptop();
    let key = SmcKey::new("F0Mn").unwrap();
    let value = RawValue::new(DataType::FPE2, &[0, 0, 0, 0]).unwrap();

    let err = write_key(&mut smc, key, &value).unwrap_err();

    assert!(matches!(
        err,
        TransactionError::BadArgument {
            expected: 2,
            actual: 4
        }
    ));
    assert_eq!(smc.total_calls(), 1);
    assert_eq!(smc.write_calls, 0);
}

#[test]
fn key_validity_distinguishes_usage_errors() {
    let mut session = SmcSession::new(SimulatedSmc::laptop());
    assert_eq!(session.is_key_valid("TC0D"), Ok(true));
    assert_eq!(session.is_key_valid("XXXX"), Ok(false));
    assert!(matches!(
        session.is_key_valid("TC0DD"),
        Err(KeyError::InvalidLength { len: 5, .. })
    ));
}

#[test]
fn channel_failure_stops_before_payload_phase() {
    let mut smc = SimulatedSmc::laptop().channel_down();

    let err = read_key(&mut smc, SmcKey::new("TC0D").unwrap()).unwrap_err();

    assert_eq!(err.phase(), Some(Phase::KeyInfo));
    assert_eq!(err.channel_status(), Some(IoReturn::NOT_OPEN));
    assert_eq!(smc.info_calls, 1);
    assert_eq!(smc.read_calls + smc.write_calls, 0);

    let value = RawValue::new(DataType::FPE2, &[0, 0]).unwrap();
    let err = write_key(&mut smc, SmcKey::new("F0Mn").unwrap(), &value).unwrap_err();
    assert!(matches!(err, TransactionError::Channel { .. }));
    assert_eq!(smc.write_calls, 0);
}

#[test]
fn missing_key_is_protocol_failure_not_channel_failure() {
    let mut smc = SimulatedSmc::laptop();
    let err = read_key(&mut smc, SmcKey::new("ZZZZ").unwrap()).unwrap_err();
    assert_eq!(err.protocol_status(), Some(SmcStatus::KeyNotFound));
    assert_eq!(err.channel_status(), None);
}

#[test]
fn fan_minimum_write_round_trips_through_controller() {
    let mut smc = SimulatedSmc::laptop();
    {
        let mut session = SmcSession::new(&mut smc);
        assert!(session.set_fan_min_rpm(1, 1800, true));
    }
    assert_eq!(smc.value("F1Mn"), encode_fpe2(1800).to_vec());
    assert_eq!(smc.value("F0Mn"), vec![0x07, 0x40]);
    assert_eq!(smc.info_calls, 1);
    assert_eq!(smc.write_calls, 1);
}
