//! Integration test: profile files on disk.

use std::io::Write;

use mcconv_common::config::{ConfigError, ConfigLoader, LogLevel, ProfileConfig};
use mcconv_common::drive::config::SpeedUnit;
use tempfile::NamedTempFile;

use super::{DUAL_TOML, PROFILE_TOML};

#[test]
fn reference_profile_loads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(PROFILE_TOML.as_bytes()).unwrap();

    let profile = ProfileConfig::load(file.path()).unwrap();
    profile.validate().unwrap();
    assert_eq!(profile.shared.service_name, "acim-g431");
    assert_eq!(profile.shared.log_level, LogLevel::Info);
    assert_eq!(profile.physical.drives.len(), 1);
    assert_eq!(profile.physical.drives[0].mechanical.speed_unit, SpeedUnit::DeciHz);
}

#[test]
fn omitted_fields_take_defaults() {
    let profile = ProfileConfig::from_toml(DUAL_TOML).unwrap();
    let board = &profile.physical.board;
    assert_eq!(board.sys_tick_frequency_hz, 2000);
    assert_eq!(board.serial_com_atr_time_ms, 20);

    let m2 = &profile.physical.drives[1];
    assert_eq!(m2.timing.tim_clock_divider, 1);
    assert_eq!(m2.timing.regulation_execution_rate, 1);
    assert_eq!(m2.power_stage.ton_ns, 500);
    assert_eq!(m2.power_stage.adc_sar_cycles, 12.5);
    assert!(m2.features.dac);
}

#[test]
fn unknown_speed_unit_is_a_parse_error() {
    let broken = PROFILE_TOML.replace("speed_unit = \"deci_hz\"", "speed_unit = \"rpm\"");
    assert!(matches!(
        ProfileConfig::from_toml(&broken),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn missing_required_field_is_a_parse_error() {
    let broken = PROFILE_TOML.replace("rshunt_ohm = 0.01\n", "");
    assert!(matches!(
        ProfileConfig::from_toml(&broken),
        Err(ConfigError::ParseError(_))
    ));
}
