//! Integration test: reference profile through the full derivation.

use mcconv_common::drive::constants::DeadTimeBand;
use mcconv_common::drive::flags::{InterfaceOptions, SensorCode, UiConfig};
use mcconv_engine::derive;

use super::reference_profile;

#[test]
fn board_constants() {
    let derived = derive(&reference_profile().physical).unwrap();
    let board = derived.board;
    assert_eq!(board.dpp_conv_factor, 65536);
    assert_eq!(board.internal_supply_voltage, 19859);
    assert_eq!(board.ui_task_occurrence_ticks, 199);
    assert_eq!(board.serialcom_timeout_occurrence_ticks, 79);
    assert_eq!(board.serialcom_atr_time_ticks, 39);
}

#[test]
fn loop_timing_and_scaling() {
    let derived = derive(&reference_profile().physical).unwrap();
    let m1 = derived.drive(0).unwrap();

    assert_eq!(m1.loop_timing.regulation_rate, 16000);
    assert_eq!(m1.loop_timing.regulation_rate_scaled, 16000);
    assert_eq!(m1.loop_timing.repetition_counter, 1);
    assert_eq!(m1.loop_timing.medium_frequency_task_rate, 1000);
    assert_eq!(m1.loop_timing.mf_task_occurrence_ticks, 1);

    assert_eq!(m1.scaling.current_conv_factor, 993);
    let product = f64::from(m1.scaling.current_conv_factor) * m1.scaling.current_conv_factor_inv;
    assert!((product - 1.0).abs() < 1e-3);
    assert!((m1.scaling.max_readable_current_a - 33.0).abs() < 1e-9);
    assert_eq!(m1.scaling.default_torque_component, 0);
}

#[test]
fn thresholds_and_speed() {
    let derived = derive(&reference_profile().physical).unwrap();
    let m1 = derived.drive(0).unwrap();

    assert_eq!(m1.thresholds.overvoltage_threshold_d, 31099);
    assert_eq!(m1.thresholds.undervoltage_threshold_d, 8293);
    assert_eq!(m1.thresholds.ov_temperature_threshold_d, 41505);
    assert_eq!(m1.thresholds.ov_temperature_hysteresis_d, 4567);

    assert_eq!(m1.mechanical.max_application_speed_unit, 500);
    assert_eq!(m1.mechanical.min_application_speed_unit, 0);
    assert_eq!(m1.mechanical.alignment_angle_s16, 16384);
    assert_eq!(m1.mechanical.encoder_pulse_nbr, 4095);
}

#[test]
fn pwm_and_adc_window() {
    let derived = derive(&reference_profile().physical).unwrap();
    let m1 = derived.drive(0).unwrap();

    assert_eq!(m1.pwm.pwm_period_cycles, 10625);
    assert_eq!(m1.pwm.dead_time_counts_raw, 136);
    assert_eq!(m1.pwm.dead_time.band, DeadTimeBand::Direct);
    assert_eq!(m1.pwm.dead_time.value, 136);
    assert_eq!(m1.pwm.dtcompcnt, 68);
    assert_eq!((m1.pwm.ton, m1.pwm.toff), (42, 42));
    assert_eq!((m1.pwm.trise, m1.pwm.tdead, m1.pwm.tnoise), (170, 136, 170));

    assert_eq!(m1.adc.sampling_time, 26);
    assert_eq!(m1.adc.tw_before, 39);
    assert_eq!(m1.adc.tw_before_r3_1, 115);
    assert_eq!(m1.adc.tw_after, 306);
    assert_eq!(m1.adc.max_twait, 140);
}

#[test]
fn ui_flags() {
    let derived = derive(&reference_profile().physical).unwrap();
    let ui = derived.drive(0).unwrap().ui;

    let config = ui.ui_config();
    assert!(config.contains(UiConfig::DAC | UiConfig::SET_ID_IN_SPEED_MODE | UiConfig::PLL_TUNING));
    assert!(!config.intersects(UiConfig::FIELD_WEAKENING | UiConfig::DIFF_TERM | UiConfig::PFC));
    assert_eq!(config.main_sensor(), Some(SensorCode::Encoder));
    assert_eq!(config.aux_sensor(), None);
    assert_eq!(
        ui.interface_options(),
        InterfaceOptions::COM | InterfaceOptions::DAC
    );
}

#[test]
fn repeated_derivation_is_identical() {
    let profile = reference_profile();
    let first = derive(&profile.physical).unwrap();
    for _ in 0..10 {
        assert_eq!(derive(&profile.physical).unwrap(), first);
    }
}
