//! Integration test: invalid profiles are rejected as a whole with every
//! violated field reported.

use mcconv_common::error::ConfigIssue;
use mcconv_engine::derive;

use super::dual_profile;

#[test]
fn every_issue_is_reported() {
    let mut profile = dual_profile();
    profile.physical.board.ui_task_frequency_hz = 5000;
    profile.physical.drives[0].timing.tim_clock_divider = 8;
    profile.physical.drives[1].electrical.vbus_partitioning_factor = 0.0;
    profile.physical.drives[1].mechanical.min_application_speed_rpm = 6000;

    let err = derive(&profile.physical).unwrap_err();
    let fields: Vec<&str> = err.issues().iter().map(ConfigIssue::field).collect();
    assert_eq!(
        fields,
        [
            "board.ui_task_frequency_hz",
            "drives[0].timing.tim_clock_divider",
            "drives[1].electrical.vbus_partitioning_factor",
            "drives[1].mechanical.min_application_speed_rpm",
        ]
    );

    let message = err.to_string();
    assert!(message.starts_with("invalid configuration (4 issue(s)):"));
    assert!(message.contains("5000 Hz exceeds the 2000 Hz system tick"));
}

#[test]
fn saturated_dead_time_is_not_an_error() {
    let mut profile = dual_profile();
    // 170 * 4 * 20000 / 1000 = 13600 clocks, far beyond the last band.
    profile.physical.drives[1].timing.tim_clock_divider = 4;
    profile.physical.drives[1].power_stage.deadtime_ns = 20_000;

    let derived = derive(&profile.physical).unwrap();
    assert_eq!(derived.drives[1].pwm.dead_time.value, 510);
}

#[test]
fn window_underflow_is_rejected() {
    let mut profile = dual_profile();
    profile.physical.drives[0].power_stage.deadtime_ns = 0;
    profile.physical.drives[0].power_stage.max_tntr_ns = 0;

    let err = derive(&profile.physical).unwrap_err();
    assert!(matches!(
        err.issues(),
        [ConfigIssue::WindowUnderflow { tw_after: 0, sampling_time: 26, .. }]
    ));
}

#[test]
fn out_of_range_registers_are_rejected_not_clamped() {
    let mut profile = dual_profile();
    profile.physical.drives[0].timing.pwm_frequency_hz = 1000;
    profile.physical.drives[0].protection.ov_voltage_threshold_v = 80.0;
    profile.physical.drives[1].electrical.rshunt_ohm = 1.0;
    profile.physical.drives[1].electrical.amplification_gain = 10.0;

    let err = derive(&profile.physical).unwrap_err();
    let fields: Vec<&str> = err.issues().iter().map(ConfigIssue::field).collect();
    assert_eq!(
        fields,
        [
            "drives[0].timing.pwm_frequency_hz",
            "drives[0].protection.ov_voltage_threshold_v",
            "drives[1].electrical.rshunt_ohm",
        ]
    );
    assert!(
        err.issues()
            .iter()
            .all(|issue| matches!(issue, ConfigIssue::RegisterOverflow { .. }))
    );
}
