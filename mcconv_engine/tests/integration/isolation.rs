//! Integration test: two drive channels are derived independently.

use mcconv_common::drive::flags::SensorCode;
use mcconv_engine::derive;

use super::{dual_profile, reference_profile};

#[test]
fn first_channel_matches_single_drive_profile() {
    let single = derive(&reference_profile().physical).unwrap();
    let dual = derive(&dual_profile().physical).unwrap();
    assert_eq!(dual.drives.len(), 2);

    let (a, b) = (&single.drives[0], &dual.drives[0]);
    assert_eq!(a.loop_timing, b.loop_timing);
    assert_eq!(a.scaling, b.scaling);
    assert_eq!(a.thresholds, b.thresholds);
    assert_eq!(a.pwm, b.pwm);
    assert_eq!(a.adc, b.adc);
}

#[test]
fn second_channel_uses_its_own_values() {
    let dual = derive(&dual_profile().physical).unwrap();
    let m2 = dual.drive(1).unwrap();

    assert_eq!(m2.name, "M2");
    assert_eq!(m2.loop_timing.regulation_rate, 20000);
    assert_eq!(m2.pwm.pwm_period_cycles, 8500);
    assert_eq!(m2.scaling.current_conv_factor, 1986);
    assert_eq!(m2.pwm.dead_time_counts_raw, 340);
    assert_eq!(m2.pwm.dead_time.value, 298);
    // (2000 + 1000) * 170 / 1000
    assert_eq!(m2.adc.tw_after, 510);
    assert_eq!(m2.ui.ui_config().main_sensor(), Some(SensorCode::StoPll));
    assert_eq!(m2.ui.ui_config().aux_sensor(), Some(SensorCode::Encoder));
}

#[test]
fn changing_one_channel_leaves_the_other_alone() {
    let mut profile = dual_profile();
    let before = derive(&profile.physical).unwrap();

    profile.physical.drives[1].timing.pwm_frequency_hz = 10000;
    profile.physical.drives[1].power_stage.deadtime_ns = 5000;
    let after = derive(&profile.physical).unwrap();

    assert_eq!(before.drives[0], after.drives[0]);
    assert_ne!(before.drives[1], after.drives[1]);
}
