//! Speed-unit and position constants.

use std::f64::consts::PI;

use mcconv_common::consts::{FIXED_POINT_FULL_SCALE, U_RPM, VF_MAX_SLIP_RATIO};
use mcconv_common::drive::config::{MechanicalConfig, SpeedUnit};
use mcconv_common::drive::constants::MechanicalConstants;

use crate::fixed::{narrow_i32, narrow_u32};

/// `rpm * unit / 60`, truncated toward zero.
pub fn rpm_to_speed_unit(name: &str, rpm: i32, unit: SpeedUnit) -> i32 {
    narrow_i32(name, i64::from(rpm) * unit.per_hz() / U_RPM)
}

/// Electrical angle in the signed 16-bit format (`65536` counts per turn).
///
/// The angle domain is circular: 180° and -180° both map to `i16::MIN`,
/// and whole turns are removed.
pub fn alignment_angle_s16(degrees: f64) -> i16 {
    let counts = (degrees * f64::from(FIXED_POINT_FULL_SCALE) / 360.0).trunc() as i64;
    counts.rem_euclid(i64::from(FIXED_POINT_FULL_SCALE)) as u16 as i16
}

/// Encoder timer auto-reload: `4 * PPR - 1` (quadrature counts per turn).
pub fn encoder_pulse_nbr(encoder_ppr: u32) -> u32 {
    narrow_u32(
        "encoder_pulse_nbr",
        (u64::from(encoder_ppr) * 4).saturating_sub(1),
    )
}

/// V/f speed regulator output limit: maximum slip in rad/s.
#[inline]
pub fn pi_vf_speed_output_limit(nominal_freq_hz: f64) -> f64 {
    VF_MAX_SLIP_RATIO * nominal_freq_hz * 2.0 * PI
}

/// Per-drive speed and position constants.
pub fn derive_mechanical(mechanical: &MechanicalConfig) -> MechanicalConstants {
    MechanicalConstants {
        max_application_speed_unit: rpm_to_speed_unit(
            "max_application_speed_unit",
            mechanical.max_application_speed_rpm,
            mechanical.speed_unit,
        ),
        min_application_speed_unit: rpm_to_speed_unit(
            "min_application_speed_unit",
            mechanical.min_application_speed_rpm,
            mechanical.speed_unit,
        ),
        pi_vf_speed_output_limit: pi_vf_speed_output_limit(mechanical.nominal_freq_hz),
        alignment_angle_s16: alignment_angle_s16(mechanical.alignment_angle_deg),
        encoder_pulse_nbr: encoder_pulse_nbr(mechanical.encoder_ppr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpm_conversion_truncates() {
        assert_eq!(rpm_to_speed_unit("max", 3000, SpeedUnit::DeciHz), 500);
        assert_eq!(rpm_to_speed_unit("max", 3000, SpeedUnit::Hz), 50);
        assert_eq!(rpm_to_speed_unit("max", 3000, SpeedUnit::CentiHz), 5000);
        assert_eq!(rpm_to_speed_unit("min", 100, SpeedUnit::Hz), 1);
        assert_eq!(rpm_to_speed_unit("min", -100, SpeedUnit::Hz), -1);
    }

    #[test]
    fn alignment_angle() {
        assert_eq!(alignment_angle_s16(0.0), 0);
        assert_eq!(alignment_angle_s16(90.0), 16384);
        assert_eq!(alignment_angle_s16(-90.0), -16384);
        assert_eq!(alignment_angle_s16(180.0), i16::MIN);
        assert_eq!(alignment_angle_s16(270.0), -16384);
        assert_eq!(alignment_angle_s16(450.0), 16384);
    }

    #[test]
    fn encoder_reload() {
        assert_eq!(encoder_pulse_nbr(1024), 4095);
        assert_eq!(encoder_pulse_nbr(1), 3);
        assert_eq!(encoder_pulse_nbr(0), 0);
    }

    #[test]
    fn vf_slip_limit_is_ten_percent_of_nominal() {
        assert!((pi_vf_speed_output_limit(50.0) - 31.415_926_535_897_93).abs() < 1e-9);
    }
}
