//! Protection thresholds in ADC digits.
//!
//! Bus-voltage thresholds scale the physical threshold by the divider ratio
//! over the full 16-bit range. Temperature thresholds go through the linear
//! sensor model: ΔT → ΔV → digits. Hysteresis is a band width, so it uses
//! the sensor slope without the reference point.

use mcconv_common::consts::ADC_FULL_SCALE;
use mcconv_common::drive::config::{BoardConfig, ElectricalConfig, ProtectionConfig};
use mcconv_common::drive::constants::ProtectionThresholds;

use crate::fixed::saturate_u16;
use crate::scaling::internal_supply_voltage;

/// `V_threshold * 65535 / (V_ref / partitioning)`, before truncation.
#[inline]
pub fn voltage_threshold_real(threshold_v: f64, vref: f64, partitioning_factor: f64) -> f64 {
    threshold_v * f64::from(ADC_FULL_SCALE) / (vref / partitioning_factor)
}

/// Bus-voltage threshold in digits, truncated.
pub fn voltage_threshold(name: &str, threshold_v: f64, vref: f64, partitioning_factor: f64) -> u16 {
    saturate_u16(
        name,
        voltage_threshold_real(threshold_v, vref, partitioning_factor),
    )
}

/// `(V0 + dV/dT * (T - T0)) * isv`, before truncation.
#[inline]
pub fn temperature_threshold_real(protection: &ProtectionConfig, internal_supply_voltage: u16) -> f64 {
    let delta_t = protection.ov_temperature_threshold_c - protection.t0_c;
    let delta_v = protection.dv_dt * delta_t;
    (protection.v0_v + delta_v) * f64::from(internal_supply_voltage)
}

/// `dV/dT * hysteresis * isv`, before truncation.
#[inline]
pub fn temperature_hysteresis_real(
    protection: &ProtectionConfig,
    internal_supply_voltage: u16,
) -> f64 {
    let delta_v = protection.dv_dt * protection.ov_temperature_hysteresis_c;
    delta_v * f64::from(internal_supply_voltage)
}

/// Per-drive protection thresholds.
pub fn derive_thresholds(
    board: &BoardConfig,
    electrical: &ElectricalConfig,
    protection: &ProtectionConfig,
) -> ProtectionThresholds {
    let vref = board.adc_reference_voltage;
    let partitioning = electrical.vbus_partitioning_factor;
    let isv = internal_supply_voltage(vref);

    ProtectionThresholds {
        overvoltage_threshold_d: voltage_threshold(
            "overvoltage_threshold_d",
            protection.ov_voltage_threshold_v,
            vref,
            partitioning,
        ),
        undervoltage_threshold_d: voltage_threshold(
            "undervoltage_threshold_d",
            protection.ud_voltage_threshold_v,
            vref,
            partitioning,
        ),
        ov_temperature_threshold_d: saturate_u16(
            "ov_temperature_threshold_d",
            temperature_threshold_real(protection, isv),
        ),
        ov_temperature_hysteresis_d: saturate_u16(
            "ov_temperature_hysteresis_d",
            temperature_hysteresis_real(protection, isv),
        ),
    }
}
