//! Current, supply-voltage and power scaling factors.
//!
//! `current_conv_factor` maps amperes to 16-bit digits over the full ADC
//! range; its inverse is kept as a separate real constant so the control
//! loop never divides at runtime.

use mcconv_common::consts::{FIXED_POINT_FULL_SCALE, SQRT_3};
use mcconv_common::drive::config::{BoardConfig, ElectricalConfig};
use mcconv_common::drive::constants::CurrentScaling;

use crate::fixed::{round_half_up, saturate_i16, saturate_u16};

const FULL_SCALE: f64 = FIXED_POINT_FULL_SCALE as f64;

/// Digits per ampere before rounding: `65536 * R * G / V_ref`.
#[inline]
pub fn current_conv_factor_real(rshunt_ohm: f64, gain: f64, vref: f64) -> f64 {
    FULL_SCALE * rshunt_ohm * gain / vref
}

/// Digits per ampere, rounded half up.
pub fn current_conv_factor(rshunt_ohm: f64, gain: f64, vref: f64) -> u16 {
    saturate_u16(
        "current_conv_factor",
        round_half_up(current_conv_factor_real(rshunt_ohm, gain, vref)),
    )
}

/// Amperes per digit: reciprocal of the unrounded conversion factor.
#[inline]
pub fn current_conv_factor_inv(rshunt_ohm: f64, gain: f64, vref: f64) -> f64 {
    1.0 / current_conv_factor_real(rshunt_ohm, gain, vref)
}

/// Digits per volt at the ADC input: `round(65536 / V_ref)`.
pub fn internal_supply_voltage(vref: f64) -> u16 {
    saturate_u16("internal_supply_voltage", round_half_up(FULL_SCALE / vref))
}

/// Watts per unit of a digital `q·d` product:
/// `(√3 * V_ref) / (R * G) / 65536`.
#[inline]
pub fn pqd_conversion_factor(rshunt_ohm: f64, gain: f64, vref: f64) -> f64 {
    ((SQRT_3 * vref) / (rshunt_ohm * gain)) / FULL_SCALE
}

/// Largest measurable phase current: `V_ref / (2 * R * G)` [A].
#[inline]
pub fn max_readable_current(rshunt_ohm: f64, gain: f64, vref: f64) -> f64 {
    vref / (2.0 * rshunt_ohm * gain)
}

/// Current reference in digits, using the rounded conversion factor.
pub fn amps_to_digits(name: &str, amps: f64, current_conv_factor: u16) -> i16 {
    saturate_i16(name, amps * f64::from(current_conv_factor))
}

/// Per-drive current scaling.
pub fn derive_scaling(board: &BoardConfig, electrical: &ElectricalConfig) -> CurrentScaling {
    let vref = board.adc_reference_voltage;
    let r = electrical.rshunt_ohm;
    let g = electrical.amplification_gain;
    let factor = current_conv_factor(r, g, vref);

    CurrentScaling {
        current_conv_factor: factor,
        current_conv_factor_inv: current_conv_factor_inv(r, g, vref),
        pqd_conversion_factor: pqd_conversion_factor(r, g, vref),
        max_readable_current_a: max_readable_current(r, g, vref),
        default_torque_component: amps_to_digits(
            "default_torque_component",
            electrical.default_torque_component_a,
            factor,
        ),
        default_flux_component: amps_to_digits(
            "default_flux_component",
            electrical.default_flux_component_a,
            factor,
        ),
    }
}
