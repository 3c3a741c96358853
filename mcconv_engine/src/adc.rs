//! ADC sampling window around the PWM trigger, in timer counts.
//!
//! Sampling cycles carry a fixed half-cycle correction before any
//! conversion. Products are truncated before the division by the ADC clock.

use mcconv_common::consts::SAMPLING_CYCLE_CORRECTION;
use mcconv_common::drive::config::{PowerStageConfig, TimingConfig};
use mcconv_common::drive::constants::AdcWindow;
use tracing::debug;

use crate::fixed::{narrow_u16, saturate_u16};

/// Sampling cycles including the half-cycle correction.
#[inline]
pub fn effective_sampling_cycles(sampling_cycles: f64) -> f64 {
    sampling_cycles + SAMPLING_CYCLE_CORRECTION
}

/// ADC cycles expressed in timer counts: `trunc(cycles * clk) / adc_clk`.
fn adc_cycles_to_counts(cycles: f64, adv_tim_clk_mhz: u32, adc_clk_mhz: f64) -> f64 {
    (cycles * f64::from(adv_tim_clk_mhz)).trunc() / adc_clk_mhz
}

/// Sampling time in timer counts.
pub fn sampling_time(power_stage: &PowerStageConfig, adv_tim_clk_mhz: u32) -> u16 {
    saturate_u16(
        "sampling_time",
        adc_cycles_to_counts(
            effective_sampling_cycles(power_stage.adc_sampling_cycles),
            adv_tim_clk_mhz,
            power_stage.adc_clk_mhz,
        ),
    )
}

/// Wait before trigger for single-sample acquisition.
pub fn tw_before(power_stage: &PowerStageConfig, adv_tim_clk_mhz: u32) -> u16 {
    let cycles = power_stage.adc_trig_conv_latency_cycles
        + effective_sampling_cycles(power_stage.adc_sampling_cycles);
    saturate_u16(
        "tw_before",
        adc_cycles_to_counts(cycles, adv_tim_clk_mhz, power_stage.adc_clk_mhz) + 1.0,
    )
}

/// Wait before trigger when one ADC samples two phases back to back:
/// the sampling term doubles and one SAR conversion is added.
pub fn tw_before_r3_1(power_stage: &PowerStageConfig, adv_tim_clk_mhz: u32) -> u16 {
    let cycles = power_stage.adc_trig_conv_latency_cycles
        + 2.0 * effective_sampling_cycles(power_stage.adc_sampling_cycles)
        + power_stage.adc_sar_cycles;
    saturate_u16(
        "tw_before_r3_1",
        adc_cycles_to_counts(cycles, adv_tim_clk_mhz, power_stage.adc_clk_mhz) + 1.0,
    )
}

/// Wait after trigger: `(deadtime + max_tntr) * clk / 1000`.
pub fn tw_after(power_stage: &PowerStageConfig, adv_tim_clk_mhz: u32) -> u16 {
    narrow_u16(
        "tw_after",
        (u64::from(power_stage.deadtime_ns) + u64::from(power_stage.max_tntr_ns))
            * u64::from(adv_tim_clk_mhz)
            / 1000,
    )
}

/// Largest admissible wait: `(tw_after - sampling_time) / 2`.
///
/// Validation rejects `tw_after < sampling_time`; unvalidated input clamps
/// to zero.
#[inline]
pub fn max_twait(tw_after: u16, sampling_time: u16) -> u16 {
    // Works on the truncated sampling time, so a fractional window gains a count.
    tw_after.saturating_sub(sampling_time) / 2
}

/// Per-drive ADC window.
pub fn derive_adc_window(timing: &TimingConfig, power_stage: &PowerStageConfig) -> AdcWindow {
    let clk = timing.adv_tim_clk_mhz;
    let sampling = sampling_time(power_stage, clk);
    let after = tw_after(power_stage, clk);
    let window = AdcWindow {
        sampling_time: sampling,
        tw_before: tw_before(power_stage, clk),
        tw_before_r3_1: tw_before_r3_1(power_stage, clk),
        tw_after: after,
        max_twait: max_twait(after, sampling),
    };
    debug!("adc window: {:?}", window);
    window
}
