//! Derived-constants record.
//!
//! Computed once from a [`PhysicalConfig`](crate::drive::config::PhysicalConfig)
//! and read-only afterwards. Every integer field holds the exact value a
//! peripheral register or fixed-point routine expects.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_DRIVES;
use crate::drive::flags::{InterfaceOptions, UiConfig};

/// Output record of the derivation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConstants {
    /// Constants shared by every channel.
    pub board: BoardConstants,
    /// Per-channel constants, in the same order as the input drives.
    pub drives: Vec<DriveConstants, MAX_DRIVES>,
}

impl DerivedConstants {
    /// Constants of channel `index` (0-based).
    pub fn drive(&self, index: usize) -> Option<&DriveConstants> {
        self.drives.get(index)
    }
}

/// Board-wide derived constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConstants {
    /// `65536 / pwm_freq_scaling`.
    pub dpp_conv_factor: u32,
    /// `round(65536 / V_ref)`, digits per volt at the ADC input.
    pub internal_supply_voltage: u16,
    /// System ticks between two UI task runs, minus one.
    pub ui_task_occurrence_ticks: u32,
    /// System ticks between two serial timeout checks, minus one.
    pub serialcom_timeout_occurrence_ticks: u32,
    /// Answer-to-reset time in system ticks, minus one.
    pub serialcom_atr_time_ticks: u16,
}

/// Derived constants of one motor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveConstants {
    /// Channel label copied from the input.
    pub name: String,
    pub loop_timing: LoopTiming,
    pub scaling: CurrentScaling,
    pub thresholds: ProtectionThresholds,
    pub mechanical: MechanicalConstants,
    pub pwm: PwmTiming,
    pub adc: AdcWindow,
    pub ui: UiFlags,
}

/// Control-loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopTiming {
    /// Regulation loop frequency [Hz].
    pub regulation_rate: u32,
    /// Regulation loop frequency divided by the PWM frequency scaling.
    pub regulation_rate_scaled: u16,
    /// Timer repetition counter register value.
    pub repetition_counter: u16,
    /// Medium-frequency (speed loop) task rate [Hz].
    pub medium_frequency_task_rate: u16,
    /// System ticks between two medium-frequency task runs, minus one.
    pub mf_task_occurrence_ticks: u32,
}

/// Current and power scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentScaling {
    /// Digits per ampere.
    pub current_conv_factor: u16,
    /// Amperes per digit.
    pub current_conv_factor_inv: f64,
    /// Watts per unit of a digital `q·d` product.
    pub pqd_conversion_factor: f64,
    /// Largest measurable phase current [A].
    pub max_readable_current_a: f64,
    /// Default torque-current reference [digits].
    pub default_torque_component: i16,
    /// Default flux-current reference [digits].
    pub default_flux_component: i16,
}

/// Protection thresholds in ADC digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionThresholds {
    pub overvoltage_threshold_d: u16,
    pub undervoltage_threshold_d: u16,
    pub ov_temperature_threshold_d: u16,
    pub ov_temperature_hysteresis_d: u16,
}

/// Speed-unit and position constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanicalConstants {
    /// Maximum application speed [internal speed unit].
    pub max_application_speed_unit: i32,
    /// Minimum application speed [internal speed unit].
    pub min_application_speed_unit: i32,
    /// Maximum slip of the V/f speed regulator [rad/s].
    pub pi_vf_speed_output_limit: f64,
    /// Alignment angle as a signed 16-bit electrical angle.
    pub alignment_angle_s16: i16,
    /// Encoder timer auto-reload value (`4 * PPR - 1`).
    pub encoder_pulse_nbr: u32,
}

/// Dead-time generator resolution band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadTimeBand {
    /// One count per timer clock.
    Direct,
    /// Two clocks per count, offset 128.
    Half,
    /// Eight clocks per count, offset 320.
    Eighth,
    /// Sixteen clocks per count, offset 384.
    Sixteenth,
    /// Beyond the longest representable dead time.
    Saturated,
}

/// Encoded dead-time register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeadTimeCode {
    pub band: DeadTimeBand,
    pub value: u16,
}

/// PWM timer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwmTiming {
    /// Timer counts per PWM period.
    pub pwm_period_cycles: u16,
    /// Dead time in dead-time-generator clocks, before encoding.
    pub dead_time_counts_raw: u32,
    /// Dead-time register value.
    pub dead_time: DeadTimeCode,
    /// Dead-time compensation count (half-period units).
    pub dtcompcnt: u16,
    /// Turn-on compensation count (half-period units).
    pub ton: u16,
    /// Turn-off compensation count (half-period units).
    pub toff: u16,
    /// Current rise time in timer counts.
    pub trise: u16,
    /// Dead time in timer counts.
    pub tdead: u16,
    /// Noise settle time in timer counts.
    pub tnoise: u16,
}

/// ADC sampling window in timer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcWindow {
    pub sampling_time: u16,
    /// Wait before the trigger, single sampling.
    pub tw_before: u16,
    /// Wait before the trigger, dual sampling (three-shunt, one ADC).
    pub tw_before_r3_1: u16,
    pub tw_after: u16,
    pub max_twait: u16,
}

/// UI configuration words, stored as register bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    pub ui_config: u32,
    pub interface_options: u8,
}

impl UiFlags {
    /// Typed view of the UI configuration word.
    pub fn ui_config(&self) -> UiConfig {
        UiConfig::from_bits_retain(self.ui_config)
    }

    /// Typed view of the interface options.
    pub fn interface_options(&self) -> InterfaceOptions {
        InterfaceOptions::from_bits_retain(self.interface_options)
    }
}
