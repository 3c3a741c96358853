//! Numeric constants shared by the record types and the derivation engine.
//!
//! Single source of truth for fixed-point full scales, default values used
//! by `#[serde(default = ...)]` and validation bounds.

use static_assertions::const_assert;

/// Maximum number of independent drive channels a profile may describe.
pub const MAX_DRIVES: usize = 2;

/// Fixed-point full scale of a 16-bit angle / current representation.
pub const FIXED_POINT_FULL_SCALE: u32 = 65536;

/// Maximum code of a left-aligned 16-bit ADC conversion.
pub const ADC_FULL_SCALE: u32 = 65535;

/// Value of √3 used by the power/torque conversion factor.
pub const SQRT_3: f64 = 1.732;

/// Half ADC cycle added to every configured sampling-cycle count.
pub const SAMPLING_CYCLE_CORRECTION: f64 = 0.5;

/// Revolutions-per-minute denominator of the internal speed unit.
pub const U_RPM: i64 = 60;

/// Slip limit of the V/f speed regulator as a fraction of nominal speed.
pub const VF_MAX_SLIP_RATIO: f64 = 0.10;

/// Timer clock dividers the dead-time generator supports.
pub const TIM_CLOCK_DIVIDERS: [u32; 3] = [1, 2, 4];

/// Default profile path used by the CLI.
pub const DEFAULT_PROFILE_PATH: &str = "config/profile.toml";

// ─── Board defaults ─────────────────────────────────────────────────

/// System tick frequency [Hz].
pub const DEFAULT_SYS_TICK_FREQUENCY_HZ: u32 = 2000;

/// UI task frequency [Hz].
pub const DEFAULT_UI_TASK_FREQUENCY_HZ: u32 = 10;

/// Inverse of the serial communication timeout [Hz] (25 → 40 ms).
pub const DEFAULT_SERIAL_COM_TIMEOUT_INVERSE_HZ: u32 = 25;

/// Serial communication answer-to-reset time [ms].
pub const DEFAULT_SERIAL_COM_ATR_TIME_MS: u32 = 20;

/// PWM frequency down-scale factor for the scaled regulation rate.
pub const DEFAULT_PWM_FREQ_SCALING: u32 = 1;

// ─── Drive defaults ─────────────────────────────────────────────────

/// Timer clock divider applied to the dead-time generator clock.
pub const DEFAULT_TIM_CLOCK_DIVIDER: u32 = 1;

/// Regulation execution rate (control-loop executions per PWM period).
pub const DEFAULT_REGULATION_EXECUTION_RATE: u32 = 1;

/// Transistor turn-on time used for duty compensation [ns].
pub const DEFAULT_TON_NS: u32 = 500;

/// Transistor turn-off time used for duty compensation [ns].
pub const DEFAULT_TOFF_NS: u32 = 500;

/// ADC trigger-to-conversion latency [ADC cycles].
pub const DEFAULT_ADC_TRIG_CONV_LATENCY_CYCLES: f64 = 3.0;

/// ADC successive-approximation conversion time [ADC cycles].
pub const DEFAULT_ADC_SAR_CYCLES: f64 = 12.5;

// ─── Bounds ─────────────────────────────────────────────────────────

/// Upper bound for the ADC reference voltage [V].
pub const ADC_REFERENCE_VOLTAGE_MAX: f64 = 5.5;

/// Upper bound for any configured dead / rise / noise time [ns].
pub const SWITCHING_TIME_NS_MAX: u32 = 100_000;

/// Upper bound for any configured ADC cycle count.
pub const ADC_CYCLES_MAX: f64 = 1000.0;

const_assert!(MAX_DRIVES >= 1);
const_assert!(ADC_FULL_SCALE == FIXED_POINT_FULL_SCALE - 1);
