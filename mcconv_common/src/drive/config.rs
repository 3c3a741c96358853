//! Physical configuration record.
//!
//! Authored once per hardware/motor variant and frozen afterwards. Values
//! are in physical units (volts, ohms, hertz, nanoseconds, degrees);
//! the engine turns them into register units.
//!
//! Optional fields use `#[serde(default)]` backed by `crate::consts`.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ADC_SAR_CYCLES, DEFAULT_ADC_TRIG_CONV_LATENCY_CYCLES, DEFAULT_PWM_FREQ_SCALING,
    DEFAULT_REGULATION_EXECUTION_RATE, DEFAULT_SERIAL_COM_ATR_TIME_MS,
    DEFAULT_SERIAL_COM_TIMEOUT_INVERSE_HZ, DEFAULT_SYS_TICK_FREQUENCY_HZ,
    DEFAULT_TIM_CLOCK_DIVIDER, DEFAULT_TOFF_NS, DEFAULT_TON_NS, DEFAULT_UI_TASK_FREQUENCY_HZ,
    MAX_DRIVES,
};
use crate::drive::flags::SensorCode;

fn default_sys_tick() -> u32 {
    DEFAULT_SYS_TICK_FREQUENCY_HZ
}
fn default_ui_task() -> u32 {
    DEFAULT_UI_TASK_FREQUENCY_HZ
}
fn default_serial_timeout_inverse() -> u32 {
    DEFAULT_SERIAL_COM_TIMEOUT_INVERSE_HZ
}
fn default_serial_atr_time() -> u32 {
    DEFAULT_SERIAL_COM_ATR_TIME_MS
}
fn default_pwm_freq_scaling() -> u32 {
    DEFAULT_PWM_FREQ_SCALING
}
fn default_tim_clock_divider() -> u32 {
    DEFAULT_TIM_CLOCK_DIVIDER
}
fn default_regulation_rate() -> u32 {
    DEFAULT_REGULATION_EXECUTION_RATE
}
fn default_ton() -> u32 {
    DEFAULT_TON_NS
}
fn default_toff() -> u32 {
    DEFAULT_TOFF_NS
}
fn default_trig_latency() -> f64 {
    DEFAULT_ADC_TRIG_CONV_LATENCY_CYCLES
}
fn default_sar_cycles() -> f64 {
    DEFAULT_ADC_SAR_CYCLES
}
fn default_true() -> bool {
    true
}

// ─── Top-Level Record ───────────────────────────────────────────────

/// Input record of the derivation engine.
///
/// Board-wide values live in [`BoardConfig`]; everything a motor channel
/// owns lives in its [`DriveConfig`]. A channel's constants are derived
/// from the board section and its own `DriveConfig` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConfig {
    /// Board-wide values shared by every channel.
    pub board: BoardConfig,
    /// Per-channel configurations, in channel order (M1, M2).
    pub drives: Vec<DriveConfig, MAX_DRIVES>,
}

/// Board-wide physical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// ADC reference voltage [V].
    pub adc_reference_voltage: f64,

    /// System tick frequency [Hz] (default: 2000).
    #[serde(default = "default_sys_tick")]
    pub sys_tick_frequency_hz: u32,

    /// UI task frequency [Hz] (default: 10).
    #[serde(default = "default_ui_task")]
    pub ui_task_frequency_hz: u32,

    /// Inverse of the serial communication timeout [Hz] (default: 25).
    #[serde(default = "default_serial_timeout_inverse")]
    pub serial_com_timeout_inverse_hz: u32,

    /// Serial communication answer-to-reset time [ms] (default: 20).
    #[serde(default = "default_serial_atr_time")]
    pub serial_com_atr_time_ms: u32,

    /// Down-scale factor applied to the PWM frequency for the scaled
    /// regulation rate (default: 1).
    #[serde(default = "default_pwm_freq_scaling")]
    pub pwm_freq_scaling: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            adc_reference_voltage: 3.3,
            sys_tick_frequency_hz: DEFAULT_SYS_TICK_FREQUENCY_HZ,
            ui_task_frequency_hz: DEFAULT_UI_TASK_FREQUENCY_HZ,
            serial_com_timeout_inverse_hz: DEFAULT_SERIAL_COM_TIMEOUT_INVERSE_HZ,
            serial_com_atr_time_ms: DEFAULT_SERIAL_COM_ATR_TIME_MS,
            pwm_freq_scaling: DEFAULT_PWM_FREQ_SCALING,
        }
    }
}

// ─── Drive Channel ──────────────────────────────────────────────────

/// Physical description of one motor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Channel label used in logs and rendered headers (e.g. "M1").
    #[serde(default)]
    pub name: String,
    /// Current and bus-voltage sensing.
    pub electrical: ElectricalConfig,
    /// PWM and control-loop timing.
    pub timing: TimingConfig,
    /// Protection thresholds.
    pub protection: ProtectionConfig,
    /// Motor and encoder.
    pub mechanical: MechanicalConfig,
    /// Power-stage switching and ADC sampling timing.
    pub power_stage: PowerStageConfig,
    /// Optional features reported in the UI configuration word.
    #[serde(default)]
    pub features: FeatureConfig,
}

/// Current-sense and bus-voltage sensing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricalConfig {
    /// Shunt resistance [Ω].
    pub rshunt_ohm: f64,
    /// Current-sense amplifier gain.
    pub amplification_gain: f64,
    /// Bus-voltage divider ratio (ADC volts per bus volt).
    pub vbus_partitioning_factor: f64,
    /// Default torque-current reference [A].
    #[serde(default)]
    pub default_torque_component_a: f64,
    /// Default flux-current reference [A].
    #[serde(default)]
    pub default_flux_component_a: f64,
}

/// PWM and control-loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// PWM switching frequency [Hz].
    pub pwm_frequency_hz: u32,
    /// Advanced-control timer clock [MHz].
    pub adv_tim_clk_mhz: u32,
    /// Dead-time generator clock divider: 1, 2 or 4 (default: 1).
    #[serde(default = "default_tim_clock_divider")]
    pub tim_clock_divider: u32,
    /// Control-loop executions per PWM period (default: 1).
    #[serde(default = "default_regulation_rate")]
    pub regulation_execution_rate: u32,
    /// Speed loop (medium-frequency task) frequency [Hz].
    pub speed_loop_frequency_hz: u32,
}

/// Protection thresholds in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectionConfig {
    /// Bus over-voltage threshold [V].
    pub ov_voltage_threshold_v: f64,
    /// Bus under-voltage threshold [V].
    pub ud_voltage_threshold_v: f64,
    /// Heat-sink over-temperature threshold [°C].
    pub ov_temperature_threshold_c: f64,
    /// Over-temperature hysteresis band [°C].
    pub ov_temperature_hysteresis_c: f64,
    /// Temperature sensor slope [V/°C].
    pub dv_dt: f64,
    /// Sensor reference temperature [°C].
    pub t0_c: f64,
    /// Sensor output at the reference temperature [V].
    pub v0_v: f64,
}

/// Internal speed unit, expressed as units per hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// 1 Hz.
    Hz,
    /// 0.1 Hz.
    #[default]
    DeciHz,
    /// 0.01 Hz.
    CentiHz,
}

impl SpeedUnit {
    /// Internal units per mechanical hertz.
    pub const fn per_hz(&self) -> i64 {
        match self {
            Self::Hz => 1,
            Self::DeciHz => 10,
            Self::CentiHz => 100,
        }
    }
}

/// Motor, encoder and application speed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanicalConfig {
    /// Encoder pulses per mechanical revolution.
    pub encoder_ppr: u32,
    /// Nominal electrical frequency of the motor [Hz].
    pub nominal_freq_hz: f64,
    /// Rotor alignment angle [deg].
    pub alignment_angle_deg: f64,
    /// Minimum application speed [RPM].
    pub min_application_speed_rpm: i32,
    /// Maximum application speed [RPM].
    pub max_application_speed_rpm: i32,
    /// Internal speed unit (default: 0.1 Hz).
    #[serde(default)]
    pub speed_unit: SpeedUnit,
}

/// Power-stage switching times and ADC sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerStageConfig {
    /// Software dead time [ns].
    pub deadtime_ns: u32,
    /// Current rise time after a switching edge [ns].
    pub trise_ns: u32,
    /// Ringing / noise settle time [ns].
    pub tnoise_ns: u32,
    /// Transistor turn-on time for duty compensation [ns] (default: 500).
    #[serde(default = "default_ton")]
    pub ton_ns: u32,
    /// Transistor turn-off time for duty compensation [ns] (default: 500).
    #[serde(default = "default_toff")]
    pub toff_ns: u32,
    /// Maximum transistor turn-on/off time [ns].
    pub max_tntr_ns: u32,
    /// Selected ADC sampling time [ADC cycles], before the half-cycle
    /// correction.
    pub adc_sampling_cycles: f64,
    /// ADC trigger-to-conversion latency [ADC cycles] (default: 3).
    #[serde(default = "default_trig_latency")]
    pub adc_trig_conv_latency_cycles: f64,
    /// ADC successive-approximation time [ADC cycles] (default: 12.5).
    #[serde(default = "default_sar_cycles")]
    pub adc_sar_cycles: f64,
    /// ADC clock [MHz].
    pub adc_clk_mhz: f64,
}

/// Optional features reported in the UI configuration word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Flux weakening.
    #[serde(default)]
    pub field_weakening: bool,
    /// Differential term in the current regulators.
    #[serde(default)]
    pub diff_term: bool,
    /// DAC debug output (UI option and interface option).
    #[serde(default = "default_true")]
    pub dac: bool,
    /// Serial communication interface.
    #[serde(default = "default_true")]
    pub com: bool,
    /// Id reference settable in speed mode.
    #[serde(default = "default_true")]
    pub set_id_in_speed_mode: bool,
    /// PLL observer tuning.
    #[serde(default = "default_true")]
    pub pll_tuning: bool,
    /// Power-factor correction stage.
    #[serde(default)]
    pub pfc: bool,
    /// Main speed/position sensor (default: encoder).
    #[serde(default)]
    pub main_sensor: SensorCode,
    /// Auxiliary sensor, if any.
    #[serde(default)]
    pub aux_sensor: Option<SensorCode>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            field_weakening: false,
            diff_term: false,
            dac: true,
            com: true,
            set_id_in_speed_mode: true,
            pll_tuning: true,
            pfc: false,
            main_sensor: SensorCode::default(),
            aux_sensor: None,
        }
    }
}
