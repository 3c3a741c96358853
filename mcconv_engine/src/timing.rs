//! Control-loop timing: regulation rate, timer repetition counter and the
//! system-tick occurrence counters of the periodic tasks.
//!
//! All divisions truncate. Preconditions (non-zero rates, task frequency not
//! above the tick frequency) are enforced by [`crate::validate`]; the
//! formulas here saturate instead of panicking when called without it.

use mcconv_common::consts::FIXED_POINT_FULL_SCALE;
use mcconv_common::drive::config::{BoardConfig, TimingConfig};
use mcconv_common::drive::constants::{BoardConstants, LoopTiming};
use tracing::debug;

use crate::fixed::{div_or_max, narrow_u16, narrow_u32};
use crate::scaling::internal_supply_voltage;

/// Regulation loop frequency: `f_pwm / r` [Hz].
#[inline]
pub fn regulation_rate(pwm_frequency_hz: u32, regulation_execution_rate: u32) -> u32 {
    narrow_u32(
        "regulation_rate",
        div_or_max(
            u64::from(pwm_frequency_hz),
            u64::from(regulation_execution_rate),
        ),
    )
}

/// Regulation rate divided by the PWM frequency scaling: `f_pwm / (r * s)`.
#[inline]
pub fn regulation_rate_scaled(
    pwm_frequency_hz: u32,
    regulation_execution_rate: u32,
    pwm_freq_scaling: u32,
) -> u16 {
    narrow_u16(
        "regulation_rate_scaled",
        div_or_max(
            u64::from(pwm_frequency_hz),
            u64::from(regulation_execution_rate) * u64::from(pwm_freq_scaling),
        ),
    )
}

/// DPP conversion factor: `65536 / s`.
#[inline]
pub fn dpp_conv_factor(pwm_freq_scaling: u32) -> u32 {
    narrow_u32(
        "dpp_conv_factor",
        div_or_max(
            u64::from(FIXED_POINT_FULL_SCALE),
            u64::from(pwm_freq_scaling),
        ),
    )
}

/// Timer repetition counter: `2r - 1`.
#[inline]
pub fn repetition_counter(regulation_execution_rate: u32) -> u16 {
    narrow_u16(
        "repetition_counter",
        (u64::from(regulation_execution_rate) * 2).saturating_sub(1),
    )
}

/// System ticks between two runs of a task, minus one:
/// `tick / task - 1`.
#[inline]
pub fn occurrence_ticks(name: &str, tick_frequency_hz: u32, task_frequency_hz: u32) -> u32 {
    narrow_u32(
        name,
        div_or_max(u64::from(tick_frequency_hz), u64::from(task_frequency_hz)).saturating_sub(1),
    )
}

/// Whole system ticks in `time_ms`, before the `- 1` adjustment.
#[inline]
pub fn ticks_in_ms(tick_frequency_hz: u32, time_ms: u32) -> u64 {
    u64::from(tick_frequency_hz) * u64::from(time_ms) / 1000
}

/// Answer-to-reset timeout in ticks: `tick * ms / 1000 - 1`.
#[inline]
pub fn atr_time_ticks(tick_frequency_hz: u32, time_ms: u32) -> u16 {
    narrow_u16(
        "serialcom_atr_time_ticks",
        ticks_in_ms(tick_frequency_hz, time_ms).saturating_sub(1),
    )
}

/// Board-wide constants.
pub fn derive_board(board: &BoardConfig) -> BoardConstants {
    let constants = BoardConstants {
        dpp_conv_factor: dpp_conv_factor(board.pwm_freq_scaling),
        internal_supply_voltage: internal_supply_voltage(board.adc_reference_voltage),
        ui_task_occurrence_ticks: occurrence_ticks(
            "ui_task_occurrence_ticks",
            board.sys_tick_frequency_hz,
            board.ui_task_frequency_hz,
        ),
        serialcom_timeout_occurrence_ticks: occurrence_ticks(
            "serialcom_timeout_occurrence_ticks",
            board.sys_tick_frequency_hz,
            board.serial_com_timeout_inverse_hz,
        ),
        serialcom_atr_time_ticks: atr_time_ticks(
            board.sys_tick_frequency_hz,
            board.serial_com_atr_time_ms,
        ),
    };
    debug!("board constants: {:?}", constants);
    constants
}

/// Per-drive loop timing.
pub fn derive_loop_timing(board: &BoardConfig, timing: &TimingConfig) -> LoopTiming {
    LoopTiming {
        regulation_rate: regulation_rate(timing.pwm_frequency_hz, timing.regulation_execution_rate),
        regulation_rate_scaled: regulation_rate_scaled(
            timing.pwm_frequency_hz,
            timing.regulation_execution_rate,
            board.pwm_freq_scaling,
        ),
        repetition_counter: repetition_counter(timing.regulation_execution_rate),
        medium_frequency_task_rate: narrow_u16(
            "medium_frequency_task_rate",
            u64::from(timing.speed_loop_frequency_hz),
        ),
        mf_task_occurrence_ticks: occurrence_ticks(
            "mf_task_occurrence_ticks",
            board.sys_tick_frequency_hz,
            timing.speed_loop_frequency_hz,
        ),
    }
}
