//! Up-front precondition checks.
//!
//! Every check runs; violations are collected and returned together so a
//! profile author sees all problems at once. Checks whose inputs are
//! themselves invalid are skipped to avoid reporting the same fault twice.
//!
//! A derived value that would not fit its register is rejected here; the
//! saturating conversions in [`crate::fixed`] only guard unvalidated calls.
//! Dead time beyond the last band is the one value that saturates.

use mcconv_common::consts::{
    ADC_CYCLES_MAX, ADC_FULL_SCALE, ADC_REFERENCE_VOLTAGE_MAX, SWITCHING_TIME_NS_MAX,
    TIM_CLOCK_DIVIDERS,
};
use mcconv_common::drive::config::{
    BoardConfig, DriveConfig, ElectricalConfig, MechanicalConfig, PhysicalConfig,
    PowerStageConfig, ProtectionConfig, TimingConfig,
};
use mcconv_common::error::{ConfigIssue, DeriveError};
use tracing::debug;

use crate::adc;
use crate::fixed::round_half_up;
use crate::pwm::pwm_period_counts;
use crate::scaling::{current_conv_factor_real, internal_supply_voltage};
use crate::thresholds::{temperature_hysteresis_real, temperature_threshold_real, voltage_threshold_real};
use crate::timing::ticks_in_ms;

/// Check every precondition of the derivation.
pub fn validate(config: &PhysicalConfig) -> Result<(), DeriveError> {
    let mut checker = Checker::default();
    checker.board(&config.board);

    if config.drives.is_empty() {
        checker.issues.push(ConfigIssue::NoDrives);
    }
    for (index, drive) in config.drives.iter().enumerate() {
        checker.drive(index, &config.board, drive);
    }

    if checker.issues.is_empty() {
        Ok(())
    } else {
        debug!("validation found {} issue(s)", checker.issues.len());
        Err(DeriveError::InvalidConfig {
            issues: checker.issues,
        })
    }
}

fn path(scope: &str, name: &str) -> String {
    format!("{scope}.{name}")
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Default)]
struct Checker {
    issues: Vec<ConfigIssue>,
}

impl Checker {
    // ─── Primitive checks ───────────────────────────────────────────

    fn nonzero(&mut self, scope: &str, name: &str, value: u32) -> bool {
        if value == 0 {
            self.issues.push(ConfigIssue::Zero {
                field: path(scope, name),
            });
        }
        value != 0
    }

    fn positive(&mut self, scope: &str, name: &str, value: f64) -> bool {
        let ok = is_positive(value);
        if !ok {
            self.issues.push(ConfigIssue::NotPositive {
                field: path(scope, name),
                value,
            });
        }
        ok
    }

    /// Positive and at most `max`.
    fn positive_up_to(&mut self, scope: &str, name: &str, value: f64, max: f64) -> bool {
        if !self.positive(scope, name, value) {
            return false;
        }
        if value > max {
            self.issues.push(ConfigIssue::OutOfRange {
                field: path(scope, name),
                value,
                min: 0.0,
                max,
            });
            return false;
        }
        true
    }

    fn in_range(&mut self, scope: &str, name: &str, value: f64, min: f64, max: f64) -> bool {
        // NaN fails both comparisons.
        let ok = value >= min && value <= max;
        if !ok {
            self.issues.push(ConfigIssue::OutOfRange {
                field: path(scope, name),
                value,
                min,
                max,
            });
        }
        ok
    }

    fn finite(&mut self, scope: &str, name: &str, value: f64) -> bool {
        self.in_range(scope, name, value, f64::MIN, f64::MAX)
    }

    fn switching_time(&mut self, scope: &str, name: &str, value_ns: u32) -> bool {
        self.in_range(
            scope,
            name,
            f64::from(value_ns),
            0.0,
            f64::from(SWITCHING_TIME_NS_MAX),
        )
    }

    fn task_rate(&mut self, scope: &str, name: &str, task_hz: u32, tick_hz: u32) {
        if self.nonzero(scope, name, task_hz) && tick_hz != 0 && task_hz > tick_hz {
            self.issues.push(ConfigIssue::TaskFasterThanTick {
                field: path(scope, name),
                task_hz,
                tick_hz,
            });
        }
    }

    fn register_fits(&mut self, scope: &str, name: &str, value: f64, max: f64) {
        if value > max {
            self.issues.push(ConfigIssue::RegisterOverflow {
                field: path(scope, name),
                value,
                max,
            });
        }
    }

    /// Threshold digits must lie within the ADC code range.
    fn digital_threshold(&mut self, scope: &str, name: &str, value: f64) {
        if value < 0.0 {
            self.issues.push(ConfigIssue::NegativeThreshold {
                field: path(scope, name),
                value,
            });
        } else {
            self.register_fits(scope, name, value, f64::from(ADC_FULL_SCALE));
        }
    }

    fn ordered(&mut self, scope: &str, name: &str, min: f64, max: f64) {
        if min > max {
            self.issues.push(ConfigIssue::InvertedRange {
                field: path(scope, name),
                min,
                max,
            });
        }
    }

    // ─── Board ──────────────────────────────────────────────────────

    fn board(&mut self, board: &BoardConfig) {
        const SCOPE: &str = "board";
        self.positive_up_to(
            SCOPE,
            "adc_reference_voltage",
            board.adc_reference_voltage,
            ADC_REFERENCE_VOLTAGE_MAX,
        );

        let tick = board.sys_tick_frequency_hz;
        let tick_ok = self.nonzero(SCOPE, "sys_tick_frequency_hz", tick);
        self.task_rate(SCOPE, "ui_task_frequency_hz", board.ui_task_frequency_hz, tick);
        self.task_rate(
            SCOPE,
            "serial_com_timeout_inverse_hz",
            board.serial_com_timeout_inverse_hz,
            tick,
        );
        if tick_ok && ticks_in_ms(tick, board.serial_com_atr_time_ms) == 0 {
            self.issues.push(ConfigIssue::ShorterThanTick {
                field: path(SCOPE, "serial_com_atr_time_ms"),
                time_ms: board.serial_com_atr_time_ms,
                tick_hz: tick,
            });
        }
        self.nonzero(SCOPE, "pwm_freq_scaling", board.pwm_freq_scaling);
    }

    // ─── Drive ──────────────────────────────────────────────────────

    fn drive(&mut self, index: usize, board: &BoardConfig, drive: &DriveConfig) {
        let scope = |group: &str| format!("drives[{index}].{group}");
        let vref_ok = is_positive(board.adc_reference_voltage)
            && board.adc_reference_voltage <= ADC_REFERENCE_VOLTAGE_MAX;

        let vref = vref_ok.then_some(board.adc_reference_voltage);

        let partitioning_ok = self.electrical(&scope("electrical"), vref, &drive.electrical);
        self.timing(&scope("timing"), board, &drive.timing);
        self.protection(
            &scope("protection"),
            vref,
            partitioning_ok.then_some(drive.electrical.vbus_partitioning_factor),
            &drive.protection,
        );
        self.mechanical(&scope("mechanical"), &drive.mechanical);
        self.power_stage(&scope("power_stage"), &drive.timing, &drive.power_stage);
    }

    /// Returns whether the partitioning factor is usable.
    fn electrical(&mut self, scope: &str, vref: Option<f64>, electrical: &ElectricalConfig) -> bool {
        let rshunt_ok = self.positive(scope, "rshunt_ohm", electrical.rshunt_ohm);
        let gain_ok = self.positive(scope, "amplification_gain", electrical.amplification_gain);
        if let (true, true, Some(vref)) = (rshunt_ok, gain_ok, vref) {
            let factor = current_conv_factor_real(
                electrical.rshunt_ohm,
                electrical.amplification_gain,
                vref,
            );
            self.register_fits(
                scope,
                "rshunt_ohm",
                round_half_up(factor),
                f64::from(u16::MAX),
            );
        }
        let partitioning_ok = self.positive_up_to(
            scope,
            "vbus_partitioning_factor",
            electrical.vbus_partitioning_factor,
            1.0,
        );
        self.finite(
            scope,
            "default_torque_component_a",
            electrical.default_torque_component_a,
        );
        self.finite(
            scope,
            "default_flux_component_a",
            electrical.default_flux_component_a,
        );
        partitioning_ok
    }

    fn timing(&mut self, scope: &str, board: &BoardConfig, timing: &TimingConfig) {
        let pwm_ok = self.nonzero(scope, "pwm_frequency_hz", timing.pwm_frequency_hz);
        let clk_ok = self.nonzero(scope, "adv_tim_clk_mhz", timing.adv_tim_clk_mhz);
        if pwm_ok && clk_ok {
            // Auto-reload register is 16 bits wide.
            self.register_fits(
                scope,
                "pwm_frequency_hz",
                pwm_period_counts(timing.adv_tim_clk_mhz, timing.pwm_frequency_hz) as f64,
                f64::from(u16::MAX),
            );
        }

        if !TIM_CLOCK_DIVIDERS.contains(&timing.tim_clock_divider) {
            self.issues.push(ConfigIssue::Unsupported {
                field: path(scope, "tim_clock_divider"),
                value: u64::from(timing.tim_clock_divider),
                allowed: TIM_CLOCK_DIVIDERS
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let rate = timing.regulation_execution_rate;
        let scaling = board.pwm_freq_scaling;
        if self.nonzero(scope, "regulation_execution_rate", rate) && pwm_ok && scaling != 0 {
            let fastest = timing.pwm_frequency_hz / scaling;
            if u64::from(rate) * u64::from(scaling) > u64::from(timing.pwm_frequency_hz) {
                self.issues.push(ConfigIssue::OutOfRange {
                    field: path(scope, "regulation_execution_rate"),
                    value: f64::from(rate),
                    min: 1.0,
                    max: f64::from(fastest.max(1)),
                });
            } else {
                let scaled = timing.pwm_frequency_hz / (rate * scaling);
                self.register_fits(
                    scope,
                    "regulation_execution_rate",
                    f64::from(scaled),
                    f64::from(u16::MAX),
                );
            }
        }

        self.task_rate(
            scope,
            "speed_loop_frequency_hz",
            timing.speed_loop_frequency_hz,
            board.sys_tick_frequency_hz,
        );
    }

    fn protection(
        &mut self,
        scope: &str,
        vref: Option<f64>,
        partitioning: Option<f64>,
        protection: &ProtectionConfig,
    ) {
        let voltages_ok = [
            self.finite(scope, "ov_voltage_threshold_v", protection.ov_voltage_threshold_v),
            self.finite(scope, "ud_voltage_threshold_v", protection.ud_voltage_threshold_v),
        ]
        .into_iter()
        .all(|ok| ok);
        let sensor_ok = [
            self.finite(
                scope,
                "ov_temperature_threshold_c",
                protection.ov_temperature_threshold_c,
            ),
            self.finite(
                scope,
                "ov_temperature_hysteresis_c",
                protection.ov_temperature_hysteresis_c,
            ),
            self.finite(scope, "dv_dt", protection.dv_dt),
            self.finite(scope, "t0_c", protection.t0_c),
            self.finite(scope, "v0_v", protection.v0_v),
        ]
        .into_iter()
        .all(|ok| ok);

        if voltages_ok {
            self.ordered(
                scope,
                "ud_voltage_threshold_v",
                protection.ud_voltage_threshold_v,
                protection.ov_voltage_threshold_v,
            );
        }

        let Some(vref) = vref else {
            return;
        };
        if let (true, Some(partitioning)) = (voltages_ok, partitioning) {
            self.digital_threshold(
                scope,
                "ov_voltage_threshold_v",
                voltage_threshold_real(protection.ov_voltage_threshold_v, vref, partitioning),
            );
            self.digital_threshold(
                scope,
                "ud_voltage_threshold_v",
                voltage_threshold_real(protection.ud_voltage_threshold_v, vref, partitioning),
            );
        }
        if sensor_ok {
            let isv = internal_supply_voltage(vref);
            self.digital_threshold(
                scope,
                "ov_temperature_threshold_c",
                temperature_threshold_real(protection, isv),
            );
            self.digital_threshold(
                scope,
                "ov_temperature_hysteresis_c",
                temperature_hysteresis_real(protection, isv),
            );
        }
    }

    fn mechanical(&mut self, scope: &str, mechanical: &MechanicalConfig) {
        self.nonzero(scope, "encoder_ppr", mechanical.encoder_ppr);
        self.positive(scope, "nominal_freq_hz", mechanical.nominal_freq_hz);
        self.finite(scope, "alignment_angle_deg", mechanical.alignment_angle_deg);
        self.ordered(
            scope,
            "min_application_speed_rpm",
            f64::from(mechanical.min_application_speed_rpm),
            f64::from(mechanical.max_application_speed_rpm),
        );
    }

    fn power_stage(&mut self, scope: &str, timing: &TimingConfig, power_stage: &PowerStageConfig) {
        let times_ok = [
            ("deadtime_ns", power_stage.deadtime_ns),
            ("trise_ns", power_stage.trise_ns),
            ("tnoise_ns", power_stage.tnoise_ns),
            ("ton_ns", power_stage.ton_ns),
            ("toff_ns", power_stage.toff_ns),
            ("max_tntr_ns", power_stage.max_tntr_ns),
        ]
        .into_iter()
        .fold(true, |ok, (name, value)| self.switching_time(scope, name, value) && ok);

        let cycles_ok = [
            ("adc_sampling_cycles", power_stage.adc_sampling_cycles),
            (
                "adc_trig_conv_latency_cycles",
                power_stage.adc_trig_conv_latency_cycles,
            ),
            ("adc_sar_cycles", power_stage.adc_sar_cycles),
        ]
        .into_iter()
        .fold(true, |ok, (name, value)| {
            self.in_range(scope, name, value, 0.0, ADC_CYCLES_MAX) && ok
        });
        let adc_clk_ok = self.positive(scope, "adc_clk_mhz", power_stage.adc_clk_mhz);

        if times_ok && cycles_ok && adc_clk_ok && timing.adv_tim_clk_mhz != 0 {
            let clk = timing.adv_tim_clk_mhz;
            let sampling_time = adc::sampling_time(power_stage, clk);
            let tw_after = adc::tw_after(power_stage, clk);
            if tw_after < sampling_time {
                self.issues.push(ConfigIssue::WindowUnderflow {
                    field: path(scope, "max_tntr_ns"),
                    tw_after: u32::from(tw_after),
                    sampling_time: u32::from(sampling_time),
                });
            }
        }
    }
}
