//! C header rendering of derived constants.
//!
//! Board constants are emitted under their plain name; per-drive constants
//! carry a `_M<n>` suffix (1-based channel number).

use std::fmt::{self, Display, Write};

use mcconv_common::drive::constants::{BoardConstants, DerivedConstants, DriveConstants};

/// Render `constants` as a C header with include guards.
pub fn render_header(profile_name: &str, constants: &DerivedConstants) -> Result<String, fmt::Error> {
    let guard = include_guard(profile_name);
    let mut out = String::new();

    writeln!(out, "/* Generated by mcconv from profile \"{profile_name}\". Do not edit. */")?;
    writeln!(out, "#ifndef {guard}")?;
    writeln!(out, "#define {guard}")?;
    writeln!(out)?;
    write_board(&mut out, &constants.board)?;
    for (index, drive) in constants.drives.iter().enumerate() {
        writeln!(out)?;
        write_drive(&mut out, &format!("_M{}", index + 1), drive)?;
    }
    writeln!(out)?;
    writeln!(out, "#endif /* {guard} */")?;
    Ok(out)
}

/// `MCCONV_<PROFILE>_H`, non-alphanumerics replaced by `_`.
fn include_guard(profile_name: &str) -> String {
    let stem: String = profile_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "MCCONV_PARAMETERS_H".to_string()
    } else {
        format!("MCCONV_{stem}_H")
    }
}

fn define(out: &mut String, name: &str, suffix: &str, value: impl Display) -> fmt::Result {
    writeln!(out, "#define {name}{suffix} {value}")
}

/// Real constants keep a decimal point or exponent so C reads them as
/// `double`.
fn define_real(out: &mut String, name: &str, suffix: &str, value: f64) -> fmt::Result {
    writeln!(out, "#define {name}{suffix} {value:?}")
}

fn write_board(out: &mut String, board: &BoardConstants) -> fmt::Result {
    writeln!(out, "/* Board */")?;
    define(out, "DPP_CONV_FACTOR", "", board.dpp_conv_factor)?;
    define(out, "INT_SUPPLY_VOLTAGE", "", board.internal_supply_voltage)?;
    define(out, "UI_TASK_OCCURRENCE_TICKS", "", board.ui_task_occurrence_ticks)?;
    define(
        out,
        "SERIALCOM_TIMEOUT_OCCURRENCE_TICKS",
        "",
        board.serialcom_timeout_occurrence_ticks,
    )?;
    define(out, "SERIALCOM_ATR_TIME_TICKS", "", board.serialcom_atr_time_ticks)
}

fn write_drive(out: &mut String, suffix: &str, drive: &DriveConstants) -> fmt::Result {
    writeln!(out, "/* Drive {} */", drive.name)?;

    let timing = &drive.loop_timing;
    define(out, "TF_REGULATION_RATE", suffix, timing.regulation_rate)?;
    define(out, "TF_REGULATION_RATE_SCALED", suffix, timing.regulation_rate_scaled)?;
    define(out, "REP_COUNTER", suffix, timing.repetition_counter)?;
    define(out, "MEDIUM_FREQUENCY_TASK_RATE", suffix, timing.medium_frequency_task_rate)?;
    define(out, "MF_TASK_OCCURRENCE_TICKS", suffix, timing.mf_task_occurrence_ticks)?;

    let scaling = &drive.scaling;
    define(out, "CURRENT_CONV_FACTOR", suffix, scaling.current_conv_factor)?;
    define_real(out, "CURRENT_CONV_FACTOR_INV", suffix, scaling.current_conv_factor_inv)?;
    define_real(out, "PQD_CONVERSION_FACTOR", suffix, scaling.pqd_conversion_factor)?;
    define_real(out, "MAX_READABLE_CURRENT", suffix, scaling.max_readable_current_a)?;
    define(out, "DEFAULT_TORQUE_COMPONENT", suffix, scaling.default_torque_component)?;
    define(out, "DEFAULT_FLUX_COMPONENT", suffix, scaling.default_flux_component)?;

    let thresholds = &drive.thresholds;
    define(out, "OVERVOLTAGE_THRESHOLD_D", suffix, thresholds.overvoltage_threshold_d)?;
    define(out, "UNDERVOLTAGE_THRESHOLD_D", suffix, thresholds.undervoltage_threshold_d)?;
    define(out, "OV_TEMPERATURE_THRESHOLD_D", suffix, thresholds.ov_temperature_threshold_d)?;
    define(out, "OV_TEMPERATURE_HYSTERESIS_D", suffix, thresholds.ov_temperature_hysteresis_d)?;

    let mechanical = &drive.mechanical;
    define(out, "MAX_APPLICATION_SPEED_UNIT", suffix, mechanical.max_application_speed_unit)?;
    define(out, "MIN_APPLICATION_SPEED_UNIT", suffix, mechanical.min_application_speed_unit)?;
    define_real(out, "PI_VF_SPEED_OUTPUT_LIMIT", suffix, mechanical.pi_vf_speed_output_limit)?;
    define(out, "ALIGNMENT_ANGLE_S16", suffix, mechanical.alignment_angle_s16)?;
    define(out, "PULSE_NBR", suffix, mechanical.encoder_pulse_nbr)?;

    let pwm = &drive.pwm;
    define(out, "PWM_PERIOD_CYCLES", suffix, pwm.pwm_period_cycles)?;
    define(out, "DEAD_TIME_COUNTS", suffix, pwm.dead_time.value)?;
    define(out, "DTCOMPCNT", suffix, pwm.dtcompcnt)?;
    define(out, "TON", suffix, pwm.ton)?;
    define(out, "TOFF", suffix, pwm.toff)?;
    define(out, "TRISE", suffix, pwm.trise)?;
    define(out, "TDEAD", suffix, pwm.tdead)?;
    define(out, "TNOISE", suffix, pwm.tnoise)?;

    let adc = &drive.adc;
    define(out, "SAMPLING_TIME", suffix, adc.sampling_time)?;
    define(out, "TW_BEFORE", suffix, adc.tw_before)?;
    define(out, "TW_BEFORE_R3_1", suffix, adc.tw_before_r3_1)?;
    define(out, "TW_AFTER", suffix, adc.tw_after)?;
    define(out, "MAX_TWAIT", suffix, adc.max_twait)?;

    define(out, "UI_CONFIG", suffix, format_args!("0x{:08X}U", drive.ui.ui_config))?;
    define(
        out,
        "INTERFACE_OPTIONS",
        suffix,
        format_args!("0x{:02X}U", drive.ui.interface_options),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive;
    use crate::fixtures::{dual_config, reference_config};

    #[test]
    fn guard_is_sanitized() {
        assert_eq!(include_guard("acim-g431"), "MCCONV_ACIM_G431_H");
        assert_eq!(include_guard(""), "MCCONV_PARAMETERS_H");
    }

    #[test]
    fn header_has_guards_and_board_defines() {
        let constants = derive(&reference_config()).unwrap();
        let header = render_header("acim-g431", &constants).unwrap();
        assert!(header.contains("#ifndef MCCONV_ACIM_G431_H\n#define MCCONV_ACIM_G431_H\n"));
        assert!(header.trim_end().ends_with("#endif /* MCCONV_ACIM_G431_H */"));
        assert!(header.contains("#define INT_SUPPLY_VOLTAGE 19859\n"));
        assert!(header.contains("#define SERIALCOM_ATR_TIME_TICKS 39\n"));
    }

    #[test]
    fn drive_defines_are_suffixed_per_channel() {
        let constants = derive(&dual_config()).unwrap();
        let header = render_header("dual", &constants).unwrap();
        assert!(header.contains("#define CURRENT_CONV_FACTOR_M1 993\n"));
        assert!(header.contains("#define CURRENT_CONV_FACTOR_M2 1986\n"));
        assert!(header.contains("#define PWM_PERIOD_CYCLES_M1 10625\n"));
        assert!(header.contains("#define PWM_PERIOD_CYCLES_M2 8500\n"));
        assert!(header.contains("#define UI_CONFIG_M1 0x2000001CU\n"));
        assert!(header.contains("#define INTERFACE_OPTIONS_M2 0x06U\n"));
    }

    #[test]
    fn reals_keep_a_decimal_point() {
        let constants = derive(&reference_config()).unwrap();
        let header = render_header("p", &constants).unwrap();
        for name in ["MAX_READABLE_CURRENT_M1", "PI_VF_SPEED_OUTPUT_LIMIT_M1"] {
            let line = header
                .lines()
                .find(|line| line.starts_with(&format!("#define {name} ")))
                .unwrap();
            assert!(line.contains('.'), "{line}");
        }
    }
}
