//! PWM timer counts and dead-time register encoding.
//!
//! The dead-time generator register is piecewise: the meaning of a value
//! depends on which resolution band it falls in. The band table below is
//! evaluated first-match on the raw clock count; every division truncates.
//!
//! | raw count  | encoded          |
//! |------------|------------------|
//! | `..=255`   | `raw`            |
//! | `..=508`   | `raw / 2 + 128`  |
//! | `..=1008`  | `raw / 8 + 320`  |
//! | `..=2015`  | `raw / 16 + 384` |
//! | above      | `510`            |

use mcconv_common::drive::config::{PowerStageConfig, TimingConfig};
use mcconv_common::drive::constants::{DeadTimeBand, DeadTimeCode, PwmTiming};
use static_assertions::const_assert;
use tracing::debug;

use crate::fixed::{div_or_max, narrow_u16, narrow_u32};

/// Register value for dead times beyond the last band.
pub const DEAD_TIME_SATURATED: u16 = 510;

/// One resolution band of the dead-time generator.
#[derive(Debug, Clone, Copy)]
struct DeadTimeRule {
    /// Largest raw count handled by this band.
    upper: u32,
    divisor: u32,
    offset: u32,
    band: DeadTimeBand,
}

const DEAD_TIME_RULES: [DeadTimeRule; 4] = [
    DeadTimeRule {
        upper: 255,
        divisor: 1,
        offset: 0,
        band: DeadTimeBand::Direct,
    },
    DeadTimeRule {
        upper: 508,
        divisor: 2,
        offset: 128,
        band: DeadTimeBand::Half,
    },
    DeadTimeRule {
        upper: 1008,
        divisor: 8,
        offset: 320,
        band: DeadTimeBand::Eighth,
    },
    DeadTimeRule {
        upper: 2015,
        divisor: 16,
        offset: 384,
        band: DeadTimeBand::Sixteenth,
    },
];

const_assert!(DEAD_TIME_RULES[0].upper < DEAD_TIME_RULES[1].upper);
const_assert!(DEAD_TIME_RULES[1].upper < DEAD_TIME_RULES[2].upper);
const_assert!(DEAD_TIME_RULES[2].upper < DEAD_TIME_RULES[3].upper);
const_assert!(
    DEAD_TIME_RULES[3].upper / DEAD_TIME_RULES[3].divisor + DEAD_TIME_RULES[3].offset
        < DEAD_TIME_SATURATED as u32
);

/// Dead time in dead-time-generator clocks:
/// `clock_MHz * divider * deadtime_ns / 1000`.
pub fn dead_time_counts_raw(adv_tim_clk_mhz: u32, tim_clock_divider: u32, deadtime_ns: u32) -> u32 {
    narrow_u32(
        "dead_time_counts_raw",
        u64::from(adv_tim_clk_mhz) * u64::from(tim_clock_divider) * u64::from(deadtime_ns) / 1000,
    )
}

/// Encode a raw dead-time count into the generator register format.
///
/// Counts beyond the last band saturate at [`DEAD_TIME_SATURATED`]; this
/// is the register's maximum, not an error.
pub fn encode_dead_time(raw: u32) -> DeadTimeCode {
    DEAD_TIME_RULES
        .iter()
        .find(|rule| raw <= rule.upper)
        .map(|rule| DeadTimeCode {
            band: rule.band,
            // Every band result is at most 509.
            value: (raw / rule.divisor + rule.offset) as u16,
        })
        .unwrap_or(DeadTimeCode {
            band: DeadTimeBand::Saturated,
            value: DEAD_TIME_SATURATED,
        })
}

/// Timer counts per PWM period before narrowing: `clock_MHz * 1e6 / f_pwm`.
#[inline]
pub fn pwm_period_counts(adv_tim_clk_mhz: u32, pwm_frequency_hz: u32) -> u64 {
    div_or_max(
        u64::from(adv_tim_clk_mhz) * 1_000_000,
        u64::from(pwm_frequency_hz),
    )
}

/// Timer counts per PWM period, saturating at the 16-bit auto-reload range.
pub fn pwm_period_cycles(adv_tim_clk_mhz: u32, pwm_frequency_hz: u32) -> u16 {
    narrow_u16(
        "pwm_period_cycles",
        pwm_period_counts(adv_tim_clk_mhz, pwm_frequency_hz),
    )
}

/// Timer counts spanned by `time_ns`: `time_ns * clock_MHz / 1000`.
pub fn ns_to_counts(name: &str, time_ns: u32, adv_tim_clk_mhz: u32) -> u16 {
    narrow_u16(
        name,
        u64::from(time_ns) * u64::from(adv_tim_clk_mhz) / 1000,
    )
}

/// Half of [`ns_to_counts`] (center-aligned compensation):
/// `time_ns * clock_MHz / 2000`.
pub fn ns_to_half_counts(name: &str, time_ns: u32, adv_tim_clk_mhz: u32) -> u16 {
    narrow_u16(
        name,
        u64::from(time_ns) * u64::from(adv_tim_clk_mhz) / 2000,
    )
}

/// Per-drive PWM timing.
pub fn derive_pwm(timing: &TimingConfig, power_stage: &PowerStageConfig) -> PwmTiming {
    let clk = timing.adv_tim_clk_mhz;
    let raw = dead_time_counts_raw(clk, timing.tim_clock_divider, power_stage.deadtime_ns);
    let dead_time = encode_dead_time(raw);
    debug!(
        "dead time {} ns -> {} clocks -> {:?}",
        power_stage.deadtime_ns, raw, dead_time
    );

    PwmTiming {
        pwm_period_cycles: pwm_period_cycles(clk, timing.pwm_frequency_hz),
        dead_time_counts_raw: raw,
        dead_time,
        dtcompcnt: ns_to_half_counts("dtcompcnt", power_stage.deadtime_ns, clk),
        ton: ns_to_half_counts("ton", power_stage.ton_ns, clk),
        toff: ns_to_half_counts("toff", power_stage.toff_ns, clk),
        trise: ns_to_counts("trise", power_stage.trise_ns, clk),
        tdead: ns_to_counts("tdead", power_stage.deadtime_ns, clk),
        tnoise: ns_to_counts("tnoise", power_stage.tnoise_ns, clk),
    }
}
