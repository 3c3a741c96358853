//! Conversions from real / wide intermediates to register-width integers.
//!
//! Every narrowing saturates at the target range and logs a `warn!` naming
//! the constant, so an out-of-range result is never a silent wrap.

use tracing::warn;

/// Round half up: add 0.5, then truncate toward zero.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).trunc()
}

/// Integer division where a zero divisor saturates to `u64::MAX`.
#[inline]
pub fn div_or_max(numerator: u64, divisor: u64) -> u64 {
    numerator.checked_div(divisor).unwrap_or(u64::MAX)
}

/// Truncate a real value into `u16`, saturating at both ends.
pub fn saturate_u16(name: &str, value: f64) -> u16 {
    if value.is_nan() {
        warn!("{name}: NaN clamped to 0");
        0
    } else if value < 0.0 {
        warn!("{name}: {value} below range, clamped to 0");
        0
    } else if value >= f64::from(u16::MAX) + 1.0 {
        warn!("{name}: {value} above range, clamped to {}", u16::MAX);
        u16::MAX
    } else {
        value as u16
    }
}

/// Truncate a real value into `i16`, saturating at both ends.
pub fn saturate_i16(name: &str, value: f64) -> i16 {
    if value.is_nan() {
        warn!("{name}: NaN clamped to 0");
        0
    } else if value <= f64::from(i16::MIN) - 1.0 {
        warn!("{name}: {value} below range, clamped to {}", i16::MIN);
        i16::MIN
    } else if value >= f64::from(i16::MAX) + 1.0 {
        warn!("{name}: {value} above range, clamped to {}", i16::MAX);
        i16::MAX
    } else {
        value as i16
    }
}

/// Narrow a `u64` into `u16`, saturating at `u16::MAX`.
pub fn narrow_u16(name: &str, value: u64) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| {
        warn!("{name}: {value} above range, clamped to {}", u16::MAX);
        u16::MAX
    })
}

/// Narrow a `u64` into `u32`, saturating at `u32::MAX`.
pub fn narrow_u32(name: &str, value: u64) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        warn!("{name}: {value} above range, clamped to {}", u32::MAX);
        u32::MAX
    })
}

/// Narrow an `i64` into `i32`, saturating at both ends.
pub fn narrow_i32(name: &str, value: i64) -> i32 {
    i32::try_from(value).unwrap_or_else(|_| {
        let clamped = if value < 0 { i32::MIN } else { i32::MAX };
        warn!("{name}: {value} out of range, clamped to {clamped}");
        clamped
    })
}
