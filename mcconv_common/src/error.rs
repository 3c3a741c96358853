//! Configuration issue taxonomy.
//!
//! Validation collects every violated precondition as a [`ConfigIssue`]
//! naming the offending field path (e.g. `drives[1].timing.pwm_frequency_hz`)
//! and returns them together in one [`DeriveError`].

use std::fmt;
use thiserror::Error;

/// One violated precondition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    /// No drive channel configured.
    #[error("drives: at least one drive must be configured")]
    NoDrives,

    /// Integer parameter used as a divisor or multiplier is zero.
    #[error("{field}: must be greater than zero")]
    Zero { field: String },

    /// Real parameter is zero, negative, NaN or infinite.
    #[error("{field}: {value} must be a finite positive number")]
    NotPositive { field: String, value: f64 },

    /// Parameter outside its physical range.
    #[error("{field}: {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Parameter not in the list of supported values.
    #[error("{field}: {value} is not supported (allowed: {allowed})")]
    Unsupported {
        field: String,
        value: u64,
        allowed: String,
    },

    /// Task runs faster than the tick that schedules it.
    #[error("{field}: {task_hz} Hz exceeds the {tick_hz} Hz system tick")]
    TaskFasterThanTick {
        field: String,
        task_hz: u32,
        tick_hz: u32,
    },

    /// Configured time shorter than one system tick.
    #[error("{field}: {time_ms} ms is shorter than one {tick_hz} Hz system tick")]
    ShorterThanTick {
        field: String,
        time_ms: u32,
        tick_hz: u32,
    },

    /// Wait-after-trigger shorter than the sampling time.
    #[error(
        "{field}: wait after trigger ({tw_after} counts) is shorter than the sampling time ({sampling_time} counts)"
    )]
    WindowUnderflow {
        field: String,
        tw_after: u32,
        sampling_time: u32,
    },

    /// Digital threshold would be negative.
    #[error("{field}: digital threshold {value} is below zero")]
    NegativeThreshold { field: String, value: f64 },

    /// Derived register value above the register's range.
    #[error("{field}: derived register value {value} exceeds {max}")]
    RegisterOverflow { field: String, value: f64, max: f64 },

    /// Lower bound above upper bound.
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange { field: String, min: f64, max: f64 },
}

impl ConfigIssue {
    /// Path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::NoDrives => "drives",
            Self::Zero { field }
            | Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Unsupported { field, .. }
            | Self::TaskFasterThanTick { field, .. }
            | Self::ShorterThanTick { field, .. }
            | Self::WindowUnderflow { field, .. }
            | Self::NegativeThreshold { field, .. }
            | Self::RegisterOverflow { field, .. }
            | Self::InvertedRange { field, .. } => field,
        }
    }
}

/// Derivation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeriveError {
    /// One or more preconditions violated; no constants were produced.
    #[error("invalid configuration ({} issue(s)):{}", .issues.len(), IssueList(.issues))]
    InvalidConfig { issues: Vec<ConfigIssue> },
}

impl DeriveError {
    /// Every violated precondition.
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::InvalidConfig { issues } => issues,
        }
    }
}

struct IssueList<'a>(&'a [ConfigIssue]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in self.0 {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}
