//! # mcconv Engine
//!
//! Turns a [`PhysicalConfig`](mcconv_common::drive::config::PhysicalConfig)
//! into [`DerivedConstants`](mcconv_common::drive::constants::DerivedConstants):
//! the fixed-point, register-ready values a motor-control firmware image is
//! built with.
//!
//! ## Formula Groups
//!
//! 1. [`timing`]: regulation rate, repetition counter, task tick counters
//! 2. [`scaling`]: current / supply-voltage / power conversion factors
//! 3. [`thresholds`]: over/under-voltage and over-temperature digits
//! 4. [`speed`]: RPM to internal speed unit, alignment angle, encoder
//! 5. [`pwm`]: PWM period, piecewise dead-time encoding, compensation counts
//! 6. [`adc`]: ADC sampling window
//! 7. [`flags`]: UI configuration word
//!
//! [`validate`] checks every precondition up front; [`derive::derive`] is the
//! single entry point. Each drive channel is derived from the board section
//! and its own configuration only.

pub mod adc;
pub mod derive;
pub mod fixed;
pub mod flags;
pub mod header;
pub mod pwm;
pub mod scaling;
pub mod speed;
pub mod thresholds;
pub mod timing;
pub mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

pub use derive::derive;
