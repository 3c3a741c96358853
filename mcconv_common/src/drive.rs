//! Drive-channel records.
//!
//! - [`config`] - `PhysicalConfig`, the externally authored input record
//! - [`constants`] - `DerivedConstants`, the register-ready output record
//! - [`flags`] - UI configuration bit-masks and sensor codes

pub mod config;
pub mod constants;
pub mod flags;
