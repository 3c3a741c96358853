//! mcconv Common Library
//!
//! Shared record types for the motor-control parameter derivation engine:
//! the physical configuration a hardware/motor variant is described with,
//! the derived register-ready constants, and TOML profile loading.
//!
//! # Module Structure
//!
//! - [`drive`] - Physical configuration and derived constant records
//! - [`config`] - Profile loading traits and types
//! - [`consts`] - Fixed-point full scales, defaults and bounds
//! - [`error`] - Configuration issue taxonomy
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust,no_run
//! use mcconv_common::config::{ConfigLoader, ProfileConfig};
//! use std::path::Path;
//!
//! let profile = ProfileConfig::load(Path::new("config/profile.toml")).unwrap();
//! println!("{} drive(s)", profile.physical.drives.len());
//! ```

pub mod config;
pub mod consts;
pub mod drive;
pub mod error;
pub mod prelude;
