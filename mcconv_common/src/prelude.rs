//! Prelude module for common re-exports.
//!
//! ```rust
//! use mcconv_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, ProfileConfig, SharedConfig};

// ─── Records ────────────────────────────────────────────────────────
pub use crate::drive::config::{BoardConfig, DriveConfig, PhysicalConfig};
pub use crate::drive::constants::{BoardConstants, DerivedConstants, DriveConstants};
pub use crate::drive::flags::{InterfaceOptions, SensorCode, UiConfig};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{ConfigIssue, DeriveError};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::MAX_DRIVES;
