mod cli;
mod end_to_end;
mod isolation;
mod profile_loading;
mod validation;

use mcconv_common::config::ProfileConfig;

pub(crate) const PROFILE_TOML: &str = include_str!("../../../config/profile.toml");
pub(crate) const DUAL_TOML: &str = include_str!("../../../config/dual.toml");

pub(crate) fn reference_profile() -> ProfileConfig {
    ProfileConfig::from_toml(PROFILE_TOML).expect("reference profile parses")
}

pub(crate) fn dual_profile() -> ProfileConfig {
    ProfileConfig::from_toml(DUAL_TOML).expect("dual profile parses")
}
