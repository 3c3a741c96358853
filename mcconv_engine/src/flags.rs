//! UI option word and interface-option assembly.
//!
//! Each enabled toggle contributes its flag to the fold; disabled toggles
//! are filtered out before it.

use mcconv_common::drive::config::FeatureConfig;
use mcconv_common::drive::constants::UiFlags;
use mcconv_common::drive::flags::{InterfaceOptions, UiConfig};

/// UI configuration word: feature bits plus sensor code fields.
pub fn ui_config(features: &FeatureConfig) -> UiConfig {
    let toggles = [
        (features.field_weakening, UiConfig::FIELD_WEAKENING),
        (features.diff_term, UiConfig::DIFF_TERM),
        (features.dac, UiConfig::DAC),
        (features.set_id_in_speed_mode, UiConfig::SET_ID_IN_SPEED_MODE),
        (features.pll_tuning, UiConfig::PLL_TUNING),
        (features.pfc, UiConfig::PFC),
    ];

    toggles
        .into_iter()
        .filter_map(|(enabled, flag)| enabled.then_some(flag))
        .chain(std::iter::once(UiConfig::main_sensor_field(
            features.main_sensor,
        )))
        .chain(features.aux_sensor.map(UiConfig::aux_sensor_field))
        .fold(UiConfig::empty(), |acc, flag| acc | flag)
}

/// Communication interfaces compiled in.
pub fn interface_options(features: &FeatureConfig) -> InterfaceOptions {
    [
        (features.com, InterfaceOptions::COM),
        (features.dac, InterfaceOptions::DAC),
    ]
    .into_iter()
    .filter_map(|(enabled, flag)| enabled.then_some(flag))
    .fold(InterfaceOptions::empty(), |acc, flag| acc | flag)
}

/// Per-drive flag words.
pub fn derive_ui_flags(features: &FeatureConfig) -> UiFlags {
    UiFlags {
        ui_config: ui_config(features).bits(),
        interface_options: interface_options(features).bits(),
    }
}
