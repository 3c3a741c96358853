//! UI configuration bit-masks.
//!
//! `UiConfig` is the 32-bit option word a monitoring tool reads to learn
//! which optional features a drive was built with. The low byte holds
//! feature bits; the two top nibbles hold the main and auxiliary sensor
//! codes.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Bit offset of the main sensor code in [`UiConfig`].
pub const MAIN_SCFG_POS: u32 = 28;

/// Bit offset of the auxiliary sensor code in [`UiConfig`].
pub const AUX_SCFG_POS: u32 = 24;

bitflags! {
    /// Per-drive UI configuration word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UiConfig: u32 {
        /// Flux weakening enabled.
        const FIELD_WEAKENING      = 0x0000_0001;
        /// Differential term enabled.
        const DIFF_TERM            = 0x0000_0002;
        /// DAC debug output enabled.
        const DAC                  = 0x0000_0004;
        /// Id settable in speed mode.
        const SET_ID_IN_SPEED_MODE = 0x0000_0008;
        /// PLL tuning enabled.
        const PLL_TUNING           = 0x0000_0010;
        /// Power-factor correction enabled.
        const PFC                  = 0x0000_0020;
        /// Auxiliary sensor code field.
        const AUX_SENSOR           = 0x0F00_0000;
        /// Main sensor code field.
        const MAIN_SENSOR          = 0xF000_0000;
    }
}

impl UiConfig {
    /// Main sensor code field for `code`.
    #[inline]
    pub const fn main_sensor_field(code: SensorCode) -> Self {
        Self::from_bits_retain((code as u32) << MAIN_SCFG_POS)
    }

    /// Auxiliary sensor code field for `code`.
    #[inline]
    pub const fn aux_sensor_field(code: SensorCode) -> Self {
        Self::from_bits_retain((code as u32) << AUX_SCFG_POS)
    }

    /// Decode the main sensor code field.
    pub fn main_sensor(&self) -> Option<SensorCode> {
        SensorCode::from_code(((self.bits() & Self::MAIN_SENSOR.bits()) >> MAIN_SCFG_POS) as u8)
    }

    /// Decode the auxiliary sensor code field.
    pub fn aux_sensor(&self) -> Option<SensorCode> {
        SensorCode::from_code(((self.bits() & Self::AUX_SENSOR.bits()) >> AUX_SCFG_POS) as u8)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Communication interfaces compiled into the drive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InterfaceOptions: u8 {
        /// Serial communication.
        const COM = 0x02;
        /// DAC output.
        const DAC = 0x04;
    }
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        Self::empty()
    }
}

/// Speed/position sensor codes (4-bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SensorCode {
    /// Hall sensors.
    Hall = 0x01,
    /// Quadrature encoder.
    #[default]
    Encoder = 0x02,
    /// State observer + PLL.
    StoPll = 0x09,
    /// State observer + CORDIC.
    StoCordic = 0x0A,
    /// High-frequency injection.
    Hfi = 0x0B,
    /// Luenberger sensorless observer (induction motors).
    Lso = 0x0C,
}

impl SensorCode {
    /// Decode a 4-bit sensor code; `None` for zero or unknown codes.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Hall),
            0x02 => Some(Self::Encoder),
            0x09 => Some(Self::StoPll),
            0x0A => Some(Self::StoCordic),
            0x0B => Some(Self::Hfi),
            0x0C => Some(Self::Lso),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_fields_do_not_overlap_feature_bits() {
        let features = UiConfig::FIELD_WEAKENING
            | UiConfig::DIFF_TERM
            | UiConfig::DAC
            | UiConfig::SET_ID_IN_SPEED_MODE
            | UiConfig::PLL_TUNING
            | UiConfig::PFC;
        assert!(!features.intersects(UiConfig::MAIN_SENSOR | UiConfig::AUX_SENSOR));
        assert!(!UiConfig::MAIN_SENSOR.intersects(UiConfig::AUX_SENSOR));
    }

    #[test]
    fn sensor_field_round_trip() {
        let cfg = UiConfig::main_sensor_field(SensorCode::Encoder)
            | UiConfig::aux_sensor_field(SensorCode::Hall);
        assert_eq!(cfg.bits(), 0x2100_0000);
        assert_eq!(cfg.main_sensor(), Some(SensorCode::Encoder));
        assert_eq!(cfg.aux_sensor(), Some(SensorCode::Hall));
    }

    #[test]
    fn empty_aux_field_decodes_to_none() {
        let cfg = UiConfig::main_sensor_field(SensorCode::Lso);
        assert_eq!(cfg.aux_sensor(), None);
        assert_eq!(cfg.main_sensor(), Some(SensorCode::Lso));
    }

    #[test]
    fn every_code_fits_in_a_nibble() {
        for code in [
            SensorCode::Hall,
            SensorCode::Encoder,
            SensorCode::StoPll,
            SensorCode::StoCordic,
            SensorCode::Hfi,
            SensorCode::Lso,
        ] {
            assert!((code as u8) <= 0x0F);
            assert_eq!(SensorCode::from_code(code as u8), Some(code));
        }
    }
}
