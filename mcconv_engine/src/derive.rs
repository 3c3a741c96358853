//! Top-level derivation: validate, then compute the board section and
//! every drive channel independently.

use heapless::Vec;
use mcconv_common::consts::MAX_DRIVES;
use mcconv_common::drive::config::{BoardConfig, DriveConfig, PhysicalConfig};
use mcconv_common::drive::constants::{DerivedConstants, DriveConstants};
use mcconv_common::error::DeriveError;
use tracing::{debug, info};

use crate::adc::derive_adc_window;
use crate::flags::derive_ui_flags;
use crate::pwm::derive_pwm;
use crate::scaling::derive_scaling;
use crate::speed::derive_mechanical;
use crate::thresholds::derive_thresholds;
use crate::timing::{derive_board, derive_loop_timing};
use crate::validate::validate;

/// Derive every register-ready constant from a physical configuration.
///
/// Fails with every violated precondition when the configuration is
/// invalid; no partial result is produced.
pub fn derive(config: &PhysicalConfig) -> Result<DerivedConstants, DeriveError> {
    validate(config)?;

    let board = derive_board(&config.board);
    // Output capacity equals input capacity.
    let drives: Vec<DriveConstants, MAX_DRIVES> = config
        .drives
        .iter()
        .enumerate()
        .map(|(index, drive)| derive_drive(index, &config.board, drive))
        .collect();

    info!(
        "derived constants for {} drive(s): isv={}, dpp={}",
        drives.len(),
        board.internal_supply_voltage,
        board.dpp_conv_factor
    );
    Ok(DerivedConstants { board, drives })
}

/// Constants of one channel. Reads only the board section and this
/// channel's own configuration.
pub fn derive_drive(index: usize, board: &BoardConfig, drive: &DriveConfig) -> DriveConstants {
    let name = if drive.name.is_empty() {
        format!("M{}", index + 1)
    } else {
        drive.name.clone()
    };

    let constants = DriveConstants {
        loop_timing: derive_loop_timing(board, &drive.timing),
        scaling: derive_scaling(board, &drive.electrical),
        thresholds: derive_thresholds(board, &drive.electrical, &drive.protection),
        mechanical: derive_mechanical(&drive.mechanical),
        pwm: derive_pwm(&drive.timing, &drive.power_stage),
        adc: derive_adc_window(&drive.timing, &drive.power_stage),
        ui: derive_ui_flags(&drive.features),
        name,
    };
    debug!(
        "{}: pwm period {} counts, dead time {:?}, current factor {}",
        constants.name,
        constants.pwm.pwm_period_cycles,
        constants.pwm.dead_time,
        constants.scaling.current_conv_factor
    );
    constants
}
