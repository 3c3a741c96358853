//! Reference configuration shared by unit tests: an induction-motor kit on
//! a 170 MHz timer, 16 kHz PWM, 10 mΩ shunt with ×5 gain.

use heapless::Vec;
use mcconv_common::drive::config::{
    BoardConfig, DriveConfig, ElectricalConfig, FeatureConfig, MechanicalConfig,
    PhysicalConfig, PowerStageConfig, ProtectionConfig, SpeedUnit, TimingConfig,
};

pub(crate) fn reference_drive() -> DriveConfig {
    DriveConfig {
        name: "M1".to_string(),
        electrical: ElectricalConfig {
            rshunt_ohm: 0.01,
            amplification_gain: 5.0,
            vbus_partitioning_factor: 0.0522,
            default_torque_component_a: 0.0,
            default_flux_component_a: 0.0,
        },
        timing: TimingConfig {
            pwm_frequency_hz: 16000,
            adv_tim_clk_mhz: 170,
            tim_clock_divider: 1,
            regulation_execution_rate: 1,
            speed_loop_frequency_hz: 1000,
        },
        protection: ProtectionConfig {
            ov_voltage_threshold_v: 30.0,
            ud_voltage_threshold_v: 8.0,
            ov_temperature_threshold_c: 70.0,
            ov_temperature_hysteresis_c: 10.0,
            dv_dt: 0.023,
            t0_c: 25.0,
            v0_v: 1.055,
        },
        mechanical: MechanicalConfig {
            encoder_ppr: 1024,
            nominal_freq_hz: 50.0,
            alignment_angle_deg: 90.0,
            min_application_speed_rpm: 0,
            max_application_speed_rpm: 3000,
            speed_unit: SpeedUnit::DeciHz,
        },
        power_stage: PowerStageConfig {
            deadtime_ns: 800,
            trise_ns: 1000,
            tnoise_ns: 1000,
            ton_ns: 500,
            toff_ns: 500,
            max_tntr_ns: 1000,
            adc_sampling_cycles: 6.0,
            adc_trig_conv_latency_cycles: 3.0,
            adc_sar_cycles: 12.5,
            adc_clk_mhz: 42.5,
        },
        features: FeatureConfig::default(),
    }
}

pub(crate) fn reference_config() -> PhysicalConfig {
    let mut drives = Vec::new();
    drives
        .push(reference_drive())
        .expect("capacity for one drive");
    PhysicalConfig {
        board: BoardConfig::default(),
        drives,
    }
}

pub(crate) fn dual_config() -> PhysicalConfig {
    let mut config = reference_config();
    let mut m2 = reference_drive();
    m2.name = "M2".to_string();
    m2.timing.pwm_frequency_hz = 20000;
    m2.electrical.rshunt_ohm = 0.02;
    m2.power_stage.deadtime_ns = 2000;
    config.drives.push(m2).expect("capacity for two drives");
    config
}
