//! Integration test: the `mcconv` binary.

use std::fs;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_mcconv");
const PROFILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config/profile.toml");

#[test]
fn renders_json_to_stdout() {
    let output = Command::new(BIN)
        .args([PROFILE, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["board"]["internal_supply_voltage"], 19859);
    assert_eq!(value["drives"][0]["pwm"]["pwm_period_cycles"], 10625);
    assert_eq!(value["drives"][0]["pwm"]["dead_time"]["band"], "direct");
}

#[test]
fn writes_header_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parameters.h");
    let status = Command::new(BIN)
        .args([PROFILE, "--format", "header", "--output"])
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());

    let header = fs::read_to_string(&path).unwrap();
    assert!(header.contains("#ifndef MCCONV_ACIM_G431_H"));
    assert!(header.contains("#define CURRENT_CONV_FACTOR_M1 993"));
}

#[test]
fn invalid_profile_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    let profile = fs::read_to_string(PROFILE)
        .unwrap()
        .replace("pwm_frequency_hz = 16000", "pwm_frequency_hz = 0");
    fs::write(&path, profile).unwrap();

    let output = Command::new(BIN).arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_profile_exits_with_failure() {
    let output = Command::new(BIN)
        .arg("/nonexistent/profile.toml")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
