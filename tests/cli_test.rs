//! Integration tests for the appversion binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn appversion(install_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("appversion"));
    cmd.current_dir(install_dir.path());
    cmd.env_remove("APPVERSION_INSTALL_DIR");
    cmd.env_remove("APPVERSION_UPDATE_CHANNEL");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("appversion"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Print the application version"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("appversion"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_local_outside_git_prints_release() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appversion(&temp)
        .arg("local")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))));
    Ok(())
}

#[test]
fn cli_install_dir_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("appversion"));
    cmd.env_remove("APPVERSION_INSTALL_DIR");
    cmd.args(["local", "--install-dir"]).arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_commit_json_outside_git() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = appversion(&temp).args(["commit", "--json"]).output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(json["sha"].is_null());
    assert!(json["date"].is_null());
    assert!(json["branch"].is_null());
    Ok(())
}

#[test]
fn cli_report_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = appversion(&temp)
        .args(["report", "--json", "--offline"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["local"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["source_controlled"], false);
    assert_eq!(json["database_server"], "Not Connected");
    assert_eq!(json["database"]["last"], "Not Connected");
    Ok(())
}

#[test]
fn cli_default_is_text_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appversion(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains("Not Connected"));
    Ok(())
}

#[test]
fn cli_reads_config_from_install_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("appversion.yml"),
        "rrdtool: /nonexistent/rrdtool\nsnmpget: /nonexistent/snmpget\n",
    )?;

    let output = appversion(&temp)
        .args(["report", "--json", "--offline"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["rrdtool"], "");
    assert_eq!(json["net_snmp"], "");
    Ok(())
}

#[test]
fn cli_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appversion(&temp)
        .args(["local", "--config", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("appversion.yml"), "rrdtool: [unclosed\n")?;
    appversion(&temp)
        .arg("local")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}
