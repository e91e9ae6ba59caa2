//! End-to-end tests for the `sextant` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const FUNDS: [&str; 7] = ["89996", "88222", "92294", "91821", "90458", "90457", "12305"];

/// Writes a CRSP-style long file covering 24 months for every fund.
fn crsp_file() -> NamedTempFile {
    let mut content = String::from("PERMNO,date,RET\n");
    for (f, permno) in FUNDS.iter().enumerate() {
        for m in 0..24u32 {
            let year = 2020 + m / 12;
            let month = m % 12 + 1;
            let phase = f64::from(m) * 0.7 + f as f64;
            let ret = 0.006 + 0.03 * phase.sin() + 0.004 * (f as f64);
            content.push_str(&format!("{permno},{year}-{month:02}-28,{ret:.6}\n"));
        }
    }

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn toml_config() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
name = "Two Fund"

[[constituents]]
id = 89996
label = "VGT"
weight = 0.6

[[constituents]]
id = 88222
label = "VHT"
weight = 0.4

[benchmark]
id = 12305
label = "VOO"

[metrics]
rolling_window = 6
"#,
    )
    .unwrap();
    file
}

fn sextant() -> Command {
    let mut cmd = Command::cargo_bin("sextant").unwrap();
    cmd.env_remove("SEXTANT_CONFIG").env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// ANALYZE
// =============================================================================

#[test]
fn test_analyze_table_output() {
    let returns = crsp_file();

    sextant()
        .args(["analyze", "--returns"])
        .arg(returns.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance Summary"))
        .stdout(predicate::str::contains("Annual Returns"))
        .stdout(predicate::str::contains("VGT"))
        .stdout(predicate::str::contains("Kolmogorov-Smirnov"));
}

#[test]
fn test_analyze_json_output() {
    let returns = crsp_file();

    let output = sextant()
        .args(["--format", "json", "analyze", "--returns"])
        .arg(returns.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["benchmark_id"], "12305");
    assert_eq!(report["constituents"].as_array().unwrap().len(), 6);
    assert!(report["portfolio"]["summary"]["total_return"].is_number());
    assert_eq!(
        report["portfolio"]["annual_returns"].as_array().unwrap().len(),
        2
    );
}

#[test]
fn test_analyze_csv_output() {
    let returns = crsp_file();

    sextant()
        .args(["--format", "csv", "analyze", "--returns"])
        .arg(returns.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "date,portfolio_return,benchmark_return",
        ))
        .stdout(predicate::str::contains("2021-12-28"));
}

#[test]
fn test_analyze_with_config_file() {
    let returns = crsp_file();
    let config = toml_config();

    sextant()
        .args(["analyze", "--returns"])
        .arg(returns.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Two Fund vs VOO"))
        .stdout(predicate::str::contains("VDE").not());
}

#[test]
fn test_analyze_missing_constituent() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"PERMNO,date,RET\n12305,2020-01-31,0.01\n")
        .unwrap();

    sextant()
        .args(["analyze", "--returns"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("89996"));
}

#[test]
fn test_analyze_missing_column() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"PERMNO,date,PRC\n89996,2020-01-31,10.0\n")
        .unwrap();

    sextant()
        .args(["analyze", "--returns"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column 'RET' not found"));
}

#[test]
fn test_analyze_missing_file() {
    sextant()
        .args(["analyze", "--returns", "does/not/exist.csv"])
        .assert()
        .failure();
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_defaults() {
    sextant()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("VGT"))
        .stdout(predicate::str::contains("VOO"))
        .stdout(predicate::str::contains("built-in defaults"));
}

#[test]
fn test_config_json() {
    let config = toml_config();

    let output = sextant()
        .args(["--format", "json", "config", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Two Fund");
    assert_eq!(value["constituents"][0]["id"], "89996");
    assert_eq!(value["metrics"]["rolling_window"], 6);
}

#[test]
fn test_config_invalid_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"name = \"\"\nconstituents = []\n[benchmark]\nid = \"12305\"\n")
        .unwrap();

    sextant()
        .args(["config", "--config"])
        .arg(file.path())
        .assert()
        .failure();
}
