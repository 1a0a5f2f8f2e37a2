// End-to-end tests of the simtrace binary against the fixture logs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/powertcp")
}

fn simtrace() -> Command {
    Command::cargo_bin("simtrace").unwrap()
}

// ============================================================================
// One-off subcommands
// ============================================================================

#[test]
fn test_diff_text_summary() {
    let dir = fixtures();
    simtrace()
        .arg("diff")
        .arg(dir.join("result_burst_prob0/result-hpcc.burst"))
        .arg(dir.join("result_burst_prob100/result-hpcc.burst"))
        .args(["--start", "0.13", "--end", "0.35", "--label", "hpcc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("burst_diff"))
        .stdout(predicate::str::contains("hpcc (result-hpcc - result-hpcc)"))
        .stdout(predicate::str::contains("6 pts"))
        .stdout(predicate::str::contains("[-7250.000, 5250.000]"));
}

#[test]
fn test_diff_csv_output() {
    let dir = fixtures();
    simtrace()
        .args(["--format", "csv", "diff"])
        .arg(dir.join("result_burst_prob0/result-hpcc.burst"))
        .arg(dir.join("result_burst_prob100/result-hpcc.burst"))
        .args(["--start", "0.13", "--end", "0.35"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("series,x,y\n"))
        .stdout(predicate::str::contains(",0\n"));
}

#[test]
fn test_diff_missing_baseline_degenerates() {
    // An absent baseline counts as zero bytes sent, so the difference is the
    // treatment counter itself
    let dir = fixtures();
    simtrace()
        .arg("diff")
        .arg(dir.join("does-not-exist.burst"))
        .arg(dir.join("result_burst_prob100/result-hpcc.burst"))
        .args(["--start", "0.13", "--end", "0.35", "--label", "hpcc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 pts"))
        .stdout(predicate::str::contains("[1000.000, 15000.000]"))
        .stderr(predicate::str::contains("log absent"));
}

#[test]
fn test_cdf_missing_file_fails() {
    simtrace()
        .arg("cdf")
        .arg(fixtures().join("does-not-exist.buf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No output produced"));
}

#[test]
fn test_diff_inverted_window_fails() {
    let dir = fixtures();
    simtrace()
        .arg("diff")
        .arg(dir.join("result_burst_prob0/result-hpcc.burst"))
        .arg(dir.join("result_burst_prob100/result-hpcc.burst"))
        .args(["--start", "0.35", "--end", "0.13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time window"));
}

#[test]
fn test_workload_json_output() {
    let output = simtrace()
        .args(["--format", "json", "workload"])
        .arg(fixtures().join("result-powerInt.burst"))
        .args(["--start", "0.149", "--end", "0.154"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let figure = &value["figures"][0];
    assert_eq!(figure["id"], "result-powerInt_normalized");
    assert_eq!(figure["y2_label"], "Qlen (KB)");
    assert_eq!(figure["series"][0]["points"].as_array().unwrap().len(), 5);
    assert_eq!(figure["series"][1]["axis"], "secondary");
    assert_eq!(figure["series"][1]["points"][2][1], 1500.0);
}

#[test]
fn test_scatter_filters_port() {
    simtrace()
        .args(["--format", "csv", "scatter"])
        .arg(fixtures().join("result-powerInt.pkt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("sport 10000,0,9.5"))
        .stdout(predicate::str::contains("sport 10000,2,12"))
        .stdout(predicate::str::contains("sport 10000,16,25"))
        .stdout(predicate::str::contains(",4,13").not());
}

#[test]
fn test_scatter_unknown_port_fails() {
    simtrace()
        .arg("scatter")
        .arg(fixtures().join("result-powerInt.pkt"))
        .args(["--sport", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cdf_skips_short_lines() {
    simtrace()
        .args(["--format", "csv", "cdf"])
        .arg(fixtures().join("result-hpcc-0.8-0-0.buf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("result-hpcc-0.8-0-0,0,0.25"))
        .stdout(predicate::str::contains("result-hpcc-0.8-0-0,1,0.5"))
        .stdout(predicate::str::contains("result-hpcc-0.8-0-0,2,0.75"))
        .stdout(predicate::str::contains("result-hpcc-0.8-0-0,4,1"));
}

// ============================================================================
// Experiment runs
// ============================================================================

#[test]
fn test_run_default_experiment_partial_fixtures() {
    let output = simtrace()
        .args(["--format", "json", "run", "--base-dir"])
        .arg(fixtures())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value["figures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "plot_all",
            "result-powerInt_normalized",
            "rtt_qlen_scatter",
            "cdf_plot_7g",
        ]
    );

    // Two workload logs and five .buf files are absent. The missing
    // powerInt/powerDelay burst pairs degrade to flat zero series instead.
    assert_eq!(value["skipped"].as_array().unwrap().len(), 2 + 5);
    assert_eq!(value["figures"][0]["series"].as_array().unwrap().len(), 3);
}

#[test]
fn test_run_writes_output_dir() {
    let out = TempDir::new().unwrap();
    simtrace()
        .args(["--format", "csv", "--output-dir"])
        .arg(out.path())
        .args(["run", "--base-dir"])
        .arg(fixtures())
        .assert()
        .success()
        .stdout(predicate::str::contains("plot_all.csv"))
        .stderr(predicate::str::contains("skipped"));

    for name in [
        "plot_all.csv",
        "result-powerInt_normalized.csv",
        "rtt_qlen_scatter.csv",
        "cdf_plot_7g.csv",
    ] {
        let content = fs::read_to_string(out.path().join(name)).unwrap();
        assert!(content.starts_with("series,x,y\n"), "{}", name);
    }
    assert!(!out.path().join("cdf_plot_7h.csv").exists());
}

#[test]
fn test_run_custom_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("experiment.toml");
    fs::write(
        &config,
        r#"
[[cdf]]
id = "only_cdf"
inputs = [{ label = "HPCC", path = "result-hpcc-0.8-0-0.buf" }]
"#,
    )
    .unwrap();

    simtrace()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--base-dir")
        .arg(fixtures())
        .assert()
        .success()
        .stdout(predicate::str::contains("only_cdf - Buffer Occupancy CDF"))
        .stdout(predicate::str::contains("HPCC"));
}

#[test]
fn test_run_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[[cdf]]\nid = \"x\"\ninputs = []\n").unwrap();

    simtrace()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("lists no inputs"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    simtrace()
        .args(["--debug", "cdf"])
        .arg(fixtures().join("result-hpcc-0.8-0-0.buf"))
        .assert()
        .success()
        .stderr(predicate::str::contains("figure produced"));
}
