//! CLI contract tests
//!
//! Runs the built binary against report text in isolated temp directories
//! to verify chart output, summary formats, input validation messages and
//! exit codes.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const REPORT: &str = "\
IP Address      Crit  High  Med  Low  Info  Total
192.168.1.101   35    143   29   3    0     210
192.168.1.102   2     10    4    1    7     24
";

fn vapt_bin() -> &'static str {
    env!("CARGO_BIN_EXE_vapt-chart")
}

/// Command with config and env isolated to `home`
fn command(home: &Path) -> Command {
    let mut cmd = Command::new(vapt_bin());
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("VAPT_CHART_OUTPUT_DIR")
        .env_remove("VAPT_CHART_SCALE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_report(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("report.txt");
    std::fs::write(&path, content).unwrap();
    path
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run vapt-chart");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_writes_named_png() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = command(dir.path())
        .args(["generate", "--name", "Coral Pearl", "--scale", "1", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let png = dir.path().join("Coral_Pearl_PI_CHART.png");
    let bytes = std::fs::read(&png).expect("chart written");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert!(stdout(&out).contains("CORAL PEARL"));
    assert!(stderr(&out).contains("Generated for Coral Pearl"));
}

#[test]
fn test_generate_json_totals() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "--no-chart", "--format", "json", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(v["counts"]["critical"], 37);
    assert_eq!(v["counts"]["high"], 153);
    assert_eq!(v["counts"]["medium"], 33);
    assert_eq!(v["counts"]["low"], 4);
    assert_eq!(v["data_rows"], 2);
    assert_eq!(v["skipped_rows"], 1);
    assert!(!dir.path().join("Coral_Pearl_PI_CHART.png").exists());
}

#[test]
fn test_generate_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let mut cmd = command(dir.path());
    cmd.args(["generate", "-n", "Sea Star", "--scale", "1"]);
    let out = run_with_stdin(cmd, "10.0.0.1 1 2 3 4\n10.0.0.2 5 6 7 8\n");

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(dir.path().join("Sea_Star_PI_CHART.png").exists());
}

#[test]
fn test_generate_output_dir_created() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out_dir = dir.path().join("charts/nested");
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "--scale", "1", "-i"])
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(out_dir.join("Coral_Pearl_PI_CHART.png").exists());
}

#[test]
fn test_generate_output_dir_from_env() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out_dir = dir.path().join("from-env");
    let out = command(dir.path())
        .env("VAPT_CHART_OUTPUT_DIR", &out_dir)
        .env("VAPT_CHART_SCALE", "1")
        .args(["generate", "-n", "Coral Pearl", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(out_dir.join("Coral_Pearl_PI_CHART.png").exists());
}

#[test]
fn test_generate_report_file() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let report = dir.path().join("summary.html");
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "--no-chart", "-f", "html", "-i"])
        .arg(&input)
        .arg("--report")
        .arg(&report)
        .output()
        .unwrap();

    assert!(out.status.success());
    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.contains("<svg"));
    assert!(html.contains("<td>Critical</td><td>37</td>"));
}

#[test]
fn test_report_file_gets_format_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "--no-chart", "-f", "md", "-i"])
        .arg(&input)
        .arg("--report")
        .arg(dir.path().join("summary"))
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let md = std::fs::read_to_string(dir.path().join("summary.md")).unwrap();
    assert!(md.starts_with("# CORAL PEARL"));
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn test_missing_name_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = command(dir.path())
        .args(["generate", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Please enter a Vessel Name"));
}

#[test]
fn test_missing_data_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), "");
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Please paste the report data"));
}

#[test]
fn test_whitespace_data_warns_no_valid_data() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), " \n ");
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("No valid data found. Check your copy-paste format."));
    assert!(!err.contains("Please paste the report data"));
}

#[test]
fn test_padded_name_kept_in_file_name() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = command(dir.path())
        .args(["generate", "--name", " Coral Pearl ", "--scale", "1", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(dir.path().join("_Coral_Pearl__PI_CHART.png").exists());
    assert!(!dir.path().join("Coral_Pearl_PI_CHART.png").exists());
}

#[test]
fn test_no_valid_data_warns_without_chart() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), "IP Crit High Med Low\nnot a data row\n");
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("No valid data found. Check your copy-paste format."));
    assert!(!dir.path().join("Coral_Pearl_PI_CHART.png").exists());
}

#[test]
fn test_fail_on_critical_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "--scale", "1", "--fail-on", "critical", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    // Chart is still produced before the threshold check
    assert!(dir.path().join("Coral_Pearl_PI_CHART.png").exists());
}

#[test]
fn test_fail_on_not_triggered() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), "h 0 0 0 4\n");
    let out = command(dir.path())
        .args(["generate", "-n", "Coral Pearl", "--no-chart", "--fail-on", "medium", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
}

// ============================================================================
// totals / version
// ============================================================================

#[test]
fn test_totals_text() {
    let dir = TempDir::new().unwrap();
    let input = write_report(dir.path(), "10.0.0.1 1 2 3 4\n10.0.0.2 5 6 7 8\n");
    let out = command(dir.path())
        .args(["totals", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<Vec<&str>> = text.lines().map(|l| l.split_whitespace().collect()).collect();
    assert_eq!(
        lines,
        vec![
            vec!["Critical", "6"],
            vec!["High", "8"],
            vec!["Medium", "10"],
            vec!["Low", "12"],
        ]
    );
}

#[test]
fn test_totals_json_from_stdin() {
    let dir = TempDir::new().unwrap();
    let mut cmd = command(dir.path());
    cmd.args(["totals", "--json"]);
    let out = run_with_stdin(cmd, "10.0.0.1 1 x 3 4\n10.0.0.2 1 2 3\n");

    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(v["totals"]["critical"], 0);
    assert_eq!(v["data_rows"], 0);
    assert_eq!(v["skipped_rows"], 2);
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let out = command(dir.path()).arg("version").output().unwrap();
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("vapt-chart "));
}
