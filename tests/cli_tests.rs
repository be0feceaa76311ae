//! End-to-end runs of the `cpe2csv` binary: exit codes and the process log.
//!
//! Run with: `cargo test --test cli_tests`

#![cfg(feature = "cli")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn cpe2csv(input: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cpe2csv"));
    cmd.arg(input).env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("cpe2csv binary should start")
}

fn process_logs(log_dir: &Path) -> Vec<PathBuf> {
    let mut logs: Vec<PathBuf> = fs::read_dir(log_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.starts_with("process_") && name.ends_with(".log")
        })
        .collect();
    logs.sort();
    logs
}

#[test]
fn process_log_records_each_outcome() {
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("comprobantes");
    let out = work.path().join("reportes");
    let logs = work.path().join("logs");
    fs::create_dir(&input).unwrap();
    fs::copy(
        fixtures_dir().join("20123456789-01-F001-123.xml"),
        input.join("20123456789-01-F001-123.xml"),
    )
    .unwrap();
    fs::write(input.join("FACTURA_rota.xml"), "<Invoice><cbc:ID>").unwrap();

    let output = run(cpe2csv(&input)
        .arg("--output_dir")
        .arg(&out)
        .arg("--log_dir")
        .arg(&logs));

    // per-file failures do not fail the run
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Converted:           1"), "{stdout}");
    assert!(stdout.contains("Errors:              1"), "{stdout}");

    let log_files = process_logs(&logs);
    assert_eq!(log_files.len(), 1);
    let log = fs::read_to_string(&log_files[0]).unwrap();
    assert!(log.contains("failed to process document"), "{log}");
    assert!(log.contains("FACTURA_rota.xml"), "{log}");
    assert!(log.contains("document processed"), "{log}");
    assert!(log.contains("4af73951501F001123"), "{log}");
    assert!(!log.contains('\x1b'), "log file must be plain text");

    let reports = fs::read_dir(&out).unwrap().count();
    assert_eq!(reports, 8);
}

#[test]
fn quiet_log_keeps_errors_only() {
    let work = tempfile::tempdir().unwrap();
    let logs = work.path().join("logs");
    fs::write(work.path().join("FACTURA_rota.xml"), "<Invoice>").unwrap();

    let output = run(cpe2csv(work.path())
        .arg("--output_dir")
        .arg(work.path().join("out"))
        .arg("--log_dir")
        .arg(&logs)
        .arg("-q"));

    assert!(output.status.success(), "{output:?}");
    let log = fs::read_to_string(&process_logs(&logs)[0]).unwrap();
    assert!(log.contains("failed to process document"), "{log}");
    assert!(!log.contains("conversion started"), "{log}");
}

#[test]
fn missing_input_directory_exits_2() {
    let work = tempfile::tempdir().unwrap();
    let output = run(cpe2csv(&work.path().join("no-existe"))
        .arg("--output_dir")
        .arg(work.path().join("out"))
        .arg("--log_dir")
        .arg(work.path().join("logs")));

    assert_eq!(output.status.code(), Some(2), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input directory"), "{stderr}");
}

#[test]
fn unusable_output_directory_exits_3() {
    let work = tempfile::tempdir().unwrap();
    let blocker = work.path().join("out");
    fs::write(&blocker, b"").unwrap();

    let output = run(cpe2csv(work.path())
        .arg("--output_dir")
        .arg(&blocker)
        .arg("--log_dir")
        .arg(work.path().join("logs")));

    assert_eq!(output.status.code(), Some(3), "{output:?}");
}

#[test]
fn invalid_configuration_exits_1() {
    let work = tempfile::tempdir().unwrap();
    let logs = work.path().join("logs");

    let output = run(cpe2csv(work.path())
        .arg("--log_dir")
        .arg(&logs)
        .args(["--delimiter", "¦"]));
    assert_eq!(output.status.code(), Some(1), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("delimiter"));

    let config = work.path().join("cpe2csv.toml");
    fs::write(&config, "timestamp_format = \"%Y/%m\"\n").unwrap();
    let output = run(cpe2csv(work.path())
        .arg("--config")
        .arg(&config)
        .arg("--log_dir")
        .arg(&logs));
    assert_eq!(output.status.code(), Some(1), "{output:?}");
    // rejected before any log file is created
    assert!(!logs.exists());
}
