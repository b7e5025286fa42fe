//! Integration tests for the effcharts binary.
//!
//! These tests invoke the built binary as a subprocess against fixture runs
//! written into temporary directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn effcharts_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_effcharts"))
}

fn run(args: &[&str]) -> Output {
    Command::new(effcharts_binary())
        .args(args)
        .output()
        .expect("failed to execute effcharts")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "effcharts failed (exit={:?}):\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

/// A run with two iterations of yabro and chrome working-set samples.
fn write_performance_run(dir: &Path) {
    fs::write(
        dir.join("Performance.csv"),
        "Id,Test,Iteration,Browser,Date,Kind,Set,Measure,Result\n\
         0,newtab,0,yabro,x,y,memSet,WorkingSet browser.exe,100\n\
         1,newtab,1,yabro,x,y,memSet,WorkingSet browser.exe,110\n\
         2,newtab,0,chrome,x,y,memSet,WorkingSet chrome.exe,120\n\
         3,newtab,1,chrome,x,y,memSet,WorkingSet chrome.exe,130\n\
         4,newtab,0,chrome,x,y,unknownSet,Handles chrome.exe,7\n",
    )
    .unwrap();
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn report_writes_charts_and_sidecars() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_performance_run(input.path());

    let result = run(&[
        "report",
        "--input",
        path_str(input.path()),
        "--output",
        path_str(output.path()),
        "--json",
    ]);
    assert_success(&result);

    let aggregate = output.path().join("memSet WorkingSet  newtab");
    assert!(aggregate.with_extension("png").is_file());
    let iterations = output.path().join("memSet WorkingSet  newtab by iterations.png");
    assert!(iterations.is_file());

    let png = fs::read(aggregate.with_extension("png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let sidecar = fs::read_to_string(aggregate.with_extension("json")).unwrap();
    assert!(sidecar.contains("browser.exe (105.00)"), "{sidecar}");
    assert!(sidecar.contains("chrome.exe (125.00)"), "{sidecar}");
    assert!(
        sidecar.contains("Bad vs chrome.exe (smaller is better) diff 16% (20.00)"),
        "{sidecar}"
    );

    // Sets without a renderer produce nothing.
    let names: Vec<String> = fs::read_dir(output.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().all(|n| !n.starts_with("unknownSet")), "{names:?}");
}

#[test]
fn report_defaults_output_to_input() {
    let input = tempfile::tempdir().unwrap();
    write_performance_run(input.path());

    let result = run(&["-q", "report", "--input", path_str(input.path())]);
    assert_success(&result);
    assert!(input.path().join("memSet WorkingSet  newtab.png").is_file());
    assert!(!input.path().join("memSet WorkingSet  newtab.json").exists());
}

#[test]
fn config_file_changes_baseline() {
    let input = tempfile::tempdir().unwrap();
    write_performance_run(input.path());
    fs::write(input.path().join("effcharts.toml"), "baseline = \"chrome.exe\"\n").unwrap();

    let result = run(&["report", "--input", path_str(input.path()), "--json"]);
    assert_success(&result);

    let sidecar = fs::read_to_string(input.path().join("memSet WorkingSet  newtab.json")).unwrap();
    assert!(
        sidecar.contains("Good vs browser.exe (smaller is better) diff 19% (20.00)"),
        "{sidecar}"
    );
}

#[test]
fn failing_source_sets_exit_code() {
    let input = tempfile::tempdir().unwrap();
    write_performance_run(input.path());
    fs::write(input.path().join("chrome_0_srum_x.csv"), "").unwrap();

    let result = run(&["report", "--input", path_str(input.path())]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("srum"), "{stderr}");
    // The healthy source still ran.
    assert!(input.path().join("memSet WorkingSet  newtab.png").is_file());
}

#[test]
fn report_reads_socwatch_directory() {
    let input = tempfile::tempdir().unwrap();
    let socwatch = input.path().join("socwatch");
    fs::create_dir(&socwatch).unwrap();
    for (short, process, duration) in [("yabro", "browser.exe", "800.00"), ("chrome", "chrome.exe", "1000.00")] {
        fs::write(
            socwatch.join(format!("{short}_newtab_0_socwatch_20180120_224843.csv")),
            format!(
                "Processes by Platform Busy Duration,\n\
                 Rank,Process Name (PID),CPU % (Platform),Duration in ms (Platform),CPU % (Logical),Duration in ms (Logical),CSwitches From Idle (per sec),\n\
                 1,{process} (1164),6.12,{duration},1.66,0,0,\n"
            ),
        )
        .unwrap();
    }

    let result = run(&["report", "--input", path_str(input.path()), "--json"]);
    assert_success(&result);

    let chart = input.path().join("socwatch Duration in ms (Platform) newtab");
    assert!(chart.with_extension("png").is_file());
    let sidecar = fs::read_to_string(chart.with_extension("json")).unwrap();
    assert!(
        sidecar.contains("Bad vs chrome.exe (smaller is better) diff 20% (200.00)"),
        "{sidecar}"
    );
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = run(&["report", "--input", path_str(&dir.path().join("missing"))]);
    assert!(!result.status.success());
}

#[test]
fn compare_merges_same_named_charts() {
    let left = tempfile::tempdir().unwrap();
    let right = tempfile::tempdir().unwrap();
    let merged = tempfile::tempdir().unwrap();
    write_performance_run(left.path());
    write_performance_run(right.path());
    assert_success(&run(&["report", "--input", path_str(left.path())]));
    assert_success(&run(&["report", "--input", path_str(right.path())]));

    let result = run(&[
        "compare",
        "--left",
        path_str(left.path()),
        "--right",
        path_str(right.path()),
        "--output",
        path_str(merged.path()),
    ]);
    assert_success(&result);

    let out = merged.path().join("memSet WorkingSet  newtab.png");
    let bytes = fs::read(out).unwrap();
    // IHDR width is the big-endian u32 at byte 16.
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    assert_eq!(width, 2048);
}
