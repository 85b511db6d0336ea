//! Process-level tests: exit statuses and the output around a run.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn amr(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_amr"))
        .args(args)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("RUST_LOG")
        .output()
        .expect("run amr")
}

#[test]
fn missing_source_exits_255_with_usage() {
    let home = tempdir().unwrap();
    let out = amr(home.path(), &["--output", "mirror"]);
    assert_eq!(out.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage: amr"), "stderr: {}", stderr);
    assert!(stderr.contains("--source"));
}

#[test]
fn no_arguments_exits_255() {
    let home = tempdir().unwrap();
    let out = amr(home.path(), &[]);
    assert_eq!(out.status.code(), Some(255));
}

#[test]
fn empty_types_exits_255_before_scanning() {
    let home = tempdir().unwrap();
    // The source does not exist: scanning it would fail with status 1 instead.
    let missing = home.path().join("no-such-source");
    let out = amr(
        home.path(),
        &[
            "--source",
            missing.to_str().unwrap(),
            "--output",
            "mirror",
            "--types",
            " , ",
        ],
    );
    assert_eq!(out.status.code(), Some(255));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("Scanning"), "stdout: {}", stdout);
}

#[test]
fn unparseable_concurrency_exits_255() {
    let home = tempdir().unwrap();
    let out = amr(home.path(), &["-s", "a", "-o", "b", "-c", "lots"]);
    assert_eq!(out.status.code(), Some(255));
}

#[test]
fn help_exits_0() {
    let home = tempdir().unwrap();
    let out = amr(home.path(), &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--concurrency"));
}

#[test]
fn empty_source_tree_completes() {
    let home = tempdir().unwrap();
    let source = tempdir().unwrap();
    let output = tempdir().unwrap();
    let out = amr(
        home.path(),
        &[
            "-s",
            source.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
        ],
    );
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Fetching 0 URLs..."), "stdout: {}", stdout);
    assert!(stdout.contains("Done: 0; Errors: 0"));
}

#[test]
fn unreadable_source_exits_1() {
    let home = tempdir().unwrap();
    let missing = home.path().join("no-such-source");
    let out = amr(
        home.path(),
        &["-s", missing.to_str().unwrap(), "-o", "mirror"],
    );
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn broken_config_file_exits_255() {
    let home = tempdir().unwrap();
    let cfg = home.path().join("bad.toml");
    std::fs::write(&cfg, "concurrency = \"many\"").unwrap();
    let out = amr(
        home.path(),
        &["-s", "a", "-o", "b", "--config", cfg.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(255));
}

#[test]
fn protected_host_failure_exits_255_without_further_fetches() {
    let home = tempdir().unwrap();
    let source = tempdir().unwrap();
    let output = tempdir().unwrap();
    // Nothing listens on port 80 of these loopback addresses; the first one is protected.
    std::fs::write(
        source.path().join("page.html"),
        "<img src=\"//127.0.0.1/x.png\"> //127.0.0.2/y.png\n//127.0.0.3/z.png\n",
    )
    .unwrap();
    let out = amr(
        home.path(),
        &[
            "-s",
            source.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--protect",
            "127.0.0.1",
            "-c",
            "1",
        ],
    );
    assert_eq!(out.status.code(), Some(255));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("Fetching 3 URLs..."), "stdout: {}", stdout);
    assert!(
        stderr.contains("Fatal error fetching URL: http://127.0.0.1/x.png"),
        "stderr: {}",
        stderr
    );
    assert!(!stdout.contains("Mirrored URL:"), "stdout: {}", stdout);
    assert!(!stderr.contains("Error fetching URL:"), "stderr: {}", stderr);
    assert!(stdout.contains("Done: 0; Errors: 0"), "stdout: {}", stdout);
}
