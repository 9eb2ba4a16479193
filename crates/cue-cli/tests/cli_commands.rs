#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INTRO: &str = r#"{
    "Commands": [
        {"CommandName": "ShowDialog", "Parameters": {"character": "Bob", "text": "Hi there", "position": "Left"}},
        {"CommandName": "SwitchScene", "Parameters": {"sceneName": "Level2"}},
        {"CommandName": "ShowDialog", "Parameters": {"character": "Alice", "text": "He said \"hi\"", "position": "Right"}}
    ]
}
"#;

/// Create a temp directory with a valid script.
fn test_scripts() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("intro.json"), INTRO).unwrap();
    dir
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn cue() -> Command {
    Command::cargo_bin("cue").unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_directory() {
    let dir = test_scripts();
    cue()
        .args(["check", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("intro.json")
                .and(predicate::str::contains("3 commands"))
                .and(predicate::str::contains("All checks passed")),
        );
}

#[test]
fn check_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", r#"{"Commands":[{"CommandName":"X","Parameters":{}}"#);

    cue()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("unexpected end of input")
                .and(predicate::str::contains("1 of 1 scripts failed")),
        );
}

#[test]
fn check_reports_unresolved_parameters() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "partial.json",
        r#"{"Commands":[{"CommandName":"ShowDialog","Parameters":{"character":"Bob","text":"Hi"}}]}"#,
    );

    cue()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Commands[0].Parameters")
                .and(predicate::str::contains("no variant of BaseParameters")),
        );
}

#[test]
fn check_empty_dir() {
    let dir = TempDir::new().unwrap();
    cue()
        .args(["check", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scripts found"));
}

#[test]
fn check_unknown_command_fails_unless_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "fade.json",
        r#"{"Commands":[{"CommandName":"Fade","Parameters":{"sceneName":"x"}}]}"#,
    );

    cue()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command: Fade"));

    cue()
        .args(["check", "--skip-unknown", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 commands"));
}

#[test]
fn check_ignore_extra_keys_flag() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "extra.json",
        r#"{"Commands":[{"CommandName":"SwitchScene","Parameters":{"sceneName":"A","fade":1}}]}"#,
    );

    cue().args(["check", path.to_str().unwrap()]).assert().failure();
    cue()
        .args(["check", "--ignore-extra-keys", path.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn check_continues_past_unreadable_file() {
    let dir = test_scripts();
    let missing = dir.path().join("missing.json");
    let intro = dir.path().join("intro.json");

    cue()
        .args(["check", missing.to_str().unwrap(), intro.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("intro.json").and(predicate::str::contains("3 commands")))
        .stderr(
            predicate::str::contains("cannot read")
                .and(predicate::str::contains("1 of 2 scripts failed")),
        );
}

#[test]
fn check_warns_on_raw_control_characters() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "tab.json",
        "{\"Commands\":[{\"CommandName\":\"SwitchScene\",\"Parameters\":{\"sceneName\":\"A\tB\"}}]}",
    );

    cue()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stderr(predicate::str::contains("raw control character"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_lists_resolved_variants() {
    let dir = test_scripts();
    cue()
        .args(["show", dir.path().join("intro.json").to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ShowDialogParameters")
                .and(predicate::str::contains("SwitchSceneParameters"))
                .and(predicate::str::contains("sceneName=Level2"))
                .and(predicate::str::contains("3 commands")),
        );
}

#[test]
fn show_marks_unknown_commands() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "fade.json",
        r#"{"Commands":[{"CommandName":"Fade","Parameters":{"sceneName":"x"}}]}"#,
    );
    cue()
        .args(["show", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fade (unknown)"));
}

#[test]
fn show_missing_file() {
    cue()
        .args(["show", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// dump
// ---------------------------------------------------------------------------

#[test]
fn dump_reserializes_with_declared_names() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "lower.json",
        r#"{"commands":[{"commandname":"SwitchScene","parameters":{"SCENENAME":"Level2"}}]}"#,
    );
    cue()
        .args(["dump", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"Commands":[{"CommandName":"SwitchScene","Parameters":{"sceneName":"Level2"}}]}"#,
        ));
}

#[test]
fn dump_keeps_escaped_quotes() {
    let dir = test_scripts();
    cue()
        .args(["dump", dir.path().join("intro.json").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""text":"He said \"hi\"""#));
}

#[test]
fn dump_pretty() {
    let dir = test_scripts();
    cue()
        .args(["dump", "--pretty", dir.path().join("intro.json").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("  \"Commands\": [\n"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_prints_stage_events() {
    let dir = test_scripts();
    cue()
        .args(["run", dir.path().join("intro.json").to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hi there")
                .and(predicate::str::contains("Level2"))
                .and(predicate::str::contains("3 commands executed")),
        );
}

#[test]
fn run_verbose_logs_to_stderr() {
    let dir = test_scripts();
    cue()
        .args(["run", "-v", dir.path().join("intro.json").to_str().unwrap()])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(
            predicate::str::contains("executing_command")
                .and(predicate::str::contains("execution_complete")),
        );
}

#[test]
fn run_mismatched_parameters_fails() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "mismatch.json",
        r#"{"Commands":[{"CommandName":"ShowDialog","Parameters":{"sceneName":"Level2"}}]}"#,
    );
    cue()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "command ShowDialog expects ShowDialogParameters, found SwitchSceneParameters",
        ));
}

// ---------------------------------------------------------------------------
// schema
// ---------------------------------------------------------------------------

#[test]
fn schema_lists_variants() {
    cue()
        .arg("schema")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("BaseParameters")
                .and(predicate::str::contains("character, text, position"))
                .and(predicate::str::contains("SwitchScene"))
                .and(predicate::str::contains("No shape conflicts")),
        );
}
