//! Integration tests for the `mw` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Two rooms side by side, joined, with a key and a wizard.
const KEEP_SCRIPT: &str = r#"[
    {"event": "tool", "tool": "addLocation"},
    {"event": "click", "x": 60, "y": 30},
    {"event": "tool", "tool": "addLocation"},
    {"event": "click", "x": 460, "y": 30},
    {"event": "tool", "tool": "connect"},
    {"event": "click", "x": 60, "y": 30},
    {"event": "click", "x": 460, "y": 30},
    {"event": "updateLocation", "id": "room_1", "patch": {"id": "gate", "name": "Gate"}},
    {"event": "attachItem", "location": "gate", "id": "brass key"},
    {"event": "attachCharacter", "location": "room_2", "id": "old_wizard"}
]"#;

fn mw() -> Command {
    Command::cargo_bin("mw").unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Replay the keep script into `keep.json` and return its path.
fn keep_module(dir: &TempDir) -> PathBuf {
    let script = write(dir, "keep_script.json", KEEP_SCRIPT);
    let module = dir.path().join("keep.json");
    mw().args(["replay", arg(&script), "-o", arg(&module)])
        .assert()
        .success();
    module
}

// ---------------------------------------------------------------------------
// replay
// ---------------------------------------------------------------------------

#[test]
fn replay_prints_module_to_stdout() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", KEEP_SCRIPT);

    let output = mw().args(["replay", arg(&script)]).output().unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["player"]["location"], "gate");
    assert_eq!(doc["locations"]["gate"]["exits"]["east"], "room_2");
    assert_eq!(doc["locations"]["room_2"]["exits"]["west"], "gate");
    assert_eq!(doc["items"]["brass_key"]["name"], "Brass Key");
    assert_eq!(doc["npcs"]["old_wizard"]["health"], 50);
    assert_eq!(doc["initialized"], false);
}

#[test]
fn replay_reports_refused_events() {
    let dir = TempDir::new().unwrap();
    let script = write(
        &dir,
        "script.json",
        r#"[
            {"event": "tool", "tool": "addLocation"},
            {"event": "click", "x": 60, "y": 30},
            {"event": "tool", "tool": "addLocation"},
            {"event": "click", "x": 460, "y": 30},
            {"event": "tool", "tool": "connect"},
            {"event": "click", "x": 60, "y": 30},
            {"event": "click", "x": 460, "y": 30},
            {"event": "tool", "tool": "connect"},
            {"event": "click", "x": 460, "y": 30},
            {"event": "click", "x": 60, "y": 30}
        ]"#,
    );

    mw().args(["replay", arg(&script)])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("These rooms are already connected.")
                .and(predicate::str::contains("1 refused")),
        );
}

#[test]
fn replay_validate_succeeds_with_warnings() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", KEEP_SCRIPT);

    mw().args(["replay", arg(&script), "--validate"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Module is valid with 1 warning(s).")
                .and(predicate::str::contains("no quests")),
        );
}

#[test]
fn replay_validate_fails_on_empty_map() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", "[]");

    mw().args(["replay", arg(&script), "--validate"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Validation found 2 error(s)")
                .and(predicate::str::contains("'courtyard' does not exist")),
        );
}

#[test]
fn replay_export_writes_module() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", KEEP_SCRIPT);
    let out = dir.path().join("modules");

    mw().args([
        "replay",
        arg(&script),
        "--export",
        "Haunted Keep",
        "--out-dir",
        arg(&out),
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("Exported to:"));

    let written = fs::read_to_string(out.join("haunted_keep.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["player"]["location"], "gate");
}

#[test]
fn replay_rejects_malformed_script() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", r#"[{"event": "teleport"}]"#);

    mw().args(["replay", arg(&script)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn replay_uses_config_fallback_start() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", "[]");
    let config = write(&dir, "mw.toml", "[document]\nfallback_start = \"gatehouse\"\n");

    let output = mw()
        .args(["--config", arg(&config), "replay", arg(&script)])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["player"]["location"], "gatehouse");
    assert_eq!(doc["player"]["visitedLocations"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_replayed_module() {
    let dir = TempDir::new().unwrap();
    let module = keep_module(&dir);

    mw().args(["validate", arg(&module)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Module is valid with 1 warning(s)."));
}

#[test]
fn validate_reports_invalid_json() {
    let dir = TempDir::new().unwrap();
    let module = write(&dir, "broken.json", "not json at all");

    mw().args(["validate", arg(&module)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid JSON"))
        .stderr(predicate::str::contains("is not a valid module"));
}

#[test]
fn validate_reports_dangling_exit() {
    let dir = TempDir::new().unwrap();
    let module = keep_module(&dir);
    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&module).unwrap()).unwrap();
    doc["locations"]["gate"]["exits"]["up"] = "phantom_room".into();
    fs::write(&module, doc.to_string()).unwrap();

    mw().args(["validate", arg(&module)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("phantom_room"));
}

#[test]
fn validate_missing_file() {
    mw().args(["validate", "/nonexistent/module.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_copies_into_out_dir() {
    let dir = TempDir::new().unwrap();
    let module = keep_module(&dir);
    let out = dir.path().join("out");

    mw().args(["export", "Keep", arg(&module), "--out-dir", arg(&out)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to:"));

    assert!(out.join("keep.json").exists());
}

#[test]
fn export_requires_name() {
    let dir = TempDir::new().unwrap();
    let module = keep_module(&dir);
    let out = dir.path().join("out");

    mw().args(["export", "   ", arg(&module), "--out-dir", arg(&out)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a module name."));

    assert!(!out.exists());
}

#[test]
fn export_name_cannot_leave_out_dir() {
    let dir = TempDir::new().unwrap();
    let module = keep_module(&dir);
    let out = dir.path().join("out");

    mw().args(["export", "../escaped", arg(&module), "--out-dir", arg(&out)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid module name"));

    assert!(!dir.path().join("escaped.json").exists());
}

#[test]
fn export_refuses_invalid_module() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", "[]");
    let module = dir.path().join("empty.json");
    mw().args(["replay", arg(&script), "-o", arg(&module)])
        .assert()
        .success();
    let out = dir.path().join("out");

    mw().args(["export", "empty", arg(&module), "--out-dir", arg(&out)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Module has errors"));

    assert!(!out.join("empty.json").exists());
}

// ---------------------------------------------------------------------------
// init-config
// ---------------------------------------------------------------------------

#[test]
fn init_config_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mw.toml");

    mw().args(["init-config", arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("room_width = 120"));
    assert!(text.contains("clear_after_ms = 3000"));
    assert!(text.contains("fallback_start = \"courtyard\""));
}

#[test]
fn init_config_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "mw.toml", "# mine\n");

    mw().args(["init-config", arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    mw().args(["init-config", arg(&path), "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[canvas]"));
}

#[test]
fn bad_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "script.json", "[]");
    let config = write(&dir, "mw.toml", "[canvas]\nroom_width = \"wide\"\n");

    mw().args(["--config", arg(&config), "replay", arg(&script)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// ---------------------------------------------------------------------------
// help / version
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    mw().arg("--help").assert().success().stdout(
        predicate::str::contains("validate")
            .and(predicate::str::contains("export"))
            .and(predicate::str::contains("replay"))
            .and(predicate::str::contains("init-config")),
    );
}

#[test]
fn version_flag() {
    mw().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mw"));
}
