//! Runs the built binary with `true`/`false` standing in for the engine.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::helpers::test_harness::TestHarness;

fn system_binary(name: &str) -> Option<PathBuf> {
    ["/usr/bin", "/bin"]
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|path| path.is_file())
}

fn godot_cli(harness: &TestHarness, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_godot-cli"))
        .arg("--config")
        .arg(&harness.config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run godot-cli")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_config_get_set_exit_codes() {
    let Some(engine) = system_binary("true") else {
        return;
    };
    let harness = TestHarness::unconfigured();
    let engine = engine.to_string_lossy().into_owned();

    let out = godot_cli(&harness, &["config", "get", "godot_exec"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "\n");

    let out = godot_cli(&harness, &["config", "set", "godot_exec", &engine]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));

    let out = godot_cli(&harness, &["config", "get", "godot_exec"]);
    assert_eq!(stdout(&out).trim(), engine);

    let out = godot_cli(&harness, &["config", "get", "editor"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown config entry"));

    let out = godot_cli(&harness, &["config", "set", "editor", "x"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_project_scenario() {
    let Some(engine) = system_binary("true") else {
        return;
    };
    let harness = TestHarness::configured(&engine);

    let out = godot_cli(&harness, &["new", "demo"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert!(harness.project_path("demo").join("project.godot").is_file());

    let out = godot_cli(&harness, &["list"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "demo\n");

    let out = godot_cli(&harness, &["run", "demo", "3"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));

    let out = godot_cli(&harness, &["run", "demo", "0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("at least 1"));

    let out = godot_cli(&harness, &["run", "demo", "-1"]);
    assert_eq!(out.status.code(), Some(1));

    let out = godot_cli(&harness, &["open", "demo"]);
    assert_eq!(out.status.code(), Some(0));

    let out = godot_cli(&harness, &["create", "demo"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("already exists"));

    let out = godot_cli(&harness, &["delete", "demo"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    assert!(!harness.project_path("demo").exists());

    let out = godot_cli(&harness, &["list"]);
    assert_eq!(stdout(&out), "");

    let out = godot_cli(&harness, &["remove", "demo"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("not found"));
}

#[test]
fn test_failing_engine() {
    let Some(engine) = system_binary("false") else {
        return;
    };
    let harness = TestHarness::configured(&engine);

    let out = godot_cli(&harness, &["new", "broken"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(harness.project_path("broken").is_dir());
    assert!(stderr(&out).contains("left in place"));

    let out = godot_cli(&harness, &["open", "broken"]);
    assert_eq!(out.status.code(), Some(1));

    let out = godot_cli(&harness, &["run", "broken", "2"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("2 of 2 run(s) failed"));
}

#[test]
fn test_missing_config_and_project() {
    let harness = TestHarness::unconfigured();

    let out = godot_cli(&harness, &["list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("project_dir"));

    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    let out = godot_cli(&harness, &["open", "ghost"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("not found"));
}

#[test]
fn test_list_json() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    std::fs::create_dir(harness.project_path("alpha")).unwrap();

    let out = godot_cli(&harness, &["list", "--json"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("\"name\": \"alpha\""));
}

#[test]
fn test_argument_errors_exit_with_one() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));

    let out = godot_cli(&harness, &["run", "demo", "abc"]);
    assert_eq!(out.status.code(), Some(1));

    let out = godot_cli(&harness, &["config", "get"]);
    assert_eq!(out.status.code(), Some(1));

    let out = godot_cli(&harness, &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("Usage"));

    let out = godot_cli(&harness, &["--version"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn test_piped_output_is_not_colored() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));

    let out = godot_cli(&harness, &["open", "ghost"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("error: "));
    assert!(!stderr(&out).contains('\x1b'));

    let out = godot_cli(&harness, &["--force-color", "open", "ghost"]);
    assert!(stderr(&out).contains('\x1b'));

    let out = godot_cli(&harness, &["--no-color", "config"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(!stdout(&out).contains('\x1b'));
    assert!(stdout(&out).contains("location:"));
}
