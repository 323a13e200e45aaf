use std::fs;
use std::path::Path;

use godot_cli::{ConfigKey, EngineMode, Error, MockLauncher, ProjectRegistry};

use crate::helpers::test_harness::TestHarness;

fn names(registry: &ProjectRegistry<'_, MockLauncher>) -> Vec<String> {
    registry
        .list()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[test]
fn test_full_project_lifecycle() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::new());

    let created = registry.create("demo").unwrap();
    assert!(created.status.success());
    assert!(harness.project_path("demo").is_dir());
    assert_eq!(registry.launcher().launch_count(), 1);

    assert_eq!(names(&registry), vec!["demo"]);

    let report = registry.run("demo", 3).unwrap();
    assert_eq!(report.runs(), 3);
    assert!(report.all_succeeded());
    assert_eq!(registry.launcher().launch_count(), 4);

    let modes: Vec<EngineMode> = registry
        .launcher()
        .invocations()
        .iter()
        .map(|i| i.mode)
        .collect();
    assert_eq!(
        modes,
        vec![EngineMode::Init, EngineMode::Run, EngineMode::Run, EngineMode::Run]
    );

    registry.delete("demo").unwrap();
    assert!(!harness.project_path("demo").exists());
    assert!(names(&registry).is_empty());
}

#[test]
fn test_second_create_fails_and_leaves_original() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::new());

    registry.create("demo").unwrap();
    let marker = harness.project_path("demo").join("main.gd");
    fs::write(&marker, "extends Node").unwrap();

    let err = registry.create("demo").unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(&marker).unwrap(), "extends Node");
    assert_eq!(registry.launcher().launch_count(), 1);
    assert_eq!(names(&registry), vec!["demo"]);
}

#[test]
fn test_second_delete_is_not_found() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::new());

    registry.create("demo").unwrap();
    registry.delete("demo").unwrap();

    let err = registry.delete("demo").unwrap_err();
    assert!(matches!(err, Error::NotFound { ref name } if name == "demo"));
}

#[test]
fn test_run_rejects_non_positive_counts_without_launching() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    fs::create_dir(harness.project_path("demo")).unwrap();
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::new());

    for count in [0, -1] {
        let err = registry.run("demo", count).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "count {count}");
    }
    assert_eq!(registry.launcher().launch_count(), 0);
}

#[test]
fn test_run_reports_every_status() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    fs::create_dir(harness.project_path("demo")).unwrap();
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::with_exit_codes([1, 0, 2, 0]));

    let report = registry.run("demo", 4).unwrap();
    let codes: Vec<Option<i32>> = report.statuses.iter().map(|s| s.code).collect();
    assert_eq!(codes, vec![Some(1), Some(0), Some(2), Some(0)]);
    assert_eq!(report.failures(), 2);
    assert!(!report.all_succeeded());
}

#[test]
fn test_operations_need_project_dir() {
    let harness = TestHarness::unconfigured();
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::new());

    assert!(matches!(
        registry.list(),
        Err(Error::ConfigMissing {
            key: ConfigKey::ProjectDir
        })
    ));
    assert!(matches!(
        registry.delete("demo"),
        Err(Error::ConfigMissing { .. })
    ));
}

#[test]
fn test_open_and_run_need_godot_exec() {
    let harness = TestHarness::unconfigured();
    let mut store = harness.store();
    store
        .set(ConfigKey::ProjectDir, harness.root.to_string_lossy())
        .unwrap();
    fs::create_dir(harness.project_path("demo")).unwrap();

    let registry = ProjectRegistry::new(&store, MockLauncher::new());
    assert!(matches!(
        registry.open("demo"),
        Err(Error::ConfigMissing {
            key: ConfigKey::GodotExec
        })
    ));
    assert!(matches!(
        registry.run("demo", 1),
        Err(Error::ConfigMissing { .. })
    ));

    // list and delete only need project_dir
    assert_eq!(names(&registry), vec!["demo"]);
    registry.delete("demo").unwrap();
}

#[test]
fn test_invalid_names_never_touch_disk() {
    let harness = TestHarness::configured(Path::new("/usr/bin/godot"));
    let store = harness.store();
    let registry = ProjectRegistry::new(&store, MockLauncher::new());

    for name in ["", "../outside", "a/b"] {
        assert!(matches!(
            registry.create(name),
            Err(Error::InvalidName { .. })
        ));
    }
    assert!(names(&registry).is_empty());
    assert_eq!(registry.launcher().launch_count(), 0);
}
