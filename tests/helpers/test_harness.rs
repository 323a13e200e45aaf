use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use godot_cli::{ConfigKey, ConfigStore};

/// Temporary config file and projects root.
pub struct TestHarness {
    _dir: TempDir,
    pub root: PathBuf,
    pub config_path: PathBuf,
}

impl TestHarness {
    /// Projects root exists, nothing configured yet.
    pub fn unconfigured() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path().join("projects");
        fs::create_dir(&root).expect("create projects root");
        let config_path = dir.path().join("config").join("config.toml");

        Self {
            _dir: dir,
            root,
            config_path,
        }
    }

    /// `project_dir` points at the root and `godot_exec` at `engine`.
    pub fn configured(engine: &Path) -> Self {
        let harness = Self::unconfigured();
        let mut store = harness.store();
        store
            .set(ConfigKey::ProjectDir, harness.root.to_string_lossy())
            .expect("set project_dir");
        store
            .set(ConfigKey::GodotExec, engine.to_string_lossy())
            .expect("set godot_exec");
        harness
    }

    /// A fresh store over the harness config file.
    pub fn store(&self) -> ConfigStore {
        ConfigStore::at(&self.config_path)
    }

    pub fn project_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
