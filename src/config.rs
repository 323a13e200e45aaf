//! Persistent configuration store.
//!
//! The store holds two entries, `godot_exec` and `project_dir`, in a TOML
//! file in the platform configuration directory:
//! - Linux: `~/.config/godot-cli/config.toml`
//! - macOS: `~/Library/Application Support/org.godot-cli.godot-cli/config.toml`
//! - Windows: `C:\Users\<User>\AppData\Roaming\godot-cli\godot-cli\config\config.toml`
//!
//! ```toml
//! godot_exec = "/usr/bin/godot"
//! project_dir = "/home/user/godot"
//!
//! [logging]
//! file = true
//! ```
//!
//! The file is read lazily on first access and cached for the lifetime of the
//! [`ConfigStore`]. Writes go through a temporary file and a rename so readers
//! never see a half-written file.

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{Error, Result};

const CONFIG_FILE: &str = "config.toml";
pub(crate) const APP_QUALIFIER: &str = "org";
pub(crate) const APP_ORGANIZATION: &str = "godot-cli";
pub(crate) const APP_NAME: &str = "godot-cli";

/// The fixed set of config entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Path to the engine executable
    GodotExec,
    /// Directory containing projects
    ProjectDir,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::GodotExec, ConfigKey::ProjectDir];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GodotExec => "godot_exec",
            Self::ProjectDir => "project_dir",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GodotExec => "path to the engine executable",
            Self::ProjectDir => "directory containing projects",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "godot_exec" => Ok(Self::GodotExec),
            "project_dir" => Ok(Self::ProjectDir),
            other => Err(Error::UnknownKey {
                key: other.to_string(),
            }),
        }
    }
}

/// On-disk layout of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub godot_exec: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<String>,

    #[serde(default, skip_serializing_if = "LoggingConfig::is_default")]
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::GodotExec => self.godot_exec.as_deref(),
            ConfigKey::ProjectDir => self.project_dir.as_deref(),
        }
    }

    fn slot(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key {
            ConfigKey::GodotExec => &mut self.godot_exec,
            ConfigKey::ProjectDir => &mut self.project_dir,
        }
    }
}

/// Logging settings, the `[logging]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to a rolling file
    #[serde(default)]
    pub file: bool,

    /// Write logs to stderr (filtered by `RUST_LOG`, default warn)
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// Level for the file log
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory (defaults to the platform data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// hourly, daily, minutely or never
    #[serde(default = "default_rotation")]
    pub rotation: String,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            stderr: default_true(),
            level: default_level(),
            directory: None,
            rotation: default_rotation(),
            file_prefix: default_file_prefix(),
        }
    }
}

impl LoggingConfig {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "debug".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_file_prefix() -> String {
    "godot-cli.log".to_string()
}

/// Handle to the config file. Created once in `main` and passed by reference
/// to everything that needs configuration.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    settings: OnceCell<Settings>,
}

impl ConfigStore {
    /// Path of the config file in the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(Error::NoPlatformConfigDir)
    }

    /// Store backed by the platform default location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(Self::default_path()?))
    }

    /// Store backed by an explicit file. Nothing is read until first access.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded settings, reading the file on first call.
    pub fn settings(&self) -> Result<&Settings> {
        if let Some(settings) = self.settings.get() {
            return Ok(settings);
        }
        let loaded = self.load()?;
        Ok(self.settings.get_or_init(|| loaded))
    }

    pub fn get(&self, key: ConfigKey) -> Result<Option<String>> {
        Ok(self.settings()?.get(key).map(str::to_string))
    }

    /// Value of a required entry; unset and empty both count as missing.
    pub fn require(&self, key: ConfigKey) -> Result<String> {
        match self.settings()?.get(key) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(Error::ConfigMissing { key }),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        info!("Setting config entry '{}' to {:?}", key, value);
        self.update(|settings| *settings.slot(key) = Some(value))
    }

    pub fn unset(&mut self, key: ConfigKey) -> Result<()> {
        info!("Clearing config entry '{}'", key);
        self.update(|settings| *settings.slot(key) = None)
    }

    /// Reset the whole file to defaults without reading it first.
    pub fn clear(&mut self) -> Result<()> {
        info!("Resetting config at {:?}", self.path);
        let settings = Settings::default();
        self.persist(&settings)?;
        self.settings = OnceCell::from(settings);
        Ok(())
    }

    /// Logging section, or defaults when the file cannot be read.
    pub fn logging(&self) -> LoggingConfig {
        self.settings()
            .map(|settings| settings.logging.clone())
            .unwrap_or_default()
    }

    fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        let mut next = self.settings()?.clone();
        f(&mut next);
        self.persist(&next)?;
        self.settings = OnceCell::from(next);
        Ok(())
    }

    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            debug!("No config at {:?}, using defaults", self.path);
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let settings = toml::from_str(&content).map_err(|source| Error::ParseConfig {
            path: self.path.clone(),
            source,
        })?;
        debug!("Loaded config from {:?}", self.path);
        Ok(settings)
    }

    fn persist(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let content = toml::to_string_pretty(settings)?;

        // Write to a temporary file first, then rename over the real one
        let temp_path = self.path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;
        file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| Error::io(&self.path, e))?;

        debug!("Saved config to {:?}", self.path);
        Ok(())
    }
}
