//! Error taxonomy shared by the config store and the project registry.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigKey;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A config entry name outside the known set.
    #[error("unknown config entry '{key}' (expected one of: godot_exec, project_dir)")]
    UnknownKey { key: String },

    /// A config entry the operation needs has not been set.
    #[error("config entry '{key}' is not set; use 'godot-cli config set {key} <value>'")]
    ConfigMissing { key: ConfigKey },

    /// A value rejected by `config set` validation.
    #[error("invalid value for '{key}': {reason}")]
    InvalidConfigValue { key: ConfigKey, reason: String },

    /// `project_dir` is set but does not point at an existing directory.
    #[error("project directory {path:?} does not exist or is not a directory")]
    ProjectRootUnavailable { path: PathBuf },

    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("project '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("project '{name}' not found")]
    NotFound { name: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine process could not be started at all.
    #[error("failed to start engine {program:?}: {source}")]
    ExternalProcess {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
