pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod registry;

pub use config::{ConfigKey, ConfigStore};
pub use engine::{EngineMode, EngineStatus, Launcher, MockLauncher, ProcessLauncher};
pub use error::{Error, Result};
pub use registry::{CreatedProject, Project, ProjectRegistry, RunReport};
