//! Project lifecycle operations over the configured projects root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::project::{manifest_contents, validate_name, Project};
use crate::config::{ConfigKey, ConfigStore};
use crate::engine::{EngineMode, EngineStatus, Invocation, Launcher};
use crate::error::{Error, Result};

/// Result of [`ProjectRegistry::create`].
#[derive(Debug, Clone)]
pub struct CreatedProject {
    pub project: Project,
    /// Status of the engine's initialization run. A failure here leaves the
    /// directory in place.
    pub status: EngineStatus,
}

/// Per-run statuses of [`ProjectRegistry::run`], in launch order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub project: Project,
    pub statuses: Vec<EngineStatus>,
}

impl RunReport {
    pub fn runs(&self) -> usize {
        self.statuses.len()
    }

    /// Number of runs that did not exit with code 0.
    pub fn failures(&self) -> usize {
        self.statuses.iter().filter(|s| !s.success()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures() == 0
    }
}

/// Projects are the subdirectories of `project_dir`; there is no manifest of
/// its own, so every call looks at the filesystem again.
pub struct ProjectRegistry<'a, L> {
    config: &'a ConfigStore,
    launcher: L,
}

impl<'a, L: Launcher> ProjectRegistry<'a, L> {
    pub fn new(config: &'a ConfigStore, launcher: L) -> Self {
        Self { config, launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// The projects root. Must already exist as a directory.
    pub fn root(&self) -> Result<PathBuf> {
        let root = PathBuf::from(self.config.require(ConfigKey::ProjectDir)?);
        if !root.is_dir() {
            return Err(Error::ProjectRootUnavailable { path: root });
        }
        debug!("Using project directory {:?}", root);
        Ok(root)
    }

    /// The engine executable from `godot_exec`.
    pub fn engine(&self) -> Result<PathBuf> {
        self.config
            .require(ConfigKey::GodotExec)
            .map(PathBuf::from)
    }

    /// All projects, sorted by name.
    pub fn list(&self) -> Result<Vec<Project>> {
        let root = self.root()?;
        let mut projects = Vec::new();

        for entry in fs::read_dir(&root).map_err(|e| Error::io(&root, e))? {
            let entry = entry.map_err(|e| Error::io(&root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => projects.push(Project::new(&root, name)),
                None => debug!("Skipping non UTF-8 directory {:?}", entry.path()),
            }
        }

        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    /// Look up an existing project.
    pub fn get(&self, name: &str) -> Result<Project> {
        validate_name(name)?;
        let project = Project::new(&self.root()?, name);
        if !project.path.is_dir() {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        Ok(project)
    }

    /// Create `project_dir/name`, write a `project.godot` and let the engine
    /// import it.
    pub fn create(&self, name: &str) -> Result<CreatedProject> {
        validate_name(name)?;
        let root = self.root()?;
        let engine = self.engine()?;

        if let Some(existing) = find_entry_ignoring_case(&root, name)? {
            return Err(Error::AlreadyExists { name: existing });
        }

        let project = Project::new(&root, name);
        fs::create_dir(&project.path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::AlreadyExists {
                name: name.to_string(),
            },
            _ => Error::io(&project.path, e),
        })?;
        info!("Created project directory {:?}", project.path);

        let manifest = project.manifest_path();
        fs::write(&manifest, manifest_contents(name)).map_err(|e| Error::io(&manifest, e))?;

        let status = self.launch(&engine, EngineMode::Init, &project)?;
        if !status.success() {
            warn!(
                "Engine initialization of '{}' failed with {}; directory left in place",
                name, status
            );
        }

        Ok(CreatedProject { project, status })
    }

    /// Open a project in the editor and wait for the editor to close.
    pub fn open(&self, name: &str) -> Result<EngineStatus> {
        let project = self.get(name)?;
        let engine = self.engine()?;
        self.launch(&engine, EngineMode::Edit, &project)
    }

    /// Run a project `count` times, one process after another.
    ///
    /// A failing run does not stop the following ones. A run that cannot be
    /// started at all aborts the whole operation.
    pub fn run(&self, name: &str, count: i64) -> Result<RunReport> {
        if count < 1 {
            return Err(Error::InvalidArgument(format!(
                "run count must be at least 1, got {}",
                count
            )));
        }
        let project = self.get(name)?;
        let engine = self.engine()?;

        let mut statuses = Vec::new();
        for i in 1..=count {
            debug!("Run {}/{} of '{}'", i, count, name);
            statuses.push(self.launch(&engine, EngineMode::Run, &project)?);
        }

        Ok(RunReport { project, statuses })
    }

    /// Recursively delete a project directory.
    pub fn delete(&self, name: &str) -> Result<Project> {
        let project = self.get(name)?;
        fs::remove_dir_all(&project.path).map_err(|e| Error::io(&project.path, e))?;
        info!("Deleted project '{}' at {:?}", name, project.path);
        Ok(project)
    }

    fn launch(&self, engine: &Path, mode: EngineMode, project: &Project) -> Result<EngineStatus> {
        let invocation = Invocation::new(engine, mode, &project.path);
        self.launcher
            .launch(&invocation)
            .map_err(|source| Error::ExternalProcess {
                program: engine.to_path_buf(),
                source,
            })
    }
}

/// Name of an entry in `root` equal to `name` ignoring ASCII case.
fn find_entry_ignoring_case(root: &Path, name: &str) -> Result<Option<String>> {
    for entry in fs::read_dir(root).map_err(|e| Error::io(root, e))? {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        if let Some(existing) = entry.file_name().to_str() {
            if existing.eq_ignore_ascii_case(name) {
                return Ok(Some(existing.to_string()));
            }
        }
    }
    Ok(None)
}
