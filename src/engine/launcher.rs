use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// What the engine is asked to do with a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Import a freshly created project and exit
    Init,
    /// Open the project in the editor
    Edit,
    /// Run the project's main scene
    Run,
}

impl EngineMode {
    /// Engine flags placed before `--path <project>`.
    pub fn flags(self) -> &'static [&'static str] {
        match self {
            Self::Init => &["--headless", "--editor", "--quit"],
            Self::Edit => &["--editor"],
            Self::Run => &[],
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Edit => write!(f, "edit"),
            Self::Run => write!(f, "run"),
        }
    }
}

/// A single engine process to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub working_dir: PathBuf,
    pub args: Vec<OsString>,
    pub mode: EngineMode,
}

impl Invocation {
    /// `<program> <mode flags> --path <project>`, run from inside the project.
    pub fn new(program: impl Into<PathBuf>, mode: EngineMode, project: &Path) -> Self {
        let mut args: Vec<OsString> = mode.flags().iter().map(OsString::from).collect();
        args.push("--path".into());
        args.push(project.as_os_str().to_os_string());

        Self {
            program: program.into(),
            working_dir: project.to_path_buf(),
            args,
            mode,
        }
    }
}

/// Exit status of a finished engine process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl EngineStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for EngineStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Starts an engine process and blocks until it exits.
///
/// An `Err` means the process could not be started. A process that started
/// and exited non-zero is an `Ok` with a failing [`EngineStatus`].
pub trait Launcher {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<EngineStatus>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<EngineStatus> {
        (**self).launch(invocation)
    }
}

/// Runs the engine as a child process inheriting stdio. No timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<EngineStatus> {
        debug!(
            "Launching {:?} {:?} in {:?}",
            invocation.program, invocation.args, invocation.working_dir
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .status()?;

        debug!("Engine ({} mode) finished with {:?}", invocation.mode, status);
        Ok(status.into())
    }
}
