//! Project values and name validation.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Engine project file written into new projects.
pub const MANIFEST_FILE: &str = "project.godot";

/// A project directory under the projects root.
///
/// Built fresh from a directory listing for every operation; the directory
/// name is the project's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Directory base name
    pub name: String,
    /// `project_dir` joined with `name`
    pub path: PathBuf,
}

impl Project {
    pub(crate) fn new(root: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: root.join(name),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    /// Whether the directory holds a `project.godot` file.
    pub fn is_initialized(&self) -> bool {
        self.manifest_path().is_file()
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reject names that are empty, non-ASCII, or could escape the projects root.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(Error::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name == "." || name == ".." {
        return invalid("name refers to a special directory");
    }
    if name.contains(['/', '\\']) {
        return invalid("name contains a path separator");
    }
    if name.contains('\0') {
        return invalid("name contains a NUL character");
    }
    if !name.is_ascii() {
        return invalid("name contains non-ASCII characters");
    }
    Ok(())
}

/// Minimal `project.godot` naming the project.
pub(crate) fn manifest_contents(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("config_version=5\n\n[application]\n\nconfig/name=\"{}\"\n", escaped)
}
