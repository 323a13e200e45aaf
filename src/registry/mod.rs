//! Project registry.
//!
//! A project is a directory directly under the configured `project_dir`.
//! The registry keeps no state of its own: listing, lookup and existence
//! checks all read the filesystem, and engine work is delegated to a
//! [`Launcher`](crate::engine::Launcher).
//!
//! ```text
//!   ABSENT --create--> PRESENT --delete--> ABSENT
//!                      open / run (PRESENT only)
//! ```

mod project;
mod projects;

pub use project::{validate_name, Project, MANIFEST_FILE};
pub use projects::{CreatedProject, ProjectRegistry, RunReport};
