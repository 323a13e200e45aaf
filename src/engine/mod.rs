//! Invocation of the external engine executable.
//!
//! The registry never spawns processes itself: it builds an [`Invocation`] and
//! hands it to a [`Launcher`]. [`ProcessLauncher`] runs it as a blocking child
//! process; [`MockLauncher`] records it for tests.

mod launcher;
mod mock;

pub use launcher::{EngineMode, EngineStatus, Invocation, Launcher, ProcessLauncher};
pub use mock::MockLauncher;
