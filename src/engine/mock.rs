use std::cell::RefCell;
use std::collections::VecDeque;

use super::launcher::{EngineStatus, Invocation, Launcher};

/// Launcher that records invocations instead of starting processes.
///
/// Returns queued exit codes in order, then exit code 0.
#[derive(Debug, Default)]
pub struct MockLauncher {
    invocations: RefCell<Vec<Invocation>>,
    exit_codes: RefCell<VecDeque<i32>>,
    fail_to_start: bool,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue exit codes for the next launches.
    pub fn with_exit_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            exit_codes: RefCell::new(codes.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Every launch fails as if the executable were missing.
    pub fn failing_to_start() -> Self {
        Self {
            fail_to_start: true,
            ..Self::default()
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    pub fn launch_count(&self) -> usize {
        self.invocations.borrow().len()
    }
}

impl Launcher for MockLauncher {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<EngineStatus> {
        if self.fail_to_start {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "mock engine not found",
            ));
        }

        self.invocations.borrow_mut().push(invocation.clone());
        let code = self.exit_codes.borrow_mut().pop_front().unwrap_or(0);
        Ok(EngineStatus::from_code(code))
    }
}
