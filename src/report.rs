use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

/// What a finished run looks like, returned by the `done` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RunReport {
    /// Failed assertions, as reported by the engine.
    pub failures: u64,
    /// Assertions, as reported by the engine.
    pub total: u64,
    pub modules: usize,
    pub tests: usize,
    pub duration: Duration,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.passed() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

impl Termination for RunReport {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
