use std::time::Duration;

/// The counters of a finished test or module, handed to `on_done` hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Completion {
    pub name: String,
    /// The owning module, always `None` for modules themselves.
    pub module: Option<String>,
    pub failures: u64,
    pub total: u64,
    pub total_time: Duration,
}

impl Completion {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    pub fn failed(&self) -> bool {
        !self.passed()
    }
}

/// Whether a failure count fits into its assertion total.
///
/// The engine is trusted, callers only log a violation.
pub(crate) fn consistent(failures: u64, total: u64) -> bool {
    failures <= total
}
