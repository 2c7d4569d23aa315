use std::time::{Duration, Instant};

use indexmap::{IndexMap, map::Entry};

use crate::{
    compose::{DONE, Hook, Surface},
    error::RegistryError,
    outcome::{self, Completion},
    test::Test,
};

/// A named group of tests, opened by `moduleStart` and closed by `moduleDone`.
///
/// A module owns its tests. Every test stored here points back to this module
/// by name.
#[derive(Debug)]
pub struct Module {
    name: String,
    failures: u64,
    total: u64,
    started: Instant,
    total_time: Duration,
    tests: IndexMap<String, Test>,
    surface: Surface<String, Completion>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: 0,
            total: 0,
            started: Instant::now(),
            total_time: Duration::ZERO,
            tests: IndexMap::new(),
            surface: Surface::new().with_hook(DONE, Hook::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    pub fn total_time_ms(&self) -> u128 {
        self.total_time.as_millis()
    }

    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    /// The hook called with the final counters once the module is done.
    pub fn on_done(&mut self) -> &mut Hook<Completion> {
        self.surface.hook_entry(DONE)
    }

    /// Named data and hooks attached to this module.
    pub fn surface(&self) -> &Surface<String, Completion> {
        &self.surface
    }

    /// Compose `source` onto this module's surface.
    ///
    /// A `done` hook in `source` is layered over the existing one. Data never
    /// replaces an existing member.
    pub fn extend(&mut self, source: Surface<String, Completion>) -> &mut Self {
        self.surface.compose(source);
        self
    }

    /// Take ownership of `test` and bind it to this module.
    pub fn add_test(&mut self, mut test: Test) -> Result<&mut Test, RegistryError> {
        match self.tests.entry(test.name().to_owned()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateTest {
                name: entry.key().clone(),
                module: Some(self.name.clone()),
            }),
            Entry::Vacant(entry) => {
                test.set_module(self.name.as_str());
                Ok(entry.insert(test))
            }
        }
    }

    pub fn test(&self, name: &str) -> Option<&Test> {
        self.tests.get(name)
    }

    pub(crate) fn test_mut(&mut self, name: &str) -> Option<&mut Test> {
        self.tests.get_mut(name)
    }

    pub(crate) fn remove_test(&mut self, name: &str) -> Option<Test> {
        self.tests.shift_remove(name)
    }

    pub fn has_test(&self, name: &str) -> bool {
        self.tests.contains_key(name)
    }

    /// Tests in the order they were added.
    pub fn tests(&self) -> impl ExactSizeIterator<Item = &Test> {
        self.tests.values()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub(crate) fn set_results(&mut self, failures: u64, total: u64) {
        if !outcome::consistent(failures, total) {
            tracing::warn!(module = %self.name, failures, total, "module reports more failures than assertions");
        }
        self.failures = failures;
        self.total = total;
    }

    /// Stop the clock for this module.
    ///
    /// Calling this twice overwrites the measured time.
    pub fn done(&mut self) {
        self.total_time = self.started.elapsed();
        self.surface.call(DONE, &self.completion());
    }

    pub fn completion(&self) -> Completion {
        Completion {
            name: self.name.clone(),
            module: None,
            failures: self.failures,
            total: self.total,
            total_time: self.total_time,
        }
    }
}
