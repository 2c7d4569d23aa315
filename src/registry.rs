//! The hierarchical ledger of modules and tests.
//!
//! The registry keeps every module and test of a run, in the order they were
//! created, and tracks which module is current. New tests land in the current
//! module, or in the top-level scope when no module is current.
//!
//! Scope transitions:
//!
//! | state         | operation                  | next state       |
//! |---------------|----------------------------|------------------|
//! | any           | `add_module(Some(name))`   | `InModule(name)` |
//! | any           | `add_module(None)`         | `NoModule`       |
//! | `InModule(_)` | `release_current_module`   | `NoModule`       |
//! | `NoModule`    | `release_current_module`   | `NoModule`       |
//!
//! Starting a module while another is current does not release the previous
//! one. It stays in the registry with its clock still running.

use indexmap::{IndexMap, map::Entry};

use crate::{error::RegistryError, module::Module, test::Test};

pub use crate::formatter::format_results;

#[derive(Debug, Default)]
pub struct Registry {
    modules: IndexMap<String, Module>,
    tests: IndexMap<String, Test>,
    current_module: Option<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a module and make it current.
    ///
    /// `None` only clears the current module, without releasing it.
    pub fn add_module(&mut self, name: Option<&str>) -> Result<(), RegistryError> {
        let Some(name) = name else {
            if let Some(previous) = self.current_module.take() {
                tracing::debug!(module = %previous, "left module scope without release");
            }
            return Ok(());
        };

        match self.modules.entry(name.to_owned()) {
            Entry::Occupied(_) => {
                return Err(RegistryError::DuplicateModule {
                    name: name.to_owned(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(Module::new(name));
            }
        }

        if let Some(previous) = self.current_module.replace(name.to_owned()) {
            tracing::warn!(
                module = %previous,
                next = %name,
                "module was never released before the next one started"
            );
        }
        tracing::debug!(module = %name, "module started");
        Ok(())
    }

    /// Record the results of the current module, stop its clock and leave its
    /// scope. Does nothing when no module is current.
    ///
    /// Returns the released module.
    pub fn release_current_module(&mut self, failures: u64, total: u64) -> Option<&Module> {
        let name = self.current_module.take()?;

        match self.modules.get_mut(&name) {
            Some(module) => {
                module.set_results(failures, total);
                module.done();
                tracing::debug!(module = %name, failures, total, "module released");
                Some(&*module)
            }
            None => {
                tracing::warn!(module = %name, "current module is not registered");
                None
            }
        }
    }

    /// Undo [`add_module`](Self::add_module) and restore `previous` as the
    /// current module.
    pub(crate) fn discard_module(&mut self, name: &str, previous: Option<String>) {
        self.modules.shift_remove(name);
        self.current_module = previous;
        tracing::debug!(module = %name, "module discarded");
    }

    /// Create a test in the current scope.
    pub fn add_test(&mut self, name: &str) -> Result<&mut Test, RegistryError> {
        let test = Test::new(name);

        if let Some(current) = &self.current_module
            && let Some(module) = self.modules.get_mut(current)
        {
            tracing::debug!(test = %name, module = %current, "test started");
            return module.add_test(test);
        }

        match self.tests.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateTest {
                name: name.to_owned(),
                module: None,
            }),
            Entry::Vacant(entry) => {
                tracing::debug!(test = %name, "top-level test started");
                Ok(entry.insert(test))
            }
        }
    }

    /// Undo [`add_test`](Self::add_test) for a test of the current scope.
    pub(crate) fn discard_test(&mut self, name: &str) -> Option<Test> {
        tracing::debug!(test = %name, "test discarded");
        if let Some(current) = &self.current_module
            && let Some(module) = self.modules.get_mut(current)
        {
            return module.remove_test(name);
        }
        self.tests.shift_remove(name)
    }

    /// Record the results of a test and stop its clock.
    ///
    /// The test is resolved like [`test`](Self::test) does, so the caller does
    /// not need to know in which scope it lives.
    pub fn release_test(
        &mut self,
        name: &str,
        failures: u64,
        total: u64,
    ) -> Result<&Test, RegistryError> {
        let test = self
            .test_mut(name)
            .ok_or_else(|| RegistryError::TestNotFound {
                name: name.to_owned(),
            })?;

        test.set_results(failures, total);
        test.done();
        tracing::debug!(test = %name, failures, total, "test released");
        Ok(&*test)
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(name)
    }

    /// Look a test up by name.
    ///
    /// Top-level tests win, then modules are searched in creation order and the
    /// first match is returned.
    pub fn test(&self, name: &str) -> Option<&Test> {
        self.tests
            .get(name)
            .or_else(|| self.modules.values().find_map(|module| module.test(name)))
    }

    pub fn test_mut(&mut self, name: &str) -> Option<&mut Test> {
        if let Some(test) = self.tests.get_mut(name) {
            return Some(test);
        }
        self.modules
            .values_mut()
            .find_map(|module| module.test_mut(name))
    }

    pub fn current_module(&self) -> Option<&Module> {
        self.modules.get(self.current_module.as_deref()?)
    }

    pub fn current_module_name(&self) -> Option<&str> {
        self.current_module.as_deref()
    }

    /// The module owning `test`, if any.
    pub fn module_of(&self, test: &Test) -> Option<&Module> {
        self.modules.get(test.module()?)
    }

    /// Modules in creation order.
    pub fn modules(&self) -> impl ExactSizeIterator<Item = &Module> {
        self.modules.values()
    }

    /// Top-level tests in creation order.
    pub fn tests(&self) -> impl ExactSizeIterator<Item = &Test> {
        self.tests.values()
    }

    /// Every test, top-level ones first, then each module's in creation order.
    pub fn all_tests(&self) -> impl Iterator<Item = &Test> {
        self.tests
            .values()
            .chain(self.modules.values().flat_map(Module::tests))
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn test_count(&self) -> usize {
        self.tests.len() + self.modules.values().map(Module::len).sum::<usize>()
    }
}
