//! Error types for registry and reporter operations.
//!
//! Every error here signals a broken contract between the test engine and the
//! ledger (a name used twice, a test finished that never started), or an output
//! that stopped accepting lines or files. None of them is retried.

use std::io;

use thiserror::Error;

/// Errors returned by [`Registry`](crate::registry::Registry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A module with this name was already started in this run.
    #[error("a module '{name}' already exists in this test suite")]
    DuplicateModule { name: String },

    /// A test with this name already exists in the scope it was added to.
    #[error("a test '{name}' already exists in {}", scope_label(.module))]
    DuplicateTest {
        name: String,
        module: Option<String>,
    },

    /// No test of this name exists anywhere in the registry.
    #[error("the test '{name}' does not exist")]
    TestNotFound { name: String },
}

fn scope_label(module: &Option<String>) -> String {
    match module {
        Some(module) => format!("module '{module}'"),
        None => String::from("this test suite"),
    }
}

impl RegistryError {
    /// Whether this error is a name collision, for modules or tests.
    pub fn is_duplicate_name(&self) -> bool {
        matches!(
            self,
            RegistryError::DuplicateModule { .. } | RegistryError::DuplicateTest { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::TestNotFound { .. })
    }
}

/// Errors returned by [`Reporter`](crate::reporter::Reporter) notifications.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The line sink refused a line, or a report file could not be written.
    #[error("sink error: {0}")]
    Sink(#[from] io::Error),

    /// A JUnit report could not be serialized.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl ReportError {
    pub fn as_registry(&self) -> Option<&RegistryError> {
        match self {
            ReportError::Registry(err) => Some(err),
            ReportError::Sink(_) | ReportError::Xml(_) => None,
        }
    }
}
