use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::ReportError, formatter, module::Module, registry::Registry};

/// One plain text file per module, named `TEST-<module>.txt`.
///
/// Each file holds the module's status lines around the result line of every
/// test in it.
#[derive(Debug, Clone, Copy)]
pub struct PlainReport<'r> {
    registry: &'r Registry,
}

impl<'r> PlainReport<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// The file name for `module`. Characters that are unsafe in file names are
    /// replaced by `_`.
    pub fn file_name(module: &Module) -> String {
        let name: String = module
            .name()
            .chars()
            .map(|c| match c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                true => c,
                false => '_',
            })
            .collect();
        format!("TEST-{name}.txt")
    }

    pub fn lines(module: &Module) -> Vec<String> {
        let mut lines = Vec::with_capacity(module.len() * 2 + 2);
        lines.push(formatter::module_started_line(module.name()));
        for test in module.tests() {
            lines.push(formatter::test_finished_line(test));
            lines.push(formatter::test_completed_line(test));
        }
        lines.push(formatter::module_completed_line(module));
        lines
    }

    /// Write one file per module into `dir`, which has to exist.
    ///
    /// Returns the written paths in module order.
    pub fn write_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ReportError> {
        let dir = dir.as_ref();
        self.registry
            .modules()
            .map(|module| -> Result<PathBuf, ReportError> {
                let path = dir.join(Self::file_name(module));
                let mut contents = Self::lines(module).join("\n");
                contents.push('\n');
                fs::write(&path, contents)?;
                tracing::debug!(path = %path.display(), "plain report written");
                Ok(path)
            })
            .collect()
    }
}
