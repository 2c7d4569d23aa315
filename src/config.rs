/// Output settings of a [`Reporter`](crate::Reporter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterConfig {
    prefix: Option<String>,
    top_level_tests: bool,
    summary: bool,
    module_lines: bool,
    test_lines: bool,
}

impl ReporterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `prefix` and a space in front of every emitted line.
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        ReporterConfig {
            prefix: Some(prefix.into()),
            ..self
        }
    }

    /// Also list top-level tests in the final report, after all modules.
    ///
    /// Off by default, the final report then only lists tests that ran inside a
    /// module.
    pub fn with_top_level_tests(self, top_level_tests: bool) -> Self {
        ReporterConfig {
            top_level_tests,
            ..self
        }
    }

    /// Close the final report with a line telling whether anything failed.
    pub fn with_summary(self, summary: bool) -> Self {
        ReporterConfig { summary, ..self }
    }

    /// Announce every module when it starts and summarize it when it is done.
    pub fn with_module_lines(self, module_lines: bool) -> Self {
        ReporterConfig {
            module_lines,
            ..self
        }
    }

    /// Summarize every test when it is done.
    pub fn with_test_lines(self, test_lines: bool) -> Self {
        ReporterConfig { test_lines, ..self }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn top_level_tests(&self) -> bool {
        self.top_level_tests
    }

    pub fn summary(&self) -> bool {
        self.summary
    }

    pub fn module_lines(&self) -> bool {
        self.module_lines
    }

    pub fn test_lines(&self) -> bool {
        self.test_lines
    }

    pub(crate) fn decorate(&self, line: String) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix} {line}"),
            None => line,
        }
    }
}
