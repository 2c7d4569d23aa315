use std::{io, time::Duration};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use crate::{error::ReportError, formatter::format_results, registry::Registry, test::Test};

/// A JUnit style XML report.
///
/// Every module becomes a `<testsuite>` and every test in it a `<testcase>`. A
/// test with failures carries a `<failure>` element with its counts. Top-level
/// tests belong to no module and are left out, unless
/// [`with_top_level_suite`](Self::with_top_level_suite) names a suite for them.
#[derive(Debug, Clone)]
pub struct JunitReport<'r> {
    registry: &'r Registry,
    top_level_suite: Option<String>,
}

struct Suite<'a> {
    name: &'a str,
    time: Duration,
    tests: Vec<&'a Test>,
}

impl<'r> JunitReport<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            top_level_suite: None,
        }
    }

    /// Collect top-level tests into a trailing suite called `name`.
    pub fn with_top_level_suite(self, name: impl Into<String>) -> Self {
        JunitReport {
            top_level_suite: Some(name.into()),
            ..self
        }
    }

    pub fn write_to<W: io::Write>(&self, target: W) -> Result<W, ReportError> {
        let suites = self.suites();
        let tests: usize = suites.iter().map(|suite| suite.tests.len()).sum();
        let failures = suites
            .iter()
            .flat_map(|suite| &suite.tests)
            .filter(|test| !test.passed())
            .count();

        let mut writer = Writer::new_with_indent(target, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("testsuites");
        root.push_attribute(("tests", tests.to_string().as_str()));
        root.push_attribute(("failures", failures.to_string().as_str()));
        writer.write_event(Event::Start(root))?;
        for suite in &suites {
            write_suite(&mut writer, suite)?;
        }
        writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

        tracing::debug!(suites = suites.len(), tests, failures, "junit report written");
        Ok(writer.into_inner())
    }

    pub fn to_xml(&self) -> Result<String, ReportError> {
        let bytes = self.write_to(Vec::new())?;
        String::from_utf8(bytes)
            .map_err(|err| ReportError::Sink(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    fn suites(&self) -> Vec<Suite<'_>> {
        let mut suites: Vec<_> = self
            .registry
            .modules()
            .map(|module| Suite {
                name: module.name(),
                time: module.total_time(),
                tests: module.tests().collect(),
            })
            .collect();

        if let Some(name) = &self.top_level_suite
            && self.registry.tests().len() > 0
        {
            let tests: Vec<_> = self.registry.tests().collect();
            suites.push(Suite {
                name: name.as_str(),
                time: tests.iter().map(|test| test.total_time()).sum(),
                tests,
            });
        }
        suites
    }
}

fn write_suite<W: io::Write>(writer: &mut Writer<W>, suite: &Suite<'_>) -> Result<(), ReportError> {
    let failures = suite.tests.iter().filter(|test| !test.passed()).count();

    let mut start = BytesStart::new("testsuite");
    start.push_attribute(("name", suite.name));
    start.push_attribute(("tests", suite.tests.len().to_string().as_str()));
    start.push_attribute(("failures", failures.to_string().as_str()));
    start.push_attribute(("time", seconds(suite.time).as_str()));
    if suite.tests.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for test in &suite.tests {
        let mut case = BytesStart::new("testcase");
        case.push_attribute(("name", test.name()));
        if let Some(module) = test.module() {
            case.push_attribute(("classname", module));
        }
        case.push_attribute(("time", seconds(test.total_time()).as_str()));

        if test.passed() {
            writer.write_event(Event::Empty(case))?;
            continue;
        }

        let message = format_results(Some(test.failures()), Some(test.total()));
        let mut failure = BytesStart::new("failure");
        failure.push_attribute(("message", message.as_str()));
        writer.write_event(Event::Start(case))?;
        writer.write_event(Event::Empty(failure))?;
        writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    Ok(())
}

fn seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}
