//! The lifecycle adapter between a test engine and the ledger.
//!
//! A [`Reporter`] turns each of the six notifications into a registry operation,
//! writes progress and result lines to its [`LineSink`] and then lets the
//! [`Listeners`] react. A notification either fully succeeds or returns the
//! error untouched, the reporter never recovers on its own.
//!
//! A registry error leaves the registry as it was. When the sink fails on a
//! `testStart` or `moduleStart` line, the test or module that notification
//! created is removed again. `testDone` and `moduleDone` record their results
//! before writing, so a sink error there only loses the line.

use std::time::Instant;

use crate::{
    RunReport,
    config::ReporterConfig,
    error::ReportError,
    event::{Done, Event, Log, ModuleDone, ModuleStart, TestDone, TestStart},
    export::{JunitReport, PlainReport},
    formatter::{self, LineSink, StdoutSink},
    module::Module,
    registry::Registry,
};

mod listeners;
pub use listeners::Listeners;

/// Create a reporter writing to standard output.
pub fn reporter() -> Reporter<StdoutSink> {
    Reporter::default()
}

#[derive(Debug)]
pub struct Reporter<Sink = StdoutSink> {
    registry: Registry,
    sink: Sink,
    config: ReporterConfig,
    listeners: Listeners,
    started: Instant,
}

impl Default for Reporter<StdoutSink> {
    fn default() -> Self {
        Self::new(StdoutSink)
    }
}

impl<Sink> Reporter<Sink> {
    pub fn new(sink: Sink) -> Self {
        Self {
            registry: Registry::new(),
            sink,
            config: ReporterConfig::default(),
            listeners: Listeners::default(),
            started: Instant::now(),
        }
    }

    pub fn with_sink<WithSink: LineSink>(self, sink: WithSink) -> Reporter<WithSink> {
        Reporter {
            registry: self.registry,
            sink,
            config: self.config,
            listeners: self.listeners,
            started: self.started,
        }
    }

    pub fn with_config(self, config: ReporterConfig) -> Self {
        Reporter { config, ..self }
    }

    /// Layer `listeners` on top of the ones already attached.
    pub fn with_listeners(mut self, listeners: Listeners) -> Self {
        self.listeners.compose(listeners);
        self
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Direct access to the registry, e.g. to attach `on_done` hooks.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn into_parts(self) -> (Registry, Sink) {
        (self.registry, self.sink)
    }

    /// A JUnit XML report of everything recorded so far.
    pub fn junit_report(&self) -> JunitReport<'_> {
        JunitReport::new(&self.registry)
    }

    /// Plain text report files of everything recorded so far.
    pub fn plain_report(&self) -> PlainReport<'_> {
        PlainReport::new(&self.registry)
    }
}

impl<Sink: LineSink> Reporter<Sink> {
    pub fn notify(&mut self, event: Event) -> Result<Option<RunReport>, ReportError> {
        tracing::trace!(event = event.kind(), "notification");
        match event {
            Event::TestStart(TestStart { name }) => self.test_start(&name).map(|_| None),
            Event::TestDone(TestDone {
                name,
                failures,
                total,
            }) => self.test_done(&name, failures, total).map(|_| None),
            Event::ModuleStart(ModuleStart { name }) => {
                self.module_start(name.as_deref()).map(|_| None)
            }
            Event::ModuleDone(ModuleDone { failures, total }) => {
                self.module_done(failures, total).map(|_| None)
            }
            Event::Log(Log { result, message }) => {
                self.log(result, &message);
                Ok(None)
            }
            Event::Done(Done { failures, total }) => self.done(failures, total).map(Some),
        }
    }

    pub fn test_start(&mut self, name: &str) -> Result<(), ReportError> {
        self.registry.add_test(name)?;
        if let Err(err) = self.emit(formatter::test_started_line(name)) {
            self.registry.discard_test(name);
            return Err(err);
        }

        self.listeners.test_start.call(&TestStart {
            name: name.to_owned(),
        });
        Ok(())
    }

    pub fn test_done(&mut self, name: &str, failures: u64, total: u64) -> Result<(), ReportError> {
        let test = self.registry.release_test(name, failures, total)?;
        if self.config.test_lines() {
            let line = formatter::test_completed_line(test);
            self.emit(line)?;
        }

        self.listeners.test_done.call(&TestDone {
            name: name.to_owned(),
            failures,
            total,
        });
        Ok(())
    }

    pub fn module_start(&mut self, name: Option<&str>) -> Result<(), ReportError> {
        let previous = self.registry.current_module_name().map(str::to_owned);
        self.registry.add_module(name)?;
        if let Some(name) = name
            && self.config.module_lines()
            && let Err(err) = self.emit(formatter::module_started_line(name))
        {
            self.registry.discard_module(name, previous);
            return Err(err);
        }

        self.listeners.module_start.call(&ModuleStart {
            name: name.map(str::to_owned),
        });
        Ok(())
    }

    pub fn module_done(&mut self, failures: u64, total: u64) -> Result<(), ReportError> {
        let released = self.registry.release_current_module(failures, total);
        if self.config.module_lines()
            && let Some(line) = released.map(formatter::module_completed_line)
        {
            self.emit(line)?;
        }

        self.listeners.module_done.call(&ModuleDone { failures, total });
        Ok(())
    }

    /// A single assertion result. Only traced and passed on to the listeners.
    pub fn log(&mut self, result: bool, message: &str) {
        let module = self.registry.current_module_name().unwrap_or_default();
        match result {
            true => tracing::debug!(module, assertion = message, "assertion passed"),
            false => tracing::info!(module, assertion = message, "assertion failed"),
        }

        self.listeners.log.call(&Log {
            result,
            message: message.to_owned(),
        });
    }

    /// Finish the run and emit one result line per test.
    ///
    /// Tests are listed module by module, in the order modules and tests were
    /// created. Top-level tests are only listed when
    /// [`ReporterConfig::with_top_level_tests`] is set.
    pub fn done(&mut self, failures: u64, total: u64) -> Result<RunReport, ReportError> {
        let mut lines: Vec<String> = self
            .registry
            .modules()
            .flat_map(Module::tests)
            .map(formatter::test_finished_line)
            .collect();

        if self.config.top_level_tests() {
            lines.extend(self.registry.tests().map(formatter::test_finished_line));
        }

        if self.config.summary() {
            lines.push(formatter::run_finished_line(failures));
        }

        for line in lines {
            self.emit(line)?;
        }
        self.sink.flush()?;

        let report = RunReport {
            failures,
            total,
            modules: self.registry.module_count(),
            tests: self.registry.test_count(),
            duration: self.started.elapsed(),
        };
        tracing::info!(
            failures,
            total,
            modules = report.modules,
            tests = report.tests,
            "run finished"
        );

        self.listeners.done.call(&Done { failures, total });
        Ok(report)
    }

    fn emit(&mut self, line: String) -> Result<(), ReportError> {
        let line = self.config.decorate(line);
        self.sink.emit_line(&line)?;
        Ok(())
    }
}
