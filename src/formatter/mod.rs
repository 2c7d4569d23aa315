//! Result strings and the sinks lines are emitted to.
//!
//! The reporter builds every line with the functions in this module and hands
//! it to a [`LineSink`]. Sinks only see finished lines, they never see the
//! registry.

use std::io;

use crate::{module::Module, test::Test};

mod channel;
pub use channel::ChannelSink;

mod no;
pub use no::NoSink;

mod tee;
pub use tee::TeeSink;

mod write;
pub use write::{BufferSink, StdoutSink, WriteSink};

/// Render failure and assertion counts for humans.
///
/// A `None` count renders as an empty segment, while zero renders as
/// `"No failures"` or `"No tests to run"`:
///
/// ```
/// use testledger::formatter::format_results;
///
/// assert_eq!(format_results(Some(0), Some(0)), "No failures, No tests to run");
/// assert_eq!(format_results(Some(1), Some(3)), "1 failure, 3 total");
/// assert_eq!(format_results(None, None), ", ");
/// ```
pub fn format_results(failures: Option<u64>, total: Option<u64>) -> String {
    let failures = match failures {
        None => String::new(),
        Some(0) => String::from("No failures"),
        Some(1) => String::from("1 failure"),
        Some(n) => format!("{n} failures"),
    };

    let total = match total {
        None => String::new(),
        Some(0) => String::from("No tests to run"),
        Some(n) => format!("{n} total"),
    };

    format!("{failures}, {total}")
}

pub fn test_started_line(name: &str) -> String {
    format!("Starting test: {name}")
}

pub fn test_finished_line(test: &Test) -> String {
    format!(
        "Test '{}' finished: {}",
        test.name(),
        format_results(Some(test.failures()), Some(test.total()))
    )
}

/// `"Tests run: 3, Failures: 1, Passed: 2, Time elapsed: 0 secs."`, flagged
/// when the test failed.
pub fn test_completed_line(test: &Test) -> String {
    let line = format!(
        "Tests run: {}, Failures: {}, Passed: {}, Time elapsed: {} secs.",
        test.total(),
        test.failures(),
        test.total().saturating_sub(test.failures()),
        test.total_time().as_secs()
    );
    match test.passed() {
        true => line,
        false => format!("{line} <<<<<<<<<< TEST FAILED!"),
    }
}

pub fn module_started_line(name: &str) -> String {
    format!("Module started: {name}")
}

/// `"Module completed: Suite(3 total, 1 failed, 2 passed) 0 secs."`, flagged
/// when the module failed.
pub fn module_completed_line(module: &Module) -> String {
    let line = format!(
        "Module completed: {}({} total, {} failed, {} passed) {} secs.",
        module.name(),
        module.total(),
        module.failures(),
        module.total().saturating_sub(module.failures()),
        module.total_time().as_secs()
    );
    match module.passed() {
        true => line,
        false => format!("{line} <<<<<<<<<< FAILED!"),
    }
}

pub fn run_finished_line(failures: u64) -> String {
    match failures {
        0 => String::from("Run finished with no errors"),
        _ => String::from("Run finished with errors"),
    }
}

/// An output device for finished lines.
pub trait LineSink {
    /// Emit one line. `line` carries no trailing newline.
    fn emit_line(&mut self, line: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        (**self).emit_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        (**self).emit_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// A sink calling a closure for every line.
#[derive(Debug, Clone)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str)> LineSink for FnSink<F> {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        (self.0)(line);
        Ok(())
    }
}
