use std::io::{self, Write};

use crate::formatter::LineSink;

/// Writes lines to standard output.
#[derive(Debug, Default, Clone)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{line}")
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Writes lines to any [`io::Write`] target, e.g. a log file.
#[derive(Debug)]
pub struct WriteSink<W: io::Write> {
    target: W,
}

impl<W: io::Write> WriteSink<W> {
    pub fn new(target: W) -> Self {
        Self { target }
    }

    pub fn with_target<WithTarget: io::Write>(self, with_target: WithTarget) -> WriteSink<WithTarget> {
        WriteSink {
            target: with_target,
        }
    }

    pub fn target(&self) -> &W {
        &self.target
    }

    pub fn into_target(self) -> W {
        self.target
    }
}

impl<W: io::Write> LineSink for WriteSink<W> {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.target, "{line}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target.flush()
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl LineSink for BufferSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}
