use std::{fmt, io};

use crate::formatter::LineSink;

/// Forwards every line to several sinks, in the order they were added.
///
/// A failing sink does not keep the line from the others. The first error is
/// returned once every sink had its turn.
#[derive(Default)]
pub struct TeeSink {
    sinks: Vec<Box<dyn LineSink>>,
}

impl TeeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl LineSink + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn push(&mut self, sink: impl LineSink + 'static) -> &mut Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(
        &mut self,
        mut f: impl FnMut(&mut dyn LineSink) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(err) = f(sink.as_mut()) {
                tracing::debug!(%err, "tee sink member failed");
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for TeeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl LineSink for TeeSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.each(|sink| sink.emit_line(line))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.each(|sink| sink.flush())
    }
}
