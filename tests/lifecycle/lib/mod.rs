use std::{
    io::{self, Write},
    string::FromUtf8Error,
    sync::{Arc, Mutex},
};

use testledger::{prelude::*, formatter::WriteSink};

pub use sanitize::*;

#[derive(Debug)]
#[allow(dead_code)]
pub enum Error {
    Poison,
    FromUtf8(FromUtf8Error),
}

/// A shared writer, so the output stays readable after the sink moved into a
/// reporter.
#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.flush()
    }
}

impl Buffer {
    pub fn try_to_string(&self) -> Result<String, Error> {
        let guard = self.0.lock().map_err(|_| Error::Poison)?;
        let string = String::from_utf8(guard.to_vec()).map_err(Error::FromUtf8)?;
        Ok(string)
    }

    pub fn sink(&self) -> WriteSink<Buffer> {
        WriteSink::new(self.clone())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Feed every event to `reporter`, returning the report of the final `done`.
pub fn run<S: LineSink>(
    reporter: &mut Reporter<S>,
    events: impl IntoIterator<Item = Event>,
) -> Result<Option<RunReport>, ReportError> {
    let mut report = None;
    for event in events {
        if let Some(done) = reporter.notify(event)? {
            report = Some(done);
        }
    }
    Ok(report)
}
