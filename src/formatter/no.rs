use std::io;

use crate::formatter::LineSink;

/// A sink that discards every line.
///
/// Useful when only the registry or the listeners are of interest, for example
/// when another system does its own reporting from the hooks.
#[derive(Debug, Default, Clone)]
pub struct NoSink;

impl LineSink for NoSink {
    fn emit_line(&mut self, _: &str) -> io::Result<()> {
        Ok(())
    }
}
