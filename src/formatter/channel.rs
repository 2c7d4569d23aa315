use std::io;

use crossbeam_channel::{Receiver, Sender};

use crate::formatter::LineSink;

/// Hands lines over to another thread.
///
/// The receiving side decides where the lines end up, a CI uploader or a UI for
/// example. Emitting fails with [`io::ErrorKind::BrokenPipe`] once the receiver
/// is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }

    /// A sink backed by a bounded channel, emitting blocks while it is full.
    pub fn bounded(capacity: usize) -> (Self, Receiver<String>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }

    pub fn unbounded() -> (Self, Receiver<String>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl LineSink for ChannelSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.tx
            .send(line.to_owned())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "line receiver disconnected"))
    }
}
