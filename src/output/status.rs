//! Status sink implementations
//!
//! `TracingStatus` writes status lines to the log. `ChannelStatus` hands them
//! to another task through an unbounded channel, so a slow consumer never
//! holds up the crawl.

use super::traits::StatusSink;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Status sink that forwards every line to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn emit(&self, line: &str) {
        tracing::info!("{}", line);
    }
}

/// Status sink backed by an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelStatus {
    tx: UnboundedSender<String>,
}

impl ChannelStatus {
    /// Creates a sink and the receiver that drains it
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl StatusSink for ChannelStatus {
    fn emit(&self, line: &str) {
        // A dropped receiver only means nobody is watching any more
        if self.tx.send(line.to_string()).is_err() {
            tracing::trace!("Status receiver closed, dropping: {}", line);
        }
    }
}
