//! # Time Sinks
//!
//! The engine pushes every freshly formatted time string into a `TimeSink`.
//! Where the value ends up (a terminal widget, a channel, a test buffer) and
//! on which thread it is consumed is the sink's business, not the engine's.

use log::debug;
use tokio::sync::{mpsc, watch};

/// Receiver of formatted elapsed-time updates.
///
/// `publish` is called from the tick task while the engine holds its state
/// lock, so implementations must not block for long.
pub trait TimeSink: Send + Sync + 'static {
    fn publish(&self, formatted: &str);
}

/// Latest-value semantics: readers only ever see the newest time.
impl TimeSink for watch::Sender<String> {
    fn publish(&self, formatted: &str) {
        self.send_replace(formatted.to_string());
    }
}

/// Every update is queued, nothing is coalesced.
impl TimeSink for mpsc::UnboundedSender<String> {
    fn publish(&self, formatted: &str) {
        if self.send(formatted.to_string()).is_err() {
            debug!("Time update dropped: receiver closed");
        }
    }
}

/// Discards all updates. Useful when only `current_time()` is polled.
pub struct NullSink;

impl TimeSink for NullSink {
    fn publish(&self, _formatted: &str) {}
}
