//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::engine::DEFAULT_TICK_INTERVAL;
use crate::core::sink::TimeSink;
use crate::core::stopwatch::Stopwatch;

/// A sink that remembers every update it receives.
#[derive(Default)]
pub struct RecordingSink {
    updates: Mutex<Vec<String>>,
    /// When set, every publish blocks the calling thread this long.
    block_for: Option<Duration>,
    blocked: AtomicBool,
}

impl RecordingSink {
    /// A sink that simulates a stuck display by blocking inside `publish`.
    pub fn blocking(block_for: Duration) -> Self {
        Self {
            block_for: Some(block_for),
            ..Default::default()
        }
    }

    pub fn updates(&self) -> Vec<String> {
        self.updates.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.updates.lock().unwrap().last().cloned()
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }
}

impl TimeSink for RecordingSink {
    fn publish(&self, formatted: &str) {
        self.updates.lock().unwrap().push(formatted.to_string());
        if let Some(d) = self.block_for {
            self.blocked.store(true, Ordering::SeqCst);
            std::thread::sleep(d);
        }
    }
}

/// A sink that panics on the first update.
pub struct PanickingSink;

impl TimeSink for PanickingSink {
    fn publish(&self, _formatted: &str) {
        panic!("display went away");
    }
}

/// Creates a stopwatch with the default tick interval and a recording sink.
pub fn test_stopwatch() -> (Stopwatch, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let stopwatch = Stopwatch::new(sink.clone(), DEFAULT_TICK_INTERVAL);
    (stopwatch, sink)
}
