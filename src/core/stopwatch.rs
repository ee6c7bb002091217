//! # Stopwatch
//!
//! The single owned controller the UI talks to. It pairs the elapsed-time
//! [`Engine`] with a [`LapRecorder`] and keeps the two consistent: laps read
//! the engine's displayed time, and a reset clears them.
//!
//! ```text
//! Stopwatch
//! ├── engine: Engine        // phase, offset, anchor, tick task
//! └── laps: LapRecorder     // recorded display strings
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::core::engine::{Engine, EngineError, Phase, ShutdownOutcome};
use crate::core::laps::LapRecorder;
use crate::core::sink::TimeSink;

pub struct Stopwatch {
    engine: Engine,
    laps: LapRecorder,
}

impl Stopwatch {
    pub fn new(sink: Arc<dyn TimeSink>, tick_interval: Duration) -> Self {
        Self {
            engine: Engine::new(sink, tick_interval),
            laps: LapRecorder::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn elapsed(&self) -> Duration {
        self.engine.elapsed()
    }

    pub fn current_time(&self) -> String {
        self.engine.current_time()
    }

    pub fn laps(&self) -> &[String] {
        self.laps.laps()
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub async fn pause(&mut self) -> Result<(), EngineError> {
        self.engine.pause().await
    }

    /// Reset the engine and drop all laps. Ignored while Idle.
    pub async fn reset(&mut self) -> Result<(), EngineError> {
        if self.engine.phase() != Phase::Idle {
            self.laps.clear();
        }
        self.engine.reset().await
    }

    /// Record the currently displayed time as a lap.
    ///
    /// Returns the 1-based lap number, or `None` while the display reads zero.
    pub fn lap(&mut self) -> Option<usize> {
        let time = self.engine.current_time();
        if !self.laps.record(&time) {
            return None;
        }
        let number = self.laps.len();
        info!("Lap {} recorded at {}", number, time);
        Some(number)
    }

    /// Stop the tick task, waiting at most `timeout`.
    pub async fn shutdown(self, timeout: Duration) -> ShutdownOutcome {
        info!("Stopwatch shutting down ({} laps recorded)", self.laps.len());
        self.engine.shutdown(timeout).await
    }
}
