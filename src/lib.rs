//! Lapwatch library exports for testing

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::engine::{EngineError, Phase, ShutdownOutcome};
pub use crate::core::format::{ZERO_TIME, format_elapsed, format_millis};
pub use crate::core::sink::TimeSink;
pub use crate::core::stopwatch::Stopwatch;
