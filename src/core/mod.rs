//! # Core Stopwatch Logic
//!
//! This module contains Lapwatch's timing logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Engine (tick task)   │
//!                    │  • LapRecorder          │
//!                    │  • Stopwatch            │
//!                    │  • update() (actions)   │
//!                    └───────────┬─────────────┘
//!                                │ TimeSink
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: Idle/Running/Paused state machine and the periodic tick task
//! - [`laps`]: Ordered lap log
//! - [`stopwatch`]: The owned controller combining both
//! - [`action`]: The `Action` enum and `update()`
//! - [`format`]: `HH:MM:SS.mmm` rendering
//! - [`sink`]: Where formatted times are pushed
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod engine;
pub mod format;
pub mod laps;
pub mod sink;
pub mod stopwatch;
