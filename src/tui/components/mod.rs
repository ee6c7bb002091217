//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TimeDisplay`: The elapsed-time readout and phase
//! - `SecondsGauge`: Seconds-within-minute progress bar
//! - `ClockPanel`: Free-running wall clock
//! - `StatusBar`: Key hints and toast messages
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `LapList`: Scrollable lap history with persistent `LapListState`
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), never by
//! reaching into the stopwatch. This keeps them testable with a
//! `TestBackend` and nothing else.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── time_display.rs
//! ├── seconds_gauge.rs
//! ├── clock_panel.rs
//! ├── status_bar.rs
//! └── lap_list.rs
//! ```

pub mod clock_panel;
pub mod lap_list;
pub mod seconds_gauge;
pub mod status_bar;
pub mod time_display;

pub use clock_panel::ClockPanel;
pub use lap_list::{LapList, LapListState};
pub use seconds_gauge::SecondsGauge;
pub use status_bar::{StatusBar, Toast};
pub use time_display::TimeDisplay;
