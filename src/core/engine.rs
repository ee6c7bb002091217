//! # Elapsed-Time Engine
//!
//! The stopwatch state machine and its periodic tick task.
//!
//! ```text
//!            start                 pause
//!   Idle ───────────▶ Running ───────────▶ Paused
//!    ▲                  │  ▲                 │
//!    │      reset       │  └──── start ──────┤
//!    ├──────────────────┘                    │
//!    └───────────────── reset ───────────────┘
//! ```
//!
//! Every other (phase, event) pair is ignored.
//!
//! ## Shared state
//!
//! Phase, offset, anchor and the last formatted time sit behind a single
//! mutex shared with the tick task. The tick task re-checks the phase under
//! that lock before publishing, so once a control operation has moved the
//! phase away from `Running` no tick can reach the sink. `pause()` and
//! `reset()` additionally await the task's `JoinHandle`, so the task is gone
//! by the time they return.
//!
//! ## Clock
//!
//! Uses `tokio::time::Instant`, which lets tests drive the engine with a
//! paused clock.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::core::format::{ZERO_TIME, format_elapsed};
use crate::core::sink::TimeSink;

/// Default period between two published ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Default bound on how long shutdown waits for the tick task.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum EngineError {
    /// Waiting for the tick task to finish failed (it panicked or was
    /// aborted from elsewhere). The phase transition was still applied.
    Interrupted(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Interrupted(msg) => write!(f, "tick task interrupted: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// How the tick task ended during [`Engine::shutdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// No tick task was running.
    NothingToStop,
    /// The tick task stopped within the timeout.
    Stopped,
    /// The tick task ended with an error (panic) before the timeout.
    Failed,
    /// The tick task did not stop in time and was aborted.
    TimedOut,
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug)]
struct EngineState {
    phase: Phase,
    /// Elapsed time banked by earlier running segments.
    accumulated: Duration,
    /// Start of the current running segment. `Some` only while Running.
    anchor: Option<Instant>,
    last_formatted: String,
}

impl EngineState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            accumulated: Duration::ZERO,
            anchor: None,
            last_formatted: ZERO_TIME.to_string(),
        }
    }

    fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.anchor) {
            (Phase::Running, Some(anchor)) => {
                self.accumulated + now.saturating_duration_since(anchor)
            }
            _ => self.accumulated,
        }
    }
}

/// A panic inside a sink must not wedge the stopwatch, so poisoning is ignored.
fn lock_state(state: &Mutex<EngineState>) -> MutexGuard<'_, EngineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct TickTask {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

// ============================================================================
// Engine
// ============================================================================

pub struct Engine {
    state: Arc<Mutex<EngineState>>,
    sink: Arc<dyn TimeSink>,
    tick_interval: Duration,
    ticker: Option<TickTask>,
}

impl Engine {
    /// Create an idle engine publishing to `sink` every `tick_interval`.
    ///
    /// A zero interval falls back to [`DEFAULT_TICK_INTERVAL`].
    pub fn new(sink: Arc<dyn TimeSink>, tick_interval: Duration) -> Self {
        let tick_interval = if tick_interval.is_zero() {
            warn!(
                "Tick interval must be positive, using {}ms",
                DEFAULT_TICK_INTERVAL.as_millis()
            );
            DEFAULT_TICK_INTERVAL
        } else {
            tick_interval
        };

        Self {
            state: Arc::new(Mutex::new(EngineState::new())),
            sink,
            tick_interval,
            ticker: None,
        }
    }

    pub fn phase(&self) -> Phase {
        lock_state(&self.state).phase
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Elapsed time right now, independent of the last published tick.
    pub fn elapsed(&self) -> Duration {
        lock_state(&self.state).elapsed(Instant::now())
    }

    /// The most recently displayed time string.
    pub fn current_time(&self) -> String {
        lock_state(&self.state).last_formatted.clone()
    }

    /// Start from Idle or resume from Paused. Ignored while Running.
    ///
    /// Must be called from within a tokio runtime: the tick task is spawned
    /// onto it.
    pub fn start(&mut self) {
        {
            let mut state = lock_state(&self.state);
            match state.phase {
                Phase::Running => {
                    debug!("start ignored: already running");
                    return;
                }
                Phase::Idle => {
                    state.accumulated = Duration::ZERO;
                    info!("Stopwatch started");
                }
                Phase::Paused => {
                    info!(
                        "Stopwatch resumed at {}",
                        format_elapsed(state.accumulated)
                    );
                }
            }
            state.anchor = Some(Instant::now());
            state.phase = Phase::Running;
        }

        self.ticker = Some(spawn_ticker(
            self.state.clone(),
            self.sink.clone(),
            self.tick_interval,
        ));
    }

    /// Bank the running segment and stop ticking. Ignored unless Running.
    ///
    /// Returns once the tick task has terminated.
    pub async fn pause(&mut self) -> Result<(), EngineError> {
        {
            let mut state = lock_state(&self.state);
            if state.phase != Phase::Running {
                debug!("pause ignored: stopwatch is {}", state.phase.label());
                return Ok(());
            }
            state.accumulated = state.elapsed(Instant::now());
            state.anchor = None;
            state.phase = Phase::Paused;
            info!(
                "Stopwatch paused at {}",
                format_elapsed(state.accumulated)
            );
        }

        self.stop_ticker().await
    }

    /// Return to Idle from Running or Paused. Ignored while Idle.
    ///
    /// The zero time is published to the sink exactly once before this
    /// returns.
    pub async fn reset(&mut self) -> Result<(), EngineError> {
        {
            let mut state = lock_state(&self.state);
            if state.phase == Phase::Idle {
                debug!("reset ignored: stopwatch is idle");
                return Ok(());
            }
            info!("Stopwatch reset from {}", state.phase.label());
            state.phase = Phase::Idle;
            state.accumulated = Duration::ZERO;
            state.anchor = None;
            state.last_formatted = ZERO_TIME.to_string();
            self.sink.publish(ZERO_TIME);
        }

        self.stop_ticker().await
    }

    /// Cancel the tick task (if any) and wait at most `timeout` for it.
    ///
    /// Never fails: a task that does not stop in time is aborted and logged.
    pub async fn shutdown(mut self, timeout: Duration) -> ShutdownOutcome {
        let Some(ticker) = self.ticker.take() else {
            debug!("Shutdown: no tick task running");
            return ShutdownOutcome::NothingToStop;
        };

        let _ = ticker.cancel.send(());
        let abort = ticker.handle.abort_handle();
        match tokio::time::timeout(timeout, ticker.handle).await {
            Ok(Ok(())) => {
                debug!("Shutdown: tick task stopped");
                ShutdownOutcome::Stopped
            }
            Ok(Err(e)) => {
                warn!("Shutdown: tick task ended with error: {}", e);
                ShutdownOutcome::Failed
            }
            Err(_) => {
                warn!(
                    "Shutdown: tick task did not stop within {}ms, aborting",
                    timeout.as_millis()
                );
                abort.abort();
                ShutdownOutcome::TimedOut
            }
        }
    }

    async fn stop_ticker(&mut self) -> Result<(), EngineError> {
        let Some(ticker) = self.ticker.take() else {
            return Ok(());
        };

        // The task may already have exited on its own; a closed channel is fine.
        let _ = ticker.cancel.send(());
        ticker
            .handle
            .await
            .map_err(|e| EngineError::Interrupted(e.to_string()))?;
        debug!("Tick task joined");
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.abort();
        }
    }
}

fn spawn_ticker(
    state: Arc<Mutex<EngineState>>,
    sink: Arc<dyn TimeSink>,
    period: Duration,
) -> TickTask {
    let (cancel, mut cancelled) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        debug!("Tick task started ({}ms period)", period.as_millis());
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                // Fires on an explicit cancel and when the sender is dropped
                _ = &mut cancelled => break,
                _ = interval.tick() => {
                    if !publish_tick(&state, sink.as_ref()) {
                        break;
                    }
                }
            }
        }
        debug!("Tick task exiting");
    });

    TickTask { cancel, handle }
}

/// Publish one tick. Returns `false` once the engine has left Running.
fn publish_tick(state: &Mutex<EngineState>, sink: &dyn TimeSink) -> bool {
    let mut state = lock_state(state);
    if state.phase != Phase::Running {
        return false;
    }
    let formatted = format_elapsed(state.elapsed(Instant::now()));
    sink.publish(&formatted);
    state.last_formatted = formatted;
    true
}
