//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! The loop waits on three sources with `tokio::select!` and redraws after
//! any of them fires:
//!
//! - **Input**: a blocking thread polls crossterm and forwards `TuiEvent`s
//!   over an mpsc channel.
//! - **Display**: the stopwatch's sink is a `watch` channel; every tick
//!   wakes the loop with the newest formatted time.
//! - **Redraw timer**: every 250ms, so the wall clock advances and toasts
//!   expire while the stopwatch is idle.
//!
//! Control actions are awaited inline. `pause` and `reset` wait for the tick
//! task to stop, which takes at most one tick period.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::format::ZERO_TIME;
use crate::core::stopwatch::Stopwatch;
use crate::tui::component::EventHandler;
use crate::tui::components::{LapListState, Toast};
use crate::tui::event::{TuiEvent, spawn_input_thread};

const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core timing logic)
pub struct TuiState {
    pub lap_list: LapListState,
    /// Latest value received through the stopwatch's sink
    pub display_time: String,
    pub toast: Option<Toast>,
    pub show_clock: bool,
    pub show_progress: bool,
    pub clock_format: String,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            lap_list: LapListState::new(),
            display_time: ZERO_TIME.to_string(),
            toast: None,
            show_clock: config.show_clock,
            show_progress: config.show_progress,
            clock_format: config.clock_format.clone(),
        }
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }
}

/// Map a terminal event to a stopwatch action. Scroll and resize events stay in the TUI.
fn action_for(event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Toggle => Some(Action::Toggle),
        TuiEvent::Start => Some(Action::Start),
        TuiEvent::Pause => Some(Action::Pause),
        TuiEvent::Reset => Some(Action::Reset),
        TuiEvent::Lap => Some(Action::Lap),
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom
        | TuiEvent::Resize => None,
    }
}

async fn handle_event(stopwatch: &mut Stopwatch, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let Some(action) = action_for(event) else {
        tui.lap_list.handle_event(&event);
        return Effect::None;
    };

    let effect = update(stopwatch, action).await;
    if let Effect::Toast(message) = &effect {
        tui.toast = Some(Toast::new(message.clone()));
    }
    if action == Action::Reset && effect != Effect::None {
        tui.lap_list = LapListState::new();
    }
    effect
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let (display_tx, mut display_rx) = watch::channel(ZERO_TIME.to_string());
    let mut stopwatch = Stopwatch::new(Arc::new(display_tx), config.tick_interval);
    let mut tui = TuiState::new(&config);

    let mut terminal = ratatui::init();
    info!("Terminal initialised");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let stop_input = Arc::new(AtomicBool::new(false));
    let input_thread = spawn_input_thread(event_tx, stop_input.clone());

    let result = event_loop(
        &mut terminal,
        &mut stopwatch,
        &mut tui,
        &mut event_rx,
        &mut display_rx,
    )
    .await;

    stop_input.store(true, Ordering::Relaxed);
    let outcome = stopwatch.shutdown(config.shutdown_timeout).await;
    info!("Stopwatch shut down: {:?}", outcome);

    ratatui::restore();

    let joined = tokio::task::spawn_blocking(move || input_thread.join()).await;
    if !matches!(joined, Ok(Ok(()))) {
        warn!("Input thread did not exit cleanly");
    }

    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    stopwatch: &mut Stopwatch,
    tui: &mut TuiState,
    event_rx: &mut mpsc::UnboundedReceiver<TuiEvent>,
    display_rx: &mut watch::Receiver<String>,
) -> std::io::Result<()> {
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| ui::draw_ui(f, stopwatch, tui))?;

        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else {
                    info!("Input channel closed, exiting");
                    return Ok(());
                };
                if handle_event(stopwatch, tui, event).await == Effect::Quit {
                    return Ok(());
                }
                // Drain queued input before the next draw
                while let Ok(event) = event_rx.try_recv() {
                    if handle_event(stopwatch, tui, event).await == Effect::Quit {
                        return Ok(());
                    }
                }
            }
            changed = display_rx.changed() => {
                if changed.is_err() {
                    warn!("Display channel closed, exiting");
                    return Ok(());
                }
                tui.display_time = display_rx.borrow_and_update().clone();
            }
            _ = redraw.tick() => {
                tui.expire_toast(Instant::now());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_TICK_INTERVAL, Phase};
    use crate::test_support::test_stopwatch;

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            tick_interval: DEFAULT_TICK_INTERVAL,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            show_clock: true,
            clock_format: "%H:%M:%S".to_string(),
            show_progress: true,
        }
    }

    #[test]
    fn test_action_for_controls() {
        assert_eq!(action_for(TuiEvent::Toggle), Some(Action::Toggle));
        assert_eq!(action_for(TuiEvent::Lap), Some(Action::Lap));
        assert_eq!(action_for(TuiEvent::Quit), Some(Action::Quit));
        assert_eq!(action_for(TuiEvent::ScrollUp), None);
        assert_eq!(action_for(TuiEvent::Resize), None);
    }

    #[test]
    fn test_tui_state_from_config() {
        let tui = TuiState::new(&config());
        assert_eq!(tui.display_time, ZERO_TIME);
        assert!(tui.toast.is_none());
        assert!(tui.show_clock);
        assert_eq!(tui.clock_format, "%H:%M:%S");
    }

    #[test]
    fn test_toast_expires() {
        let mut tui = TuiState::new(&config());
        let shown = Instant::now();
        tui.toast = Some(Toast::shown_at("Started".to_string(), shown));

        tui.expire_toast(shown + Duration::from_millis(500));
        assert!(tui.toast.is_some());
        tui.expire_toast(shown + Duration::from_secs(3));
        assert!(tui.toast.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_event_drives_stopwatch_and_toasts() {
        let (mut stopwatch, _sink) = test_stopwatch();
        let mut tui = TuiState::new(&config());

        let effect = handle_event(&mut stopwatch, &mut tui, TuiEvent::Toggle).await;
        assert_eq!(effect, Effect::Toast("Started".to_string()));
        assert_eq!(stopwatch.phase(), Phase::Running);
        assert_eq!(tui.toast.as_ref().unwrap().message, "Started");

        tokio::time::sleep(Duration::from_millis(250)).await;
        handle_event(&mut stopwatch, &mut tui, TuiEvent::Lap).await;
        assert_eq!(stopwatch.laps().len(), 1);

        tui.lap_list.stick_to_bottom = false;
        handle_event(&mut stopwatch, &mut tui, TuiEvent::Reset).await;
        assert!(stopwatch.laps().is_empty());
        assert!(tui.lap_list.stick_to_bottom);

        let effect = handle_event(&mut stopwatch, &mut tui, TuiEvent::Quit).await;
        assert_eq!(effect, Effect::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_events_do_not_touch_stopwatch() {
        let (mut stopwatch, sink) = test_stopwatch();
        let mut tui = TuiState::new(&config());

        let effect = handle_event(&mut stopwatch, &mut tui, TuiEvent::ScrollUp).await;
        assert_eq!(effect, Effect::None);
        assert!(!tui.lap_list.stick_to_bottom);
        assert_eq!(stopwatch.phase(), Phase::Idle);
        assert!(sink.updates().is_empty());
    }
}
