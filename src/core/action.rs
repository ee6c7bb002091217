//! # Actions
//!
//! Everything a user can do to the stopwatch becomes an `Action`.
//! User presses `l`? That's `Action::Lap`.
//!
//! `update()` applies an action to the [`Stopwatch`] and returns an
//! [`Effect`] telling the adapter what to do next (quit, show a toast).
//!
//! ```text
//! Stopwatch + Action  →  update()  →  Effect
//! ```

use log::{debug, warn};

use crate::core::engine::Phase;
use crate::core::stopwatch::Stopwatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    /// Start when stopped, pause when running.
    Toggle,
    Reset,
    Lap,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Toast(String),
}

pub async fn update(stopwatch: &mut Stopwatch, action: Action) -> Effect {
    debug!("Applying {:?} in phase {:?}", action, stopwatch.phase());
    match action {
        Action::Start => start(stopwatch),
        Action::Pause => pause(stopwatch).await,
        Action::Toggle => {
            if stopwatch.phase() == Phase::Running {
                pause(stopwatch).await
            } else {
                start(stopwatch)
            }
        }
        Action::Reset => {
            if stopwatch.phase() == Phase::Idle {
                return Effect::None;
            }
            match stopwatch.reset().await {
                Ok(()) => Effect::Toast("Reset".to_string()),
                Err(e) => {
                    warn!("Reset: {}", e);
                    Effect::Toast(format!("Reset (with error: {e})"))
                }
            }
        }
        Action::Lap => match stopwatch.lap() {
            Some(number) => {
                let time = stopwatch.laps().last().cloned().unwrap_or_default();
                Effect::Toast(format!("Lap {number} recorded at {time}"))
            }
            None => Effect::Toast("Nothing to lap yet".to_string()),
        },
        Action::Quit => Effect::Quit,
    }
}

fn start(stopwatch: &mut Stopwatch) -> Effect {
    let toast = match stopwatch.phase() {
        Phase::Running => return Effect::None,
        Phase::Idle => "Started",
        Phase::Paused => "Resumed",
    };
    stopwatch.start();
    Effect::Toast(toast.to_string())
}

async fn pause(stopwatch: &mut Stopwatch) -> Effect {
    if stopwatch.phase() != Phase::Running {
        return Effect::None;
    }
    match stopwatch.pause().await {
        Ok(()) => Effect::Toast(format!("Paused at {}", stopwatch.current_time())),
        Err(e) => {
            warn!("Pause: {}", e);
            Effect::Toast(format!("Paused (with error: {e})"))
        }
    }
}
