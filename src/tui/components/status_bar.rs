//! # StatusBar Component
//!
//! Bottom line showing the key bindings that matter in the current phase
//! and, when present, a short-lived toast message.
//!
//! ## Conditional Formatting
//!
//! 1. **Toast**: `"Lap 3 recorded at 00:00:12.300 | space pause · l lap · r reset · q quit"`
//! 2. **No toast**: `"space pause · l lap · r reset · q quit"`

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::engine::Phase;
use crate::tui::component::Component;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(2);

/// A transient status message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn new(message: String) -> Self {
        Self::shown_at(message, Instant::now())
    }

    pub fn shown_at(message: String, shown_at: Instant) -> Self {
        Self { message, shown_at }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_TTL
    }
}

pub struct StatusBar<'a> {
    pub phase: Phase,
    pub toast: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(phase: Phase, toast: Option<&'a str>) -> Self {
        Self { phase, toast }
    }

    /// Key hints for the current phase.
    pub fn hints(phase: Phase) -> &'static str {
        match phase {
            Phase::Idle => "space start · q quit",
            Phase::Running => "space pause · l lap · r reset · q quit",
            Phase::Paused => "space resume · l lap · r reset · q quit",
        }
    }
}

impl<'a> Component for StatusBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hint_style = Style::default().fg(Color::DarkGray);
        let mut spans = Vec::new();
        if let Some(toast) = self.toast {
            spans.push(Span::styled(
                toast.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(" | ", hint_style));
        }
        spans.push(Span::styled(Self::hints(self.phase), hint_style));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(bar: &mut StatusBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_hints_follow_phase() {
        assert!(StatusBar::hints(Phase::Idle).contains("start"));
        assert!(!StatusBar::hints(Phase::Idle).contains("lap"));
        assert!(StatusBar::hints(Phase::Running).contains("pause"));
        assert!(StatusBar::hints(Phase::Paused).contains("resume"));
    }

    #[test]
    fn test_renders_toast_before_hints() {
        let mut bar = StatusBar::new(Phase::Running, Some("Lap 1 recorded"));
        let text = render_to_text(&mut bar);
        assert!(text.starts_with("Lap 1 recorded | space pause"));
    }

    #[test]
    fn test_renders_hints_only_without_toast() {
        let mut bar = StatusBar::new(Phase::Idle, None);
        let text = render_to_text(&mut bar);
        assert!(text.starts_with("space start"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_toast_expiry() {
        let shown = Instant::now();
        let toast = Toast::shown_at("Reset".to_string(), shown);
        assert!(!toast.is_expired(shown));
        assert!(!toast.is_expired(shown + Duration::from_millis(1_999)));
        assert!(toast.is_expired(shown + TOAST_TTL));
    }
}
