//! # SecondsGauge Component
//!
//! A progress bar that fills once per minute of elapsed time.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Gauge;

use crate::core::format::minute_progress;
use crate::tui::component::Component;

pub struct SecondsGauge {
    pub elapsed_ms: u64,
}

impl SecondsGauge {
    pub fn new(elapsed_ms: u64) -> Self {
        Self { elapsed_ms }
    }

    fn label(&self) -> String {
        format!("{:02}s", (self.elapsed_ms / 1000) % 60)
    }
}

impl Component for SecondsGauge {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(minute_progress(self.elapsed_ms))
            .label(self.label());
        frame.render_widget(gauge, area);
    }
}
