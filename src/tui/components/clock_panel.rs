//! # ClockPanel Component
//!
//! A free-running wall clock shown beside the stopwatch. It has nothing to do
//! with the engine; it is simply re-rendered on every redraw.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;

pub struct ClockPanel<'a> {
    pub now: DateTime<Local>,
    pub time_format: &'a str,
}

impl<'a> ClockPanel<'a> {
    pub fn new(now: DateTime<Local>, time_format: &'a str) -> Self {
        Self { now, time_format }
    }

    fn lines(&self) -> (String, String) {
        let date = self.now.format("%a %d %b %Y").to_string();
        let time = self.now.format(self.time_format).to_string();
        (date, time)
    }
}

impl<'a> Component for ClockPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (date, time) = self.lines();
        let style = Style::default().fg(Color::Gray);
        let paragraph = Paragraph::new(vec![Line::from(time), Line::from(date)])
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" Clock ").border_style(style));
        frame.render_widget(paragraph, area);
    }
}
