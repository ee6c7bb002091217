//! # TimeDisplay Component
//!
//! The elapsed-time readout. Stateless: it renders whatever string the
//! engine last pushed through the sink, framed by a border whose title and
//! colour reflect the phase.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::engine::Phase;
use crate::tui::component::Component;

pub struct TimeDisplay<'a> {
    pub time: &'a str,
    pub phase: Phase,
}

impl<'a> TimeDisplay<'a> {
    pub fn new(time: &'a str, phase: Phase) -> Self {
        Self { time, phase }
    }
}

pub fn phase_style(phase: Phase) -> Style {
    match phase {
        Phase::Idle => Style::default().fg(Color::DarkGray),
        Phase::Running => Style::default().fg(Color::Green),
        Phase::Paused => Style::default().fg(Color::Yellow),
    }
}

impl<'a> Component for TimeDisplay<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = phase_style(self.phase);
        let block = Block::bordered()
            .title(format!(" {} ", self.phase.label()))
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Vertically centre the single readout line
        let [line_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(inner);

        let readout = Paragraph::new(Line::from(Span::styled(
            self.time.to_string(),
            style.add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(readout, line_area);
    }
}
