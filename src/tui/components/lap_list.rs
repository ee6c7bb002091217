//! # LapList Component
//!
//! Scrollable, numbered list of recorded laps with the split since the
//! previous lap. Newest lap at the bottom.
//!
//! ## Architecture
//!
//! `LapList` is a transient component (created each frame) that wraps
//! `&'a mut LapListState` (persistent scroll state) and the lap slice
//! (props). While `stick_to_bottom` is set the view follows new laps; any
//! upward scroll detaches it until the user scrolls back to the end.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::format::{format_millis, parse_millis};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Scroll state for the lap list.
/// Must be persisted in the parent TuiState.
pub struct LapListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to the newest lap
    pub stick_to_bottom: bool,
    /// Lap count at the last render (for scroll clamping between frames)
    pub content_height: u16,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for LapListState {
    fn default() -> Self {
        Self::new()
    }
}

impl LapListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        self.clamp_scroll();
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
        }
    }
}

impl EventHandler for LapListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// One rendered row: lap number, lap time, split since the previous lap.
pub fn lap_row(number: usize, time: &str, previous: Option<&str>) -> String {
    let split = match (parse_millis(time), previous.and_then(parse_millis)) {
        (Some(now), Some(before)) => format!("+{}", format_millis(now.saturating_sub(before))),
        (Some(_), None) => format!("+{}", time),
        _ => String::new(),
    };
    format!("Lap {:>3}   {}   {}", number, time, split)
}

pub struct LapList<'a> {
    pub state: &'a mut LapListState,
    pub laps: &'a [String],
}

impl<'a> LapList<'a> {
    pub fn new(state: &'a mut LapListState, laps: &'a [String]) -> Self {
        Self { state, laps }
    }
}

impl<'a> Component for LapList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" Laps ({}) ", self.laps.len()))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.laps.is_empty() {
            let placeholder = Paragraph::new(Span::styled(
                "No laps yet",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(placeholder, inner);
            self.state.content_height = 0;
            self.state.viewport_height = inner.height;
            self.state.stick_to_bottom = true;
            return;
        }

        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
        let content_height = u16::try_from(self.laps.len()).unwrap_or(u16::MAX);
        self.state.content_height = content_height;
        self.state.viewport_height = inner.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut previous: Option<&str> = None;
        for (index, time) in self.laps.iter().enumerate().take(content_height as usize) {
            let row = Line::from(lap_row(index + 1, time, previous));
            let row_rect = Rect::new(0, index as u16, content_width, 1);
            scroll_view.render_widget(Paragraph::new(row), row_rect);
            previous = Some(time.as_str());
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn laps(times: &[&str]) -> Vec<String> {
        times.iter().map(|t| t.to_string()).collect()
    }

    fn render_to_text(state: &mut LapListState, laps: &[String], height: u16) -> String {
        let backend = TestBackend::new(50, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| LapList::new(state, laps).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_lap_row_first_and_split() {
        assert_eq!(
            lap_row(1, "00:00:01.500", None),
            "Lap   1   00:00:01.500   +00:00:01.500"
        );
        assert_eq!(
            lap_row(2, "00:00:03.000", Some("00:00:01.500")),
            "Lap   2   00:00:03.000   +00:00:01.500"
        );
    }

    #[test]
    fn test_lap_row_duplicate_has_zero_split() {
        assert_eq!(
            lap_row(3, "00:00:03.000", Some("00:00:03.000")),
            "Lap   3   00:00:03.000   +00:00:00.000"
        );
    }

    #[test]
    fn test_empty_list_placeholder() {
        let mut state = LapListState::new();
        let text = render_to_text(&mut state, &[], 5);
        assert!(text.contains("No laps yet"));
        assert!(text.contains("Laps (0)"));
    }

    #[test]
    fn test_renders_laps_in_order() {
        let mut state = LapListState::new();
        let laps = laps(&["00:00:01.000", "00:00:02.500"]);
        let text = render_to_text(&mut state, &laps, 6);

        let first = text.find("00:00:01.000").unwrap();
        let second = text.find("00:00:02.500").unwrap();
        assert!(first < second);
        assert!(text.contains("Laps (2)"));
    }

    #[test]
    fn test_sticks_to_newest_lap() {
        let mut state = LapListState::new();
        let many: Vec<String> = (1..=20).map(|s| format_millis(s * 1000)).collect();
        // 3 visible rows inside the border
        let text = render_to_text(&mut state, &many, 5);
        assert!(text.contains("Lap  20"));
        assert!(!text.contains("Lap   1 "));
    }

    #[test]
    fn test_scroll_up_detaches_and_end_repins() {
        let mut state = LapListState::new();
        state.content_height = 20;
        state.viewport_height = 3;
        state.scroll_state.set_offset(Position { x: 0, y: 17 });

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_to_end_repins() {
        let mut state = LapListState::new();
        state.content_height = 10;
        state.viewport_height = 3;
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 6 });

        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.scroll_state.offset().y, 7);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut state = LapListState::new();
        state.content_height = 5;
        state.viewport_height = 3;
        state.scroll_state.set_offset(Position { x: 0, y: 40 });
        state.clamp_scroll();
        assert_eq!(state.scroll_state.offset().y, 2);
    }
}
