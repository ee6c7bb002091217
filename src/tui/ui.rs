use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::core::format::parse_millis;
use crate::core::stopwatch::Stopwatch;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ClockPanel, LapList, SecondsGauge, StatusBar, TimeDisplay};

const CLOCK_WIDTH: u16 = 22;
const READOUT_HEIGHT: u16 = 5;

/// Split the frame into (title, readout, clock, gauge, laps, status) areas.
/// Disabled panels get a zero-sized area.
fn layout_areas(area: Rect, tui: &TuiState) -> [Rect; 6] {
    use Constraint::{Length, Min};

    let gauge_height = if tui.show_progress { 1 } else { 0 };
    let [title_area, top_area, gauge_area, laps_area, status_area] = Layout::vertical([
        Length(1),
        Length(READOUT_HEIGHT),
        Length(gauge_height),
        Min(0),
        Length(1),
    ])
    .areas(area);

    let clock_width = if tui.show_clock { CLOCK_WIDTH } else { 0 };
    let [readout_area, clock_area] =
        Layout::horizontal([Min(0), Length(clock_width)]).areas(top_area);

    [title_area, readout_area, clock_area, gauge_area, laps_area, status_area]
}

pub fn draw_ui(frame: &mut Frame, stopwatch: &Stopwatch, tui: &mut TuiState) {
    let [title_area, readout_area, clock_area, gauge_area, laps_area, status_area] =
        layout_areas(frame.area(), tui);
    let phase = stopwatch.phase();

    let title = Span::styled(
        format!("Lapwatch v{}", env!("CARGO_PKG_VERSION")),
        Style::default().add_modifier(Modifier::BOLD).fg(Color::White),
    );
    frame.render_widget(title, title_area);

    TimeDisplay::new(&tui.display_time, phase).render(frame, readout_area);

    if tui.show_clock {
        ClockPanel::new(Local::now(), &tui.clock_format).render(frame, clock_area);
    }

    if tui.show_progress {
        let elapsed_ms = parse_millis(&tui.display_time).unwrap_or(0);
        SecondsGauge::new(elapsed_ms).render(frame, gauge_area);
    }

    LapList::new(&mut tui.lap_list, stopwatch.laps()).render(frame, laps_area);

    let toast = tui.toast.as_ref().map(|t| t.message.as_str());
    StatusBar::new(phase, toast).render(frame, status_area);
}
