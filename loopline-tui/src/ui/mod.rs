//! Top-level UI layout: timeline panel with status bar.

pub mod overlays;
pub mod status_bar;
pub mod timeline_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use loopline_core::ScreenRect;

use crate::app::{AppState, Overlay};
use crate::ui::timeline_panel::TimelinePanel;

/// Draw the entire UI.
///
/// Lays the timeline out to the frame first, so mouse events that follow hit
/// the geometry that was just drawn.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border(app.overlay == Overlay::None))
        .title(panel_title(app))
        .title_style(app.theme.accent_bold())
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(main_area);
    f.render_widget(block, main_area);

    let area = screen_rect(inner);
    if app.timeline.area() != area {
        app.timeline.set_area(area);
    }
    let plan = app.timeline.draw(&app.theme.palette());
    f.render_widget(TimelinePanel::new(&plan, &app.theme), inner);

    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Help => overlays::render_help(f, main_area, &app.theme),
        Overlay::Rename(input) => overlays::render_rename(f, main_area, input, &app.theme),
        Overlay::None => {}
    }
}

fn panel_title(app: &AppState) -> String {
    let zoom = app.timeline.zoom();
    let count = app.timeline.loops().len();
    let window = app.timeline.lane_window();
    let lanes = if window.len() < count {
        format!(" (lanes {}-{})", window.start + 1, window.end)
    } else {
        String::new()
    };
    format!(
        " Loopline | {count} loop(s){lanes} | view {:.0}%-{:.0}% ",
        zoom.min * 100.0,
        zoom.max * 100.0
    )
}

/// Timeline screen units are terminal cells.
pub fn screen_rect(area: Rect) -> ScreenRect {
    ScreenRect::new(
        i32::from(area.x),
        i32::from(area.y),
        i32::from(area.width),
        i32::from(area.height),
    )
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
