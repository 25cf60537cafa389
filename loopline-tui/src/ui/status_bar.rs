//! Bottom status bar: key hints, current loop range, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    // Key hints
    spans.push(Span::styled(
        " q:Quit n:New Tab:Next r:Rename +/-:Zoom ?:Help",
        theme.muted(),
    ));

    // Current loop
    if let Some(label) = app.current_label() {
        let range = app.timeline.in_out_range();
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{label} [{:.3}, {:.3}]", range.min, range.max),
            theme.accent(),
        ));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme.accent(),
            StatusLevel::Warning => theme.warning_style(),
            StatusLevel::Error => theme.negative_style(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
