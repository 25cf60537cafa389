//! Overlay widgets: help and rename.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::ui::centered_rect;

/// Keyboard and mouse reference.
pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .title(" Help [any key to close] ")
        .title_style(theme.accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, theme, "Mouse");
    key(&mut lines, theme, "Left drag", "Move the in- or out-point");
    key(&mut lines, theme, "Left click in", "Make that loop current");
    key(&mut lines, theme, "Right click in", "Remove loop (not the last one)");
    key(&mut lines, theme, "Wheel", "Zoom in / out");
    lines.push(Line::from(""));

    section(&mut lines, theme, "Keys");
    key(&mut lines, theme, "n", "Add a loop");
    key(&mut lines, theme, "Tab", "Cycle the current loop");
    key(&mut lines, theme, "r", "Rename the current loop");
    key(&mut lines, theme, "+ / -", "Zoom in / out");
    key(&mut lines, theme, "Left / Right", "Scroll the view");
    key(&mut lines, theme, "PgUp / PgDn", "Scroll the loop lanes");
    key(&mut lines, theme, "0", "Show the whole timeline");
    key(&mut lines, theme, "q", "Quit");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

/// Text input for the current loop's name.
pub fn render_rename(f: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .title(" Rename loop [Enter]save [Esc]cancel ")
        .title_style(theme.accent_bold());

    let line = Line::from(vec![
        Span::styled("> ", theme.muted()),
        Span::raw(input),
        Span::styled("_", theme.accent()),
    ]);
    let para = Paragraph::new(line).block(block);
    f.render_widget(para, popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, theme: &Theme, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme.accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, theme: &Theme, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme.accent()),
        Span::styled(desc.to_string(), theme.muted()),
    ]));
}
