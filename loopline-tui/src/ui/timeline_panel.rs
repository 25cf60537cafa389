//! Timeline panel: rasterizes a core draw plan into the terminal buffer.
//!
//! Plan coordinates are absolute buffer cells. Every write is clipped to the
//! widget area, so handles dragged off-screen draw nothing instead of panicking.
//! - Lines: box-drawing glyphs, heavy for thick guides
//! - Fills: background color, translucent ones blended over what is there
//! - Play marker: a single `▶` cell
//! - Label boxes: bracketed text on short lanes, a bordered block on tall ones

use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

use loopline_core::{DrawCommand, DrawPlan, Rgba, ScreenRect};

use crate::theme::{Theme, to_color};

/// Guides at least this wide use heavy glyphs.
const HEAVY_LINE_WIDTH: u8 = 3;

pub struct TimelinePanel<'a> {
    plan: &'a DrawPlan,
    theme: &'a Theme,
}

impl<'a> TimelinePanel<'a> {
    pub fn new(plan: &'a DrawPlan, theme: &'a Theme) -> Self {
        Self { plan, theme }
    }

    fn fill(&self, area: Rect, buf: &mut Buffer, rect: ScreenRect, color: Rgba) {
        let left = rect.left().max(i32::from(area.left()));
        let right = rect.right().min(i32::from(area.right()));
        let top = rect.top().max(i32::from(area.top()));
        let bottom = rect.bottom().min(i32::from(area.bottom()));
        for y in top..bottom {
            for x in left..right {
                if let Some(cell) = cell_at(buf, area, x, y) {
                    let under = cell.bg;
                    cell.set_bg(self.theme.blend(color, under));
                }
            }
        }
    }

    fn line(&self, area: Rect, buf: &mut Buffer, from: (i32, i32), to: (i32, i32), color: Rgba, width: u8) {
        let fg = to_color(color);
        if from.0 == to.0 {
            let symbol = if width >= HEAVY_LINE_WIDTH { "┃" } else { "│" };
            let (top, bottom) = (from.1.min(to.1), from.1.max(to.1));
            let top = top.max(i32::from(area.top()));
            let bottom = bottom.min(i32::from(area.bottom()));
            for y in top..bottom {
                put(buf, area, from.0, y, symbol, fg);
            }
        } else if from.1 == to.1 {
            let symbol = if width >= HEAVY_LINE_WIDTH { "━" } else { "─" };
            let (left, right) = (from.0.min(to.0), from.0.max(to.0));
            let left = left.max(i32::from(area.left()));
            let right = right.min(i32::from(area.right()));
            for x in left..right {
                put(buf, area, x, from.1, symbol, fg);
            }
        } else {
            let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs());
            for i in 0..=steps {
                let t = f64::from(i) / f64::from(steps);
                let x = from.0 + (f64::from(to.0 - from.0) * t).round() as i32;
                let y = from.1 + (f64::from(to.1 - from.1) * t).round() as i32;
                put(buf, area, x, y, "•", fg);
            }
        }
    }

    fn marker(&self, area: Rect, buf: &mut Buffer, points: &[(i32, i32); 3], color: Rgba) {
        let x = points.iter().map(|p| p.0).min().unwrap_or(0);
        let top = points.iter().map(|p| p.1).min().unwrap_or(0);
        let bottom = points.iter().map(|p| p.1).max().unwrap_or(0);
        put(buf, area, x, (top + bottom) / 2, "▶", to_color(color));
    }

    fn label(&self, area: Rect, buf: &mut Buffer, rect: ScreenRect, border: Rgba, text: &str) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let style = Style::default().fg(to_color(border));

        if rect.height >= 3 {
            if let Some(target) = clip(area, rect) {
                Paragraph::new(text.to_string())
                    .style(Style::default().fg(self.theme.text_primary))
                    .block(Block::default().borders(Borders::ALL).border_style(style))
                    .render(target, buf);
            }
            return;
        }

        let bracketed = format!("[{text}]");
        let visible: String = bracketed.chars().take(rect.width as usize).collect();
        put_str(buf, area, rect.x, rect.y, &visible, to_color(border));
    }
}

impl<'a> Widget for TimelinePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for command in self.plan {
            match command {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => self.line(area, buf, *from, *to, *color, *width),
                DrawCommand::FillRect { rect, color } => self.fill(area, buf, *rect, *color),
                DrawCommand::Triangle { points, color } => self.marker(area, buf, points, *color),
                DrawCommand::LabelBox { rect, border, text } => {
                    self.label(area, buf, *rect, *border, text)
                }
                DrawCommand::Text { at, text, color } => {
                    put_str(buf, area, at.0, at.1, text, to_color(*color))
                }
            }
        }
    }
}

/// Cell at `(x, y)` if it lies inside `area`.
fn cell_at(buf: &mut Buffer, area: Rect, x: i32, y: i32) -> Option<&mut Cell> {
    let position = Position::new(u16::try_from(x).ok()?, u16::try_from(y).ok()?);
    if !area.contains(position) {
        return None;
    }
    buf.cell_mut(position)
}

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, fg: ratatui::style::Color) {
    if let Some(cell) = cell_at(buf, area, x, y) {
        cell.set_symbol(symbol).set_fg(fg);
    }
}

fn put_str(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, fg: ratatui::style::Color) {
    let mut symbol = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        put(buf, area, x + i as i32, y, ch.encode_utf8(&mut symbol), fg);
    }
}

/// Part of `rect` inside `area`, as a buffer rect.
fn clip(area: Rect, rect: ScreenRect) -> Option<Rect> {
    let left = rect.left().max(i32::from(area.left()));
    let right = rect.right().min(i32::from(area.right()));
    let top = rect.top().max(i32::from(area.top()));
    let bottom = rect.bottom().min(i32::from(area.bottom()));
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
