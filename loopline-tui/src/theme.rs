//! Color theme for the Loopline TUI.
//!
//! Tracks draw with a core `Palette`; this module owns the terminal colors it
//! is derived from, plus the small set of styles the chrome uses.
//!
//! # Color Palette
//! - **Background**: deep charcoal, the base translucent fills blend over
//! - **Key**: electric blue (idle handles, label boxes, ruler)
//! - **Highlight**: white (hovered handles, range edges)
//! - **Disabled**: dark gray (shading outside the active range)

use ratatui::style::{Color, Modifier, Style};

use loopline_core::{Palette, Rgba};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Panel background; disabled shading is blended over it.
    pub background: Color,
    /// Idle handles, label chrome, ruler ticks.
    pub key: Color,
    /// Hovered handles and range edges.
    pub highlight: Color,
    /// Shading outside the active range, before alpha.
    pub disabled: Color,
    /// Hints and secondary text.
    pub muted: Color,
    pub warning: Color,
    pub negative: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            key: Color::Rgb(0, 186, 255),
            highlight: Color::Rgb(255, 255, 255),
            disabled: Color::Rgb(60, 60, 60),
            muted: Color::Rgb(100, 149, 237),
            warning: Color::Rgb(255, 140, 0),
            negative: Color::Rgb(255, 20, 147),
            text_primary: Color::White,
        }
    }

    /// Core palette for track drawing.
    pub fn palette(&self) -> Palette {
        Palette {
            highlight: to_rgba(self.highlight),
            key: to_rgba(self.key),
            disabled: to_rgba(self.disabled),
        }
    }

    /// Terminal color for `color`, composited over `under` when translucent.
    pub fn blend(&self, color: Rgba, under: Color) -> Color {
        let base = match under {
            Color::Rgb(..) => to_rgba(under),
            _ => to_rgba(self.background),
        };
        to_color(color.over(base))
    }

    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.key)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.key)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn negative_style(&self) -> Style {
        Style::default().fg(self.negative)
    }
}

/// Opaque terminal color for a core color; alpha is dropped.
pub fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Core color for a terminal color. Named colors map to their usual RGB values.
pub fn to_rgba(color: Color) -> Rgba {
    match color {
        Color::Rgb(r, g, b) => Rgba::rgb(r, g, b),
        Color::Black => Rgba::rgb(0, 0, 0),
        Color::Red => Rgba::rgb(128, 0, 0),
        Color::Green => Rgba::rgb(0, 128, 0),
        Color::Yellow => Rgba::rgb(128, 128, 0),
        Color::Blue => Rgba::rgb(0, 0, 128),
        Color::Magenta => Rgba::rgb(128, 0, 128),
        Color::Cyan => Rgba::rgb(0, 128, 128),
        Color::Gray => Rgba::rgb(192, 192, 192),
        Color::DarkGray => Rgba::rgb(128, 128, 128),
        Color::LightRed => Rgba::rgb(255, 0, 0),
        Color::LightGreen => Rgba::rgb(0, 255, 0),
        Color::LightYellow => Rgba::rgb(255, 255, 0),
        Color::LightBlue => Rgba::rgb(0, 0, 255),
        Color::LightMagenta => Rgba::rgb(255, 0, 255),
        Color::LightCyan => Rgba::rgb(0, 255, 255),
        Color::White => Rgba::rgb(255, 255, 255),
        _ => Rgba::rgb(0, 0, 0),
    }
}
