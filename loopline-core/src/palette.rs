//! Color lookup consumed by track drawing.
//!
//! Front ends own the real theme and hand the core a `Palette`; the core only
//! ever asks for the highlight, key and (translucent) disabled colors.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Composite this color over an opaque background.
    pub fn over(&self, background: Rgba) -> Rgba {
        let alpha = self.a as u16;
        let mix = |fg: u8, bg: u8| -> u8 {
            ((fg as u16 * alpha + bg as u16 * (255 - alpha) + 127) / 255) as u8
        };
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// The three colors a loop track draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Hovered handles, range boundaries on the page strip.
    pub highlight: Rgba,
    /// Idle handles and label chrome.
    pub key: Rgba,
    /// Shading outside the active range; alpha is chosen per draw.
    pub disabled: Rgba,
}

impl Palette {
    pub fn disabled_with_alpha(&self, alpha: u8) -> Rgba {
        self.disabled.with_alpha(alpha)
    }

    /// Highlight when `hovered`, key color otherwise.
    pub fn handle(&self, hovered: bool) -> Rgba {
        if hovered {
            self.highlight
        } else {
            self.key
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: Rgba::rgb(255, 255, 255),
            key: Rgba::rgb(0, 186, 255),
            disabled: Rgba::rgb(60, 60, 60),
        }
    }
}
