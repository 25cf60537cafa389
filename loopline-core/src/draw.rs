//! Draw plans: what a track wants drawn, independent of any backend.
//!
//! Tracks append primitives to a `DrawPlan` in painter's order. Front ends
//! rasterize the plan; the core never touches a screen.

use crate::geometry::ScreenRect;
use crate::mapper::CoordinateMapper;
use crate::palette::{Palette, Rgba};

/// A single drawing primitive in screen units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Straight line between two points.
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgba,
        width: u8,
    },
    /// Filled rectangle, possibly translucent.
    FillRect { rect: ScreenRect, color: Rgba },
    /// Filled triangle.
    Triangle {
        points: [(i32, i32); 3],
        color: Rgba,
    },
    /// Outlined box the label widget renders its text into.
    LabelBox {
        rect: ScreenRect,
        border: Rgba,
        text: String,
    },
    /// Short text run, used by the ruler for tick captions.
    Text {
        at: (i32, i32),
        text: String,
        color: Rgba,
    },
}

impl DrawCommand {
    /// Vertical line at `x` from `top` (inclusive) to `bottom` (exclusive).
    pub fn vline(x: i32, top: i32, bottom: i32, color: Rgba, width: u8) -> Self {
        DrawCommand::Line {
            from: (x, top),
            to: (x, bottom),
            color,
            width,
        }
    }
}

/// Ordered list of primitives for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawPlan {
    commands: Vec<DrawCommand>,
}

impl DrawPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn label_boxes(&self) -> impl Iterator<Item = (&ScreenRect, &Rgba, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::LabelBox { rect, border, text } => Some((rect, border, text.as_str())),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&ScreenRect, &Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a DrawPlan {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Everything a track may consult while drawing.
pub struct DrawContext<'a> {
    pub mapper: &'a dyn CoordinateMapper,
    pub palette: &'a Palette,
    /// Number of registered sibling loops, including the one drawing.
    pub sibling_count: usize,
}
