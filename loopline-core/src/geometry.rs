//! Screen-space rectangles and pointer events.
//!
//! Screen coordinates are signed integers: a pointer may sit left of or above
//! the origin while a drag is in progress, and clamped geometry may still be
//! computed from such positions.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen units (pixels or terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    /// One past the last column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// One past the last row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Point-in-rect test, half-open on the right and bottom edges.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Inclusive test against the horizontal extent `[left, right]`.
    pub fn spans_x(&self, x: i32) -> bool {
        x >= self.left() && x <= self.right()
    }

    pub fn clamp_x(&self, x: i32) -> i32 {
        x.clamp(self.left(), self.right().max(self.left()))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Which pointer button produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button: selects.
    Primary,
    /// Right mouse button: removes.
    Secondary,
    Middle,
}

impl PointerButton {
    pub fn is_primary(self) -> bool {
        matches!(self, PointerButton::Primary)
    }
}

/// A pointer position plus the button involved, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub button: Option<PointerButton>,
}

impl PointerEvent {
    /// Movement with no button held.
    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y, button: None }
    }

    pub fn with_button(x: i32, y: i32, button: PointerButton) -> Self {
        Self {
            x,
            y,
            button: Some(button),
        }
    }

    pub fn primary(x: i32, y: i32) -> Self {
        Self::with_button(x, y, PointerButton::Primary)
    }

    pub fn secondary(x: i32, y: i32) -> Self {
        Self::with_button(x, y, PointerButton::Secondary)
    }
}
