//! Screen-x ↔ normalized-x conversion.
//!
//! Tracks never compute or cache a mapping themselves. Every draw, hit test and
//! drag receives a `&dyn CoordinateMapper` built from the layout of that moment,
//! so resizing, zooming and scrolling take effect on the very next event.

use crate::geometry::ScreenRect;
use crate::range::NormalizedRange;

/// Furthest off-screen x a mapper reports. Leaves headroom for offsets and
/// widths computed from mapped positions.
pub const SCREEN_LIMIT: i32 = i32::MAX / 4;

/// Conversion between timeline-normalized x and screen x.
pub trait CoordinateMapper {
    fn normalized_to_screen_x(&self, x: f64) -> i32;
    fn screen_to_normalized_x(&self, x: i32) -> f64;
}

/// Linear mapping of the visible zoom window onto a track's horizontal bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineMapper {
    bounds: ScreenRect,
    zoom: NormalizedRange,
}

impl TimelineMapper {
    pub fn new(bounds: ScreenRect, zoom: NormalizedRange) -> Self {
        Self { bounds, zoom }
    }

    /// Mapper showing the whole timeline.
    pub fn unzoomed(bounds: ScreenRect) -> Self {
        Self::new(bounds, NormalizedRange::full())
    }

    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    pub fn zoom(&self) -> NormalizedRange {
        self.zoom
    }
}

impl CoordinateMapper for TimelineMapper {
    fn normalized_to_screen_x(&self, x: f64) -> i32 {
        let span = self.zoom.span();
        if span.abs() < f64::EPSILON {
            return self.bounds.left();
        }
        let t = (x - self.zoom.min) / span;
        let screen_x = (self.bounds.left() as f64 + t * self.bounds.width as f64).round();
        if screen_x.is_nan() {
            return self.bounds.left();
        }
        screen_x.clamp(-(SCREEN_LIMIT as f64), SCREEN_LIMIT as f64) as i32
    }

    fn screen_to_normalized_x(&self, x: i32) -> f64 {
        if self.bounds.width == 0 {
            return self.zoom.min;
        }
        let t = (f64::from(x) - f64::from(self.bounds.left())) / f64::from(self.bounds.width);
        self.zoom.min + t * self.zoom.span()
    }
}
