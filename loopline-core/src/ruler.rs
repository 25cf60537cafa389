//! Time ruler drawn above the loop lanes.

use crate::draw::{DrawCommand, DrawContext, DrawPlan};
use crate::geometry::ScreenRect;
use crate::track::Track;

/// Tick ruler. Display only; ignores the pointer and persists nothing.
#[derive(Debug, Clone, Default)]
pub struct RulerTrack {
    bounds: ScreenRect,
    /// Minimum distance between captions, in screen units.
    min_caption_spacing: i32,
}

impl RulerTrack {
    pub fn new(min_caption_spacing: i32) -> Self {
        Self {
            bounds: ScreenRect::default(),
            min_caption_spacing,
        }
    }

    /// Tick spacing in normalized units for a visible span, keeping roughly
    /// `max_ticks` ticks on screen.
    pub fn tick_step(visible_span: f64, max_ticks: usize) -> f64 {
        const STEPS: [f64; 6] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.25];
        let max_ticks = max_ticks.max(1) as f64;
        STEPS
            .into_iter()
            .find(|step| visible_span.abs() / step <= max_ticks)
            .unwrap_or(0.25)
    }

    /// Percent caption with enough decimals to tell neighbouring ticks apart.
    pub fn caption(value: f64, step: f64) -> String {
        let decimals = if step >= 0.01 { 0 } else { 1 };
        format!("{:.*}%", decimals, value * 100.0)
    }
}

impl Track for RulerTrack {
    fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: ScreenRect) {
        self.bounds = bounds;
    }

    fn draw(&self, ctx: &DrawContext<'_>, plan: &mut DrawPlan) {
        let bounds = self.bounds;
        if bounds.is_empty() {
            return;
        }
        let start = ctx.mapper.screen_to_normalized_x(bounds.left());
        let end = ctx.mapper.screen_to_normalized_x(bounds.right());
        let spacing = self.min_caption_spacing.max(1);
        let max_ticks = (bounds.width / spacing).max(1) as usize;
        let step = Self::tick_step(end - start, max_ticks);

        let first = (start.max(0.0) / step).ceil() as i64;
        let last = (end.min(1.0) / step).floor() as i64;
        for i in first..=last {
            let value = i as f64 * step;
            let x = ctx.mapper.normalized_to_screen_x(value);
            if !bounds.spans_x(x) || x == bounds.right() {
                continue;
            }
            plan.push(DrawCommand::vline(x, bounds.top(), bounds.bottom(), ctx.palette.key, 1));
            plan.push(DrawCommand::Text {
                at: (x + 1, bounds.top()),
                text: Self::caption(value, step),
                color: ctx.palette.key,
            });
        }
    }
}
