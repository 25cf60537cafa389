//! Loop range track: the interactive in/out editor.
//!
//! Owns one normalized range and the pointer state machine that edits it:
//!
//! ```text
//!            press near in-handle             release (saves)
//!   Idle ─────────────────────────▶ DraggingIn ──────────────▶ Idle
//!     │      press near out-handle            release (saves)
//!     └───────────────────────────▶ DraggingOut ─────────────▶ Idle
//! ```
//!
//! Hit testing happens in screen space so a handle is equally easy to grab at
//! every zoom level. The in-handle is checked first and has the wider catch
//! radius, so a press that lands in both zones always grabs the in-handle.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::config::TrackMetrics;
use crate::draw::{DrawCommand, DrawContext, DrawPlan};
use crate::geometry::{PointerButton, PointerEvent, ScreenRect};
use crate::label::LoopLabel;
use crate::mapper::CoordinateMapper;
use crate::range::NormalizedRange;
use crate::settings::{self, SettingsError};
use crate::track::{PressOutcome, Track};

const GUIDE_LINE_WIDTH: u8 = 3;
const EDGE_LINE_WIDTH: u8 = 1;

/// Which handle, if any, is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingIn,
    DraggingOut,
}

/// One editable loop on the timeline.
#[derive(Debug, Clone)]
pub struct RangeTrack {
    range: NormalizedRange,
    drag: DragState,
    hovering_in: bool,
    hovering_out: bool,
    /// Handle position minus pointer position at press time, in screen units.
    drag_offset: i32,
    label: LoopLabel,
    bounds: ScreenRect,
    /// Strip the disabled shading is drawn into; usually taller than `bounds`.
    page_bounds: ScreenRect,
    settings_path: PathBuf,
    metrics: TrackMetrics,
}

impl RangeTrack {
    /// New loop at a random default position drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(
        settings_path: impl Into<PathBuf>,
        metrics: TrackMetrics,
        rng: &mut R,
    ) -> Self {
        Self::with_range(
            settings_path,
            metrics,
            NormalizedRange::random_default(rng),
        )
    }

    pub fn with_range(
        settings_path: impl Into<PathBuf>,
        metrics: TrackMetrics,
        range: NormalizedRange,
    ) -> Self {
        Self {
            range,
            drag: DragState::Idle,
            hovering_in: false,
            hovering_out: false,
            drag_offset: 0,
            label: LoopLabel::default(),
            bounds: ScreenRect::default(),
            page_bounds: ScreenRect::default(),
            settings_path: settings_path.into(),
            metrics,
        }
    }

    pub fn range(&self) -> NormalizedRange {
        self.range
    }

    pub fn set_range(&mut self, range: NormalizedRange) {
        self.range = range;
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    pub fn hovering_in(&self) -> bool {
        self.hovering_in
    }

    pub fn hovering_out(&self) -> bool {
        self.hovering_out
    }

    pub fn drag_offset(&self) -> i32 {
        self.drag_offset
    }

    pub fn label(&self) -> &str {
        self.label.text()
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    pub fn page_bounds(&self) -> ScreenRect {
        self.page_bounds
    }

    pub fn set_page_bounds(&mut self, page_bounds: ScreenRect) {
        self.page_bounds = page_bounds;
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn metrics(&self) -> &TrackMetrics {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: TrackMetrics) {
        self.metrics = metrics;
    }

    /// Screen-x of the in- and out-handles, clamped to the track's horizontal extent.
    pub fn clamped_handles(&self, mapper: &dyn CoordinateMapper) -> (i32, i32) {
        let in_x = self
            .bounds
            .clamp_x(mapper.normalized_to_screen_x(self.range.min));
        let out_x = self
            .bounds
            .clamp_x(mapper.normalized_to_screen_x(self.range.max));
        (in_x, out_x)
    }

    /// Box the label widget is given, right of the play marker.
    ///
    /// The width is the absolute in→out distance minus the margin, so clamped or
    /// inverted handles still produce a valid box.
    pub fn label_bounds(&self, in_x: i32, out_x: i32) -> ScreenRect {
        let label = &self.metrics.label;
        ScreenRect::new(
            in_x + label.gap,
            self.bounds.y + label.top,
            (out_x - in_x - label.margin).abs(),
            label.height,
        )
    }

    fn update_hover(&mut self, event: &PointerEvent, mapper: &dyn CoordinateMapper) {
        if !self.bounds.contains(event.x, event.y) {
            self.hovering_in = false;
            self.hovering_out = false;
            return;
        }
        let in_x = mapper.normalized_to_screen_x(self.range.min);
        let out_x = mapper.normalized_to_screen_x(self.range.max);
        self.hovering_in = handle_distance(in_x, event.x).abs() < i64::from(self.metrics.in_radius);
        self.hovering_out =
            handle_distance(out_x, event.x).abs() < i64::from(self.metrics.out_radius);
    }

    fn play_marker(&self, in_x: i32) -> [(i32, i32); 3] {
        let marker = &self.metrics.marker;
        let top = self.bounds.y + marker.top;
        [
            (in_x, top),
            (in_x, top + marker.height),
            (in_x + marker.width, top + marker.height / 2),
        ]
    }
}

/// Signed handle-to-pointer distance. Widened so far off-screen handles can't overflow.
fn handle_distance(handle_x: i32, x: i32) -> i64 {
    i64::from(handle_x) - i64::from(x)
}

impl Track for RangeTrack {
    fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: ScreenRect) {
        self.bounds = bounds;
    }

    fn draw(&self, ctx: &DrawContext<'_>, plan: &mut DrawPlan) {
        let bounds = self.bounds;
        let palette = ctx.palette;

        if bounds.height > self.metrics.min_guide_height {
            let in_screen_x = ctx.mapper.normalized_to_screen_x(self.range.min);
            let out_screen_x = ctx.mapper.normalized_to_screen_x(self.range.max);
            if bounds.spans_x(in_screen_x) {
                plan.push(DrawCommand::vline(
                    in_screen_x,
                    bounds.top(),
                    bounds.bottom(),
                    palette.handle(self.hovering_in),
                    GUIDE_LINE_WIDTH,
                ));
            }
            if bounds.spans_x(out_screen_x) {
                plan.push(DrawCommand::vline(
                    out_screen_x,
                    bounds.top(),
                    bounds.bottom(),
                    palette.handle(self.hovering_out),
                    GUIDE_LINE_WIDTH,
                ));
            }
        }

        let (in_x, out_x) = self.clamped_handles(ctx.mapper);
        let page = self.page_bounds;
        let shade = palette.disabled_with_alpha(self.metrics.disabled_alpha_for(ctx.sibling_count));

        if bounds.left() < in_x {
            plan.push(DrawCommand::FillRect {
                rect: ScreenRect::new(bounds.left(), page.y, in_x - bounds.left(), page.height),
                color: shade,
            });
            plan.push(DrawCommand::vline(
                in_x,
                page.top(),
                page.bottom(),
                palette.highlight,
                EDGE_LINE_WIDTH,
            ));
        }

        if bounds.right() > out_x {
            plan.push(DrawCommand::FillRect {
                rect: ScreenRect::new(out_x, page.y, bounds.right() - out_x, page.height),
                color: shade,
            });
            plan.push(DrawCommand::vline(
                out_x,
                page.top(),
                page.bottom(),
                palette.highlight,
                EDGE_LINE_WIDTH,
            ));
        }

        plan.push(DrawCommand::Triangle {
            points: self.play_marker(in_x),
            color: palette.key,
        });

        plan.push(DrawCommand::LabelBox {
            rect: self.label_bounds(in_x, out_x),
            border: palette.handle(self.hovering_in || self.hovering_out),
            text: self.label.text().to_string(),
        });
    }

    fn pointer_moved(&mut self, event: &PointerEvent, mapper: &dyn CoordinateMapper) {
        self.update_hover(event, mapper);
    }

    fn pointer_pressed(
        &mut self,
        event: &PointerEvent,
        mapper: &dyn CoordinateMapper,
    ) -> PressOutcome {
        if !self.bounds.contains(event.x, event.y) {
            return PressOutcome::Ignored;
        }

        let dist_to_in = handle_distance(mapper.normalized_to_screen_x(self.range.min), event.x);
        if dist_to_in.abs() < i64::from(self.metrics.in_radius) {
            self.drag = DragState::DraggingIn;
            self.drag_offset = dist_to_in as i32;
            return PressOutcome::GrabbedIn(event.button.unwrap_or(PointerButton::Primary));
        }

        let dist_to_out = handle_distance(mapper.normalized_to_screen_x(self.range.max), event.x);
        if dist_to_out.abs() < i64::from(self.metrics.out_radius) {
            self.drag = DragState::DraggingOut;
            self.drag_offset = dist_to_out as i32;
            return PressOutcome::GrabbedOut;
        }

        PressOutcome::Missed
    }

    fn pointer_dragged(&mut self, event: &PointerEvent, mapper: &dyn CoordinateMapper) {
        let target = event.x - self.drag_offset;
        match self.drag {
            DragState::DraggingIn => self.range.set_min(mapper.screen_to_normalized_x(target)),
            DragState::DraggingOut => self.range.set_max(mapper.screen_to_normalized_x(target)),
            DragState::Idle => {}
        }
    }

    fn pointer_released(&mut self, _event: &PointerEvent) -> Result<bool, SettingsError> {
        if self.drag == DragState::Idle {
            return Ok(false);
        }
        self.drag = DragState::Idle;
        self.save()?;
        Ok(true)
    }

    fn load(&self) -> Option<NormalizedRange> {
        match settings::load(&self.settings_path) {
            Ok(range) => Some(range),
            Err(e) => {
                log::debug!("couldn't load in/out settings, using full range: {e}");
                Some(NormalizedRange::full())
            }
        }
    }

    fn save(&self) -> Result<(), SettingsError> {
        settings::save(&self.settings_path, self.range)?;
        log::debug!(
            "saved loop '{}' [{:.4}, {:.4}] to {}",
            self.label.text(),
            self.range.min,
            self.range.max,
            self.settings_path.display()
        );
        Ok(())
    }
}
