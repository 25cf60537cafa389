//! Timeline: owner of the loop registry, the zoom window and the layout.
//!
//! All track and registry mutation goes through `&mut Timeline`, which lives on
//! the UI thread. Pointer events are dispatched from here: moves, drags and
//! releases reach every loop, a press goes to loops in order and stops at the
//! first one that grabs a handle. Registry effects of a press (select, remove)
//! are applied here, never by the track itself.

use std::path::PathBuf;

use rand::Rng;

use crate::config::TrackMetrics;
use crate::draw::{DrawContext, DrawPlan};
use crate::geometry::{PointerEvent, ScreenRect};
use crate::mapper::TimelineMapper;
use crate::palette::Palette;
use crate::range::NormalizedRange;
use crate::range_track::RangeTrack;
use crate::registry::{LoopId, LoopRegistry, Removal};
use crate::ruler::RulerTrack;
use crate::settings::SettingsError;
use crate::track::{PressOutcome, RegistryAction, Track};

/// Narrowest zoom window, in normalized units.
pub const MIN_ZOOM_SPAN: f64 = 0.01;

/// Vertical layout of the timeline body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    pub ruler_height: i32,
    pub lane_height: i32,
    /// Minimum spacing between ruler captions.
    pub caption_spacing: i32,
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            ruler_height: 20,
            lane_height: 40,
            caption_spacing: 80,
        }
    }
}

impl LaneLayout {
    pub fn terminal() -> Self {
        Self {
            ruler_height: 1,
            lane_height: 3,
            caption_spacing: 8,
        }
    }
}

/// What a press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressReport {
    pub loop_id: LoopId,
    pub outcome: PressOutcome,
    /// Set when the press ran the removal protocol.
    pub removal: Option<Removal>,
    /// Settings file of the pressed loop. Still valid after a removal.
    pub settings_path: PathBuf,
}

/// What a release did.
#[derive(Debug, Default)]
pub struct ReleaseReport {
    pub saved: Vec<LoopId>,
    pub failed: Vec<(LoopId, SettingsError)>,
}

pub struct Timeline {
    loops: LoopRegistry,
    ruler: RulerTrack,
    zoom: NormalizedRange,
    metrics: TrackMetrics,
    layout: LaneLayout,
    area: ScreenRect,
    /// Index of the topmost visible lane.
    first_lane: usize,
}

impl Timeline {
    pub fn new(metrics: TrackMetrics, layout: LaneLayout) -> Self {
        Self {
            loops: LoopRegistry::new(),
            ruler: RulerTrack::new(layout.caption_spacing),
            zoom: NormalizedRange::full(),
            metrics,
            layout,
            area: ScreenRect::default(),
            first_lane: 0,
        }
    }

    pub fn loops(&self) -> &LoopRegistry {
        &self.loops
    }

    pub fn metrics(&self) -> &TrackMetrics {
        &self.metrics
    }

    pub fn area(&self) -> ScreenRect {
        self.area
    }

    pub fn ruler(&self) -> &RulerTrack {
        &self.ruler
    }

    /// Place the timeline body at `area` and lay out ruler and lanes in it.
    pub fn set_area(&mut self, area: ScreenRect) {
        self.area = area;
        self.relayout();
    }

    /// Strip below the ruler that every loop's disabled shading covers.
    pub fn page_bounds(&self) -> ScreenRect {
        let ruler = self.layout.ruler_height.min(self.area.height);
        ScreenRect::new(
            self.area.x,
            self.area.y + ruler,
            self.area.width,
            self.area.height - ruler,
        )
    }

    /// How many lanes fit below the ruler. Always at least one.
    pub fn visible_lanes(&self) -> usize {
        let lane_height = self.layout.lane_height.max(1);
        (self.page_bounds().height / lane_height).max(1) as usize
    }

    pub fn first_lane(&self) -> usize {
        self.first_lane
    }

    /// Lane indices currently on screen.
    pub fn lane_window(&self) -> std::ops::Range<usize> {
        let end = (self.first_lane + self.visible_lanes()).min(self.loops.len());
        self.first_lane..end
    }

    /// Scroll the lanes by `delta` rows, keeping the window filled.
    pub fn scroll_lanes(&mut self, delta: isize) {
        self.first_lane = self.first_lane.saturating_add_signed(delta);
        self.relayout();
    }

    /// Scroll just far enough that the current loop's lane is on screen.
    fn reveal_current(&mut self) {
        if let Some(pos) = self.loops.current().and_then(|id| self.loops.position(id)) {
            let visible = self.visible_lanes();
            if pos < self.first_lane {
                self.first_lane = pos;
            } else if pos >= self.first_lane + visible {
                self.first_lane = pos + 1 - visible;
            }
        }
        self.relayout();
    }

    fn relayout(&mut self) {
        let area = self.area;
        self.ruler.set_bounds(ScreenRect::new(
            area.x,
            area.y,
            area.width,
            self.layout.ruler_height.min(area.height),
        ));
        self.first_lane = self
            .first_lane
            .min(self.loops.len().saturating_sub(self.visible_lanes()));
        let page = self.page_bounds();
        let lane_height = self.layout.lane_height;
        let window = self.lane_window();
        for (index, (_, track)) in self.loops.iter_mut().enumerate() {
            // Off-screen lanes collapse to zero height so nothing can hit them.
            let bounds = if window.contains(&index) {
                ScreenRect::new(
                    page.x,
                    page.y + (index - window.start) as i32 * lane_height,
                    page.width,
                    lane_height,
                )
            } else {
                ScreenRect::new(page.x, page.y, page.width, 0)
            };
            track.set_bounds(bounds);
            track.set_page_bounds(page);
        }
    }

    /// Mapper for the current layout and zoom. Built fresh for every use.
    pub fn mapper(&self) -> TimelineMapper {
        TimelineMapper::new(self.area, self.zoom)
    }

    // ── Loops ────────────────────────────────────────────────────────

    /// Register a loop at a random default position.
    pub fn add_loop<R: Rng + ?Sized>(
        &mut self,
        settings_path: impl Into<PathBuf>,
        rng: &mut R,
    ) -> LoopId {
        let track = RangeTrack::new(settings_path, self.metrics, rng);
        self.insert(track)
    }

    pub fn add_loop_with_range(
        &mut self,
        settings_path: impl Into<PathBuf>,
        range: NormalizedRange,
    ) -> LoopId {
        let track = RangeTrack::with_range(settings_path, self.metrics, range);
        self.insert(track)
    }

    fn insert(&mut self, track: RangeTrack) -> LoopId {
        let id = self.loops.push(track);
        self.relayout();
        id
    }

    pub fn loop_track(&self, id: LoopId) -> Option<&RangeTrack> {
        self.loops.get(id)
    }

    pub fn current(&self) -> Option<LoopId> {
        self.loops.current()
    }

    pub fn set_current(&mut self, id: LoopId) -> bool {
        let changed = self.loops.set_current(id);
        self.reveal_current();
        changed
    }

    pub fn cycle_current(&mut self) -> Option<LoopId> {
        let next = self.loops.cycle_current();
        self.reveal_current();
        next
    }

    /// Run the removal protocol for `id`.
    pub fn remove_loop(&mut self, id: LoopId) -> Removal {
        let removal = self.loops.remove(id);
        if matches!(removal, Removal::Removed { .. }) {
            log::info!("removed loop {id}");
            self.reveal_current();
        }
        removal
    }

    pub fn rename_loop(&mut self, id: LoopId, name: &str) -> bool {
        match self.loops.get_mut(id) {
            Some(track) => {
                track.set_label(name);
                true
            }
            None => false,
        }
    }

    pub fn rename_current(&mut self, name: &str) -> bool {
        match self.loops.current() {
            Some(id) => self.rename_loop(id, name),
            None => false,
        }
    }

    /// The timeline's in/out range: the current loop's range, or the whole
    /// timeline when no loop is registered.
    pub fn in_out_range(&self) -> NormalizedRange {
        self.loops
            .current_track()
            .map(RangeTrack::range)
            .unwrap_or_else(NormalizedRange::full)
    }

    pub fn set_in_out_range(&mut self, range: NormalizedRange) {
        if let Some(track) = self.loops.current_track_mut() {
            track.set_range(range);
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Make `id` current and push its persisted range (or the full-range
    /// fallback) to the in/out range.
    pub fn load_loop(&mut self, id: LoopId) -> bool {
        let Some(range) = self.loops.get(id).and_then(|track| track.load()) else {
            return false;
        };
        self.loops.set_current(id);
        self.set_in_out_range(range);
        true
    }

    /// Load every loop in order, then restore the previously current loop.
    pub fn load_all(&mut self) {
        let previous = self.loops.current();
        for id in self.loops.ids() {
            self.load_loop(id);
        }
        if let Some(id) = previous {
            self.set_current(id);
        }
    }

    pub fn save_loop(&self, id: LoopId) -> Result<(), SettingsError> {
        match self.loops.get(id) {
            Some(track) => track.save(),
            None => Ok(()),
        }
    }

    // ── Pointer dispatch ─────────────────────────────────────────────

    pub fn pointer_moved(&mut self, event: &PointerEvent) {
        let mapper = self.mapper();
        for (_, track) in self.loops.iter_mut() {
            track.pointer_moved(event, &mapper);
        }
    }

    pub fn pointer_pressed(&mut self, event: &PointerEvent) -> Option<PressReport> {
        let mapper = self.mapper();
        for id in self.loops.ids() {
            let Some(track) = self.loops.get_mut(id) else {
                continue;
            };
            let outcome = track.pointer_pressed(event, &mapper);
            if !outcome.grabbed() {
                continue;
            }
            let settings_path = track.settings_path().to_path_buf();

            let removal = match outcome.registry_action() {
                Some(RegistryAction::Select) => {
                    self.loops.set_current(id);
                    None
                }
                Some(RegistryAction::Remove) => Some(self.remove_loop(id)),
                None => None,
            };
            return Some(PressReport {
                loop_id: id,
                outcome,
                removal,
                settings_path,
            });
        }
        None
    }

    pub fn pointer_dragged(&mut self, event: &PointerEvent) {
        let mapper = self.mapper();
        for (_, track) in self.loops.iter_mut() {
            track.pointer_dragged(event, &mapper);
        }
    }

    pub fn pointer_released(&mut self, event: &PointerEvent) -> ReleaseReport {
        let mut report = ReleaseReport::default();
        for (id, track) in self.loops.iter_mut() {
            match track.pointer_released(event) {
                Ok(true) => report.saved.push(id),
                Ok(false) => {}
                Err(e) => {
                    log::warn!("failed to save loop {id}: {e}");
                    report.failed.push((id, e));
                }
            }
        }
        report
    }

    pub fn is_dragging(&self) -> bool {
        self.loops.iter().any(|(_, track)| track.is_dragging())
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Plan the whole timeline: ruler first, then each loop in order.
    pub fn draw(&self, palette: &Palette) -> DrawPlan {
        let mapper = self.mapper();
        let ctx = DrawContext {
            mapper: &mapper,
            palette,
            sibling_count: self.loops.len().max(1),
        };
        let mut plan = DrawPlan::new();
        self.ruler.draw(&ctx, &mut plan);
        let window = self.lane_window();
        for (_, track) in self.loops.iter().skip(window.start).take(window.len()) {
            track.draw(&ctx, &mut plan);
        }
        plan
    }

    // ── Zoom ─────────────────────────────────────────────────────────

    pub fn zoom(&self) -> NormalizedRange {
        self.zoom
    }

    /// Set the visible window, clamped into `[0, 1]` with a minimum span.
    pub fn set_zoom(&mut self, zoom: NormalizedRange) {
        let span = zoom.span().clamp(MIN_ZOOM_SPAN, 1.0);
        let min = zoom.min.clamp(0.0, 1.0 - span);
        self.zoom = NormalizedRange::new(min, min + span);
    }

    /// Scale the visible span by `factor` around its center.
    pub fn zoom_by(&mut self, factor: f64) {
        let center = (self.zoom.min + self.zoom.max) / 2.0;
        let half = self.zoom.span() * factor / 2.0;
        self.set_zoom(NormalizedRange::new(center - half, center + half));
    }

    /// Shift the visible window by `fraction` of its own span.
    pub fn scroll_by(&mut self, fraction: f64) {
        let delta = self.zoom.span() * fraction;
        self.set_zoom(NormalizedRange::new(self.zoom.min + delta, self.zoom.max + delta));
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = NormalizedRange::full();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PointerButton;

    fn timeline() -> Timeline {
        let mut t = Timeline::new(TrackMetrics::default(), LaneLayout::default());
        t.set_area(ScreenRect::new(0, 0, 1000, 200));
        t
    }

    #[test]
    fn lanes_stack_below_the_ruler() {
        let mut t = timeline();
        let a = t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        let b = t.add_loop_with_range("/nonexistent/b.toml", NormalizedRange::new(0.2, 0.6));

        assert_eq!(t.ruler().bounds(), ScreenRect::new(0, 0, 1000, 20));
        assert_eq!(t.loop_track(a).unwrap().bounds(), ScreenRect::new(0, 20, 1000, 40));
        assert_eq!(t.loop_track(b).unwrap().bounds(), ScreenRect::new(0, 60, 1000, 40));
        assert_eq!(t.loop_track(b).unwrap().page_bounds(), ScreenRect::new(0, 20, 1000, 180));
    }

    #[test]
    fn lanes_past_the_panel_scroll_into_view() {
        let mut t = timeline();
        let ids: Vec<_> = (0..6)
            .map(|i| {
                t.add_loop_with_range(format!("/nonexistent/{i}.toml"), NormalizedRange::new(0.2, 0.6))
            })
            .collect();
        // 180 rows below the ruler hold four 40-row lanes.
        assert_eq!(t.visible_lanes(), 4);
        assert_eq!(t.lane_window(), 0..4);
        assert_eq!(t.loop_track(ids[4]).unwrap().bounds().height, 0);
        assert_eq!(t.draw(&Palette::default()).label_boxes().count(), 4);

        // A hidden lane can't be grabbed where it would have been.
        let report = t.pointer_pressed(&PointerEvent::primary(200, 30)).unwrap();
        assert_eq!(report.loop_id, ids[0]);

        t.set_current(ids[5]);
        assert_eq!(t.lane_window(), 2..6);
        assert_eq!(t.loop_track(ids[5]).unwrap().bounds(), ScreenRect::new(0, 140, 1000, 40));
        let report = t.pointer_pressed(&PointerEvent::primary(200, 150)).unwrap();
        assert_eq!(report.loop_id, ids[5]);

        t.scroll_lanes(-10);
        assert_eq!(t.first_lane(), 0);
        t.scroll_lanes(10);
        assert_eq!(t.first_lane(), 2);
    }

    #[test]
    fn press_report_names_the_settings_file() {
        let mut t = timeline();
        t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        t.add_loop_with_range("/nonexistent/b.toml", NormalizedRange::new(0.2, 0.6));
        let report = t.pointer_pressed(&PointerEvent::secondary(200, 30)).unwrap();
        assert!(matches!(report.removal, Some(Removal::Removed { .. })));
        assert_eq!(report.settings_path, PathBuf::from("/nonexistent/a.toml"));
    }

    #[test]
    fn in_out_range_tracks_current_loop() {
        let mut t = timeline();
        assert_eq!(t.in_out_range(), NormalizedRange::full());

        let a = t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        assert_eq!(t.current(), Some(a));
        t.set_in_out_range(NormalizedRange::new(0.1, 0.3));
        assert_eq!(t.loop_track(a).unwrap().range(), NormalizedRange::new(0.1, 0.3));
    }

    #[test]
    fn primary_press_selects_loop() {
        let mut t = timeline();
        let a = t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        let b = t.add_loop_with_range("/nonexistent/b.toml", NormalizedRange::new(0.3, 0.7));

        let report = t.pointer_pressed(&PointerEvent::primary(300, 70)).unwrap();
        assert_eq!(report.loop_id, b);
        assert_eq!(report.outcome, PressOutcome::GrabbedIn(PointerButton::Primary));
        assert_eq!(t.current(), Some(b));
        assert_ne!(t.current(), Some(a));
    }

    #[test]
    fn press_only_reaches_loop_under_pointer() {
        let mut t = timeline();
        let a = t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        let b = t.add_loop_with_range("/nonexistent/b.toml", NormalizedRange::new(0.2, 0.6));
        let report = t.pointer_pressed(&PointerEvent::primary(200, 30)).unwrap();
        assert_eq!(report.loop_id, a);
        assert!(t.loop_track(a).unwrap().is_dragging());
        assert!(!t.loop_track(b).unwrap().is_dragging());
    }

    #[test]
    fn press_on_empty_space_reports_nothing() {
        let mut t = timeline();
        t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        assert!(t.pointer_pressed(&PointerEvent::primary(400, 30)).is_none());
        assert!(!t.is_dragging());
    }

    #[test]
    fn drag_uses_live_zoom() {
        let mut t = timeline();
        let a = t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        t.pointer_pressed(&PointerEvent::primary(200, 30));

        t.set_zoom(NormalizedRange::new(0.0, 0.5));
        t.pointer_dragged(&PointerEvent::primary(500, 30));
        assert_eq!(t.loop_track(a).unwrap().range().min, 0.25);
    }

    #[test]
    fn zoom_is_clamped_to_timeline() {
        let mut t = timeline();
        t.zoom_by(0.5);
        assert_eq!(t.zoom(), NormalizedRange::new(0.25, 0.75));
        t.scroll_by(1.0);
        assert_eq!(t.zoom(), NormalizedRange::new(0.5, 1.0));
        t.zoom_by(0.0);
        assert!((t.zoom().span() - MIN_ZOOM_SPAN).abs() < 1e-12);
        t.zoom_by(1000.0);
        assert_eq!(t.zoom(), NormalizedRange::full());
        t.set_zoom(NormalizedRange::new(0.4, 0.6));
        t.reset_zoom();
        assert_eq!(t.zoom(), NormalizedRange::full());
    }

    #[test]
    fn rename_targets_current_loop() {
        let mut t = timeline();
        assert!(!t.rename_current("intro"));
        let a = t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        assert!(t.rename_current("intro"));
        assert_eq!(t.loop_track(a).unwrap().label(), "intro");
    }

    #[test]
    fn draw_plans_ruler_and_every_loop() {
        let mut t = timeline();
        t.add_loop_with_range("/nonexistent/a.toml", NormalizedRange::new(0.2, 0.6));
        t.add_loop_with_range("/nonexistent/b.toml", NormalizedRange::new(0.3, 0.7));
        let plan = t.draw(&Palette::default());
        assert_eq!(plan.label_boxes().count(), 2);
        for (_, color) in plan.fills() {
            assert_eq!(color.a, 60);
        }
    }
}
