//! End-to-end pointer interaction through the Timeline.
//!
//! Each test builds a 1000x200 timeline (20-unit ruler, 40-unit lanes) so a
//! normalized value `v` sits at screen x `v * 1000`.

use std::path::{Path, PathBuf};

use loopline_core::{
    DragState, LaneLayout, LoopId, NormalizedRange, PointerEvent, PressOutcome, Removal,
    ScreenRect, Timeline, TrackMetrics,
};
use tempfile::TempDir;

fn timeline() -> Timeline {
    let mut t = Timeline::new(TrackMetrics::default(), LaneLayout::default());
    t.set_area(ScreenRect::new(0, 0, 1000, 200));
    t
}

fn loop_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.toml"))
}

/// Lane centre y for the loop at `index`.
fn lane_y(index: i32) -> i32 {
    20 + index * 40 + 10
}

fn abc(dir: &TempDir) -> (Timeline, LoopId, LoopId, LoopId) {
    let mut t = timeline();
    let range = NormalizedRange::new(0.2, 0.6);
    let a = t.add_loop_with_range(loop_path(dir.path(), "a"), range);
    let b = t.add_loop_with_range(loop_path(dir.path(), "b"), range);
    let c = t.add_loop_with_range(loop_path(dir.path(), "c"), range);
    (t, a, b, c)
}

#[test]
fn secondary_press_removes_loop_and_hands_current_to_successor() {
    let dir = TempDir::new().unwrap();
    let (mut t, a, b, c) = abc(&dir);
    assert_eq!(t.current(), Some(a));

    let report = t
        .pointer_pressed(&PointerEvent::secondary(200, lane_y(0)))
        .expect("press on A's in-handle");
    assert_eq!(report.loop_id, a);
    assert_eq!(report.removal, Some(Removal::Removed { next_current: b }));
    assert_eq!(t.loops().ids(), vec![b, c]);
    assert_eq!(t.current(), Some(b));

    // C now sits in the second lane.
    let report = t
        .pointer_pressed(&PointerEvent::secondary(200, lane_y(1)))
        .expect("press on C's in-handle");
    assert_eq!(report.loop_id, c);
    assert_eq!(report.removal, Some(Removal::LastInOrder));
    assert_eq!(t.loops().ids(), vec![b, c]);
    assert_eq!(t.current(), Some(b));
}

#[test]
fn secondary_press_on_last_loop_still_starts_a_drag() {
    let dir = TempDir::new().unwrap();
    let (mut t, _, _, c) = abc(&dir);

    t.pointer_pressed(&PointerEvent::secondary(205, lane_y(2)));
    assert_eq!(t.loop_track(c).unwrap().drag_state(), DragState::DraggingIn);

    t.pointer_dragged(&PointerEvent::at(295, lane_y(2)));
    let report = t.pointer_released(&PointerEvent::at(295, lane_y(2)));
    assert_eq!(report.saved, vec![c]);
    assert!((t.loop_track(c).unwrap().range().min - 0.3).abs() < 1e-12);
}

#[test]
fn primary_press_selects_the_grabbed_loop() {
    let dir = TempDir::new().unwrap();
    let (mut t, _, b, _) = abc(&dir);

    let report = t.pointer_pressed(&PointerEvent::primary(600, lane_y(1))).unwrap();
    assert_eq!(report.loop_id, b);
    assert_eq!(report.outcome, PressOutcome::GrabbedOut);
    assert_eq!(report.removal, None);
    // Grabbing the out-handle does not select.
    assert_ne!(t.current(), Some(b));

    t.pointer_released(&PointerEvent::at(600, lane_y(1)));
    t.pointer_pressed(&PointerEvent::primary(200, lane_y(1)));
    assert_eq!(t.current(), Some(b));
    assert_eq!(t.in_out_range(), NormalizedRange::new(0.2, 0.6));
}

#[test]
fn drag_and_release_persists_exactly_once() {
    let dir = TempDir::new().unwrap();
    let mut t = timeline();
    let path = loop_path(dir.path(), "solo");
    let id = t.add_loop_with_range(&path, NormalizedRange::new(0.2, 0.6));

    t.pointer_pressed(&PointerEvent::primary(598, lane_y(0)));
    t.pointer_dragged(&PointerEvent::primary(748, lane_y(0)));
    t.pointer_dragged(&PointerEvent::primary(2000, 5000));
    t.pointer_dragged(&PointerEvent::primary(802, 0));
    assert!(t.is_dragging());

    let report = t.pointer_released(&PointerEvent::at(802, 0));
    assert_eq!(report.saved, vec![id]);
    assert!(report.failed.is_empty());
    assert!(!t.is_dragging());
    assert!(path.exists());

    let report = t.pointer_released(&PointerEvent::at(802, 0));
    assert!(report.saved.is_empty());

    let saved = loopline_core::settings::load(&path).unwrap();
    assert!((saved.max - 0.8).abs() < 1e-12);
    assert_eq!(saved.min, 0.2);
}

#[test]
fn release_without_drag_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut t = timeline();
    let path = loop_path(dir.path(), "idle");
    t.add_loop_with_range(&path, NormalizedRange::new(0.2, 0.6));

    // Press in the gap between handles.
    let report = t.pointer_pressed(&PointerEvent::primary(400, lane_y(0)));
    assert!(report.is_none());
    let report = t.pointer_released(&PointerEvent::at(400, lane_y(0)));
    assert!(report.saved.is_empty());
    assert!(!path.exists());
}

#[test]
fn failed_save_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    // A regular file where the settings directory should be.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let mut t = timeline();
    let id = t.add_loop_with_range(blocker.join("loop.toml"), NormalizedRange::new(0.2, 0.6));
    t.pointer_pressed(&PointerEvent::primary(200, lane_y(0)));

    let report = t.pointer_released(&PointerEvent::at(200, lane_y(0)));
    assert!(report.saved.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, id);
    assert_eq!(t.loop_track(id).unwrap().drag_state(), DragState::Idle);
}

#[test]
fn hover_follows_pointer_and_clears_outside() {
    let dir = TempDir::new().unwrap();
    let (mut t, a, b, _) = abc(&dir);

    t.pointer_moved(&PointerEvent::at(190, lane_y(0)));
    assert!(t.loop_track(a).unwrap().hovering_in());
    assert!(!t.loop_track(b).unwrap().hovering_in());

    t.pointer_moved(&PointerEvent::at(190, 199));
    assert!(!t.loop_track(a).unwrap().hovering_in());
}

#[test]
fn fresh_loop_loads_full_range() {
    let dir = TempDir::new().unwrap();
    let mut t = timeline();
    let id = t.add_loop_with_range(loop_path(dir.path(), "fresh"), NormalizedRange::new(0.3, 0.4));

    assert!(t.load_loop(id));
    assert_eq!(t.in_out_range(), NormalizedRange::new(0.0, 1.0));
}

#[test]
fn zoomed_drag_maps_through_visible_window() {
    let dir = TempDir::new().unwrap();
    let mut t = timeline();
    let id = t.add_loop_with_range(loop_path(dir.path(), "z"), NormalizedRange::new(0.5, 0.6));
    t.set_zoom(NormalizedRange::new(0.5, 0.7));

    // 0.5 is now at x = 0, 0.6 at x = 500.
    t.pointer_pressed(&PointerEvent::primary(3, lane_y(0)));
    assert_eq!(t.loop_track(id).unwrap().drag_offset(), -3);
    t.pointer_dragged(&PointerEvent::primary(247, lane_y(0)));
    assert!((t.loop_track(id).unwrap().range().min - 0.55).abs() < 1e-12);
}
