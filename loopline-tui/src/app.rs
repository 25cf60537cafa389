//! Application state: single-owner, main-thread only.
//!
//! The timeline and every loop in it live here. Input handlers mutate it,
//! the UI reads it.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use loopline_core::{
    settings, EditorConfig, LaneLayout, LoopId, PressReport, ReleaseReport, Removal, Timeline, TrackMetrics,
};

use crate::theme::Theme;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    /// Rename the current loop; holds the text being edited.
    Rename(String),
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub timeline: Timeline,
    pub theme: Theme,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,

    pub config: EditorConfig,
    pub settings_dir: PathBuf,
    rng: StdRng,
    /// Index used for the next loop's settings file.
    next_index: usize,
}

impl AppState {
    pub fn new(config: EditorConfig, settings_dir: PathBuf) -> Self {
        let metrics = config.metrics_or(TrackMetrics::terminal());
        Self {
            running: true,
            timeline: Timeline::new(metrics, LaneLayout::terminal()),
            theme: Theme::default(),
            overlay: Overlay::None,
            status_message: None,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            settings_dir,
            next_index: 0,
        }
    }

    /// Create the startup loops and load their saved ranges.
    ///
    /// Opens one loop per settings file in the settings directory. A directory
    /// without any gets `loop_count` fresh loops, saved right away so the set
    /// on disk is the set on screen.
    pub fn open_loops(&mut self) {
        let saved = self.config.saved_indices(&self.settings_dir);
        let fresh = saved.is_empty();
        let indices = if fresh {
            (0..self.config.loop_count.max(1)).collect()
        } else {
            saved
        };

        let ids: Vec<LoopId> = indices.iter().map(|&index| self.push_loop_at(index)).collect();
        self.timeline.load_all();

        if fresh {
            for id in ids {
                if let Err(e) = self.timeline.save_loop(id) {
                    log::warn!("failed to save new loop {id}: {e}");
                    self.set_error(format!("Failed to save loop {id}: {e}"));
                }
            }
        }
        log::info!(
            "opened {} loop(s) from {}",
            indices.len(),
            self.settings_dir.display()
        );
    }

    fn push_loop(&mut self) -> LoopId {
        self.push_loop_at(self.next_index)
    }

    fn push_loop_at(&mut self, index: usize) -> LoopId {
        self.next_index = self.next_index.max(index + 1);
        let path = self.config.settings_path(&self.settings_dir, index);
        let id = self.timeline.add_loop(path, &mut self.rng);
        self.timeline.rename_loop(id, &format!("loop {index}"));
        id
    }

    /// Add a loop at a random default range and save it right away.
    pub fn add_loop(&mut self) -> LoopId {
        let id = self.push_loop();
        match self.timeline.save_loop(id) {
            Ok(()) => self.set_status(format!("Added loop {id}")),
            Err(e) => self.set_error(format!("Added loop {id}, but saving failed: {e}")),
        }
        id
    }

    pub fn cycle_current(&mut self) {
        if let Some(id) = self.timeline.cycle_current() {
            let name = self.current_label().unwrap_or_default();
            self.set_status(format!("Current loop {id} ({name})"));
        }
    }

    pub fn current_label(&self) -> Option<String> {
        self.timeline
            .current()
            .and_then(|id| self.timeline.loop_track(id))
            .map(|track| track.label().to_string())
    }

    pub fn begin_rename(&mut self) {
        let name = self.current_label().unwrap_or_default();
        self.overlay = Overlay::Rename(name);
    }

    pub fn commit_rename(&mut self, name: &str) {
        if self.timeline.rename_current(name) {
            let label = self.current_label().unwrap_or_default();
            self.set_status(format!("Renamed to '{label}'"));
        }
        self.overlay = Overlay::None;
    }

    /// Surface what a press did in the status bar.
    pub fn report_press(&mut self, report: &PressReport) {
        match &report.removal {
            Some(Removal::Removed { next_current }) => {
                match settings::discard(&report.settings_path) {
                    Ok(()) => self.set_status(format!(
                        "Removed loop {}; current is {next_current}",
                        report.loop_id
                    )),
                    Err(e) => {
                        log::warn!("removed loop {} but kept its file: {e}", report.loop_id);
                        self.set_error(format!(
                            "Removed loop {}, but deleting its file failed: {e}",
                            report.loop_id
                        ));
                    }
                }
            }
            Some(Removal::LastInOrder) => {
                self.set_warning(format!("Loop {} is last and can't be removed", report.loop_id));
            }
            Some(Removal::NotFound) | None => {}
        }
    }

    /// Surface what a release did in the status bar.
    pub fn report_release(&mut self, report: ReleaseReport) {
        if let Some((id, err)) = report.failed.first() {
            self.set_error(format!("Failed to save loop {id}: {err}"));
        } else if let Some(id) = report.saved.first() {
            let range = self
                .timeline
                .loop_track(*id)
                .map(|track| track.range())
                .unwrap_or_default();
            self.set_status(format!(
                "Saved loop {id} [{:.3}, {:.3}]",
                range.min, range.max
            ));
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopline_core::{NormalizedRange, PointerEvent, ScreenRect};

    fn app(dir: &tempfile::TempDir) -> AppState {
        AppState::new(EditorConfig::default(), dir.path().to_path_buf())
    }

    #[test]
    fn opens_configured_loop_count() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            loop_count: 3,
            ..EditorConfig::default()
        };
        let mut app = AppState::new(config, dir.path().to_path_buf());
        app.open_loops();
        assert_eq!(app.timeline.loops().len(), 3);
        // Nothing saved yet: every loop falls back to the full range.
        assert_eq!(app.timeline.in_out_range(), NormalizedRange::full());
        assert_eq!(app.current_label().as_deref(), Some("loop 0"));
    }

    #[test]
    fn added_loops_are_saved_and_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = app(&dir);
        first.open_loops();
        let id = first.add_loop();
        let saved = first.timeline.loop_track(id).unwrap().range();
        assert!(dir.path().join("loop_1.toml").exists());

        let mut second = app(&dir);
        second.open_loops();
        assert_eq!(second.timeline.loops().len(), 2);
        let ids = second.timeline.loops().ids();
        assert_eq!(second.timeline.loop_track(ids[1]).unwrap().range(), saved);
    }

    #[test]
    fn removed_loop_stays_removed_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            loop_count: 3,
            ..EditorConfig::default()
        };
        let mut first = AppState::new(config.clone(), dir.path().to_path_buf());
        first.open_loops();
        first.timeline.set_area(ScreenRect::new(0, 0, 100, 10));

        // Second lane spans rows 4..7; every loop starts at the full range.
        let report = first
            .timeline
            .pointer_pressed(&PointerEvent::secondary(0, 5))
            .unwrap();
        first.report_press(&report);
        assert!(matches!(report.removal, Some(Removal::Removed { .. })));
        assert_eq!(first.timeline.loops().len(), 2);
        assert!(!dir.path().join("loop_1.toml").exists());

        let mut second = AppState::new(config, dir.path().to_path_buf());
        second.open_loops();
        assert_eq!(second.timeline.loops().len(), 2);
        let labels: Vec<_> = second
            .timeline
            .loops()
            .iter()
            .map(|(_, track)| track.label().to_string())
            .collect();
        assert_eq!(labels, ["loop 0", "loop 2"]);

        // New loops never reuse an index that is still on disk.
        second.add_loop();
        assert!(dir.path().join("loop_3.toml").exists());
    }

    #[test]
    fn uses_terminal_metrics_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        assert_eq!(*app.timeline.metrics(), TrackMetrics::terminal());
    }

    #[test]
    fn rename_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.open_loops();
        app.begin_rename();
        assert_eq!(app.overlay, Overlay::Rename("loop 0".into()));
        app.commit_rename("  verse ");
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.current_label().as_deref(), Some("verse"));
    }

    #[test]
    fn status_levels() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.set_warning("careful");
        assert_eq!(app.status_message, Some(("careful".into(), StatusLevel::Warning)));
        app.set_error("broken");
        assert_eq!(app.status_message, Some(("broken".into(), StatusLevel::Error)));
    }
}
