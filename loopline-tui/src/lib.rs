//! Loopline TUI: terminal front end for editing loop ranges with the mouse.
//!
//! Provides:
//! - One lane per loop under a percentage ruler
//! - Mouse hover, drag, select and remove on the in/out handles
//! - Zoom and scroll over the timeline
//! - Rename and help overlays

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
