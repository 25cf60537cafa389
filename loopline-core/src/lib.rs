//! Loopline Core: loop ranges on a timeline and the pointer state machine that edits them.
//!
//! This crate contains everything that does not need a screen:
//! - Normalized ranges and screen ↔ normalized coordinate mapping
//! - The loop track: hover, press, drag and release handling with pixel hit zones
//! - The sibling registry with its "current" loop and removal protocol
//! - Draw planning (what to draw, not how)
//! - Settings files and editor configuration

pub mod config;
pub mod draw;
pub mod geometry;
pub mod label;
pub mod mapper;
pub mod palette;
pub mod range;
pub mod range_track;
pub mod registry;
pub mod ruler;
pub mod settings;
pub mod timeline;
pub mod track;

pub use config::{ConfigError, EditorConfig, TrackMetrics};
pub use draw::{DrawCommand, DrawContext, DrawPlan};
pub use geometry::{PointerButton, PointerEvent, ScreenRect};
pub use mapper::{CoordinateMapper, TimelineMapper};
pub use palette::{Palette, Rgba};
pub use range::NormalizedRange;
pub use range_track::{DragState, RangeTrack};
pub use registry::{LoopId, LoopRegistry, Removal};
pub use settings::SettingsError;
pub use timeline::{LaneLayout, PressReport, ReleaseReport, Timeline};
pub use track::{PressOutcome, RegistryAction, Track};
