//! The capability every timeline track offers.
//!
//! One flat trait, implemented by each track variant. Pointer handlers report
//! what happened instead of reaching into the timeline; the timeline applies
//! any registry effects (select, remove) itself.

use crate::draw::{DrawContext, DrawPlan};
use crate::geometry::{PointerButton, PointerEvent, ScreenRect};
use crate::mapper::CoordinateMapper;
use crate::range::NormalizedRange;
use crate::settings::SettingsError;

/// Result of a pointer press on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press was outside the track.
    Ignored,
    /// Inside the track but away from both handles.
    Missed,
    /// Grabbed the in-handle with the given button.
    GrabbedIn(PointerButton),
    /// Grabbed the out-handle.
    GrabbedOut,
}

/// What the owner of the sibling registry should do after a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryAction {
    /// Make the pressed loop the current one.
    Select,
    /// Run the removal protocol for the pressed loop.
    Remove,
}

impl PressOutcome {
    /// True when the press started a drag.
    pub fn grabbed(&self) -> bool {
        matches!(self, PressOutcome::GrabbedIn(_) | PressOutcome::GrabbedOut)
    }

    /// Only in-handle presses touch the registry: primary selects, any other
    /// button removes.
    pub fn registry_action(&self) -> Option<RegistryAction> {
        match self {
            PressOutcome::GrabbedIn(button) if button.is_primary() => Some(RegistryAction::Select),
            PressOutcome::GrabbedIn(_) => Some(RegistryAction::Remove),
            _ => None,
        }
    }
}

/// A track on the timeline: drawable, pointer-interactive, persistable.
pub trait Track {
    fn bounds(&self) -> ScreenRect;

    fn set_bounds(&mut self, bounds: ScreenRect);

    /// Append this track's primitives to `plan`.
    fn draw(&self, ctx: &DrawContext<'_>, plan: &mut DrawPlan);

    fn pointer_moved(&mut self, _event: &PointerEvent, _mapper: &dyn CoordinateMapper) {}

    fn pointer_pressed(
        &mut self,
        _event: &PointerEvent,
        _mapper: &dyn CoordinateMapper,
    ) -> PressOutcome {
        PressOutcome::Ignored
    }

    fn pointer_dragged(&mut self, _event: &PointerEvent, _mapper: &dyn CoordinateMapper) {}

    /// Returns `Ok(true)` when a drag ended here and its result was saved.
    fn pointer_released(&mut self, _event: &PointerEvent) -> Result<bool, SettingsError> {
        Ok(false)
    }

    /// Read persisted state. Returns the range to push to the timeline's
    /// in/out range, if this track persists one.
    fn load(&self) -> Option<NormalizedRange> {
        None
    }

    fn save(&self) -> Result<(), SettingsError> {
        Ok(())
    }
}
