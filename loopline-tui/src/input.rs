//! Input dispatch: overlays first, then global keys; mouse events go to the timeline.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use loopline_core::{PointerButton, PointerEvent};

use crate::app::{AppState, Overlay};

/// Zoom factor for one `+`/`-` press or wheel step.
const ZOOM_STEP: f64 = 0.8;
/// Fraction of the visible window one arrow press scrolls.
const SCROLL_STEP: f64 = 0.1;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Rename(_) => {
            handle_rename_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('n') => {
            app.add_loop();
        }
        KeyCode::Tab => app.cycle_current(),
        KeyCode::Char('r') => app.begin_rename(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.timeline.zoom_by(ZOOM_STEP),
        KeyCode::Char('-') => app.timeline.zoom_by(1.0 / ZOOM_STEP),
        KeyCode::Char('0') => app.timeline.reset_zoom(),
        KeyCode::Left => app.timeline.scroll_by(-SCROLL_STEP),
        KeyCode::Right => app.timeline.scroll_by(SCROLL_STEP),
        KeyCode::PageUp => app.timeline.scroll_lanes(-1),
        KeyCode::PageDown => app.timeline.scroll_lanes(1),
        _ => {}
    }
}

fn handle_rename_overlay(app: &mut AppState, key: KeyEvent) {
    let Overlay::Rename(input) = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.overlay = Overlay::None,
        KeyCode::Enter => {
            let name = std::mem::take(input);
            app.commit_rename(&name);
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => input.push(c),
        _ => {}
    }
}

/// Pointer button for a terminal mouse button. Right and middle both remove.
fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

/// Handle a mouse event. Cells map one-to-one onto timeline screen units.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    // The pointer is inert while an overlay covers the timeline.
    if app.overlay != Overlay::None {
        return;
    }

    let x = i32::from(mouse.column);
    let y = i32::from(mouse.row);
    match mouse.kind {
        MouseEventKind::Moved => app.timeline.pointer_moved(&PointerEvent::at(x, y)),
        MouseEventKind::Down(button) => {
            let event = PointerEvent::with_button(x, y, pointer_button(button));
            if let Some(report) = app.timeline.pointer_pressed(&event) {
                app.report_press(&report);
            }
        }
        MouseEventKind::Drag(button) => {
            let event = PointerEvent::with_button(x, y, pointer_button(button));
            app.timeline.pointer_dragged(&event);
        }
        MouseEventKind::Up(button) => {
            let event = PointerEvent::with_button(x, y, pointer_button(button));
            let report = app.timeline.pointer_released(&event);
            app.report_release(report);
        }
        MouseEventKind::ScrollUp => app.timeline.zoom_by(ZOOM_STEP),
        MouseEventKind::ScrollDown => app.timeline.zoom_by(1.0 / ZOOM_STEP),
        _ => {}
    }
}
