//! Finger-following drag tracking.
//!
//! A [`GestureState`] lives from touch-down to release. The tracker turns
//! each move into a new layout position and rotation for the surface; nothing
//! is animated while the finger is down.

use flickable_core::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    /// Layout position before the first drag. Shared by every gesture of a
    /// dialog.
    pub origin: Point,
    pub previous_pointer: Point,
    /// Whether the touch-down landed above the surface's vertical center.
    /// Fixed for the whole gesture.
    pub touched_top_half: bool,
    pub current_position: Point,
}

impl GestureState {
    /// Starts a gesture for a touch-down at `raw` on a surface currently laid
    /// out at `layout_position` and drawn at `on_screen`.
    pub fn begin(origin: Point, layout_position: Point, on_screen: Rect, raw: Point) -> Self {
        Self {
            origin,
            previous_pointer: raw,
            touched_top_half: raw.y < on_screen.center_y(),
            current_position: layout_position,
        }
    }

    /// Displacement as `origin - current`.
    pub fn delta_from_origin(&self) -> Point {
        self.origin - self.current_position
    }
}

/// Result of one move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    pub position: Point,
    /// Rotation in degrees.
    pub rotation: f32,
    /// `origin - position` after the move.
    pub delta: Point,
}

/// Stateless drag math, parameterised by the dialog's configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureTracker {
    rotation_exponent: f32,
    dismiss_threshold: f32,
}

impl GestureTracker {
    pub fn new(rotation_exponent: f32, dismiss_threshold: f32) -> Self {
        Self {
            rotation_exponent,
            dismiss_threshold,
        }
    }

    /// Follows the pointer to `raw`, updating `state` in place.
    ///
    /// Rotation is taken from the horizontal gap before this move is applied.
    pub fn track_move(&self, state: &mut GestureState, raw: Point) -> DragUpdate {
        let horizontal_gap = state.current_position.x - state.origin.x;
        let pointer_delta = raw - state.previous_pointer;
        let position = state.current_position + pointer_delta;
        let rotation = drag_rotation(
            horizontal_gap,
            state.touched_top_half,
            self.rotation_exponent,
        );

        state.current_position = position;
        state.previous_pointer = raw;

        DragUpdate {
            position,
            rotation,
            delta: state.delta_from_origin(),
        }
    }

    /// Drag progress reported to the flicking callback: `(-delta.x, delta.y)`
    /// over the threshold. Not clamped; 1.0 means the threshold is reached.
    pub fn flicking_progress(&self, delta: Point) -> (f32, f32) {
        (
            -delta.x / self.dismiss_threshold,
            delta.y / self.dismiss_threshold,
        )
    }
}

/// Rotation in degrees for a horizontal gap from the origin. Touches in the
/// top half tilt the opposite way to touches in the bottom half.
pub fn drag_rotation(horizontal_gap: f32, touched_top_half: bool, rotation_exponent: f32) -> f32 {
    if touched_top_half {
        horizontal_gap / -rotation_exponent
    } else {
        horizontal_gap / rotation_exponent
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
