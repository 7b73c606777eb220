//! Default tuning for the drag-to-dismiss pipeline.
//!
//! Distances are in the same units as raw pointer coordinates.

/// Release distance from the origin, per axis, beyond which the dialog is
/// thrown away instead of snapping back.
pub const DISMISS_THRESHOLD: f32 = 700.0;

/// Inverse rotation rate while dragging: degrees = horizontal gap / exponent.
pub const ROTATION_EXPONENT: f32 = 30.0;

/// Snap-back animation length.
pub const RETURN_DURATION_MILLIS: u64 = 300;

/// Throw animation length (rotation, translation and fade).
pub const THROW_DURATION_MILLIS: u64 = 400;

/// Backdrop fade when cancelled by a tap outside the dialog.
pub const BACKDROP_FADE_OUT_MILLIS: u64 = 300;

/// Backdrop fade when the dialog is first shown.
pub const BACKDROP_FADE_IN_MILLIS: u64 = 200;

/// Spin applied to a throw released exactly at the threshold.
pub const THROW_ROTATION_DEGREES: f32 = 540.0;

/// Throw travel as a multiple of the release displacement.
pub const THROW_DISTANCE_MULTIPLIER: f32 = -10.0;
