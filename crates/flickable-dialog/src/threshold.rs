//! Release classification.

use flickable_core::Point;

/// What happens to the surface once the finger lifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Snap back to the origin and keep the dialog up.
    Return,
    /// Throw the surface off screen and dismiss.
    Dismiss,
}

/// Classifies a release from its displacement `origin - current`.
///
/// Each axis is compared on its own against `threshold`; there is no
/// velocity term and no hysteresis.
pub fn evaluate(delta: Point, threshold: f32) -> ReleaseOutcome {
    if delta.x.abs() > threshold || delta.y.abs() > threshold {
        ReleaseOutcome::Dismiss
    } else {
        ReleaseOutcome::Return
    }
}

#[cfg(test)]
#[path = "tests/threshold_tests.rs"]
mod tests;
