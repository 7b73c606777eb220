use std::f32::consts::PI;

/// Interpolation curves applied to a tween's linear progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Starts and ends slowly, fastest through the middle. Cosine based.
    AccelerateDecelerate,
    /// Quadratic ease in.
    Accelerate,
    /// Quadratic ease out.
    Decelerate,
}

impl Easing {
    /// Maps a linear fraction to eased progress. Input is clamped to [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
