use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::easing::Easing;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Time from start until the final value is written.
    pub fn total_millis(&self) -> u64 {
        self.delay_millis + self.duration_millis
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::AccelerateDecelerate)
    }
}

/// Visual properties an animation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Horizontal offset added to the layout position.
    TranslationX,
    /// Vertical offset added to the layout position.
    TranslationY,
    /// Rotation in degrees, clockwise.
    Rotation,
    /// Opacity in `[0, 1]`.
    Alpha,
}

/// Something whose animated properties can be read and written.
///
/// Implementations live on the UI thread and use interior mutability, so a
/// target can be shared between the pipeline and the animation service.
pub trait PropertyTarget {
    fn property(&self, property: AnimatedProperty) -> f32;

    fn set_property(&self, property: AnimatedProperty, value: f32);
}

/// One property moving towards `to`. `from = None` starts at whatever value
/// the target holds when the animation begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyTransition {
    pub property: AnimatedProperty,
    pub from: Option<f32>,
    pub to: f32,
}

impl PropertyTransition {
    pub fn to(property: AnimatedProperty, to: f32) -> Self {
        Self {
            property,
            from: None,
            to,
        }
    }

    pub fn between(property: AnimatedProperty, from: f32, to: f32) -> Self {
        Self {
            property,
            from: Some(from),
            to,
        }
    }
}

/// Everything the animation service needs to run one animation.
#[derive(Clone)]
pub struct AnimationRequest {
    pub target: Rc<dyn PropertyTarget>,
    pub transitions: SmallVec<[PropertyTransition; 3]>,
    pub spec: AnimationSpec,
}

impl AnimationRequest {
    pub fn new(target: Rc<dyn PropertyTarget>, spec: AnimationSpec) -> Self {
        Self {
            target,
            transitions: SmallVec::new(),
            spec,
        }
    }

    pub fn animate_to(mut self, property: AnimatedProperty, to: f32) -> Self {
        self.transitions.push(PropertyTransition::to(property, to));
        self
    }

    pub fn animate_between(mut self, property: AnimatedProperty, from: f32, to: f32) -> Self {
        self.transitions
            .push(PropertyTransition::between(property, from, to));
        self
    }

    pub fn transition(&self, property: AnimatedProperty) -> Option<&PropertyTransition> {
        self.transitions
            .iter()
            .find(|transition| transition.property == property)
    }
}

impl fmt::Debug for AnimationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRequest")
            .field("transitions", &self.transitions)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
