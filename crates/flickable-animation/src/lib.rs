//! Animation system for flickable dialogs
//!
//! Time-based property tweens with easing curves, driven by the runtime's
//! frame clock and reporting completion to the caller.

mod animation;
mod easing;
mod service;

pub use animation::{
    AnimatedProperty, AnimationRequest, AnimationSpec, Lerp, PropertyTarget, PropertyTransition,
};
pub use easing::Easing;
pub use service::{AnimationHandle, AnimationService, FrameAnimationService};
