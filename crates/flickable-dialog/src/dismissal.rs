//! Cancellation paths and the single teardown routine.

use std::cell::RefCell;
use std::rc::Rc;

use flickable_animation::{AnimatedProperty, AnimationRequest, AnimationSpec, Easing, PropertyTarget};
use flickable_core::Disposables;

use crate::config::FlickableConfig;
use crate::constants::{BACKDROP_FADE_IN_MILLIS, BACKDROP_FADE_OUT_MILLIS};
use crate::listener::DialogListeners;

/// Owns everything that must be released when the dialog goes away.
///
/// `resources` lives as long as the presentation (event subscription,
/// backdrop fade-in). `pending` holds the animations and timers of the
/// current transition and is replaced at every transition.
pub struct DismissalCoordinator {
    torn_down: bool,
    resources: Disposables,
    pending: Disposables,
    listeners: Rc<RefCell<DialogListeners>>,
}

impl DismissalCoordinator {
    pub fn new(listeners: Rc<RefCell<DialogListeners>>) -> Self {
        Self {
            torn_down: false,
            resources: Disposables::new(),
            pending: Disposables::new(),
            listeners,
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn resources_mut(&mut self) -> &mut Disposables {
        &mut self.resources
    }

    pub fn pending_mut(&mut self) -> &mut Disposables {
        &mut self.pending
    }

    /// Stops whatever the current transition started.
    pub fn cancel_pending(&mut self) {
        self.pending.clear();
    }

    pub fn accepts_backdrop_tap(&self, config: &FlickableConfig) -> bool {
        !self.torn_down && config.dismiss_on_outside_touch
    }

    pub fn accepts_back_press(&self, config: &FlickableConfig) -> bool {
        !self.torn_down && config.cancelable
    }

    /// Disposes every subscription, animation and timer and drops the
    /// listeners. Returns `false` if the dialog was already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.pending.dispose();
        self.resources.dispose();
        self.listeners.borrow_mut().clear();
        log::debug!("dialog torn down");
        true
    }
}

pub fn backdrop_fade_in_request(backdrop: Rc<dyn PropertyTarget>) -> AnimationRequest {
    AnimationRequest::new(
        backdrop,
        AnimationSpec::tween(BACKDROP_FADE_IN_MILLIS, Easing::AccelerateDecelerate),
    )
    .animate_between(AnimatedProperty::Alpha, 0.0, 1.0)
}

pub fn backdrop_fade_out_request(backdrop: Rc<dyn PropertyTarget>) -> AnimationRequest {
    AnimationRequest::new(
        backdrop,
        AnimationSpec::tween(BACKDROP_FADE_OUT_MILLIS, Easing::AccelerateDecelerate),
    )
    .animate_between(AnimatedProperty::Alpha, 1.0, 0.0)
}

#[cfg(test)]
#[path = "tests/dismissal_tests.rs"]
mod tests;
