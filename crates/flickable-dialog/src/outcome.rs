//! Terminal animations: snap back to the origin, or throw off screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flickable_animation::{
    AnimatedProperty, AnimationHandle, AnimationRequest, AnimationService, AnimationSpec, Easing,
    PropertyTarget,
};
use flickable_core::{Disposables, FrameClock, Point};
use smallvec::SmallVec;

use crate::constants::{
    RETURN_DURATION_MILLIS, THROW_DISTANCE_MULTIPLIER, THROW_DURATION_MILLIS,
    THROW_ROTATION_DEGREES,
};

/// Final values of a throw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrowPlan {
    pub rotation: f32,
    pub translation: Point,
}

impl ThrowPlan {
    /// Spin proportional to the horizontal release distance, turning the same
    /// way the surface was tilted during the drag. Travel is the release displacement scaled
    /// well past the viewport, in the direction the finger moved.
    pub fn new(delta: Point, touched_top_half: bool, dismiss_threshold: f32) -> Self {
        let spin = delta.x / dismiss_threshold * THROW_ROTATION_DEGREES;
        Self {
            rotation: if touched_top_half { spin } else { -spin },
            translation: Point::new(
                THROW_DISTANCE_MULTIPLIER * delta.x,
                THROW_DISTANCE_MULTIPLIER * delta.y,
            ),
        }
    }
}

pub fn return_spec() -> AnimationSpec {
    AnimationSpec::tween(RETURN_DURATION_MILLIS, Easing::AccelerateDecelerate)
}

pub fn throw_spec() -> AnimationSpec {
    AnimationSpec::tween(THROW_DURATION_MILLIS, Easing::AccelerateDecelerate)
}

/// Snap-back: translation cancels the drag displacement so the surface is
/// drawn at its origin again, and rotation returns to zero.
pub fn return_request(surface: Rc<dyn PropertyTarget>, delta: Point) -> AnimationRequest {
    AnimationRequest::new(surface, return_spec())
        .animate_to(AnimatedProperty::TranslationX, delta.x)
        .animate_to(AnimatedProperty::TranslationY, delta.y)
        .animate_to(AnimatedProperty::Rotation, 0.0)
}

/// The three concurrent throw animations: spin, travel, and the root fade.
pub fn throw_requests(
    surface: Rc<dyn PropertyTarget>,
    root: Rc<dyn PropertyTarget>,
    plan: ThrowPlan,
) -> SmallVec<[AnimationRequest; 3]> {
    let spec = throw_spec();
    let mut requests = SmallVec::new();
    requests.push(
        AnimationRequest::new(Rc::clone(&surface), spec)
            .animate_to(AnimatedProperty::Rotation, plan.rotation),
    );
    requests.push(
        AnimationRequest::new(surface, spec)
            .animate_to(AnimatedProperty::TranslationX, plan.translation.x)
            .animate_to(AnimatedProperty::TranslationY, plan.translation.y),
    );
    requests.push(
        AnimationRequest::new(root, spec).animate_between(AnimatedProperty::Alpha, 1.0, 0.0),
    );
    requests
}

/// Starts groups of animations and signals once all of them are done.
#[derive(Clone)]
pub struct OutcomeAnimator {
    service: Rc<dyn AnimationService>,
    clock: FrameClock,
}

impl OutcomeAnimator {
    pub fn new(service: Rc<dyn AnimationService>, clock: FrameClock) -> Self {
        Self { service, clock }
    }

    /// Runs `requests` side by side and calls `on_done` once after the last
    /// one finishes.
    ///
    /// Services that report completion are trusted. For the others the
    /// longest request's duration is waited out on the frame clock instead.
    /// Everything started here is registered in `pending` so it can be
    /// cancelled as a unit.
    pub fn run_all(
        &self,
        requests: impl IntoIterator<Item = AnimationRequest>,
        pending: &mut Disposables,
        on_done: impl FnOnce() + 'static,
    ) {
        let requests: SmallVec<[AnimationRequest; 3]> = requests.into_iter().collect();
        let on_done: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
            Rc::new(RefCell::new(Some(Box::new(on_done))));

        if requests.is_empty() {
            fire(&on_done);
            return;
        }

        if self.service.reports_completion() {
            let remaining = Rc::new(Cell::new(requests.len()));
            for request in requests {
                let remaining = Rc::clone(&remaining);
                let on_done = Rc::clone(&on_done);
                let handle = self.service.animate(
                    request,
                    Box::new(move || {
                        remaining.set(remaining.get().saturating_sub(1));
                        if remaining.get() == 0 {
                            fire(&on_done);
                        }
                    }),
                );
                add_handle(pending, handle);
            }
        } else {
            let wait = requests
                .iter()
                .map(|request| request.spec.total_millis())
                .max()
                .unwrap_or(0);
            for request in requests {
                let handle = self.service.animate(request, Box::new(|| {}));
                add_handle(pending, handle);
            }
            let on_done = Rc::clone(&on_done);
            let timer = self.clock.after_millis(wait, move || fire(&on_done));
            pending.add_timer(timer);
        }
    }
}

fn add_handle(pending: &mut Disposables, handle: AnimationHandle) {
    pending.add(move || handle.cancel());
}

fn fire(slot: &Rc<RefCell<Option<Box<dyn FnOnce()>>>>) {
    let callback = slot.borrow_mut().take();
    if let Some(callback) = callback {
        callback();
    }
}

#[cfg(test)]
#[path = "tests/outcome_tests.rs"]
mod tests;
