use std::cell::RefCell;
use std::rc::Rc;

use flickable_core::{millis_to_nanos, FrameCallbackRegistration, RuntimeHandle};
use smallvec::SmallVec;

use crate::animation::{AnimationRequest, Lerp};

/// Runs property animations and reports when they finish.
pub trait AnimationService {
    /// Starts `request`. `on_end` fires once, after the final values are
    /// written, unless the animation is cancelled first.
    fn animate(&self, request: AnimationRequest, on_end: Box<dyn FnOnce() + 'static>)
        -> AnimationHandle;

    /// Whether `on_end` can be relied on. Services that cannot observe the
    /// end of an animation return `false`, and callers fall back to waiting
    /// out the request's duration.
    fn reports_completion(&self) -> bool {
        true
    }
}

/// Handle to a running animation.
///
/// Dropping the handle leaves the animation running; call [`cancel`] to stop
/// it. A cancelled animation never fires its end callback.
///
/// [`cancel`]: AnimationHandle::cancel
pub struct AnimationHandle {
    canceller: Option<Box<dyn FnOnce() + 'static>>,
}

impl AnimationHandle {
    pub fn new(canceller: impl FnOnce() + 'static) -> Self {
        Self {
            canceller: Some(Box::new(canceller)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(canceller) = self.canceller.take() {
            canceller();
        }
    }
}

/// Tween driver running on the runtime's frame clock.
#[derive(Clone)]
pub struct FrameAnimationService {
    runtime: RuntimeHandle,
}

impl FrameAnimationService {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }
}

impl AnimationService for FrameAnimationService {
    fn animate(
        &self,
        request: AnimationRequest,
        on_end: Box<dyn FnOnce() + 'static>,
    ) -> AnimationHandle {
        log::trace!("animate {:?}", request);
        let run = Rc::new(RefCell::new(TweenRun {
            runtime: self.runtime.clone(),
            request,
            start_values: None,
            start_time_nanos: None,
            on_end: Some(on_end),
            registration: None,
            cancelled: false,
        }));
        TweenRun::schedule_frame(&run);

        let weak = Rc::downgrade(&run);
        AnimationHandle::new(move || {
            if let Some(run) = weak.upgrade() {
                let registration = {
                    let mut run = run.borrow_mut();
                    run.cancelled = true;
                    run.on_end = None;
                    run.registration.take()
                };
                if let Some(registration) = registration {
                    registration.cancel();
                }
            }
        })
    }
}

struct TweenRun {
    runtime: RuntimeHandle,
    request: AnimationRequest,
    start_values: Option<SmallVec<[f32; 3]>>,
    start_time_nanos: Option<u64>,
    on_end: Option<Box<dyn FnOnce() + 'static>>,
    registration: Option<FrameCallbackRegistration>,
    cancelled: bool,
}

impl TweenRun {
    fn schedule_frame(this: &Rc<RefCell<TweenRun>>) {
        let clock = {
            let run = this.borrow();
            if run.registration.is_some() || run.cancelled {
                return;
            }
            run.runtime.frame_clock()
        };
        // The run keeps itself alive through its pending frame callback.
        let strong = Rc::clone(this);
        let registration = clock.with_frame_nanos(move |time| {
            Self::on_frame(&strong, time);
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<TweenRun>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut run = this.borrow_mut();
            run.registration = None;
            if run.cancelled {
                return;
            }

            let spec = run.request.spec;
            let start_time = *run.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let delay_nanos = millis_to_nanos(spec.delay_millis);

            if elapsed_nanos < delay_nanos {
                schedule_next = true;
            } else {
                if run.start_values.is_none() {
                    let target = Rc::clone(&run.request.target);
                    let starts = run
                        .request
                        .transitions
                        .iter()
                        .map(|transition| {
                            transition
                                .from
                                .unwrap_or_else(|| target.property(transition.property))
                        })
                        .collect();
                    run.start_values = Some(starts);
                }

                let animation_elapsed = elapsed_nanos - delay_nanos;
                let linear_progress = if spec.duration_millis == 0 {
                    1.0
                } else {
                    let duration_nanos = millis_to_nanos(spec.duration_millis);
                    (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0)
                };

                if linear_progress >= 1.0 {
                    for transition in run.request.transitions.iter() {
                        run.request
                            .target
                            .set_property(transition.property, transition.to);
                    }
                    finished = run.on_end.take();
                } else {
                    let progress = spec.easing.transform(linear_progress);
                    if let Some(starts) = run.start_values.as_ref() {
                        for (transition, start) in run.request.transitions.iter().zip(starts) {
                            let value = start.lerp(&transition.to, progress);
                            run.request.target.set_property(transition.property, value);
                        }
                    }
                    schedule_next = true;
                }
            }
        }

        if let Some(on_end) = finished {
            on_end();
        } else if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
