//! Platform abstraction traits for the dialog runtime.
//!
//! The host decides when frames are produced. The runtime only tells it that
//! work is waiting.

/// Schedules work for the runtime.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler for hosts that poll [`crate::Runtime::needs_frame`] themselves.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
