//! Core runtime for flickable dialogs.
//!
//! Everything here runs on a single UI thread: frame callbacks, delayed
//! continuations and event streams are plain closures drained by the host's
//! event loop.

mod color;
mod disposables;
mod event_stream;
mod frame_clock;
mod geometry;
pub mod platform;
mod runtime;

pub use color::Color;
pub use disposables::Disposables;
pub use event_stream::{EventStream, Subscription};
pub use frame_clock::{FrameCallbackRegistration, FrameClock, TimerRegistration};
pub use geometry::{Point, Rect, Size};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;
pub type TimerId = u64;

pub(crate) const NANOS_PER_MILLI: u64 = 1_000_000;

/// Converts milliseconds to the nanosecond frame time used by the runtime.
pub const fn millis_to_nanos(millis: u64) -> u64 {
    millis * NANOS_PER_MILLI
}
