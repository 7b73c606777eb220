use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::{FrameCallbackId, TimerId, NANOS_PER_MILLI};

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TimerEntry {
    due_nanos: u64,
    task: Box<dyn FnOnce() + 'static>,
}

struct RuntimeInner {
    scheduler: Rc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    now_nanos: Cell<u64>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    timers: RefCell<FxHashMap<TimerId, TimerEntry>>,
    next_timer_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            now_nanos: Cell::new(0),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            timers: RefCell::new(FxHashMap::default()),
            next_timer_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn has_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }

    fn has_pending_work(&self) -> bool {
        self.has_frame_callbacks() || self.has_timers()
    }

    fn refresh_needs_frame(&self) {
        if !self.has_pending_work() {
            self.needs_frame.set(false);
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
                callbacks.remove(index);
            }
        }
        self.refresh_needs_frame();
    }

    fn post_delayed(&self, delay_millis: u64, task: Box<dyn FnOnce() + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let due_nanos = self
            .now_nanos
            .get()
            .saturating_add(delay_millis.saturating_mul(NANOS_PER_MILLI));
        self.timers
            .borrow_mut()
            .insert(id, TimerEntry { due_nanos, task });
        self.schedule();
        id
    }

    fn cancel_delayed(&self, id: TimerId) {
        self.timers.borrow_mut().remove(&id);
        self.refresh_needs_frame();
    }

    /// Pops the earliest timer that is due at `now`. Ties resolve by
    /// registration order.
    fn take_due_timer(&self, now: u64) -> Option<TimerEntry> {
        let mut timers = self.timers.borrow_mut();
        let id = timers
            .iter()
            .filter(|(_, entry)| entry.due_nanos <= now)
            .min_by_key(|(id, entry)| (entry.due_nanos, **id))
            .map(|(id, _)| *id)?;
        timers.remove(&id)
    }

    fn run_due_timers(&self) {
        let now = self.now_nanos.get();
        while let Some(entry) = self.take_due_timer(now) {
            (entry.task)();
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if frame_time_nanos > self.now_nanos.get() {
            self.now_nanos.set(frame_time_nanos);
        }
        self.run_due_timers();

        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            let mut pending = Vec::with_capacity(callbacks.len());
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
            pending
        };
        let now = self.now_nanos.get();
        for callback in pending.drain(..) {
            callback(now);
        }
        self.refresh_needs_frame();
    }
}

/// Owner of the event-loop state. Dropping the runtime drops every pending
/// callback and turns all outstanding handles into no-ops.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner.now_nanos.get()
    }

    pub fn has_pending_work(&self) -> bool {
        self.inner.has_pending_work()
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Rc::new(crate::DefaultScheduler))
    }
}

/// Weak handle to a [`Runtime`]. All operations are no-ops once the runtime
/// is gone.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_nanos.get())
            .unwrap_or(0)
    }

    pub fn now_millis(&self) -> u64 {
        self.now_nanos() / NANOS_PER_MILLI
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs `task` once the runtime clock has advanced by `delay_millis`.
    pub fn post_delayed(&self, delay_millis: u64, task: impl FnOnce() + 'static) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| inner.post_delayed(delay_millis, Box::new(task)))
    }

    pub fn cancel_delayed(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_delayed(id);
        }
    }

    pub fn has_pending_work(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_work())
            .unwrap_or(false)
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
