//! Robot-style driver for dialog tests.
//!
//! The robot owns a runtime, a recording host and the dialog under test. It
//! feeds touch and key events through the same event stream a real host
//! would use, and advances frame time explicitly.
//!
//! # Example
//!
//! ```
//! use flickable_dialog::{ContentDescriptor, FlickableDialog};
//! use flickable_testing::DialogRobot;
//!
//! let config = FlickableDialog::builder()
//!     .content(ContentDescriptor::new("card"))
//!     .build()
//!     .unwrap();
//! let mut robot = DialogRobot::new(config);
//! robot.show();
//! robot.drag_by(0.0, 0.0, 40.0, 10.0);
//! robot.wait_for_idle();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use flickable_core::{EventStream, Point, Runtime, Size};
use flickable_dialog::{
    DialogError, DialogPhase, FlickableConfig, FlickableDialog, ModalEvent, TouchEvent,
    TouchEventKind,
};

use crate::fakes::{RecordingAnimationService, RecordingHost, RecordingListener, RecordingSurface};

/// Frame interval at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Where the robot's surface is laid out before any drag.
pub const SURFACE_ORIGIN: Point = Point::new(100.0, 300.0);
pub const SURFACE_SIZE: Size = Size::new(400.0, 300.0);

/// Steps used by [`DialogRobot::drag_by`] to simulate a smooth drag.
const DRAG_STEPS: u32 = 10;

/// Upper bound for [`DialogRobot::wait_for_idle`].
const MAX_IDLE_FRAMES: u32 = 600;

pub struct DialogRobot {
    runtime: Runtime,
    time_nanos: u64,
    events: EventStream<ModalEvent>,
    host: Rc<RecordingHost>,
    animations: Rc<RecordingAnimationService>,
    listener: Rc<RefCell<RecordingListener>>,
    dialog: FlickableDialog,
    pointer: Point,
}

impl DialogRobot {
    /// Robot whose animation service reports completion.
    pub fn new(config: FlickableConfig) -> Self {
        Self::with_completion_reports(config, true)
    }

    /// Robot whose animation service may never report completion, so the
    /// dialog has to fall back to its own timers.
    pub fn with_completion_reports(config: FlickableConfig, reports_completion: bool) -> Self {
        let runtime = Runtime::default();
        let animations = Rc::new(RecordingAnimationService::new(
            runtime.handle(),
            reports_completion,
        ));
        let host = Rc::new(RecordingHost::new(RecordingSurface::new(
            SURFACE_ORIGIN,
            SURFACE_SIZE,
        )));
        let listener = Rc::new(RefCell::new(RecordingListener::default()));
        let dialog = FlickableDialog::new(config);
        dialog.set_listener(Rc::clone(&listener));

        Self {
            runtime,
            time_nanos: 0,
            events: EventStream::new(),
            host,
            animations,
            listener,
            dialog,
            pointer: Point::ZERO,
        }
    }

    /// Shows the dialog, panicking if it was shown before.
    pub fn show(&mut self) {
        if let Err(err) = self.try_show() {
            panic!("dialog failed to show: {err}");
        }
    }

    pub fn try_show(&mut self) -> Result<(), DialogError> {
        self.dialog.show(
            self.host.clone(),
            &self.events,
            self.animations.clone(),
            self.runtime.frame_clock(),
        )
    }

    pub fn dialog(&self) -> &FlickableDialog {
        &self.dialog
    }

    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    pub fn animations(&self) -> &RecordingAnimationService {
        &self.animations
    }

    pub fn listener(&self) -> std::cell::Ref<'_, RecordingListener> {
        self.listener.borrow()
    }

    pub fn events(&self) -> &EventStream<ModalEvent> {
        &self.events
    }

    pub fn phase(&self) -> DialogPhase {
        self.dialog.phase()
    }

    pub fn now_millis(&self) -> u64 {
        self.time_nanos / 1_000_000
    }

    pub fn touch_down(&mut self, x: f32, y: f32) {
        self.pointer = Point::new(x, y);
        self.emit_touch(TouchEvent::down(x, y));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pointer = Point::new(x, y);
        self.emit_touch(TouchEvent::moved(x, y));
    }

    pub fn release(&mut self) {
        let Point { x, y } = self.pointer;
        self.emit_touch(TouchEvent::up(x, y));
    }

    pub fn cancel_touch(&mut self) {
        let Point { x, y } = self.pointer;
        self.emit_touch(TouchEvent::new(TouchEventKind::Cancel, Point::new(x, y), 0));
    }

    /// Presses at a point inside the surface, moves by `(dx, dy)` in small
    /// steps, and releases. `from` is relative to the surface's top-left
    /// corner.
    pub fn drag_by(&mut self, from_x: f32, from_y: f32, dx: f32, dy: f32) {
        let start = SURFACE_ORIGIN + Point::new(from_x, from_y);
        self.touch_down(start.x, start.y);
        self.move_by(dx, dy);
        self.release();
    }

    /// Moves the held pointer by `(dx, dy)` in small steps, one frame apart.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let start = self.pointer;
        for step in 1..=DRAG_STEPS {
            let t = step as f32 / DRAG_STEPS as f32;
            self.move_to(start.x + dx * t, start.y + dy * t);
            self.advance_frame();
        }
    }

    pub fn tap_backdrop(&mut self) {
        self.events.emit(ModalEvent::BackdropTap);
    }

    pub fn press_back(&mut self) {
        self.events.emit(ModalEvent::BackPressed);
    }

    pub fn detach(&mut self) {
        self.events.emit(ModalEvent::Detached);
    }

    pub fn advance_frame(&mut self) {
        self.time_nanos += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.time_nanos);
    }

    /// Advances frame time by `millis`, one frame at a time.
    pub fn advance_millis(&mut self, millis: u64) {
        let target = self.time_nanos + flickable_core::millis_to_nanos(millis);
        while self.time_nanos < target {
            self.time_nanos = (self.time_nanos + FRAME_NANOS).min(target);
            self.runtime.drain_frame_callbacks(self.time_nanos);
        }
    }

    /// Pumps frames until no animation, timer or task is left.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.runtime.has_pending_work() {
                return;
            }
            self.advance_frame();
        }
        log::warn!("runtime still busy after {MAX_IDLE_FRAMES} frames");
    }

    fn emit_touch(&mut self, event: TouchEvent) {
        let event = event.at(self.now_millis());
        self.events.emit(ModalEvent::Touch(event));
    }
}
