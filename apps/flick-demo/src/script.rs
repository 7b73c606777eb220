//! Scripted input replayed in real time.

use std::time::Duration;

use flickable_core::{EventStream, Point, Runtime};
use flickable_dialog::{ModalEvent, TouchEvent};
use web_time::Instant;

const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);
const DRAG_FRAMES: u32 = 12;
/// Give up on settling after this many frames.
const SETTLE_LIMIT: u32 = 300;

#[derive(Clone, Copy, Debug)]
pub enum Step {
    Down(f32, f32),
    /// Moves the held pointer by `(dx, dy)` over several frames.
    DragBy(f32, f32),
    Up,
    BackdropTap,
    Back,
    Wait(u64),
}

/// Feeds steps into an event stream and paces the runtime at 60 Hz.
pub struct Player<'a> {
    runtime: &'a Runtime,
    events: &'a EventStream<ModalEvent>,
    started: Instant,
    pointer: Point,
    frames: u64,
}

impl<'a> Player<'a> {
    pub fn new(runtime: &'a Runtime, events: &'a EventStream<ModalEvent>) -> Self {
        Self {
            runtime,
            events,
            started: Instant::now(),
            pointer: Point::ZERO,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn play(&mut self, steps: &[Step]) {
        for step in steps {
            log::debug!("step {:?}", step);
            match *step {
                Step::Down(x, y) => {
                    self.pointer = Point::new(x, y);
                    self.touch(TouchEvent::down(x, y));
                }
                Step::DragBy(dx, dy) => {
                    let start = self.pointer;
                    for frame in 1..=DRAG_FRAMES {
                        let t = frame as f32 / DRAG_FRAMES as f32;
                        self.pointer = Point::new(start.x + dx * t, start.y + dy * t);
                        self.touch(TouchEvent::moved(self.pointer.x, self.pointer.y));
                        self.frame();
                    }
                }
                Step::Up => self.touch(TouchEvent::up(self.pointer.x, self.pointer.y)),
                Step::BackdropTap => self.events.emit(ModalEvent::BackdropTap),
                Step::Back => self.events.emit(ModalEvent::BackPressed),
                Step::Wait(millis) => {
                    let until = Instant::now() + Duration::from_millis(millis);
                    while Instant::now() < until {
                        self.frame();
                    }
                }
            }
        }
    }

    /// Runs frames until nothing is animating or waiting.
    pub fn settle(&mut self) {
        for _ in 0..SETTLE_LIMIT {
            if !self.runtime.has_pending_work() {
                return;
            }
            self.frame();
        }
        log::warn!("runtime still busy after {SETTLE_LIMIT} frames");
    }

    fn touch(&self, event: TouchEvent) {
        let millis = self.started.elapsed().as_millis() as u64;
        self.events.emit(ModalEvent::Touch(event.at(millis)));
    }

    fn frame(&mut self) {
        let frame_start = Instant::now();
        let now_nanos = frame_start.duration_since(self.started).as_nanos() as u64;
        self.runtime.drain_frame_callbacks(now_nanos);
        self.frames += 1;

        let spent = frame_start.elapsed();
        if spent < FRAME_INTERVAL {
            std::thread::sleep(FRAME_INTERVAL - spent);
        }
    }
}
