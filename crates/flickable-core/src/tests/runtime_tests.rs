use super::*;

use crate::{millis_to_nanos, DefaultScheduler};
use std::cell::RefCell;
use std::rc::Rc;

fn runtime() -> Runtime {
    Runtime::new(Rc::new(DefaultScheduler))
}

#[test]
fn delayed_task_runs_once_due() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    {
        let fired = Rc::clone(&fired);
        handle.post_delayed(300, move || fired.borrow_mut().push("fade"));
    }

    runtime.drain_frame_callbacks(millis_to_nanos(299));
    assert!(fired.borrow().is_empty());
    assert!(runtime.needs_frame());

    runtime.drain_frame_callbacks(millis_to_nanos(300));
    assert_eq!(fired.borrow().as_slice(), &["fade"]);
    assert!(!runtime.needs_frame());
}

#[test]
fn delayed_tasks_run_in_due_order_then_registration_order() {
    let runtime = runtime();
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));

    for (delay, label) in [(400, "c"), (200, "a"), (400, "d"), (300, "b")] {
        let order = Rc::clone(&order);
        handle.post_delayed(delay, move || order.borrow_mut().push(label));
    }

    runtime.drain_frame_callbacks(millis_to_nanos(1_000));
    assert_eq!(order.borrow().as_slice(), &["a", "b", "c", "d"]);
}

#[test]
fn cancelled_timer_never_fires() {
    let runtime = runtime();
    let clock = runtime.frame_clock();
    let fired = Rc::new(RefCell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        clock.after_millis(100, move || *fired.borrow_mut() = true)
    };
    registration.cancel();

    runtime.drain_frame_callbacks(millis_to_nanos(500));
    assert!(!*fired.borrow());
    assert!(!runtime.has_pending_work());
}

#[test]
fn dropping_timer_registration_cancels_it() {
    let runtime = runtime();
    let clock = runtime.frame_clock();
    let fired = Rc::new(RefCell::new(false));

    {
        let fired = Rc::clone(&fired);
        let _registration = clock.after_millis(100, move || *fired.borrow_mut() = true);
    }

    runtime.drain_frame_callbacks(millis_to_nanos(500));
    assert!(!*fired.borrow());
}

#[test]
fn frame_callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = runtime();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));

    {
        let frames = Rc::clone(&frames);
        let handle_inner = handle.clone();
        handle.register_frame_callback(move |time| {
            frames.borrow_mut().push(time);
            let frames = Rc::clone(&frames);
            handle_inner.register_frame_callback(move |time| frames.borrow_mut().push(time));
        });
    }

    runtime.drain_frame_callbacks(16);
    assert_eq!(frames.borrow().as_slice(), &[16]);
    runtime.drain_frame_callbacks(32);
    assert_eq!(frames.borrow().as_slice(), &[16, 32]);
}

#[test]
fn timer_posted_from_timer_runs_when_due() {
    let runtime = runtime();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(Vec::new()));

    {
        let fired = Rc::clone(&fired);
        let inner_handle = handle.clone();
        handle.post_delayed(100, move || {
            fired.borrow_mut().push(inner_handle.now_millis());
            let fired = Rc::clone(&fired);
            let now_handle = inner_handle.clone();
            inner_handle.post_delayed(0, move || fired.borrow_mut().push(now_handle.now_millis()));
        });
    }

    runtime.drain_frame_callbacks(millis_to_nanos(150));
    assert_eq!(fired.borrow().as_slice(), &[150, 150]);
}

#[test]
fn handle_is_inert_after_runtime_drop() {
    let handle = {
        let runtime = runtime();
        runtime.handle()
    };

    assert!(!handle.is_alive());
    assert!(handle.post_delayed(10, || {}).is_none());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    handle.drain_frame_callbacks(100);
}

#[test]
fn clock_never_moves_backwards() {
    let runtime = runtime();
    runtime.drain_frame_callbacks(millis_to_nanos(50));
    runtime.drain_frame_callbacks(millis_to_nanos(10));
    assert_eq!(runtime.now_nanos(), millis_to_nanos(50));
}
