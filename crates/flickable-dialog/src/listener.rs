use std::cell::RefCell;
use std::rc::Rc;

use crate::direction::FlickDirection;

/// Callbacks a host can implement in one place. Every method defaults to a
/// no-op.
pub trait FlickableDialogListener {
    /// Drag progress relative to the dismiss threshold. `horizontal` is
    /// positive when dragged right, `vertical` positive when dragged up.
    fn on_flicking(&mut self, horizontal: f32, vertical: f32) {
        let _ = (horizontal, vertical);
    }

    /// The surface finished snapping back to its origin.
    fn on_origin_back(&mut self) {}

    /// The surface was thrown away; fired before the dialog is torn down.
    fn on_flicked(&mut self, direction: FlickDirection) {
        let _ = direction;
    }

    /// Backdrop tap or back key.
    fn on_canceled(&mut self) {}
}

type FlickingCallback = Box<dyn FnMut(f32, f32) + 'static>;
type OriginBackCallback = Box<dyn FnMut() + 'static>;
type FlickedCallback = Box<dyn FnMut(FlickDirection) + 'static>;
type CanceledCallback = Box<dyn FnMut() + 'static>;

/// Registered callbacks of one dialog.
///
/// Callbacks are taken out of their slot while they run, so a callback may
/// freely call back into the dialog. Clearing the slots bumps a generation
/// counter and a callback that was running at the time is not put back.
#[derive(Default)]
pub struct DialogListeners {
    on_flicking: Option<FlickingCallback>,
    on_origin_back: Option<OriginBackCallback>,
    on_flicked: Option<FlickedCallback>,
    on_canceled: Option<CanceledCallback>,
    generation: u64,
}

impl DialogListeners {
    pub fn set_on_flicking(&mut self, callback: impl FnMut(f32, f32) + 'static) {
        self.on_flicking = Some(Box::new(callback));
    }

    pub fn set_on_origin_back(&mut self, callback: impl FnMut() + 'static) {
        self.on_origin_back = Some(Box::new(callback));
    }

    pub fn set_on_flicked(&mut self, callback: impl FnMut(FlickDirection) + 'static) {
        self.on_flicked = Some(Box::new(callback));
    }

    pub fn set_on_canceled(&mut self, callback: impl FnMut() + 'static) {
        self.on_canceled = Some(Box::new(callback));
    }

    /// Routes all four callbacks to one listener object.
    pub fn set_listener<L>(&mut self, listener: Rc<RefCell<L>>)
    where
        L: FlickableDialogListener + 'static,
    {
        let flicking = Rc::clone(&listener);
        self.set_on_flicking(move |horizontal, vertical| {
            flicking.borrow_mut().on_flicking(horizontal, vertical)
        });
        let origin_back = Rc::clone(&listener);
        self.set_on_origin_back(move || origin_back.borrow_mut().on_origin_back());
        let flicked = Rc::clone(&listener);
        self.set_on_flicked(move |direction| flicked.borrow_mut().on_flicked(direction));
        self.set_on_canceled(move || listener.borrow_mut().on_canceled());
    }

    pub fn is_empty(&self) -> bool {
        self.on_flicking.is_none()
            && self.on_origin_back.is_none()
            && self.on_flicked.is_none()
            && self.on_canceled.is_none()
    }

    pub fn clear(&mut self) {
        self.on_flicking = None;
        self.on_origin_back = None;
        self.on_flicked = None;
        self.on_canceled = None;
        self.generation += 1;
    }

    pub fn notify_flicking(this: &RefCell<Self>, horizontal: f32, vertical: f32) {
        Self::invoke(this, flicking_slot, |callback| callback(horizontal, vertical));
    }

    pub fn notify_origin_back(this: &RefCell<Self>) {
        Self::invoke(this, origin_back_slot, |callback| callback());
    }

    pub fn notify_flicked(this: &RefCell<Self>, direction: FlickDirection) {
        Self::invoke(this, flicked_slot, |callback| callback(direction));
    }

    pub fn notify_canceled(this: &RefCell<Self>) {
        Self::invoke(this, canceled_slot, |callback| callback());
    }

    fn invoke<C>(
        this: &RefCell<Self>,
        slot: fn(&mut Self) -> &mut Option<C>,
        call: impl FnOnce(&mut C),
    ) {
        let (taken, generation) = {
            let mut listeners = this.borrow_mut();
            let generation = listeners.generation;
            (slot(&mut *listeners).take(), generation)
        };
        let Some(mut callback) = taken else {
            return;
        };
        call(&mut callback);

        let mut listeners = this.borrow_mut();
        if listeners.generation != generation {
            return;
        }
        let slot = slot(&mut *listeners);
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

fn flicking_slot(listeners: &mut DialogListeners) -> &mut Option<FlickingCallback> {
    &mut listeners.on_flicking
}

fn origin_back_slot(listeners: &mut DialogListeners) -> &mut Option<OriginBackCallback> {
    &mut listeners.on_origin_back
}

fn flicked_slot(listeners: &mut DialogListeners) -> &mut Option<FlickedCallback> {
    &mut listeners.on_flicked
}

fn canceled_slot(listeners: &mut DialogListeners) -> &mut Option<CanceledCallback> {
    &mut listeners.on_canceled
}

#[cfg(test)]
#[path = "tests/listener_tests.rs"]
mod tests;
