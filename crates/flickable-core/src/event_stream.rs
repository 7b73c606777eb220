//! Push-based event streams with disposable subscriptions.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

type Handler<E> = Rc<RefCell<dyn FnMut(&E) + 'static>>;

struct StreamInner<E> {
    subscribers: RefCell<Vec<(u64, Handler<E>)>>,
    next_id: Cell<u64>,
}

impl<E> StreamInner<E> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|(subscriber, _)| *subscriber == id)
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers
            .borrow_mut()
            .retain(|(subscriber, _)| *subscriber != id);
    }
}

/// Multicast stream of events delivered synchronously, in emission order.
///
/// Subscribers added while an event is being delivered only see later
/// events. A subscriber disposed during delivery does not receive the rest
/// of it.
pub struct EventStream<E> {
    inner: Rc<StreamInner<E>>,
}

impl<E: 'static> EventStream<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StreamInner {
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        self.inner.subscribers.borrow_mut().push((id, handler));

        let weak: Weak<StreamInner<E>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.unsubscribe(id);
            }
        })
    }

    pub fn emit(&self, event: E) {
        let snapshot: SmallVec<[(u64, Handler<E>); 2]> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();
        for (id, handler) in snapshot {
            if !self.inner.is_subscribed(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (&mut *handler)(&event),
                Err(_) => log::warn!("event stream: dropped re-entrant event for subscriber {id}"),
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl<E: 'static> Default for EventStream<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventStream<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Registration against an [`EventStream`]. Unsubscribes on drop.
pub struct Subscription {
    disposer: Option<Box<dyn FnOnce() + 'static>>,
}

impl Subscription {
    fn new(disposer: impl FnOnce() + 'static) -> Self {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposer.is_none()
    }

    pub fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "tests/event_stream_tests.rs"]
mod tests;
