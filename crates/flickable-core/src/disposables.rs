use smallvec::SmallVec;

use crate::event_stream::Subscription;
use crate::frame_clock::TimerRegistration;

type Disposer = Box<dyn FnOnce() + 'static>;

/// Bag of resources released together.
///
/// `dispose` runs every disposer once. Anything added afterwards is released
/// on the spot.
#[derive(Default)]
pub struct Disposables {
    disposers: SmallVec<[Disposer; 4]>,
    disposed: bool,
}

impl Disposables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    pub fn add(&mut self, disposer: impl FnOnce() + 'static) {
        if self.disposed {
            disposer();
            return;
        }
        self.disposers.push(Box::new(disposer));
    }

    pub fn add_subscription(&mut self, mut subscription: Subscription) {
        self.add(move || subscription.dispose());
    }

    pub fn add_timer(&mut self, timer: TimerRegistration) {
        self.add(move || timer.cancel());
    }

    /// Moves everything from `other` into this bag. If this bag is already
    /// disposed the moved resources are released immediately.
    pub fn append(&mut self, other: &mut Disposables) {
        for disposer in other.disposers.drain(..) {
            self.add(disposer);
        }
    }

    /// Releases everything collected so far without marking the bag disposed.
    pub fn clear(&mut self) {
        for disposer in self.disposers.drain(..) {
            disposer();
        }
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.clear();
    }
}

impl Drop for Disposables {
    fn drop(&mut self) {
        self.dispose();
    }
}
