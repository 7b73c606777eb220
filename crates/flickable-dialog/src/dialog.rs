use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use flickable_animation::{AnimatedProperty, AnimationRequest, AnimationService};
use flickable_core::{Disposables, EventStream, FrameClock, Point};

use crate::config::{ConfigError, FlickableConfig, FlickableConfigBuilder};
use crate::direction::FlickDirection;
use crate::dismissal::{backdrop_fade_in_request, backdrop_fade_out_request, DismissalCoordinator};
use crate::gesture::{GestureState, GestureTracker};
use crate::host::{property_target, Backdrop, ModalEvent, ModalHost, Surface, TouchEventKind};
use crate::listener::{DialogListeners, FlickableDialogListener};
use crate::outcome::{return_request, throw_requests, OutcomeAnimator, ThrowPlan};
use crate::threshold::{self, ReleaseOutcome};

/// Where a dialog is in its presentation lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogPhase {
    /// Built but not shown.
    Idle,
    AwaitingTouch,
    Dragging,
    /// Snapping back after a short drag.
    Returning,
    /// Being thrown off screen.
    Throwing,
    /// Backdrop fading out after a tap outside the surface.
    Canceling,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogError {
    AlreadyShown,
    Dismissed,
}

impl fmt::Display for DialogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogError::AlreadyShown => write!(f, "dialog is already shown"),
            DialogError::Dismissed => write!(f, "dialog was dismissed and cannot be shown again"),
        }
    }
}

impl std::error::Error for DialogError {}

struct Session {
    host: Rc<dyn ModalHost>,
    surface: Rc<dyn Surface>,
    backdrop: Rc<dyn Backdrop>,
    animator: OutcomeAnimator,
}

struct DialogInner {
    config: FlickableConfig,
    tracker: GestureTracker,
    phase: DialogPhase,
    origin: Option<Point>,
    gesture: Option<GestureState>,
    session: Option<Session>,
    coordinator: DismissalCoordinator,
}

impl DialogInner {
    fn live_surface(&self) -> Option<Rc<dyn Surface>> {
        if self.coordinator.is_torn_down() {
            return None;
        }
        self.session
            .as_ref()
            .map(|session| Rc::clone(&session.surface))
    }

    fn live_session(&self) -> Option<&Session> {
        if self.coordinator.is_torn_down() {
            return None;
        }
        self.session.as_ref()
    }

    /// The origin is taken from the first touch event of any kind.
    fn capture_origin(&mut self, surface: &dyn Surface) -> Point {
        *self
            .origin
            .get_or_insert_with(|| surface.layout_position())
    }
}

/// Draggable modal dialog that snaps back or flies away on release.
///
/// Cloning yields another handle to the same dialog. Everything runs on the
/// UI thread that owns the runtime.
#[derive(Clone)]
pub struct FlickableDialog {
    inner: Rc<RefCell<DialogInner>>,
    listeners: Rc<RefCell<DialogListeners>>,
}

impl FlickableDialog {
    pub fn builder() -> FlickableConfigBuilder {
        FlickableConfigBuilder::new()
    }

    pub fn new(config: FlickableConfig) -> Self {
        let listeners = Rc::new(RefCell::new(DialogListeners::default()));
        let tracker = GestureTracker::new(config.rotation_exponent, config.dismiss_threshold);
        let inner = DialogInner {
            config,
            tracker,
            phase: DialogPhase::Idle,
            origin: None,
            gesture: None,
            session: None,
            coordinator: DismissalCoordinator::new(Rc::clone(&listeners)),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
            listeners,
        }
    }

    pub fn config(&self) -> FlickableConfig {
        self.inner.borrow().config.clone()
    }

    pub fn phase(&self) -> DialogPhase {
        self.inner.borrow().phase
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.borrow().coordinator.is_torn_down()
    }

    /// Layout position captured from the first touch event, if any.
    pub fn origin(&self) -> Option<Point> {
        self.inner.borrow().origin
    }

    /// The live drag, between touch-down and release.
    pub fn gesture(&self) -> Option<GestureState> {
        self.inner.borrow().gesture
    }

    pub fn set_on_flicking(&self, callback: impl FnMut(f32, f32) + 'static) {
        self.listeners.borrow_mut().set_on_flicking(callback);
    }

    pub fn set_on_origin_back(&self, callback: impl FnMut() + 'static) {
        self.listeners.borrow_mut().set_on_origin_back(callback);
    }

    pub fn set_on_flick(&self, callback: impl FnMut(FlickDirection) + 'static) {
        self.listeners.borrow_mut().set_on_flicked(callback);
    }

    pub fn set_on_cancel(&self, callback: impl FnMut() + 'static) {
        self.listeners.borrow_mut().set_on_canceled(callback);
    }

    pub fn set_listener<L>(&self, listener: Rc<RefCell<L>>)
    where
        L: FlickableDialogListener + 'static,
    {
        self.listeners.borrow_mut().set_listener(listener);
    }

    /// Presents the dialog on `host` and starts listening to `events`.
    pub fn show(
        &self,
        host: Rc<dyn ModalHost>,
        events: &EventStream<ModalEvent>,
        animations: Rc<dyn AnimationService>,
        clock: FrameClock,
    ) -> Result<(), DialogError> {
        let (animator, fade_in) = {
            let mut inner = self.inner.borrow_mut();
            match inner.phase {
                DialogPhase::Idle => {}
                DialogPhase::Dismissed => return Err(DialogError::Dismissed),
                _ => return Err(DialogError::AlreadyShown),
            }

            let surface = host.surface();
            let backdrop = host.backdrop();
            backdrop.set_background_color(inner.config.background_color);

            let weak = self.downgrade();
            let subscription = events.subscribe(move |event| {
                if let Some(dialog) = weak.upgrade() {
                    dialog.dispatch(*event);
                }
            });
            inner.coordinator.resources_mut().add_subscription(subscription);

            let animator = OutcomeAnimator::new(animations, clock);
            let fade_in = backdrop_fade_in_request(property_target(&backdrop));
            inner.session = Some(Session {
                host,
                surface,
                backdrop,
                animator: animator.clone(),
            });
            inner.phase = DialogPhase::AwaitingTouch;
            log::debug!("dialog shown with content {:?}", inner.config.content.as_str());
            (animator, fade_in)
        };

        let mut started = Disposables::new();
        animator.run_all([fade_in], &mut started, || {});
        self.inner
            .borrow_mut()
            .coordinator
            .resources_mut()
            .append(&mut started);
        Ok(())
    }

    /// Routes one host event to its handler.
    pub fn dispatch(&self, event: ModalEvent) {
        match event {
            ModalEvent::Touch(touch) => match touch.kind {
                TouchEventKind::Down => self.on_touch_down(touch.raw),
                TouchEventKind::Move => self.on_touch_move(touch.raw),
                TouchEventKind::Up => self.on_touch_up(touch.raw),
                TouchEventKind::Cancel => self.on_touch_cancel(),
            },
            ModalEvent::BackdropTap => self.on_backdrop_tap(),
            ModalEvent::BackPressed => self.on_back_pressed(),
            ModalEvent::Detached => self.detach(),
        }
    }

    pub fn on_touch_down(&self, raw: Point) {
        let mut inner = self.inner.borrow_mut();
        let Some(surface) = inner.live_surface() else {
            return;
        };
        let origin = inner.capture_origin(&*surface);
        if inner.phase != DialogPhase::AwaitingTouch {
            log::debug!("touch down ignored in {:?}", inner.phase);
            return;
        }

        let state = GestureState::begin(
            origin,
            surface.layout_position(),
            surface.on_screen_bounds(),
            raw,
        );
        log::debug!(
            "drag started at ({}, {}), top half: {}",
            raw.x,
            raw.y,
            state.touched_top_half
        );
        inner.gesture = Some(state);
        inner.phase = DialogPhase::Dragging;
    }

    pub fn on_touch_move(&self, raw: Point) {
        let (horizontal, vertical) = {
            let mut inner = self.inner.borrow_mut();
            let Some(surface) = inner.live_surface() else {
                return;
            };
            inner.capture_origin(&*surface);
            let tracker = inner.tracker;
            let Some(state) = inner.gesture.as_mut() else {
                return;
            };

            let update = tracker.track_move(state, raw);
            surface.set_layout_position(update.position);
            surface.set_property(AnimatedProperty::Rotation, update.rotation);
            log::trace!(
                "drag to ({}, {}), rotation {}",
                update.position.x,
                update.position.y,
                update.rotation
            );
            tracker.flicking_progress(update.delta)
        };
        DialogListeners::notify_flicking(&self.listeners, horizontal, vertical);
    }

    pub fn on_touch_up(&self, raw: Point) {
        let mut inner = self.inner.borrow_mut();
        let Some(surface) = inner.live_surface() else {
            return;
        };
        inner.capture_origin(&*surface);
        let Some(state) = inner.gesture.take() else {
            return;
        };

        let delta = state.delta_from_origin();
        let outcome = threshold::evaluate(delta, inner.config.dismiss_threshold);
        log::debug!(
            "released at ({}, {}), delta ({}, {}): {:?}",
            raw.x,
            raw.y,
            delta.x,
            delta.y,
            outcome
        );
        match outcome {
            ReleaseOutcome::Return => self.begin_return(inner, delta),
            ReleaseOutcome::Dismiss => self.begin_throw(inner, delta, state.touched_top_half),
        }
    }

    /// The host stole the pointer mid-drag. The surface snaps back.
    pub fn on_touch_cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.live_surface().is_none() {
            return;
        }
        let Some(state) = inner.gesture.take() else {
            return;
        };
        log::debug!("drag cancelled by host");
        self.begin_return(inner, state.delta_from_origin());
    }

    pub fn on_backdrop_tap(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.coordinator.accepts_backdrop_tap(&inner.config) {
            return;
        }
        match inner.phase {
            DialogPhase::AwaitingTouch | DialogPhase::Returning => {}
            phase => {
                log::debug!("backdrop tap ignored in {:?}", phase);
                return;
            }
        }
        let Some(session) = inner.live_session() else {
            return;
        };
        let animator = session.animator.clone();
        let request = backdrop_fade_out_request(property_target(&session.backdrop));

        inner.coordinator.cancel_pending();
        inner.phase = DialogPhase::Canceling;
        drop(inner);

        let weak = self.downgrade();
        self.start_transition(&animator, [request], move || {
            if let Some(dialog) = weak.upgrade() {
                dialog.finish_cancel();
            }
        });
    }

    /// Back key or system cancel. Honoured only for cancelable dialogs.
    pub fn on_back_pressed(&self) {
        {
            let inner = self.inner.borrow();
            if inner.session.is_none() || !inner.coordinator.accepts_back_press(&inner.config) {
                return;
            }
        }
        log::debug!("dialog cancelled by back press");
        DialogListeners::notify_canceled(&self.listeners);
        self.dismiss();
    }

    /// Removes the dialog from its host and tears it down. Safe to call more
    /// than once.
    pub fn dismiss(&self) {
        let host = {
            let mut inner = self.inner.borrow_mut();
            if !Self::teardown(&mut inner) {
                return;
            }
            inner.session.take().map(|session| session.host)
        };
        if let Some(host) = host {
            host.dismiss();
        }
    }

    /// The host removed the window itself. Tears down without asking the
    /// host to dismiss.
    pub fn detach(&self) {
        let session = {
            let mut inner = self.inner.borrow_mut();
            if !Self::teardown(&mut inner) {
                return;
            }
            inner.session.take()
        };
        drop(session);
    }

    fn teardown(inner: &mut DialogInner) -> bool {
        if !inner.coordinator.teardown() {
            return false;
        }
        inner.gesture = None;
        inner.phase = DialogPhase::Dismissed;
        true
    }

    fn begin_return(&self, mut inner: RefMut<'_, DialogInner>, delta: Point) {
        let Some(session) = inner.live_session() else {
            return;
        };
        let animator = session.animator.clone();
        let request = return_request(property_target(&session.surface), delta);
        inner.phase = DialogPhase::Returning;
        drop(inner);

        let weak = self.downgrade();
        self.start_transition(&animator, [request], move || {
            if let Some(dialog) = weak.upgrade() {
                dialog.finish_return();
            }
        });
    }

    fn finish_return(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != DialogPhase::Returning {
                return;
            }
            let Some(surface) = inner.live_surface() else {
                return;
            };
            inner.coordinator.cancel_pending();
            // Fold the snap-back translation into the layout so the next drag
            // starts from a clean origin.
            if let Some(origin) = inner.origin {
                surface.set_layout_position(origin);
            }
            surface.set_property(AnimatedProperty::TranslationX, 0.0);
            surface.set_property(AnimatedProperty::TranslationY, 0.0);
            surface.set_property(AnimatedProperty::Rotation, 0.0);
            inner.phase = DialogPhase::AwaitingTouch;
        }
        log::debug!("dialog back at origin");
        DialogListeners::notify_origin_back(&self.listeners);
    }

    fn begin_throw(&self, mut inner: RefMut<'_, DialogInner>, delta: Point, touched_top_half: bool) {
        let Some(session) = inner.live_session() else {
            return;
        };
        let animator = session.animator.clone();
        let plan = ThrowPlan::new(delta, touched_top_half, inner.config.dismiss_threshold);
        let requests = throw_requests(
            property_target(&session.surface),
            session.host.root(),
            plan,
        );
        let direction = FlickDirection::classify(delta);
        inner.phase = DialogPhase::Throwing;
        drop(inner);

        log::debug!("throwing dialog towards {direction}");
        let weak = self.downgrade();
        self.start_transition(&animator, requests, move || {
            if let Some(dialog) = weak.upgrade() {
                dialog.finish_throw(direction);
            }
        });
    }

    fn finish_throw(&self, direction: FlickDirection) {
        {
            let inner = self.inner.borrow();
            if inner.phase != DialogPhase::Throwing || inner.coordinator.is_torn_down() {
                return;
            }
        }
        DialogListeners::notify_flicked(&self.listeners, direction);
        self.dismiss();
    }

    fn finish_cancel(&self) {
        {
            let inner = self.inner.borrow();
            if inner.phase != DialogPhase::Canceling || inner.coordinator.is_torn_down() {
                return;
            }
        }
        log::debug!("dialog cancelled by backdrop tap");
        DialogListeners::notify_canceled(&self.listeners);
        self.dismiss();
    }

    /// Starts a transition's animations without holding the dialog borrow,
    /// so services that finish synchronously can call straight back in.
    fn start_transition(
        &self,
        animator: &OutcomeAnimator,
        requests: impl IntoIterator<Item = AnimationRequest>,
        on_done: impl FnOnce() + 'static,
    ) {
        let mut started = Disposables::new();
        animator.run_all(requests, &mut started, on_done);
        self.inner
            .borrow_mut()
            .coordinator
            .pending_mut()
            .append(&mut started);
    }

    fn downgrade(&self) -> WeakDialog {
        WeakDialog {
            inner: Rc::downgrade(&self.inner),
            listeners: Rc::downgrade(&self.listeners),
        }
    }
}

impl FlickableConfigBuilder {
    /// Validates the configuration and creates the dialog.
    pub fn build_dialog(self) -> Result<FlickableDialog, ConfigError> {
        self.build().map(FlickableDialog::new)
    }
}

struct WeakDialog {
    inner: Weak<RefCell<DialogInner>>,
    listeners: Weak<RefCell<DialogListeners>>,
}

impl WeakDialog {
    fn upgrade(&self) -> Option<FlickableDialog> {
        Some(FlickableDialog {
            inner: self.inner.upgrade()?,
            listeners: self.listeners.upgrade()?,
        })
    }
}
