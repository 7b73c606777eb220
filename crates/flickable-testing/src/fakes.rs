//! In-memory host, listener and animation service that record what the
//! dialog does to them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flickable_animation::{
    AnimatedProperty, AnimationHandle, AnimationRequest, AnimationService, AnimationSpec,
    FrameAnimationService, PropertyTarget, PropertyTransition,
};
use flickable_core::{Color, Point, RuntimeHandle, Size};
use flickable_dialog::{Backdrop, FlickDirection, FlickableDialogListener, ModalHost, Surface};

#[derive(Default)]
struct Transform {
    translation_x: Cell<f32>,
    translation_y: Cell<f32>,
    rotation: Cell<f32>,
    alpha: Cell<f32>,
}

impl Transform {
    fn opaque() -> Self {
        let transform = Self::default();
        transform.alpha.set(1.0);
        transform
    }

    fn get(&self, property: AnimatedProperty) -> f32 {
        match property {
            AnimatedProperty::TranslationX => self.translation_x.get(),
            AnimatedProperty::TranslationY => self.translation_y.get(),
            AnimatedProperty::Rotation => self.rotation.get(),
            AnimatedProperty::Alpha => self.alpha.get(),
        }
    }

    fn set(&self, property: AnimatedProperty, value: f32) {
        match property {
            AnimatedProperty::TranslationX => self.translation_x.set(value),
            AnimatedProperty::TranslationY => self.translation_y.set(value),
            AnimatedProperty::Rotation => self.rotation.set(value),
            AnimatedProperty::Alpha => self.alpha.set(value),
        }
    }
}

/// Dialog body that remembers every rotation it was given.
pub struct RecordingSurface {
    layout: Cell<Point>,
    size: Size,
    transform: Transform,
    rotations: RefCell<Vec<f32>>,
}

impl RecordingSurface {
    pub fn new(layout: Point, size: Size) -> Self {
        Self {
            layout: Cell::new(layout),
            size,
            transform: Transform::opaque(),
            rotations: RefCell::new(Vec::new()),
        }
    }

    pub fn translation(&self) -> Point {
        Point::new(
            self.transform.translation_x.get(),
            self.transform.translation_y.get(),
        )
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation.get()
    }

    /// Layout position plus translation.
    pub fn drawn_at(&self) -> Point {
        self.layout.get() + self.translation()
    }

    pub fn rotation_history(&self) -> Vec<f32> {
        self.rotations.borrow().clone()
    }
}

impl PropertyTarget for RecordingSurface {
    fn property(&self, property: AnimatedProperty) -> f32 {
        self.transform.get(property)
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        if property == AnimatedProperty::Rotation {
            self.rotations.borrow_mut().push(value);
        }
        self.transform.set(property, value);
    }
}

impl Surface for RecordingSurface {
    fn layout_position(&self) -> Point {
        self.layout.get()
    }

    fn set_layout_position(&self, position: Point) {
        self.layout.set(position);
    }

    fn size(&self) -> Size {
        self.size
    }
}

pub struct RecordingBackdrop {
    color: Cell<Option<Color>>,
    transform: Transform,
}

impl RecordingBackdrop {
    pub fn new() -> Self {
        Self {
            color: Cell::new(None),
            transform: Transform::opaque(),
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.color.get()
    }

    pub fn alpha(&self) -> f32 {
        self.transform.alpha.get()
    }
}

impl Default for RecordingBackdrop {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyTarget for RecordingBackdrop {
    fn property(&self, property: AnimatedProperty) -> f32 {
        self.transform.get(property)
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        self.transform.set(property, value);
    }
}

impl Backdrop for RecordingBackdrop {
    fn set_background_color(&self, color: Color) {
        self.color.set(Some(color));
    }
}

/// Window root; only its alpha matters.
pub struct RecordingRoot {
    transform: Transform,
}

impl RecordingRoot {
    pub fn new() -> Self {
        Self {
            transform: Transform::opaque(),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.transform.alpha.get()
    }
}

impl Default for RecordingRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyTarget for RecordingRoot {
    fn property(&self, property: AnimatedProperty) -> f32 {
        self.transform.get(property)
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        self.transform.set(property, value);
    }
}

/// Modal window that counts how often it was asked to go away.
pub struct RecordingHost {
    pub surface: Rc<RecordingSurface>,
    pub backdrop: Rc<RecordingBackdrop>,
    pub root: Rc<RecordingRoot>,
    dismissals: Cell<usize>,
}

impl RecordingHost {
    pub fn new(surface: RecordingSurface) -> Self {
        Self {
            surface: Rc::new(surface),
            backdrop: Rc::new(RecordingBackdrop::new()),
            root: Rc::new(RecordingRoot::new()),
            dismissals: Cell::new(0),
        }
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.get()
    }
}

impl ModalHost for RecordingHost {
    fn surface(&self) -> Rc<dyn Surface> {
        self.surface.clone()
    }

    fn backdrop(&self) -> Rc<dyn Backdrop> {
        self.backdrop.clone()
    }

    fn root(&self) -> Rc<dyn PropertyTarget> {
        self.root.clone()
    }

    fn dismiss(&self) {
        self.dismissals.set(self.dismissals.get() + 1);
        log::debug!("host dismissed ({} total)", self.dismissals.get());
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ListenerEvent {
    Flicking { horizontal: f32, vertical: f32 },
    OriginBack,
    Flicked(FlickDirection),
    Canceled,
}

/// Listener that keeps every callback in order.
#[derive(Default)]
pub struct RecordingListener {
    pub events: Vec<ListenerEvent>,
}

impl RecordingListener {
    pub fn flicked(&self) -> Vec<FlickDirection> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ListenerEvent::Flicked(direction) => Some(*direction),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&ListenerEvent) -> bool) -> usize {
        self.events.iter().filter(|event| wanted(event)).count()
    }

    pub fn last_flicking(&self) -> Option<(f32, f32)> {
        self.events.iter().rev().find_map(|event| match event {
            ListenerEvent::Flicking {
                horizontal,
                vertical,
            } => Some((*horizontal, *vertical)),
            _ => None,
        })
    }
}

impl FlickableDialogListener for RecordingListener {
    fn on_flicking(&mut self, horizontal: f32, vertical: f32) {
        self.events.push(ListenerEvent::Flicking {
            horizontal,
            vertical,
        });
    }

    fn on_origin_back(&mut self) {
        self.events.push(ListenerEvent::OriginBack);
    }

    fn on_flicked(&mut self, direction: FlickDirection) {
        self.events.push(ListenerEvent::Flicked(direction));
    }

    fn on_canceled(&mut self) {
        self.events.push(ListenerEvent::Canceled);
    }
}

/// What one `animate` call asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedAnimation {
    pub spec: AnimationSpec,
    pub transitions: Vec<PropertyTransition>,
}

impl RecordedAnimation {
    pub fn target_of(&self, property: AnimatedProperty) -> Option<f32> {
        self.transitions
            .iter()
            .find(|transition| transition.property == property)
            .map(|transition| transition.to)
    }
}

/// Frame-driven tweens that also log each request.
///
/// With `reports_completion` off the end callback is swallowed, like a
/// platform animator that cannot observe the end of its animations.
pub struct RecordingAnimationService {
    inner: FrameAnimationService,
    reports_completion: bool,
    recorded: RefCell<Vec<RecordedAnimation>>,
    cancelled: Rc<Cell<usize>>,
}

impl RecordingAnimationService {
    pub fn new(runtime: RuntimeHandle, reports_completion: bool) -> Self {
        Self {
            inner: FrameAnimationService::new(runtime),
            reports_completion,
            recorded: RefCell::new(Vec::new()),
            cancelled: Rc::new(Cell::new(0)),
        }
    }

    pub fn recorded(&self) -> Vec<RecordedAnimation> {
        self.recorded.borrow().clone()
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.get()
    }
}

impl AnimationService for RecordingAnimationService {
    fn animate(&self, request: AnimationRequest, on_end: Box<dyn FnOnce()>) -> AnimationHandle {
        self.recorded.borrow_mut().push(RecordedAnimation {
            spec: request.spec,
            transitions: request.transitions.iter().copied().collect(),
        });
        let on_end: Box<dyn FnOnce()> = if self.reports_completion {
            on_end
        } else {
            Box::new(|| {})
        };
        let handle = self.inner.animate(request, on_end);
        let cancelled = Rc::clone(&self.cancelled);
        AnimationHandle::new(move || {
            cancelled.set(cancelled.get() + 1);
            handle.cancel();
        })
    }

    fn reports_completion(&self) -> bool {
        self.reports_completion
    }
}
