//! Seams to the host UI environment.
//!
//! The host creates and layers the modal window, inflates the content and
//! feeds raw input in as [`ModalEvent`]s. The pipeline only moves, rotates and
//! fades what it is handed here.

use std::rc::Rc;

use flickable_animation::{AnimatedProperty, PropertyTarget};
use flickable_core::{Color, Point, Rect, Size};

/// The draggable dialog body.
pub trait Surface: PropertyTarget {
    /// Top-left corner in layout coordinates, excluding translation.
    fn layout_position(&self) -> Point;

    fn set_layout_position(&self, position: Point);

    fn size(&self) -> Size;

    /// Where the surface currently sits on screen: layout position plus
    /// translation.
    fn on_screen_bounds(&self) -> Rect {
        let position = self.layout_position();
        Rect::from_origin_size(position, self.size()).translate(
            self.property(AnimatedProperty::TranslationX),
            self.property(AnimatedProperty::TranslationY),
        )
    }
}

/// Full-screen scrim behind the surface.
pub trait Backdrop: PropertyTarget {
    fn set_background_color(&self, color: Color);
}

/// The presented modal window.
pub trait ModalHost {
    fn surface(&self) -> Rc<dyn Surface>;

    fn backdrop(&self) -> Rc<dyn Backdrop>;

    /// Root of the window; faded out while the surface is thrown.
    fn root(&self) -> Rc<dyn PropertyTarget>;

    /// Removes the window. Called at most once per dialog.
    fn dismiss(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw touch on the surface, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    pub raw: Point,
    pub timestamp_millis: u64,
}

impl TouchEvent {
    pub fn new(kind: TouchEventKind, raw: Point, timestamp_millis: u64) -> Self {
        Self {
            kind,
            raw,
            timestamp_millis,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(TouchEventKind::Down, Point::new(x, y), 0)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(TouchEventKind::Move, Point::new(x, y), 0)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(TouchEventKind::Up, Point::new(x, y), 0)
    }

    pub fn at(mut self, timestamp_millis: u64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }
}

/// Everything the host reports to a shown dialog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModalEvent {
    Touch(TouchEvent),
    /// Tap on the backdrop outside the surface.
    BackdropTap,
    /// Back key or system cancel.
    BackPressed,
    /// The host tore the window down on its own.
    Detached,
}

/// Wraps any shared property target as a plain `Rc<dyn PropertyTarget>`.
pub(crate) fn property_target<T>(target: &Rc<T>) -> Rc<dyn PropertyTarget>
where
    T: PropertyTarget + ?Sized + 'static,
{
    Rc::new(SharedTarget(Rc::clone(target)))
}

struct SharedTarget<T: ?Sized>(Rc<T>);

impl<T: PropertyTarget + ?Sized> PropertyTarget for SharedTarget<T> {
    fn property(&self, property: AnimatedProperty) -> f32 {
        self.0.property(property)
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        self.0.set_property(property, value);
    }
}
