//! A modal window that only lives in memory and narrates what happens to it.

use std::cell::Cell;
use std::rc::Rc;

use flickable_animation::{AnimatedProperty, PropertyTarget};
use flickable_core::{Color, Point, Size};
use flickable_dialog::{Backdrop, ModalHost, Surface};

#[derive(Default)]
pub struct Layer {
    translation_x: Cell<f32>,
    translation_y: Cell<f32>,
    rotation: Cell<f32>,
    alpha: Cell<f32>,
}

impl Layer {
    fn visible() -> Self {
        let layer = Self::default();
        layer.alpha.set(1.0);
        layer
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.get()
    }
}

impl PropertyTarget for Layer {
    fn property(&self, property: AnimatedProperty) -> f32 {
        match property {
            AnimatedProperty::TranslationX => self.translation_x.get(),
            AnimatedProperty::TranslationY => self.translation_y.get(),
            AnimatedProperty::Rotation => self.rotation.get(),
            AnimatedProperty::Alpha => self.alpha.get(),
        }
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        match property {
            AnimatedProperty::TranslationX => self.translation_x.set(value),
            AnimatedProperty::TranslationY => self.translation_y.set(value),
            AnimatedProperty::Rotation => self.rotation.set(value),
            AnimatedProperty::Alpha => self.alpha.set(value),
        }
    }
}

pub struct Card {
    layout: Cell<Point>,
    size: Size,
    layer: Layer,
}

impl Card {
    pub fn new(layout: Point, size: Size) -> Self {
        Self {
            layout: Cell::new(layout),
            size,
            layer: Layer::visible(),
        }
    }

    pub fn describe(&self) -> String {
        let layout = self.layout.get();
        format!(
            "layout ({:.0}, {:.0}) translation ({:.0}, {:.0}) rotation {:.1}°",
            layout.x,
            layout.y,
            self.layer.translation_x.get(),
            self.layer.translation_y.get(),
            self.layer.rotation.get()
        )
    }
}

impl PropertyTarget for Card {
    fn property(&self, property: AnimatedProperty) -> f32 {
        self.layer.property(property)
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        self.layer.set_property(property, value);
    }
}

impl Surface for Card {
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

pub struct Scrim {
    color: Cell<Color>,
    layer: Layer,
}

impl Scrim {
    pub fn alpha(&self) -> f32 {
        self.layer.alpha()
    }
}

impl PropertyTarget for Scrim {
    fn property(&self, property: AnimatedProperty) -> f32 {
        self.layer.property(property)
    }

    fn set_property(&self, property: AnimatedProperty, value: f32) {
        self.layer.set_property(property, value);
    }
}

impl Backdrop for Scrim {
    fn set_background_color(&self, color: Color) {
        log::debug!("scrim color {:?}", color);
        self.color.set(color);
    }
}

pub struct MemoryWindow {
    pub card: Rc<Card>,
    pub scrim: Rc<Scrim>,
    pub root: Rc<Layer>,
    open: Cell<bool>,
}

impl MemoryWindow {
    pub fn new(card_origin: Point, card_size: Size) -> Self {
        Self {
            card: Rc::new(Card::new(card_origin, card_size)),
            scrim: Rc::new(Scrim {
                color: Cell::new(Color::TRANSPARENT),
                layer: Layer::visible(),
            }),
            root: Rc::new(Layer::visible()),
            open: Cell::new(true),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

impl ModalHost for MemoryWindow {
    fn surface(&self) -> Rc<dyn Surface> {
        self.card.clone()
    }

    fn backdrop(&self) -> Rc<dyn Backdrop> {
        self.scrim.clone()
    }

    fn root(&self) -> Rc<dyn PropertyTarget> {
        self.root.clone()
    }

    fn dismiss(&self) {
        self.open.set(false);
        println!("  window closed");
    }
}
