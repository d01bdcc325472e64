//! Animatable element properties
//!
//! A [`Property`] pairs an identity ([`PropertyId`]) with a typed accessor.
//! The identity is what the animation engine compares when deciding whether
//! a new tween supersedes a running one.

use crate::ui::elements::Element;
use crate::ui::geometry::{Size, Thickness};
use crate::ui::styling::Color;

/// Identity of an animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    Margin,
    RequestedSize,
    BorderThickness,
    BorderColor,
    Background,
    FontColor,
    /// Application-defined property
    Custom(u16),
}

/// Typed accessor for one property of an element.
pub struct Property<T> {
    pub id: PropertyId,
    /// Current value, `None` when the element has no such property
    pub get: fn(&Element) -> Option<T>,
    /// Store a value; a no-op when the element has no such property
    pub set: fn(&mut Element, T),
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> Property<T> {
    pub const fn new(id: PropertyId, get: fn(&Element) -> Option<T>, set: fn(&mut Element, T)) -> Self {
        Self { id, get, set }
    }
}

pub const MARGIN: Property<Thickness> = Property::new(
    PropertyId::Margin,
    |e: &Element| Some(e.margin),
    |e: &mut Element, v: Thickness| e.margin = v,
);

pub const REQUESTED_SIZE: Property<Size> = Property::new(
    PropertyId::RequestedSize,
    |e: &Element| Some(e.requested_size),
    |e: &mut Element, v: Size| e.requested_size = v,
);

pub const BORDER_THICKNESS: Property<Thickness> = Property::new(
    PropertyId::BorderThickness,
    |e: &Element| Some(e.style.border_thickness),
    |e: &mut Element, v: Thickness| e.style.border_thickness = v,
);

pub const BORDER_COLOR: Property<Color> = Property::new(
    PropertyId::BorderColor,
    |e: &Element| Some(e.style.border_color),
    |e: &mut Element, v: Color| e.style.border_color = v,
);

pub const BACKGROUND: Property<Color> = Property::new(
    PropertyId::Background,
    |e: &Element| Some(e.style.background),
    |e: &mut Element, v: Color| e.style.background = v,
);

pub const FONT_COLOR: Property<Color> = Property::new(
    PropertyId::FontColor,
    |e: &Element| e.as_label().map(|l| l.font_color),
    |e: &mut Element, v: Color| {
        if let Some(label) = e.as_label_mut() {
            label.font_color = v;
        }
    },
);
