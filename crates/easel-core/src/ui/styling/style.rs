//! Background and border appearance of an element

use super::colors::{Color, TRANSPARENT};
use crate::ui::geometry::Thickness;

/// Visual style of an element box.
///
/// The border is painted *outside* the element's computed bounds, one band
/// per side with the width given by `border_thickness`.
///
/// # Examples
///
/// ```ignore
/// let card = Style::new()
///     .with_background(BLUE)
///     .with_border(WHITE, Thickness::uniform(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Fill color of the box; transparent skips the fill
    pub background: Color,

    /// Border color; transparent skips the border
    pub border_color: Color,

    /// Border band width per side
    pub border_thickness: Thickness,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: TRANSPARENT,
            border_color: TRANSPARENT,
            border_thickness: Thickness::default(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Sets the border color and thickness.
    ///
    /// A zero thickness effectively disables the border.
    pub fn with_border(mut self, color: Color, thickness: Thickness) -> Self {
        self.border_color = color;
        self.border_thickness = thickness;
        self
    }

    pub fn has_border(&self) -> bool {
        !self.border_color.is_transparent() && !self.border_thickness.is_zero()
    }
}
