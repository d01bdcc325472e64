//! Styling for elements
//!
//! - [`colors`] - ARGB color type and named colors
//! - [`style`] - background and border appearance of an element

pub mod colors;
pub mod style;

pub use colors::{
    BLACK, BLUE, BROWN, Color, GREEN, PURPLE, RED, TRANSPARENT, WHITE, YELLOW,
};
pub use style::Style;
