//! Color definitions
//!
//! Colors are 8-bit ARGB values. They are linear values like the geometry
//! types, so any color property can be animated.
//!
//! # Alpha
//! An alpha of 0 means fully transparent and such a fill is skipped while
//! painting. Any other alpha paints the color opaque: there is no blending.

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

use crate::ui::geometry::impl_linear;

/// An 8-bit-per-channel ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl_linear!(Color, u8, alpha, red, green, blue);

impl Color {
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Opaque color from its red, green and blue channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(0xFF, red, green, blue)
    }

    /// Unpack `0xAARRGGBB`.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            alpha: ((argb & 0xff00_0000) >> 24) as u8,
            red: ((argb & 0x00ff_0000) >> 16) as u8,
            green: ((argb & 0x0000_ff00) >> 8) as u8,
            blue: (argb & 0x0000_00ff) as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        ((self.alpha as u32) << 24)
            | ((self.red as u32) << 16)
            | ((self.green as u32) << 8)
            | self.blue as u32
    }

    /// Whether painting this color is a no-op.
    pub const fn is_transparent(&self) -> bool {
        self.alpha == 0
    }
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.red, color.green, color.blue)
    }
}

// ============================================================================
// Named colors
// ============================================================================

pub const WHITE: Color = Color::from_argb(0xffff_ffff);
pub const BLACK: Color = Color::from_argb(0xff00_0000);
pub const RED: Color = Color::from_argb(0xffd7_1345);
pub const BLUE: Color = Color::from_argb(0xff42_6ab3);
pub const GREEN: Color = Color::from_argb(0xff7f_b80e);
pub const YELLOW: Color = Color::from_argb(0xffff_d400);
pub const PURPLE: Color = Color::from_argb(0xff9b_95c9);
pub const BROWN: Color = Color::from_argb(0xff74_531f);
pub const TRANSPARENT: Color = Color::from_argb(0x0000_0000);
