//! Glyph masks for label text
//!
//! Labels draw text one fixed-size cell per character. A [`GlyphSource`]
//! supplies a 1-bit-per-pixel mask for a character at a given [`FontSize`]
//! class. Masks are row-major with each row padded to a whole byte, most
//! significant bit first.
//!
//! [`MonoGlyphs`] is a ready-made source that rasterises the
//! embedded-graphics mono fonts and scales them to the class cell size.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use serde::{Deserialize, Serialize};

use crate::ui::geometry::Size;

/// Font size classes. Each class has a fixed cell: `height` px tall and
/// `height / 2` px wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontSize {
    VeryTiny,
    Tiny,
    MediumTiny,
    #[default]
    Median,
    MediumLarge,
    Large,
    VeryLarge,
}

impl FontSize {
    pub const ALL: [FontSize; 7] = [
        FontSize::VeryTiny,
        FontSize::Tiny,
        FontSize::MediumTiny,
        FontSize::Median,
        FontSize::MediumLarge,
        FontSize::Large,
        FontSize::VeryLarge,
    ];

    pub const fn cell_height(self) -> i32 {
        match self {
            FontSize::VeryTiny => 16,
            FontSize::Tiny => 20,
            FontSize::MediumTiny => 24,
            FontSize::Median => 28,
            FontSize::MediumLarge => 32,
            FontSize::Large => 40,
            FontSize::VeryLarge => 48,
        }
    }

    pub const fn cell_width(self) -> i32 {
        self.cell_height() / 2
    }

    pub const fn cell_size(self) -> Size {
        Size::new(self.cell_width(), self.cell_height())
    }

    /// Bytes per mask row.
    pub const fn row_stride(self) -> usize {
        (self.cell_width() as usize).div_ceil(8)
    }
}

/// A 1-bpp glyph bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask<'a> {
    pub size: Size,
    pub data: Cow<'a, [u8]>,
}

impl GlyphMask<'_> {
    fn stride(&self) -> usize {
        (self.size.width.max(0) as usize).div_ceil(8)
    }

    /// Whether the pixel at `(x, y)` is set. Out-of-range reads are unset.
    pub fn bit(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return false;
        }
        let byte = y as usize * self.stride() + x as usize / 8;
        self.data
            .get(byte)
            .is_some_and(|b| (b >> (7 - (x as usize % 8))) & 1 == 1)
    }
}

/// Source of glyph masks, keyed by size class and character.
pub trait GlyphSource {
    /// The mask for `ch`, sized `size.cell_size()`. `None` draws nothing but
    /// still advances the pen by one cell.
    fn glyph_mask(&self, size: FontSize, ch: char) -> Option<GlyphMask<'_>>;
}

/// Glyphs from the embedded-graphics ASCII mono fonts, nearest-neighbour
/// scaled to the class cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoGlyphs;

impl MonoGlyphs {
    fn base_font(size: FontSize) -> &'static MonoFont<'static> {
        match size {
            FontSize::VeryTiny => &ascii::FONT_8X13,
            _ => &ascii::FONT_10X20,
        }
    }
}

impl GlyphSource for MonoGlyphs {
    fn glyph_mask(&self, size: FontSize, ch: char) -> Option<GlyphMask<'_>> {
        if ch.is_control() {
            return None;
        }

        let font = Self::base_font(size);
        let native = font.character_size;
        let mut canvas = BitCanvas::new(native.width as usize, native.height as usize);

        let mut utf8 = [0u8; 4];
        let style = MonoTextStyle::new(font, BinaryColor::On);
        Text::with_baseline(ch.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
            .draw(&mut canvas)
            .ok();

        let cell = size.cell_size();
        let stride = size.row_stride();
        let mut data = vec![0u8; stride * cell.height as usize];
        for y in 0..cell.height as usize {
            let src_y = y * canvas.height / cell.height as usize;
            for x in 0..cell.width as usize {
                let src_x = x * canvas.width / cell.width as usize;
                if canvas.get(src_x, src_y) {
                    data[y * stride + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }

        Some(GlyphMask {
            size: cell,
            data: Cow::Owned(data),
        })
    }
}

/// Scratch binary target used to rasterise one glyph.
struct BitCanvas {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BitCanvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.bits.get(y * self.width + x).copied().unwrap_or(false)
    }
}

impl OriginDimensions for BitCanvas {
    fn size(&self) -> embedded_graphics::prelude::Size {
        embedded_graphics::prelude::Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for BitCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < self.width
                && (coord.y as usize) < self.height
            {
                self.bits[coord.y as usize * self.width + coord.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_metrics() {
        assert_eq!(FontSize::Median.cell_size(), Size::new(14, 28));
        assert_eq!(FontSize::VeryLarge.cell_size(), Size::new(24, 48));
        assert_eq!(FontSize::VeryTiny.row_stride(), 1);
        assert_eq!(FontSize::MediumLarge.row_stride(), 2);
    }

    #[test]
    fn test_mask_bits_are_msb_first_with_padded_rows() {
        // 10 wide: two bytes per row
        let mask = GlyphMask {
            size: Size::new(10, 2),
            data: Cow::Borrowed(&[0b1000_0000, 0b0100_0000, 0b0000_0001, 0b0000_0000]),
        };
        assert!(mask.bit(0, 0));
        assert!(mask.bit(9, 0));
        assert!(!mask.bit(8, 0));
        assert!(mask.bit(7, 1));
        assert!(!mask.bit(10, 0));
        assert!(!mask.bit(-1, 0));
    }

    #[test]
    fn test_mono_glyphs_fill_the_cell() {
        let glyphs = MonoGlyphs;
        for size in FontSize::ALL {
            let mask = glyphs.glyph_mask(size, 'W').unwrap();
            assert_eq!(mask.size, size.cell_size());
            assert_eq!(mask.data.len(), size.row_stride() * size.cell_height() as usize);
            assert!(mask.data.iter().any(|b| *b != 0), "{size:?} glyph is blank");
        }
    }

    #[test]
    fn test_space_is_blank_and_control_is_skipped() {
        let glyphs = MonoGlyphs;
        let space = glyphs.glyph_mask(FontSize::Tiny, ' ').unwrap();
        assert!(space.data.iter().all(|b| *b == 0));
        assert!(glyphs.glyph_mask(FontSize::Tiny, '\n').is_none());
    }
}
