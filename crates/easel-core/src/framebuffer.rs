//! RGBA pixel buffer exposed as an embedded-graphics draw target.
//!
//! The platform owns the memory (`width * height * 4` bytes, row stride
//! `width * 4`, bytes in R, G, B, A order). [`Canvas`] borrows it for one
//! paint pass so the element renderers can draw with embedded-graphics
//! primitives. Every written pixel is opaque.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::warn;

use crate::ui::geometry::Size as UiSize;

/// Bytes per pixel in the platform buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// Borrowed RGBA framebuffer implementing `DrawTarget<Color = Rgb888>`.
pub struct Canvas<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wrap `data` as a `size` screen. If the buffer is too short, only the
    /// complete rows it holds are drawable.
    pub fn new(data: &'a mut [u8], size: UiSize) -> Self {
        let width = size.width.max(0) as usize;
        let mut height = size.height.max(0) as usize;
        let stride = width * BYTES_PER_PIXEL;
        if stride > 0 && data.len() < stride * height {
            warn!(
                "Pixel buffer holds {} bytes, {} needed; clipping to {} rows",
                data.len(),
                stride * height,
                data.len() / stride
            );
            height = data.len() / stride;
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Read back a pixel, `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        let idx = self.index(x, y)?;
        let px = &self.data[idx..idx + BYTES_PER_PIXEL];
        Some(Rgb888::new(px[0], px[1], px[2]))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize * self.width + x as usize) * BYTES_PER_PIXEL)
    }

    #[inline]
    fn set_pixel(&mut self, idx: usize, color: Rgb888) {
        self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&[color.r(), color.g(), color.b(), 0xFF]);
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = self.index(coord.x, coord.y) {
                self.set_pixel(idx, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                if let Some(idx) = self.index(x, y) {
                    self.set_pixel(idx, color);
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let bytes = [color.r(), color.g(), color.b(), 0xFF];
        let used = self.width * self.height * BYTES_PER_PIXEL;
        for px in self.data[..used].chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bytes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_pixels_are_rgba_ordered() {
        let mut data = vec![0u8; 4 * 2 * BYTES_PER_PIXEL];
        let mut canvas = Canvas::new(&mut data, UiSize::new(4, 2));
        Pixel(Point::new(1, 1), Rgb888::new(10, 20, 30))
            .draw(&mut canvas)
            .unwrap();
        assert_eq!(canvas.pixel(1, 1), Some(Rgb888::new(10, 20, 30)));
        assert_eq!(canvas.pixel(4, 0), None);
        drop(canvas);

        let idx = (4 + 1) * 4;
        assert_eq!(&data[idx..idx + 4], &[10, 20, 30, 0xFF]);
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut data = vec![0u8; 8 * 8 * 4];
        let mut canvas = Canvas::new(&mut data, UiSize::new(8, 8));
        Rectangle::new(Point::new(-2, 6), Size::new(5, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
            .draw(&mut canvas)
            .unwrap();

        assert_eq!(canvas.pixel(0, 6), Some(Rgb888::WHITE));
        assert_eq!(canvas.pixel(2, 7), Some(Rgb888::WHITE));
        assert_eq!(canvas.pixel(3, 7), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(0, 5), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_short_buffer_clips_rows() {
        let mut data = vec![0u8; 10 * 4 * 3];
        let mut canvas = Canvas::new(&mut data, UiSize::new(10, 10));
        assert_eq!(canvas.size(), Size::new(10, 3));
        canvas.clear(Rgb888::RED).unwrap();
        assert_eq!(canvas.pixel(9, 2), Some(Rgb888::RED));
        assert_eq!(canvas.pixel(0, 3), None);
    }
}
