//! Low-level paint helpers shared by the element renderers
//!
//! All helpers clip against the target's bounding box and skip work for
//! transparent colors.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;

use crate::font::GlyphMask;
use crate::ui::geometry::{Position, Rect, Size, Thickness};
use crate::ui::styling::Color;

fn screen_rect<D>(target: &D) -> Rect
where
    D: DrawTarget<Color = Rgb888>,
{
    let bounds = target.bounding_box();
    Rect::from_origin_size(
        Position::new(bounds.top_left.x, bounds.top_left.y),
        Size::new(bounds.size.width as i32, bounds.size.height as i32),
    )
}

/// Fill `rect` with `color`.
pub fn fill_rect<D>(target: &mut D, rect: Rect, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if color.is_transparent() {
        return Ok(());
    }
    let Some(area) = rect.intersect(&screen_rect(target)).to_rectangle() else {
        return Ok(());
    };
    area.into_styled(PrimitiveStyle::with_fill(color.into()))
        .draw(target)
}

/// Paint a border of `thickness` around the outside of `inner`.
///
/// Nothing is drawn when the visible part of `inner` is empty.
pub fn draw_border<D>(target: &mut D, inner: Rect, thickness: Thickness, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if thickness.is_zero() || color.is_transparent() {
        return Ok(());
    }
    let screen = screen_rect(target);
    let visible = inner.intersect(&screen);
    if visible.is_empty() {
        return Ok(());
    }
    let outer = Rect::new(
        inner.left - thickness.left,
        inner.top - thickness.top,
        inner.right + thickness.right,
        inner.bottom + thickness.bottom,
    )
    .intersect(&screen);

    fill_rect(target, Rect::new(outer.left, outer.top, visible.left, outer.bottom), color)?;
    fill_rect(target, Rect::new(visible.right, outer.top, outer.right, outer.bottom), color)?;
    fill_rect(target, Rect::new(outer.left, visible.bottom, outer.right, outer.bottom), color)?;
    fill_rect(target, Rect::new(outer.left, outer.top, outer.right, visible.top), color)
}

/// Paint the set bits of `mask` with its top-left corner at `origin`, only
/// where they fall inside `clip`.
pub fn draw_mask<D>(
    target: &mut D,
    mask: &GlyphMask<'_>,
    origin: Position,
    clip: Rect,
    color: Color,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if color.is_transparent() {
        return Ok(());
    }
    let clip = clip.intersect(&screen_rect(target));
    if clip.is_empty() {
        return Ok(());
    }

    let rgb: Rgb888 = color.into();
    let pixels = (0..mask.size.height).flat_map(move |y| {
        (0..mask.size.width).filter_map(move |x| {
            let at = Position::new(origin.x + x, origin.y + y);
            (mask.bit(x, y) && clip.contains(at)).then(|| Pixel(at.to_point(), rgb))
        })
    });
    target.draw_iter(pixels)
}

