//! Linear value types used by layout and animation
//!
//! Every type here is a plain value with componentwise `+`, `-` and scaling
//! by a factor, plus [`Mixture`] which is what the animation engine uses to
//! interpolate between two values.
//!
//! Layout units are signed so intermediate results (e.g. space left after
//! margins) can go negative before being clamped.

use embedded_graphics::prelude::{Point, Size as EgSize};
use embedded_graphics::primitives::Rectangle;

/// Linear blend of two values.
pub trait Mixture: Copy + PartialEq {
    /// Returns `ratio * first + (1 - ratio) * second`, componentwise.
    fn mixture(ratio: f32, first: &Self, second: &Self) -> Self;
}

/// Implements the componentwise operators and [`Mixture`] for a struct whose
/// fields all share one integer component type.
macro_rules! impl_linear {
    ($ty:ident, $comp:ty, $($field:ident),+) => {
        impl ::core::ops::Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field.wrapping_add(rhs.$field)),+ }
            }
        }

        impl ::core::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                *self = *self + rhs;
            }
        }

        impl ::core::ops::Sub for $ty {
            type Output = $ty;

            fn sub(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field.wrapping_sub(rhs.$field)),+ }
            }
        }

        impl ::core::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                *self = *self - rhs;
            }
        }

        impl ::core::ops::Mul<f32> for $ty {
            type Output = $ty;

            fn mul(self, k: f32) -> $ty {
                $ty { $($field: (self.$field as f32 * k) as $comp),+ }
            }
        }

        impl ::core::ops::MulAssign<f32> for $ty {
            fn mul_assign(&mut self, k: f32) {
                *self = *self * k;
            }
        }

        impl $crate::ui::geometry::Mixture for $ty {
            fn mixture(ratio: f32, first: &$ty, second: &$ty) -> $ty {
                let rest = 1.0 - ratio;
                $ty {
                    $($field: (ratio * first.$field as f32 + rest * second.$field as f32) as $comp),+
                }
            }
        }
    };
}

pub(crate) use impl_linear;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl_linear!(Position, i32, x, y);

/// A width/height pair. A requested extent of 0 means "fill what is offered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both extents clamped to be non-negative.
    pub fn non_negative(self) -> Self {
        Self {
            width: self.width.max(0),
            height: self.height.max(0),
        }
    }
}

impl_linear!(Size, i32, width, height);

/// Per-side extents, used for margins and border thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thickness {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Thickness {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }
}

impl_linear!(Thickness, i32, left, top, right, bottom);

/// An edge-based rectangle. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle covering `size` starting at `origin`.
    pub fn from_origin_size(origin: Position, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    /// Clip to the screen area `[0, size)`.
    pub fn clip_to(&self, size: Size) -> Self {
        Self {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.min(size.width),
            bottom: self.bottom.min(size.height),
        }
    }

    /// Intersection of two rectangles (may be empty).
    pub fn intersect(&self, other: &Rect) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left && pos.x < self.right && pos.y >= self.top && pos.y < self.bottom
    }

    /// Convert to an embedded-graphics rectangle, `None` when empty.
    pub fn to_rectangle(&self) -> Option<Rectangle> {
        if self.is_empty() {
            return None;
        }
        Some(Rectangle::new(
            Point::new(self.left, self.top),
            EgSize::new(
                (self.right - self.left) as u32,
                (self.bottom - self.top) as u32,
            ),
        ))
    }
}

impl_linear!(Rect, i32, left, top, right, bottom);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_componentwise_arithmetic() {
        let a = Position::new(3, -4);
        let b = Position::new(10, 10);
        assert_eq!(a + b, Position::new(13, 6));
        assert_eq!(b - a, Position::new(7, 14));
        assert_eq!(b * 0.5, Position::new(5, 5));

        let mut t = Thickness::uniform(4);
        t += Thickness::new(1, 2, 3, 4);
        assert_eq!(t, Thickness::new(5, 6, 7, 8));
        assert_eq!(t.horizontal(), 12);
        assert_eq!(t.vertical(), 14);
    }

    #[test]
    fn test_mixture_endpoints_are_exact() {
        let from = Size::new(17, 250);
        let to = Size::new(-90, 3);
        assert_eq!(Size::mixture(0.0, &to, &from), from);
        assert_eq!(Size::mixture(1.0, &to, &from), to);
        assert_eq!(Size::mixture(0.5, &Size::new(100, 0), &Size::new(0, 40)), Size::new(50, 20));
    }

    #[test]
    fn test_rect_clip_and_intersection() {
        let r = Rect::from_origin_size(Position::new(-5, 10), Size::new(20, 100));
        assert_eq!(r, Rect::new(-5, 10, 15, 110));

        let clipped = r.clip_to(Size::new(800, 48));
        assert_eq!(clipped, Rect::new(0, 10, 15, 48));

        let none = r.intersect(&Rect::new(20, 0, 30, 10));
        assert!(none.is_empty());
        assert!(none.to_rectangle().is_none());

        let some = clipped.to_rectangle().unwrap();
        assert_eq!(some.top_left, Point::new(0, 10));
        assert_eq!(some.size, EgSize::new(15, 38));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Position::new(0, 0)));
        assert!(r.contains(Position::new(9, 9)));
        assert!(!r.contains(Position::new(10, 5)));
    }
}
