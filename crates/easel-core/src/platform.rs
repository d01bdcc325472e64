//! Display and touch backend contract
//!
//! The core never touches hardware directly. A [`Platform`] hands out an
//! RGBA pixel buffer, flushes it on [`present`](Platform::present), and
//! reports pointer input through two non-blocking polls.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::framebuffer::BYTES_PER_PIXEL;
use crate::ui::geometry::{Position, Size};

/// Touch/button state reported by one click poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickState {
    #[default]
    None,
    Pressed,
    Released,
}

/// Result of [`Platform::poll_click`].
///
/// Touch panels report absolute finger positions even between press and
/// release, so a sample may carry a position with no button edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickSample {
    pub state: ClickState,
    /// Absolute pointer position, when the device reported one
    pub position: Option<Position>,
}

impl ClickSample {
    /// Nothing happened since the last poll.
    pub const fn idle() -> Self {
        Self {
            state: ClickState::None,
            position: None,
        }
    }

    /// Pointer is at `(x, y)` with no press or release.
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            state: ClickState::None,
            position: Some(Position::new(x, y)),
        }
    }

    pub const fn pressed(x: i32, y: i32) -> Self {
        Self {
            state: ClickState::Pressed,
            position: Some(Position::new(x, y)),
        }
    }

    pub const fn released(x: i32, y: i32) -> Self {
        Self {
            state: ClickState::Released,
            position: Some(Position::new(x, y)),
        }
    }
}

/// A display plus pointer device.
pub trait Platform {
    /// Screen size in pixels; constant for the platform's lifetime.
    fn screen_size(&self) -> Size;

    /// Pixel memory, `width * height * 4` bytes in R, G, B, A order.
    fn pixel_buffer(&mut self) -> &mut [u8];

    /// Flush the pixel buffer to the display.
    fn present(&mut self);

    /// Latest click state and absolute pointer position. Must return
    /// immediately.
    fn poll_click(&mut self) -> ClickSample;

    /// Pointer movement since the last poll, if any. Must return immediately.
    fn poll_move(&mut self) -> Option<Position>;
}

/// In-memory platform fed from scripted input, for tests and headless runs.
pub struct HeadlessPlatform {
    size: Size,
    pixels: Vec<u8>,
    clicks: VecDeque<ClickSample>,
    moves: VecDeque<Position>,
    presented: usize,
}

impl HeadlessPlatform {
    pub fn new(size: Size) -> Self {
        let size = size.non_negative();
        Self {
            size,
            pixels: vec![0; size.width as usize * size.height as usize * BYTES_PER_PIXEL],
            clicks: VecDeque::new(),
            moves: VecDeque::new(),
            presented: 0,
        }
    }

    /// Queue one click sample; each poll consumes one.
    pub fn push_click(&mut self, sample: ClickSample) {
        self.clicks.push_back(sample);
    }

    /// Queue one relative pointer movement.
    pub fn push_move(&mut self, dx: i32, dy: i32) {
        self.moves.push_back(Position::new(dx, dy));
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The R, G, B bytes of one pixel.
    pub fn rgb_at(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

impl Platform for HeadlessPlatform {
    fn screen_size(&self) -> Size {
        self.size
    }

    fn pixel_buffer(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn poll_click(&mut self) -> ClickSample {
        self.clicks.pop_front().unwrap_or_default()
    }

    fn poll_move(&mut self) -> Option<Position> {
        self.moves.pop_front()
    }
}
