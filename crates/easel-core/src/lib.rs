//! Hardware-independent core of the easel UI toolkit
//!
//! A retained element tree for small touchscreen framebuffers: measure and
//! arrange layout, nearest-target touch hit-testing, per-element event
//! listeners, and property animations stepped by a cooperative timer
//! scheduler. The display and touch device are reached only through the
//! [`platform::Platform`] trait.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod main_loop;
pub mod platform;
pub mod timer;
pub mod ui;
