// src/ui/mod.rs
//! Easel UI system - a retained element tree for framebuffer displays
//!
//! This module provides:
//! - Linear value types for geometry and color
//! - The element arena with leaf, grid, overlay and label variants
//! - Measure/arrange layout, painting and touch hit-testing
//! - Per-element event listener lists

pub mod components;
pub mod elements;
pub mod events;
pub mod geometry;
pub mod layouts;
pub mod painter;
pub mod styling;
pub mod tree;

use thiserror_no_std::Error;

// Re-export commonly used items
pub use components::{LABEL_CAPACITY, Label};
pub use elements::{Element, ElementId, ElementKind};
pub use events::{EventArgs, EventForwarder, EventKind, Events, MouseEventArgs};
pub use geometry::{Mixture, Position, Rect, Size, Thickness};
pub use layouts::{GridPanel, HorizontalAlignment, OverlayPanel, VerticalAlignment};
pub use styling::{Color, Style};
pub use tree::Ui;

/// Hit-test tolerance in layout units: a container only reports a
/// descendant as the touch target when it is at most this far away.
pub const MOUSE_TARGET_THRESHOLD: i32 = 20;

/// Error types for element tree operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// Grid slot outside the grid's tracks
    #[error("Grid slot ({row}, {col}) out of range for {rows}x{cols} grid")]
    GridSlotOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Overlay child index outside the child list
    #[error("Overlay index {index} out of range (len: {len})")]
    OverlayIndexOutOfRange { index: usize, len: usize },

    /// The handle refers to an element that was removed
    #[error("Stale element handle")]
    StaleElement,

    /// The operation needs a different element variant
    #[error("Element is a {found}, expected a {expected}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    /// Label text longer than the label capacity
    #[error("Text exceeds label capacity ({capacity} bytes)")]
    TextTooLong { capacity: usize },

    /// Inserting the child would make an element its own ancestor
    #[error("Element cannot contain itself")]
    Cycle,
}
