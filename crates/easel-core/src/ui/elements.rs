// src/ui/elements.rs
//! Element nodes.
//!
//! Every node in the tree is an [`Element`]: the shared box model (margin,
//! requested size, computed geometry, style, alignment, enable/visibility)
//! plus an [`ElementKind`] carrying the variant-specific data. The variant
//! set is closed, so dispatch is a `match` rather than trait objects.
//!
//! Elements live in the [`Ui`](crate::ui::Ui) arena and are addressed by
//! [`ElementId`]. Containers hold child ids; children never refer back to
//! their parent.

extern crate alloc;

use alloc::vec::Vec;

use crate::animation::AnimationEntry;
use crate::ui::components::Label;
use crate::ui::events::Events;
use crate::ui::geometry::{Position, Size, Thickness};
use crate::ui::layouts::{AxisPlacement, GridPanel, HorizontalAlignment, OverlayPanel, VerticalAlignment};
use crate::ui::styling::Style;

slotmap::new_key_type! {
    /// Stable handle to an element in the [`Ui`](crate::ui::Ui) arena.
    pub struct ElementId;
}

/// Variant-specific data of an element.
pub enum ElementKind {
    /// A plain rectangle.
    Leaf,
    /// Fixed row/column tracks with one optional child per slot.
    Grid(GridPanel),
    /// Children stacked on the same box.
    Overlay(OverlayPanel),
    /// A leaf that also draws a line of text.
    Label(Label),
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Leaf => "leaf",
            ElementKind::Grid(_) => "grid",
            ElementKind::Overlay(_) => "overlay",
            ElementKind::Label(_) => "label",
        }
    }

    /// Child ids in paint order (row-major for grids).
    pub(crate) fn children(&self) -> Vec<ElementId> {
        match self {
            ElementKind::Grid(grid) => grid.children().map(|(_, _, id)| id).collect(),
            ElementKind::Overlay(overlay) => overlay.children().collect(),
            ElementKind::Leaf | ElementKind::Label(_) => Vec::new(),
        }
    }
}

/// A node of the UI tree.
pub struct Element {
    /// Space kept free around the element inside the box its parent offers
    pub margin: Thickness,

    /// Requested size; an extent of 0 fills the offered space
    pub requested_size: Size,

    /// Painting is skipped when false; hit-testing still considers the element
    pub visible: bool,

    /// Event dispatch is suppressed and hit-testing ignores the subtree when false
    pub enable: bool,

    pub style: Style,
    pub vertical_alignment: VerticalAlignment,
    pub horizontal_alignment: HorizontalAlignment,

    /// Event listeners, one list per event kind
    pub events: Events,

    pub(crate) actual_size: Size,
    pub(crate) actual_pos: Position,
    pub(crate) kind: ElementKind,
    pub(crate) animations: Vec<AnimationEntry>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            margin: Thickness::default(),
            requested_size: Size::default(),
            visible: true,
            enable: true,
            style: Style::default(),
            vertical_alignment: VerticalAlignment::default(),
            horizontal_alignment: HorizontalAlignment::default(),
            events: Events::default(),
            actual_size: Size::default(),
            actual_pos: Position::default(),
            kind,
            animations: Vec::new(),
        }
    }

    /// Size computed by the last measure pass.
    pub fn actual_size(&self) -> Size {
        self.actual_size
    }

    /// Top-left corner computed by the last arrange pass.
    pub fn actual_pos(&self) -> Position {
        self.actual_pos
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn as_label(&self) -> Option<&Label> {
        match &self.kind {
            ElementKind::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut Label> {
        match &mut self.kind {
            ElementKind::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Clamp `desired` into the space `offered` minus margins. A desired
    /// extent of 0 takes all of that space.
    pub(crate) fn fit(&self, desired: Size, offered: Size) -> Size {
        let room = Size::new(
            (offered.width - self.margin.horizontal()).max(0),
            (offered.height - self.margin.vertical()).max(0),
        );
        Size::new(
            if desired.width == 0 { room.width } else { desired.width.clamp(0, room.width) },
            if desired.height == 0 { room.height } else { desired.height.clamp(0, room.height) },
        )
    }

    /// Place the element inside the box `base`/`offered` by its alignment.
    pub(crate) fn place(&mut self, base: Position, offered: Size) {
        let h: AxisPlacement = self.horizontal_alignment.into();
        let v: AxisPlacement = self.vertical_alignment.into();
        self.actual_pos = Position::new(
            h.place(base.x, offered.width, self.margin.left, self.margin.right, self.actual_size.width),
            v.place(base.y, offered.height, self.margin.top, self.margin.bottom, self.actual_size.height),
        );
    }

    /// Pseudo-distance from `pos` to this element's box: 0 inside, growing
    /// with the per-axis distance outside.
    pub(crate) fn box_distance(&self, pos: Position) -> i32 {
        fn axis(p: i32, start: i32, extent: i32) -> i32 {
            ((p - start).abs() + (p - start - extent).abs() - extent).abs() / 2
        }
        axis(pos.x, self.actual_pos.x, self.actual_size.width)
            .saturating_add(axis(pos.y, self.actual_pos.y, self.actual_size.height))
    }
}
