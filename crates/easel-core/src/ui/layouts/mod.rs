//! Layout containers and alignment
//!
//! - [`grid`] - fixed row/column tracks, each fixed-size or flexible
//! - [`overlay`] - children stacked on the same box, painted in insertion order

pub mod grid;
pub mod overlay;

pub use grid::GridPanel;
pub use overlay::OverlayPanel;

use serde::{Deserialize, Serialize};

/// Horizontal placement of an element inside the box offered by its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of an element inside the box offered by its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Start/center/end placement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AxisPlacement {
    Start,
    Center,
    End,
}

impl AxisPlacement {
    /// Offset of an `extent`-long span inside `[base, base + offered)` after
    /// removing `lead` and `trail` margins.
    pub(crate) fn place(self, base: i32, offered: i32, lead: i32, trail: i32, extent: i32) -> i32 {
        match self {
            AxisPlacement::Start => base + lead,
            AxisPlacement::End => base + offered - trail - extent,
            AxisPlacement::Center => base + (offered - lead - trail - extent) / 2 + lead,
        }
    }
}

impl From<HorizontalAlignment> for AxisPlacement {
    fn from(value: HorizontalAlignment) -> Self {
        match value {
            HorizontalAlignment::Left => AxisPlacement::Start,
            HorizontalAlignment::Center => AxisPlacement::Center,
            HorizontalAlignment::Right => AxisPlacement::End,
        }
    }
}

impl From<VerticalAlignment> for AxisPlacement {
    fn from(value: VerticalAlignment) -> Self {
        match value {
            VerticalAlignment::Top => AxisPlacement::Start,
            VerticalAlignment::Center => AxisPlacement::Center,
            VerticalAlignment::Bottom => AxisPlacement::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_placement() {
        // 100 wide box at x=10 with margins 5/15, 30 wide content
        assert_eq!(AxisPlacement::Start.place(10, 100, 5, 15, 30), 15);
        assert_eq!(AxisPlacement::End.place(10, 100, 5, 15, 30), 65);
        assert_eq!(AxisPlacement::Center.place(10, 100, 5, 15, 30), 40);
    }
}
