//! Overlay container: children share the overlay's box
//!
//! Children are painted in insertion order, so later children cover earlier
//! ones.

extern crate alloc;

use alloc::vec::Vec;

use crate::ui::UiError;
use crate::ui::elements::ElementId;

/// Ordered child list of an overlay element.
#[derive(Debug, Clone, Default)]
pub struct OverlayPanel {
    children: Vec<ElementId>,
}

impl OverlayPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top of the existing children.
    pub(crate) fn add(&mut self, element: ElementId) {
        self.children.push(element);
    }

    /// Insert at `index` in paint order (0 = bottom-most).
    pub(crate) fn add_at(&mut self, element: ElementId, index: usize) -> Result<(), UiError> {
        if index > self.children.len() {
            return Err(UiError::OverlayIndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, element);
        Ok(())
    }

    /// Remove every occurrence of `element`. Returns whether any was removed.
    pub fn remove(&mut self, element: ElementId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != element);
        before != self.children.len()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<ElementId, UiError> {
        if index >= self.children.len() {
            return Err(UiError::OverlayIndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        Ok(self.children.remove(index))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children bottom to top.
    pub fn children(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.children.iter().copied()
    }
}
