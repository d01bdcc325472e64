//! Grid container with fixed and flexible tracks
//!
//! A track extent of 0 marks the track as flexible. Space left over after the
//! fixed tracks is divided evenly (integer truncation) among the flexible
//! tracks of that axis; remainder pixels are dropped.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::ui::UiError;
use crate::ui::elements::ElementId;
use crate::ui::geometry::{Size, Thickness};

/// Track layout and child slots of a grid element.
///
/// Slots are stored row-major; each holds at most one element.
#[derive(Debug, Clone)]
pub struct GridPanel {
    rows: Vec<i32>,
    cols: Vec<i32>,
    cells: Vec<Option<ElementId>>,

    /// Flexible track extent from the last measure pass, reused by arrange
    pub(crate) measured_share: Size,
}

impl GridPanel {
    /// Create a grid from row heights and column widths (0 = flexible).
    ///
    /// Negative extents are treated as flexible.
    pub fn new(rows: &[i32], cols: &[i32]) -> Self {
        let rows: Vec<i32> = rows.iter().map(|r| (*r).max(0)).collect();
        let cols: Vec<i32> = cols.iter().map(|c| (*c).max(0)).collect();
        let cells = vec![None; rows.len() * cols.len()];
        Self {
            rows,
            cols,
            cells,
            measured_share: Size::default(),
        }
    }

    /// Number of columns (width) and rows (height).
    pub fn capacity(&self) -> Size {
        Size::new(self.cols.len() as i32, self.rows.len() as i32)
    }

    pub fn rows(&self) -> &[i32] {
        &self.rows
    }

    pub fn cols(&self) -> &[i32] {
        &self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, UiError> {
        if row >= self.rows.len() || col >= self.cols.len() {
            return Err(UiError::GridSlotOutOfRange {
                row,
                col,
                rows: self.rows.len(),
                cols: self.cols.len(),
            });
        }
        Ok(row * self.cols.len() + col)
    }

    /// Place `element` in a slot, returning the element it replaced.
    pub(crate) fn set(&mut self, row: usize, col: usize, element: ElementId) -> Result<Option<ElementId>, UiError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx].replace(element))
    }

    /// Empty a slot, returning what it held.
    pub fn reset(&mut self, row: usize, col: usize) -> Result<Option<ElementId>, UiError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx].take())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Option<ElementId>, UiError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Empty every slot holding `element`.
    pub(crate) fn forget(&mut self, element: ElementId) {
        for cell in self.cells.iter_mut().filter(|c| **c == Some(element)) {
            *cell = None;
        }
    }

    /// Occupied slots as `(row, col, element)` in row-major order.
    pub fn children(&self) -> impl Iterator<Item = (usize, usize, ElementId)> + '_ {
        let cols = self.cols.len();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|id| (i / cols, i % cols, id)))
    }

    /// Sum of the fixed tracks along each axis.
    pub fn fixed_extent(&self) -> Size {
        Size::new(self.cols.iter().sum(), self.rows.iter().sum())
    }

    /// Number of flexible columns (width) and rows (height).
    pub fn flexible_count(&self) -> Size {
        Size::new(
            self.cols.iter().filter(|c| **c == 0).count() as i32,
            self.rows.iter().filter(|r| **r == 0).count() as i32,
        )
    }

    /// Extent given to each flexible track when the grid is offered
    /// `offered` with `margin` around it.
    pub fn flexible_share(&self, offered: Size, margin: &Thickness) -> Size {
        let fixed = self.fixed_extent();
        let free = self.flexible_count();
        let remaining = Size::new(
            (offered.width - margin.horizontal() - fixed.width).max(0),
            (offered.height - margin.vertical() - fixed.height).max(0),
        );
        Size::new(
            if free.width > 0 { remaining.width / free.width } else { 0 },
            if free.height > 0 { remaining.height / free.height } else { 0 },
        )
    }

    /// Sum of all track extents given the flexible share.
    pub fn content_size(&self, share: Size) -> Size {
        self.fixed_extent() + Size::new(
            self.flexible_count().width * share.width,
            self.flexible_count().height * share.height,
        )
    }

    pub fn column_extent(&self, col: usize, share: Size) -> i32 {
        match self.cols.get(col) {
            Some(0) => share.width,
            Some(w) => *w,
            None => 0,
        }
    }

    pub fn row_extent(&self, row: usize, share: Size) -> i32 {
        match self.rows.get(row) {
            Some(0) => share.height,
            Some(h) => *h,
            None => 0,
        }
    }

    /// Offset of a track from the grid origin: sum of the extents before it.
    pub fn track_offset(&self, row: usize, col: usize, share: Size) -> Size {
        Size::new(
            (0..col).map(|c| self.column_extent(c, share)).sum(),
            (0..row).map(|r| self.row_extent(r, share)).sum(),
        )
    }
}
