// src/ui/tree.rs
//! The element arena and the layout/paint/hit-test passes
//!
//! [`Ui`] owns every element, the timer scheduler and the dirty flag. The
//! tree is one-directional: containers hold child ids and nothing points
//! back up, so every pass is a depth-first walk from the node it is given.
//!
//! - **measure** computes sizes top-down from the space each parent offers
//! - **arrange** computes positions inside the box each parent offers
//! - **render** paints background, border, label text, then children
//! - **mouse_target** finds the nearest enabled element to a touch point

extern crate alloc;

use alloc::vec::Vec;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use log::{debug, warn};
use slotmap::SlotMap;

use crate::config::RuntimeConfig;
use crate::font::GlyphSource;
use crate::timer::{Scheduler, TimerHandle, TimerTask};
use crate::ui::UiError;
use crate::ui::components::Label;
use crate::ui::elements::{Element, ElementId, ElementKind};
use crate::ui::events::{EventArgs, EventForwarder, EventKind, Events, MouseEventArgs};
use crate::ui::geometry::{Position, Rect, Size};
use crate::ui::layouts::{AxisPlacement, GridPanel, OverlayPanel};
use crate::ui::painter;

/// Element arena plus the scheduling context shared by handlers and
/// animations.
///
/// # Examples
/// ```ignore
/// let mut ui = Ui::new();
/// let grid = ui.create_grid(&[100, 0], &[0]);
/// let header = ui.create_label("Title")?;
/// ui.set_child(grid, 0, 0, header)?;
/// ui.set_root(grid);
/// ui.layout(Size::new(320, 240));
/// ```
pub struct Ui {
    elements: SlotMap<ElementId, Element>,
    scheduler: Scheduler<Ui>,
    root: Option<ElementId>,
    now: Instant,
    invalidated: bool,
    frame_due: bool,
    config: RuntimeConfig,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            elements: SlotMap::with_key(),
            scheduler: Scheduler::new(),
            root: None,
            now: Instant::from_ticks(0),
            invalidated: true,
            frame_due: false,
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    // ========================================================================
    // Element creation and access
    // ========================================================================

    fn insert(&mut self, kind: ElementKind) -> ElementId {
        self.elements.insert(Element::new(kind))
    }

    /// A plain rectangle element.
    pub fn create_element(&mut self) -> ElementId {
        self.insert(ElementKind::Leaf)
    }

    /// A grid with the given row heights and column widths (0 = flexible).
    pub fn create_grid(&mut self, rows: &[i32], cols: &[i32]) -> ElementId {
        self.insert(ElementKind::Grid(GridPanel::new(rows, cols)))
    }

    pub fn create_overlay(&mut self) -> ElementId {
        self.insert(ElementKind::Overlay(OverlayPanel::new()))
    }

    pub fn create_label(&mut self, text: &str) -> Result<ElementId, UiError> {
        let label = Label::new(text)?;
        Ok(self.insert(ElementKind::Label(label)))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn kind_mut(&mut self, id: ElementId) -> Result<&mut ElementKind, UiError> {
        self.elements
            .get_mut(id)
            .map(|e| &mut e.kind)
            .ok_or(UiError::StaleElement)
    }

    pub fn grid(&self, id: ElementId) -> Result<&GridPanel, UiError> {
        match &self.elements.get(id).ok_or(UiError::StaleElement)?.kind {
            ElementKind::Grid(grid) => Ok(grid),
            other => Err(UiError::WrongKind {
                expected: "grid",
                found: other.name(),
            }),
        }
    }

    /// Grid slots can be emptied through the returned panel; use
    /// [`set_child`](Self::set_child) to fill them.
    pub fn grid_mut(&mut self, id: ElementId) -> Result<&mut GridPanel, UiError> {
        match self.kind_mut(id)? {
            ElementKind::Grid(grid) => Ok(grid),
            other => Err(UiError::WrongKind {
                expected: "grid",
                found: other.name(),
            }),
        }
    }

    pub fn overlay(&self, id: ElementId) -> Result<&OverlayPanel, UiError> {
        match &self.elements.get(id).ok_or(UiError::StaleElement)?.kind {
            ElementKind::Overlay(overlay) => Ok(overlay),
            other => Err(UiError::WrongKind {
                expected: "overlay",
                found: other.name(),
            }),
        }
    }

    /// Children can be removed through the returned panel; use
    /// [`add_child`](Self::add_child) or [`insert_child`](Self::insert_child)
    /// to add them.
    pub fn overlay_mut(&mut self, id: ElementId) -> Result<&mut OverlayPanel, UiError> {
        match self.kind_mut(id)? {
            ElementKind::Overlay(overlay) => Ok(overlay),
            other => Err(UiError::WrongKind {
                expected: "overlay",
                found: other.name(),
            }),
        }
    }

    pub fn label_mut(&mut self, id: ElementId) -> Result<&mut Label, UiError> {
        match self.kind_mut(id)? {
            ElementKind::Label(label) => Ok(label),
            other => Err(UiError::WrongKind {
                expected: "label",
                found: other.name(),
            }),
        }
    }

    // ========================================================================
    // Tree structure
    // ========================================================================

    /// Whether `needle` is `from` or one of its descendants.
    fn reaches(&self, from: ElementId, needle: ElementId) -> bool {
        let mut stack = alloc::vec![from];
        while let Some(id) = stack.pop() {
            if id == needle {
                return true;
            }
            if let Some(element) = self.elements.get(id) {
                stack.extend(element.kind.children());
            }
        }
        false
    }

    fn check_child(&self, parent: ElementId, child: ElementId) -> Result<(), UiError> {
        if !self.elements.contains_key(child) {
            return Err(UiError::StaleElement);
        }
        if self.reaches(child, parent) {
            return Err(UiError::Cycle);
        }
        Ok(())
    }

    /// Put `child` in a grid slot. Returns the element previously there.
    pub fn set_child(
        &mut self,
        grid: ElementId,
        row: usize,
        col: usize,
        child: ElementId,
    ) -> Result<Option<ElementId>, UiError> {
        self.grid(grid)?;
        self.check_child(grid, child)?;
        self.grid_mut(grid)?.set(row, col, child)
    }

    /// Append `child` on top of an overlay's children.
    pub fn add_child(&mut self, overlay: ElementId, child: ElementId) -> Result<(), UiError> {
        self.overlay(overlay)?;
        self.check_child(overlay, child)?;
        self.overlay_mut(overlay)?.add(child);
        Ok(())
    }

    /// Insert `child` at `index` in an overlay's paint order.
    pub fn insert_child(&mut self, overlay: ElementId, index: usize, child: ElementId) -> Result<(), UiError> {
        self.overlay(overlay)?;
        self.check_child(overlay, child)?;
        self.overlay_mut(overlay)?.add_at(child, index)
    }

    pub fn set_root(&mut self, root: ElementId) {
        self.root = Some(root);
        self.invalidate();
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root.filter(|id| self.elements.contains_key(*id))
    }

    /// Drop `id` and its whole subtree, stopping their animations and
    /// detaching `id` from any container that holds it.
    pub fn remove(&mut self, id: ElementId) {
        let mut stack = alloc::vec![id];
        let mut removed = 0usize;
        while let Some(next) = stack.pop() {
            let Some(element) = self.elements.remove(next) else {
                continue;
            };
            for entry in &element.animations {
                entry.handle.stop();
            }
            stack.extend(element.kind.children());
            removed += 1;
        }

        for (_, element) in self.elements.iter_mut() {
            match &mut element.kind {
                ElementKind::Grid(grid) => grid.forget(id),
                ElementKind::Overlay(overlay) => {
                    overlay.remove(id);
                }
                ElementKind::Leaf | ElementKind::Label(_) => {}
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        debug!("Removed {} elements", removed);
        self.invalidate();
    }

    // ========================================================================
    // Frame and clock state
    // ========================================================================

    /// Request a repaint on the next due frame.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn mark_clean(&mut self) {
        self.invalidated = false;
    }

    pub(crate) fn request_frame(&mut self) {
        self.frame_due = true;
    }

    /// Consume the pending frame request.
    pub(crate) fn take_frame_request(&mut self) -> bool {
        core::mem::take(&mut self.frame_due)
    }

    /// Time of the last [`sync`](Self::sync).
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Move the clock forward; earlier instants are ignored.
    pub fn advance_clock(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    pub(crate) fn schedule(&mut self, task: TimerTask<Ui>) {
        self.scheduler.push(task);
    }

    /// Run `f` once after `delay_ms`.
    pub fn delay_invoke<F>(&mut self, delay_ms: u64, f: F) -> TimerHandle
    where
        F: FnMut(&mut Ui) + 'static,
    {
        self.scheduler.delay_invoke(self.now, delay_ms, f)
    }

    /// Run `f` now and then every `interval_ms`, `count` times (0 = until
    /// stopped).
    pub fn recurrent_invoke<F>(&mut self, interval_ms: u64, count: u32, f: F) -> TimerHandle
    where
        F: FnMut(&mut Ui) + 'static,
    {
        self.scheduler.recurrent_invoke(self.now, interval_ms, count, f)
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Advance the clock to `now` and run every due timer task.
    pub fn sync(&mut self, now: Instant) {
        self.advance_clock(now);
        let now = self.now;
        while let Some(mut task) = self.scheduler.pop_due(now) {
            if !task.execute(now, self) {
                self.scheduler.requeue(task);
            }
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Measure and arrange the root against the whole screen.
    pub fn layout(&mut self, screen: Size) {
        if let Some(root) = self.root() {
            self.measure(root, screen);
            self.arrange(root, Position::default(), screen);
        }
    }

    /// Compute `id`'s size (and its descendants') from the space `offered`.
    pub fn measure(&mut self, id: ElementId, offered: Size) {
        let Some(element) = self.elements.get_mut(id) else {
            warn!("Measure of a removed element {:?}", id);
            return;
        };

        let mut offers: Vec<(ElementId, Size)> = Vec::new();
        let mut share = Size::default();
        let size = match &element.kind {
            ElementKind::Leaf | ElementKind::Overlay(_) => element.fit(element.requested_size, offered),
            ElementKind::Label(label) => element.fit(label.intrinsic_size(element.requested_size), offered),
            ElementKind::Grid(grid) => {
                let margin = element.margin;
                let room = Size::new(
                    (offered.width - margin.horizontal()).max(0),
                    (offered.height - margin.vertical()).max(0),
                );
                share = grid.flexible_share(offered, &margin);
                for (row, col, child) in grid.children() {
                    offers.push((child, Size::new(grid.column_extent(col, share), grid.row_extent(row, share))));
                }
                let content = grid.content_size(share);
                Size::new(content.width.min(room.width), content.height.min(room.height))
            }
        };
        element.actual_size = size;

        match &mut element.kind {
            ElementKind::Grid(grid) => grid.measured_share = share,
            ElementKind::Overlay(overlay) => offers.extend(overlay.children().map(|child| (child, size))),
            ElementKind::Leaf | ElementKind::Label(_) => {}
        }

        for (child, child_offer) in offers {
            self.measure(child, child_offer);
        }
    }

    /// Position `id` inside the box `origin`/`offered`, then its children.
    pub fn arrange(&mut self, id: ElementId, origin: Position, offered: Size) {
        let Some(element) = self.elements.get_mut(id) else {
            warn!("Arrange of a removed element {:?}", id);
            return;
        };
        element.place(origin, offered);

        let pos = element.actual_pos;
        let size = element.actual_size;
        let boxes: Vec<(ElementId, Position, Size)> = match &element.kind {
            ElementKind::Grid(grid) => {
                let share = grid.measured_share;
                grid.children()
                    .map(|(row, col, child)| {
                        let offset = grid.track_offset(row, col, share);
                        (
                            child,
                            Position::new(pos.x + offset.width, pos.y + offset.height),
                            Size::new(grid.column_extent(col, share), grid.row_extent(row, share)),
                        )
                    })
                    .collect()
            }
            ElementKind::Overlay(overlay) => overlay.children().map(|child| (child, pos, size)).collect(),
            ElementKind::Leaf | ElementKind::Label(_) => Vec::new(),
        };

        for (child, child_origin, child_size) in boxes {
            self.arrange(child, child_origin, child_size);
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Paint `id` and its visible descendants.
    pub fn render<D, G>(&self, id: ElementId, target: &mut D, glyphs: &G) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        G: GlyphSource + ?Sized,
    {
        let Some(element) = self.elements.get(id) else {
            return Ok(());
        };
        if !element.visible {
            return Ok(());
        }

        let bounds = Rect::from_origin_size(element.actual_pos, element.actual_size);
        painter::fill_rect(target, bounds, element.style.background)?;
        if element.style.has_border() {
            painter::draw_border(
                target,
                bounds,
                element.style.border_thickness,
                element.style.border_color,
            )?;
        }

        match &element.kind {
            ElementKind::Label(label) => Self::render_text(label, bounds, target, glyphs)?,
            kind => {
                for child in kind.children() {
                    self.render(child, target, glyphs)?;
                }
            }
        }
        Ok(())
    }

    fn render_text<D, G>(label: &Label, bounds: Rect, target: &mut D, glyphs: &G) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        G: GlyphSource + ?Sized,
    {
        let extent = label.text_extent();
        let h: AxisPlacement = label.font_horizontal_alignment.into();
        let v: AxisPlacement = label.font_vertical_alignment.into();
        let x = h.place(bounds.left, bounds.right - bounds.left, 0, 0, extent.width);
        let y = v.place(bounds.top, bounds.bottom - bounds.top, 0, 0, extent.height);

        let advance = label.font_size.cell_width();
        for (i, ch) in label.text().chars().enumerate() {
            if let Some(mask) = glyphs.glyph_mask(label.font_size, ch) {
                let origin = Position::new(x + i as i32 * advance, y);
                painter::draw_mask(target, &mask, origin, bounds, label.font_color)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Hit testing
    // ========================================================================

    /// Nearest enabled element to `pos` within `id`'s subtree.
    ///
    /// Returns the matched descendant (`None` meaning `id` itself) and its
    /// pseudo-distance. Disabled or missing elements report `i32::MAX`.
    pub fn mouse_target(&self, id: ElementId, pos: Position) -> (Option<ElementId>, i32) {
        let Some(element) = self.elements.get(id) else {
            return (None, i32::MAX);
        };
        if !element.enable {
            return (None, i32::MAX);
        }

        let mut best: Option<(ElementId, i32)> = None;
        for child in element.kind.children() {
            if !self.elements.contains_key(child) {
                continue;
            }
            let (hit, distance) = self.mouse_target(child, pos);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((hit.unwrap_or(child), distance));
            }
        }

        match best {
            Some((hit, distance)) if distance <= self.config.mouse_target_threshold => (Some(hit), distance),
            _ => (None, element.box_distance(pos)),
        }
    }

    /// The element a touch at `pos` should go to, falling back to the root.
    /// `None` when nothing is within the threshold.
    pub fn resolve_target(&self, pos: Position) -> Option<ElementId> {
        let root = self.root()?;
        let (hit, distance) = self.mouse_target(root, pos);
        debug!("Hit test at ({}, {}): {:?} at {}", pos.x, pos.y, hit, distance);
        if distance <= self.config.mouse_target_threshold {
            Some(hit.unwrap_or(root))
        } else {
            None
        }
    }

    // ========================================================================
    // Event dispatch
    // ========================================================================

    fn dispatch<A>(&mut self, target: ElementId, select: fn(&mut Events) -> &mut EventForwarder<A>, args: &A) {
        let Some(element) = self.elements.get_mut(target) else {
            return;
        };
        if !element.enable {
            return;
        }

        let mut handlers = select(&mut element.events).take();
        for handler in handlers.iter_mut() {
            handler(self, target, args);
        }
        if let Some(element) = self.elements.get_mut(target) {
            select(&mut element.events).restore(handlers);
        }
    }

    pub fn raise_enter_frame(&mut self, target: ElementId) {
        let args = EventArgs {
            kind: EventKind::EnterFrame,
        };
        self.dispatch(target, Events::enter_frame_mut, &args);
    }

    pub fn raise_click(&mut self, target: ElementId, position: Position) {
        let args = MouseEventArgs {
            kind: EventKind::Click,
            position,
            offset: Position::default(),
        };
        self.dispatch(target, Events::click_mut, &args);
    }

    pub fn raise_drag(&mut self, target: ElementId, position: Position, offset: Position) {
        let args = MouseEventArgs {
            kind: EventKind::Drag,
            position,
            offset,
        };
        self.dispatch(target, Events::drag_mut, &args);
    }

    pub fn raise_start_any_animation(&mut self, target: ElementId) {
        let args = EventArgs {
            kind: EventKind::StartAnyAnimation,
        };
        self.dispatch(target, Events::start_any_animation_mut, &args);
    }

    pub fn raise_finish_all_animation(&mut self, target: ElementId) {
        let args = EventArgs {
            kind: EventKind::FinishAllAnimation,
        };
        self.dispatch(target, Events::finish_all_animation_mut, &args);
    }

    /// Drop every listener of every kind on `id`.
    pub fn clear_all_listeners(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(id) {
            element.events.clear_all_listeners();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use crate::font::{FontSize, MonoGlyphs};
    use crate::framebuffer::Canvas;
    use crate::ui::geometry::Thickness;
    use crate::ui::layouts::{HorizontalAlignment, VerticalAlignment};
    use crate::ui::styling::{BLACK, BLUE, Color, RED, Style, WHITE};

    #[test]
    fn test_leaf_with_margin_fills_offered_space() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        ui.element_mut(leaf).unwrap().margin = Thickness::uniform(10);

        ui.measure(leaf, Size::new(100, 50));
        assert_eq!(ui.element(leaf).unwrap().actual_size(), Size::new(80, 30));
    }

    #[test]
    fn test_measure_never_exceeds_offered_minus_margin() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        let label = ui.create_label("a long label that is wide").unwrap();

        for (margin, requested, offered) in [
            (Thickness::uniform(0), Size::new(500, 500), Size::new(100, 50)),
            (Thickness::new(30, 0, 30, 0), Size::new(0, 10), Size::new(40, 50)),
            (Thickness::uniform(3), Size::new(7, 0), Size::new(8, 2)),
        ] {
            for id in [leaf, label] {
                let element = ui.element_mut(id).unwrap();
                element.margin = margin;
                element.requested_size = requested;
                ui.measure(id, offered);

                let actual = ui.element(id).unwrap().actual_size();
                assert!(actual.width <= (offered.width - margin.horizontal()).max(0));
                assert!(actual.height <= (offered.height - margin.vertical()).max(0));
                assert!(actual.width >= 0 && actual.height >= 0);
            }
        }
    }

    #[test]
    fn test_label_uses_text_extent() {
        let mut ui = Ui::new();
        let label = ui.create_label("abc").unwrap();
        ui.measure(label, Size::new(300, 300));
        // Median cell: 14 x 28
        assert_eq!(ui.element(label).unwrap().actual_size(), Size::new(42, 28));
    }

    #[test]
    fn test_grid_flexible_row_takes_leftover() {
        let mut ui = Ui::new();
        let grid = ui.create_grid(&[100, 0], &[0]);
        let top = ui.create_element();
        let bottom = ui.create_element();
        ui.set_child(grid, 0, 0, top).unwrap();
        ui.set_child(grid, 1, 0, bottom).unwrap();
        ui.set_root(grid);

        ui.layout(Size::new(50, 300));
        assert_eq!(ui.element(grid).unwrap().actual_size(), Size::new(50, 300));
        assert_eq!(ui.element(top).unwrap().actual_size(), Size::new(50, 100));
        assert_eq!(ui.element(bottom).unwrap().actual_size(), Size::new(50, 200));
        assert_eq!(ui.element(bottom).unwrap().actual_pos(), Position::new(0, 100));
    }

    #[test]
    fn test_grid_tracks_sum_to_grid_size() {
        let mut ui = Ui::new();
        let grid = ui.create_grid(&[0, 40, 0], &[0, 200, 0]);
        ui.element_mut(grid).unwrap().margin = Thickness::uniform(5);

        for screen in [Size::new(800, 480), Size::new(333, 101), Size::new(210, 50)] {
            ui.measure(grid, screen);
            let g = ui.grid(grid).unwrap();
            let share = g.measured_share;
            let cols: i32 = (0..3).map(|c| g.column_extent(c, share)).sum();
            let rows: i32 = (0..3).map(|r| g.row_extent(r, share)).sum();
            assert_eq!(ui.element(grid).unwrap().actual_size(), Size::new(cols, rows));
        }
    }

    #[test]
    fn test_grid_places_children_at_track_offsets() {
        let mut ui = Ui::new();
        let grid = ui.create_grid(&[100, 0, 0], &[0, 200, 0]);
        ui.element_mut(grid).unwrap().margin = Thickness::uniform(5);
        let cell = ui.create_element();
        ui.element_mut(cell).unwrap().requested_size = Size::new(50, 50);
        ui.set_child(grid, 2, 2, cell).unwrap();
        ui.set_root(grid);

        ui.layout(Size::new(800, 480));
        // share = (295, 185); offset = (295 + 200, 100 + 185) from (5, 5)
        let e = ui.element(cell).unwrap();
        assert_eq!(e.actual_pos(), Position::new(500, 290));
        assert_eq!(e.actual_size(), Size::new(50, 50));
    }

    #[test]
    fn test_overlay_children_share_its_box() {
        let mut ui = Ui::new();
        let overlay = ui.create_overlay();
        ui.element_mut(overlay).unwrap().margin = Thickness::uniform(10);
        let a = ui.create_element();
        let b = ui.create_element();
        {
            let e = ui.element_mut(b).unwrap();
            e.requested_size = Size::new(20, 20);
            e.horizontal_alignment = HorizontalAlignment::Right;
            e.vertical_alignment = VerticalAlignment::Bottom;
        }
        ui.add_child(overlay, a).unwrap();
        ui.add_child(overlay, b).unwrap();
        ui.set_root(overlay);

        ui.layout(Size::new(100, 60));
        assert_eq!(ui.element(a).unwrap().actual_pos(), Position::new(10, 10));
        assert_eq!(ui.element(a).unwrap().actual_size(), Size::new(80, 40));
        assert_eq!(ui.element(b).unwrap().actual_pos(), Position::new(70, 30));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut ui = Ui::new();
        let outer = ui.create_overlay();
        let inner = ui.create_grid(&[0], &[0]);
        ui.add_child(outer, inner).unwrap();

        assert_eq!(ui.set_child(inner, 0, 0, outer), Err(UiError::Cycle));
        assert_eq!(ui.add_child(outer, outer), Err(UiError::Cycle));
        assert!(matches!(
            ui.add_child(inner, outer),
            Err(UiError::WrongKind { expected: "overlay", found: "grid" })
        ));
        let leaf = ui.create_element();
        assert!(matches!(
            ui.set_child(inner, 3, 0, leaf),
            Err(UiError::GridSlotOutOfRange { row: 3, .. })
        ));
    }

    #[test]
    fn test_remove_detaches_and_drops_subtree() {
        let mut ui = Ui::new();
        let root = ui.create_overlay();
        let grid = ui.create_grid(&[0], &[0]);
        let leaf = ui.create_element();
        ui.set_child(grid, 0, 0, leaf).unwrap();
        ui.add_child(root, grid).unwrap();
        ui.set_root(root);

        ui.remove(grid);
        assert!(!ui.contains(grid));
        assert!(!ui.contains(leaf));
        assert!(ui.overlay(root).unwrap().is_empty());
        assert_eq!(ui.len(), 1);

        // stale handles are reported, not panicked on
        assert_eq!(ui.add_child(root, leaf), Err(UiError::StaleElement));
        ui.layout(Size::new(10, 10));
    }

    #[test]
    fn test_point_inside_leaf_has_zero_distance() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        ui.element_mut(leaf).unwrap().requested_size = Size::new(30, 20);
        ui.set_root(leaf);
        ui.layout(Size::new(100, 100));

        assert_eq!(ui.mouse_target(leaf, Position::new(15, 10)), (None, 0));
        assert_eq!(ui.mouse_target(leaf, Position::new(40, 10)), (None, 10));
        assert_eq!(ui.resolve_target(Position::new(29, 19)), Some(leaf));
    }

    #[test]
    fn test_hit_test_prefers_nearest_child_within_threshold() {
        let mut ui = Ui::new();
        let grid = ui.create_grid(&[50], &[50, 50, 50]);
        let left = ui.create_element();
        let right = ui.create_element();
        ui.set_child(grid, 0, 0, left).unwrap();
        ui.set_child(grid, 0, 2, right).unwrap();
        ui.set_root(grid);
        ui.layout(Size::new(150, 50));

        assert_eq!(ui.resolve_target(Position::new(10, 10)), Some(left));
        assert_eq!(ui.resolve_target(Position::new(110, 10)), Some(right));
        // 5 px right of `left` is still close enough
        assert_eq!(ui.resolve_target(Position::new(55, 10)), Some(left));
        // middle column is empty: 25 px from both, falls back to the grid
        assert_eq!(ui.resolve_target(Position::new(75, 10)), Some(grid));
        // well outside everything
        assert_eq!(ui.resolve_target(Position::new(400, 400)), None);
    }

    #[test]
    fn test_disabled_subtree_is_not_hit() {
        let mut ui = Ui::new();
        let overlay = ui.create_overlay();
        let button = ui.create_element();
        ui.add_child(overlay, button).unwrap();
        ui.set_root(overlay);
        ui.layout(Size::new(100, 100));

        assert_eq!(ui.resolve_target(Position::new(5, 5)), Some(button));
        ui.element_mut(button).unwrap().enable = false;
        assert_eq!(ui.resolve_target(Position::new(5, 5)), Some(overlay));
    }

    #[test]
    fn test_disabled_element_suppresses_click() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        let clicks = Rc::new(Cell::new(0));
        {
            let clicks = clicks.clone();
            ui.element_mut(leaf)
                .unwrap()
                .events
                .click
                .add(move |_, _, _| clicks.set(clicks.get() + 1));
        }
        ui.set_root(leaf);
        ui.layout(Size::new(10, 10));

        ui.raise_click(leaf, Position::new(5, 5));
        assert_eq!(clicks.get(), 1);

        ui.element_mut(leaf).unwrap().enable = false;
        ui.raise_click(leaf, Position::new(5, 5));
        assert_eq!(clicks.get(), 1);
        assert_eq!(ui.element(leaf).unwrap().events.click.len(), 1);
    }

    #[test]
    fn test_handlers_run_in_order_and_may_mutate_the_tree() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        let order = Rc::new(Cell::new(0u32));
        {
            let first = order.clone();
            let second = order.clone();
            let events = &mut ui.element_mut(leaf).unwrap().events;
            events.drag.add(move |ui, id, args| {
                assert_eq!(first.get(), 0);
                first.set(1);
                ui.element_mut(id).unwrap().margin.left += args.offset.x;
                ui.element_mut(id).unwrap().events.click.add(|_, _, _| {});
            });
            events.drag.add(move |_, _, _| {
                assert_eq!(second.get(), 1);
                second.set(2);
            });
        }
        ui.mark_clean();

        ui.raise_drag(leaf, Position::new(0, 0), Position::new(7, 0));
        assert_eq!(order.get(), 2);
        let e = ui.element(leaf).unwrap();
        assert_eq!(e.margin.left, 7);
        assert_eq!(e.events.drag.len(), 2);
        assert_eq!(e.events.click.len(), 1);
    }

    #[test]
    fn test_handler_may_remove_its_own_element() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        ui.element_mut(leaf)
            .unwrap()
            .events
            .click
            .add(|ui, id, _| ui.remove(id));
        ui.raise_click(leaf, Position::default());
        assert!(!ui.contains(leaf));
    }

    #[test]
    fn test_clear_all_listeners() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        {
            let events = &mut ui.element_mut(leaf).unwrap().events;
            events.click.add(|_, _, _| {});
            events.enter_frame.add(|_, _, _| {});
        }
        ui.clear_all_listeners(leaf);
        let events = &ui.element(leaf).unwrap().events;
        assert!(events.click.is_empty() && events.enter_frame.is_empty());
    }

    #[test]
    fn test_handler_may_clear_its_own_listeners() {
        let mut ui = Ui::new();
        let button = ui.create_element();
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            let events = &mut ui.element_mut(button).unwrap().events;
            events.click.add(move |ui, id, _| {
                calls.set(calls.get() + 1);
                ui.clear_all_listeners(id);
            });
            events.drag.add(|_, _, _| {});
        }

        ui.raise_click(button, Position::default());
        ui.raise_click(button, Position::default());
        assert_eq!(calls.get(), 1);
        let events = &ui.element(button).unwrap().events;
        assert!(events.click.is_empty() && events.drag.is_empty());
    }

    #[test]
    fn test_listener_added_after_clear_during_dispatch_survives() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        let replaced = Rc::new(Cell::new(0));
        {
            let replaced = replaced.clone();
            ui.element_mut(leaf).unwrap().events.click.add(move |ui, id, _| {
                let replaced = replaced.clone();
                let click = &mut ui.element_mut(id).unwrap().events.click;
                click.clear();
                click.add(move |_, _, _| replaced.set(replaced.get() + 1));
            });
        }

        ui.raise_click(leaf, Position::default());
        assert_eq!(ui.element(leaf).unwrap().events.click.len(), 1);
        ui.raise_click(leaf, Position::default());
        ui.raise_click(leaf, Position::default());
        assert_eq!(replaced.get(), 2);
    }

    #[test]
    fn test_delay_invoke_runs_on_sync() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        ui.delay_invoke(100, move |ui| {
            ui.element_mut(leaf).unwrap().visible = false;
        });
        ui.sync(Instant::from_millis(99));
        assert!(ui.element(leaf).unwrap().visible);
        ui.sync(Instant::from_millis(100));
        assert!(!ui.element(leaf).unwrap().visible);
        assert_eq!(ui.pending_tasks(), 0);
    }

    fn paint(ui: &Ui, root: ElementId, size: Size) -> alloc::vec::Vec<u8> {
        let mut data = alloc::vec![0u8; (size.width * size.height * 4) as usize];
        let mut canvas = Canvas::new(&mut data, size);
        canvas.clear(WHITE.into()).unwrap();
        ui.render(root, &mut canvas, &MonoGlyphs).unwrap();
        data
    }

    fn rgb_at(data: &[u8], width: i32, x: i32, y: i32) -> [u8; 3] {
        let idx = ((y * width + x) * 4) as usize;
        [data[idx], data[idx + 1], data[idx + 2]]
    }

    #[test]
    fn test_render_background_border_and_children() {
        let mut ui = Ui::new();
        let overlay = ui.create_overlay();
        let card = ui.create_element();
        {
            let e = ui.element_mut(card).unwrap();
            e.margin = Thickness::uniform(4);
            e.style = Style::new()
                .with_background(BLUE)
                .with_border(RED, Thickness::uniform(2));
        }
        ui.add_child(overlay, card).unwrap();
        ui.set_root(overlay);
        let size = Size::new(20, 20);
        ui.layout(size);

        let data = paint(&ui, overlay, size);
        let blue = [BLUE.red, BLUE.green, BLUE.blue];
        let red = [RED.red, RED.green, RED.blue];
        assert_eq!(rgb_at(&data, 20, 0, 0), [0xFF, 0xFF, 0xFF]);
        assert_eq!(rgb_at(&data, 20, 2, 2), red);
        assert_eq!(rgb_at(&data, 20, 3, 10), red);
        assert_eq!(rgb_at(&data, 20, 4, 4), blue);
        assert_eq!(rgb_at(&data, 20, 15, 15), blue);
        assert_eq!(rgb_at(&data, 20, 17, 17), red);
        assert_eq!(rgb_at(&data, 20, 18, 18), [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_invisible_and_transparent_paint_nothing() {
        let mut ui = Ui::new();
        let leaf = ui.create_element();
        ui.element_mut(leaf).unwrap().style = Style::new().with_background(Color::new(0, 0, 0, 0));
        ui.set_root(leaf);
        let size = Size::new(4, 4);
        ui.layout(size);
        assert!(paint(&ui, leaf, size).iter().all(|b| *b == 0xFF));

        ui.element_mut(leaf).unwrap().style = Style::new().with_background(BLACK);
        ui.element_mut(leaf).unwrap().visible = false;
        assert!(paint(&ui, leaf, size).iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_label_text_is_clipped_to_its_box() {
        let mut ui = Ui::new();
        let label = ui.create_label("WWWW").unwrap();
        {
            let e = ui.element_mut(label).unwrap();
            e.requested_size = Size::new(20, 28);
        }
        ui.set_root(label);
        let size = Size::new(60, 40);
        ui.layout(size);

        let data = paint(&ui, label, size);
        let inked = |x: i32, y: i32| rgb_at(&data, 60, x, y) == [0, 0, 0];
        assert!((0..20).any(|x| (0..28).any(|y| inked(x, y))));
        assert!(!(20..60).any(|x| (0..40).any(|y| inked(x, y))));
        assert!(!(0..20).any(|x| (28..40).any(|y| inked(x, y))));
    }

    /// Smallest `(left, top, right, bottom)` span holding every black pixel.
    fn ink_bounds(data: &[u8], size: Size) -> Option<(i32, i32, i32, i32)> {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for y in 0..size.height {
            for x in 0..size.width {
                if rgb_at(data, size.width, x, y) != [0, 0, 0] {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x + 1, y + 1),
                    Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)),
                });
            }
        }
        bounds
    }

    fn paint_aligned_glyph(h: HorizontalAlignment, v: VerticalAlignment) -> (i32, i32, i32, i32) {
        let mut ui = Ui::new();
        let label = ui.create_label("W").unwrap();
        {
            let text = ui.label_mut(label).unwrap();
            text.font_size = FontSize::Median;
            text.font_horizontal_alignment = h;
            text.font_vertical_alignment = v;
        }
        ui.element_mut(label).unwrap().requested_size = Size::new(60, 60);
        ui.set_root(label);
        let size = Size::new(60, 60);
        ui.layout(size);
        ink_bounds(&paint(&ui, label, size), size).unwrap()
    }

    #[test]
    fn test_label_glyphs_follow_text_alignment() {
        let (w, h) = (FontSize::Median.cell_width(), FontSize::Median.cell_height());

        let (l, t, r, b) = paint_aligned_glyph(HorizontalAlignment::Right, VerticalAlignment::Bottom);
        assert!(l >= 60 - w && r <= 60, "columns {}..{}", l, r);
        assert!(t >= 60 - h && b <= 60, "rows {}..{}", t, b);

        let (l, t, r, b) = paint_aligned_glyph(HorizontalAlignment::Left, VerticalAlignment::Top);
        assert!(l >= 0 && r <= w, "columns {}..{}", l, r);
        assert!(t >= 0 && b <= h, "rows {}..{}", t, b);

        let (x, y) = ((60 - w) / 2, (60 - h) / 2);
        let (l, t, r, b) = paint_aligned_glyph(HorizontalAlignment::Center, VerticalAlignment::Center);
        assert!(l >= x && r <= x + w, "columns {}..{}", l, r);
        assert!(t >= y && b <= y + h, "rows {}..{}", t, b);
    }
}
