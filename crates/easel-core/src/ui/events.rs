// src/ui/events.rs
//! Per-element event listener lists
//!
//! Each element owns one [`EventForwarder`] per event kind. Dispatch is
//! synchronous and runs handlers in registration order, but only while the
//! element is enabled. There is no bubbling: every dispatch targets exactly
//! one element.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use crate::ui::elements::ElementId;
use crate::ui::geometry::Position;
use crate::ui::tree::Ui;

/// Event kinds an element can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Fired on the root right before a frame is painted
    EnterFrame,
    /// Pointer moved while this element holds the drag
    Drag,
    /// Pointer released over this element
    Click,
    /// An animation was started on this element
    StartAnyAnimation,
    /// The last running animation on this element finished
    FinishAllAnimation,
}

/// Arguments of non-pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventArgs {
    pub kind: EventKind,
}

/// Arguments of pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEventArgs {
    pub kind: EventKind,
    /// Pointer position in screen coordinates
    pub position: Position,
    /// Pointer movement since the previous tick (zero for clicks)
    pub offset: Position,
}

/// A listener: receives the UI, the element the event was sent to, and the
/// event arguments.
pub type Handler<A> = Box<dyn FnMut(&mut Ui, ElementId, &A)>;

/// Ordered listener list for one event kind.
pub struct EventForwarder<A> {
    handlers: Vec<Handler<A>>,
    /// Set by `clear`; tells `restore` to drop the detached handlers
    cleared: bool,
}

impl<A> Default for EventForwarder<A> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            cleared: false,
        }
    }
}

impl<A> EventForwarder<A> {
    /// Append a handler; it runs after every handler added before it.
    pub fn add<F>(&mut self, handler: F)
    where
        F: FnMut(&mut Ui, ElementId, &A) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Drop every handler, including the ones currently being dispatched.
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.cleared = true;
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Detach the handlers so they can be called with `&mut Ui`.
    pub(crate) fn take(&mut self) -> Vec<Handler<A>> {
        self.cleared = false;
        mem::take(&mut self.handlers)
    }

    /// Reattach handlers taken with [`take`](Self::take), keeping any that
    /// were added during dispatch after them. If the list was cleared in
    /// the meantime the taken handlers are dropped instead.
    pub(crate) fn restore(&mut self, mut taken: Vec<Handler<A>>) {
        if self.cleared {
            return;
        }
        taken.append(&mut self.handlers);
        self.handlers = taken;
    }
}

/// All listener lists of one element.
#[derive(Default)]
pub struct Events {
    pub enter_frame: EventForwarder<EventArgs>,
    pub drag: EventForwarder<MouseEventArgs>,
    pub click: EventForwarder<MouseEventArgs>,
    pub start_any_animation: EventForwarder<EventArgs>,
    pub finish_all_animation: EventForwarder<EventArgs>,
}

impl Events {
    /// Drop every listener of every kind.
    pub fn clear_all_listeners(&mut self) {
        self.enter_frame.clear();
        self.drag.clear();
        self.click.clear();
        self.start_any_animation.clear();
        self.finish_all_animation.clear();
    }

    pub(crate) fn enter_frame_mut(&mut self) -> &mut EventForwarder<EventArgs> {
        &mut self.enter_frame
    }

    pub(crate) fn drag_mut(&mut self) -> &mut EventForwarder<MouseEventArgs> {
        &mut self.drag
    }

    pub(crate) fn click_mut(&mut self) -> &mut EventForwarder<MouseEventArgs> {
        &mut self.click
    }

    pub(crate) fn start_any_animation_mut(&mut self) -> &mut EventForwarder<EventArgs> {
        &mut self.start_any_animation
    }

    pub(crate) fn finish_all_animation_mut(&mut self) -> &mut EventForwarder<EventArgs> {
        &mut self.finish_all_animation
    }
}
