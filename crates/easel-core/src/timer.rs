//! Cooperative timer scheduler
//!
//! Tasks sit in a min-heap keyed by their next fire time. The owner pops due
//! tasks with [`Scheduler::pop_due`] and requeues the unfinished ones, as
//! [`Ui::sync`](crate::ui::Ui::sync) does once per main loop tick. Nothing
//! here reads a clock: callers pass `now` in.
//!
//! A recurring task that fell behind replays its closure once per missed
//! interval inside a single sync, bounded by its end time.
//!
//! Cancellation goes through a shared [`TimerHandle`]; a stopped task is
//! dropped the next time it comes due.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::BinaryHeap;
use alloc::rc::Rc;
use core::cell::Cell;
use core::cmp::Ordering;

use embassy_time::{Duration, Instant};
use log::debug;

/// Shared liveness flag of a timer task or animation.
///
/// Clones observe the same flag. Stopping is idempotent.
#[derive(Debug, Clone)]
pub struct TimerHandle(Rc<Cell<bool>>);

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHandle {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn stop(&self) {
        self.0.set(false);
    }
}

/// Closure run by a task, receiving the scheduler context.
pub type TaskFn<C> = Box<dyn FnMut(&mut C)>;

/// One scheduled unit of work.
pub struct TimerTask<C> {
    next: Instant,
    end: Instant,
    step: Duration,
    handle: TimerHandle,
    seq: u64,
    f: TaskFn<C>,
}

impl<C> TimerTask<C> {
    /// Fires once, `delay_ms` after `now`.
    pub fn delayed<F>(now: Instant, delay_ms: u64, handle: TimerHandle, f: F) -> Self
    where
        F: FnMut(&mut C) + 'static,
    {
        let next = later(now, Duration::from_millis(delay_ms));
        Self {
            next,
            end: later(next, Duration::from_millis(1)),
            step: Duration::MAX,
            handle,
            seq: 0,
            f: Box::new(f),
        }
    }

    /// Fires at `now` and then every `interval_ms`, `count` times in total.
    /// A `count` of 0 repeats until stopped.
    pub fn recurrent<F>(now: Instant, interval_ms: u64, count: u32, handle: TimerHandle, f: F) -> Self
    where
        F: FnMut(&mut C) + 'static,
    {
        let step = Duration::from_millis(interval_ms.max(1));
        let end = if count == 0 {
            Instant::MAX
        } else {
            let span = step
                .as_ticks()
                .checked_mul(u64::from(count))
                .map(Duration::from_ticks)
                .unwrap_or(Duration::MAX);
            later(now, span)
        };
        Self {
            next: now,
            end,
            step,
            handle,
            seq: 0,
            f: Box::new(f),
        }
    }

    /// Run every firing that is due at `now`. Returns `true` once the task
    /// is finished and must not be rescheduled.
    pub fn execute(&mut self, now: Instant, ctx: &mut C) -> bool {
        if !self.handle.is_alive() {
            return true;
        }
        if self.next >= self.end {
            self.handle.stop();
            return true;
        }

        let mut fired = 0u32;
        while self.next <= now && self.handle.is_alive() {
            (self.f)(ctx);
            fired += 1;
            self.next = later(self.next, self.step);
            if self.next >= self.end {
                self.handle.stop();
            }
        }
        if fired > 1 {
            debug!("Timer task caught up {} missed firings", fired - 1);
        }

        !self.handle.is_alive()
    }
}

/// `at + span`, saturating at [`Instant::MAX`].
fn later(at: Instant, span: Duration) -> Instant {
    at.checked_add(span).unwrap_or(Instant::MAX)
}

impl<C> PartialEq for TimerTask<C> {
    fn eq(&self, other: &Self) -> bool {
        self.next == other.next && self.seq == other.seq
    }
}

impl<C> Eq for TimerTask<C> {}

impl<C> PartialOrd for TimerTask<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for TimerTask<C> {
    // Reversed so the std max-heap pops the earliest task; ties go to the
    // task scheduled first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .next
            .cmp(&self.next)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending timer tasks.
pub struct Scheduler<C> {
    heap: BinaryHeap<TimerTask<C>>,
    next_seq: u64,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, mut task: TimerTask<C>) {
        task.seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(task);
    }

    /// Pop the earliest task if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerTask<C>> {
        if self.heap.peek()?.next <= now {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Re-queue a task popped with [`pop_due`](Self::pop_due), keeping its
    /// place among tasks with the same fire time.
    pub fn requeue(&mut self, task: TimerTask<C>) {
        self.heap.push(task);
    }

    /// Run `f` once, `delay_ms` after `now`.
    pub fn delay_invoke<F>(&mut self, now: Instant, delay_ms: u64, f: F) -> TimerHandle
    where
        F: FnMut(&mut C) + 'static,
    {
        let handle = TimerHandle::new();
        self.push(TimerTask::delayed(now, delay_ms, handle.clone(), f));
        handle
    }

    /// Run `f` every `interval_ms` starting at `now`, `count` times (0 = forever).
    pub fn recurrent_invoke<F>(&mut self, now: Instant, interval_ms: u64, count: u32, f: F) -> TimerHandle
    where
        F: FnMut(&mut C) + 'static,
    {
        let handle = TimerHandle::new();
        self.push(TimerTask::recurrent(now, interval_ms, count, handle.clone(), f));
        handle
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
