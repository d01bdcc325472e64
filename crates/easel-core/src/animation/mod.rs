//! Property animation engine
//!
//! [`Ui::begin_animation`] tweens one property of one element from a start
//! value to an end value over a fixed number of scheduler ticks. Each tick
//! writes `easing(done / total)` of the way between the two values and
//! invalidates the frame.
//!
//! Every element tracks its own running animations. Unless
//! [`AnimationOptions::allow_multiple`] is set, starting a tween stops any
//! running tween of the same [`PropertyId`] on that element, leaving the
//! property at whatever value the stopped tween last wrote.
//!
//! The element receives `StartAnyAnimation` when a tween begins and
//! `FinishAllAnimation` when its last running tween completes.
//!
//! # Examples
//! ```ignore
//! ui.begin_animation(
//!     button,
//!     property::BACKGROUND,
//!     WHITE,
//!     BLUE,
//!     300,
//!     AnimationOptions::default().with_easing(Easing::CubicOut),
//! )?;
//! ```

pub mod easing;
pub mod property;

extern crate alloc;

use log::debug;

use crate::timer::{TimerHandle, TimerTask};
use crate::ui::UiError;
use crate::ui::elements::ElementId;
use crate::ui::geometry::Mixture;
use crate::ui::tree::Ui;

pub use easing::Easing;
pub use property::{Property, PropertyId};

/// Frame rate used when none (or a non-positive one) is given.
pub const DEFAULT_ANIMATION_FPS: f32 = 40.0;

/// Tuning of one [`Ui::begin_animation`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationOptions {
    pub easing: Easing,
    /// Keep running tweens of the same property instead of stopping them
    pub allow_multiple: bool,
    /// Ticks per second; `None` uses the UI's configured animation rate
    pub fps: Option<f32>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            easing: Easing::Linear,
            allow_multiple: false,
            fps: None,
        }
    }
}

impl AnimationOptions {
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = allow;
        self
    }

    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = Some(fps);
        self
    }
}

/// The first positive rate of `fps` and `configured`, else the default.
fn effective_fps(fps: Option<f32>, configured: f32) -> f32 {
    match fps {
        Some(fps) if fps > 0.0 => fps,
        _ if configured > 0.0 => configured,
        _ => DEFAULT_ANIMATION_FPS,
    }
}

/// Running tween tracked by its target element.
#[derive(Debug, Clone)]
pub(crate) struct AnimationEntry {
    pub(crate) property: PropertyId,
    pub(crate) handle: TimerHandle,
}

/// Whole ticks covering `duration_ms` at `fps`, at least one.
pub fn tick_count(duration_ms: u32, fps: f32) -> u32 {
    let ticks = (duration_ms as f32 * 0.001 * fps + 0.5) as u32;
    ticks.max(1)
}

/// Milliseconds between ticks at `fps`, at least one.
pub fn tick_interval_ms(fps: f32) -> u64 {
    let interval = (1000.0 / fps + 0.5) as u64;
    interval.max(1)
}

/// Interpolation state of one tween.
struct Tween<T> {
    target: ElementId,
    property: Property<T>,
    from: T,
    to: T,
    done: u32,
    total: u32,
    easing: Easing,
    handle: TimerHandle,
}

impl<T: Mixture> Tween<T> {
    fn step(&mut self, ui: &mut Ui) {
        if self.done >= self.total {
            self.handle.stop();
            return;
        }
        self.done += 1;
        let ratio = self.easing.apply(self.done as f32 / self.total as f32);
        let value = T::mixture(ratio, &self.to, &self.from);

        let Some(element) = ui.element_mut(self.target) else {
            // Target removed mid-tween
            self.handle.stop();
            return;
        };
        (self.property.set)(element, value);
        ui.invalidate();

        if self.done == self.total {
            self.handle.stop();
            if !ui.is_animating(self.target) {
                debug!("All animations finished on {:?}", self.target);
                ui.raise_finish_all_animation(self.target);
            }
        }
    }
}

impl Ui {
    /// Start tweening `property` of `target` from `from` to `to` over
    /// `duration_ms`. Returns the tween's cancellation handle.
    pub fn begin_animation<T>(
        &mut self,
        target: ElementId,
        property: Property<T>,
        from: T,
        to: T,
        duration_ms: u32,
        options: AnimationOptions,
    ) -> Result<TimerHandle, UiError>
    where
        T: Mixture + 'static,
    {
        let fps = effective_fps(options.fps, self.config().animation_fps);
        let total = tick_count(duration_ms, fps);
        let interval = tick_interval_ms(fps);
        let handle = TimerHandle::new();

        let element = self.element_mut(target).ok_or(UiError::StaleElement)?;
        if !options.allow_multiple {
            for entry in element.animations.iter().filter(|a| a.property == property.id) {
                entry.handle.stop();
            }
        }
        element.animations.retain(|a| a.handle.is_alive());
        element.animations.push(AnimationEntry {
            property: property.id,
            handle: handle.clone(),
        });

        let mut tween = Tween {
            target,
            property,
            from,
            to,
            done: 0,
            total,
            easing: options.easing,
            handle: handle.clone(),
        };
        let now = self.now();
        self.schedule(TimerTask::recurrent(now, interval, total, handle.clone(), move |ui: &mut Ui| {
            tween.step(ui)
        }));

        debug!(
            "Animation of {:?} on {:?}: {} ticks every {} ms",
            property.id, target, total, interval
        );
        self.raise_start_any_animation(target);
        Ok(handle)
    }

    /// Tween from the property's current value to `to`.
    pub fn animate_to<T>(
        &mut self,
        target: ElementId,
        property: Property<T>,
        to: T,
        duration_ms: u32,
        options: AnimationOptions,
    ) -> Result<TimerHandle, UiError>
    where
        T: Mixture + 'static,
    {
        let element = self.element(target).ok_or(UiError::StaleElement)?;
        let from = (property.get)(element).ok_or(UiError::WrongKind {
            expected: "label",
            found: element.kind().name(),
        })?;
        self.begin_animation(target, property, from, to, duration_ms, options)
    }

    /// Stop every running tween on `target`. Properties keep their current
    /// values and no finish notification is raised.
    pub fn stop_animations(&mut self, target: ElementId) {
        if let Some(element) = self.element_mut(target) {
            for entry in element.animations.drain(..) {
                entry.handle.stop();
            }
        }
    }

    /// Whether any tween on `target` is still running.
    pub fn is_animating(&self, target: ElementId) -> bool {
        self.element(target)
            .is_some_and(|e| e.animations.iter().any(|a| a.handle.is_alive()))
    }
}
