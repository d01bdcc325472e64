//! Cooperative main loop
//!
//! One [`MainLoop::tick`] does, in order:
//!
//! 1. repaint if a frame is due and the UI is invalidated (layout, then
//!    `EnterFrame` on the root, then paint and present)
//! 2. poll the click and move inputs and update the tracked pointer from
//!    any absolute position or relative movement they report
//! 3. send `Drag` to the element being dragged, with the pointer delta
//! 4. on release, end any drag and send `Click` to the element under the
//!    pointer; on press, pick the element to drag
//! 5. run every due timer task
//!
//! Frames come due from a recurring timer task at the configured render
//! rate, so painting shares the scheduler with animations.

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use log::{debug, info};

use crate::font::GlyphSource;
use crate::framebuffer::Canvas;
use crate::platform::{ClickState, Platform};
use crate::timer::TimerHandle;
use crate::ui::elements::ElementId;
use crate::ui::geometry::Position;
use crate::ui::tree::Ui;

pub struct MainLoop<P, G> {
    ui: Ui,
    platform: P,
    glyphs: G,
    pointer: Position,
    last_pointer: Position,
    drag_target: Option<ElementId>,
    render_task: TimerHandle,
    frames: u64,
}

impl<P, G> MainLoop<P, G>
where
    P: Platform,
    G: GlyphSource,
{
    /// Take over `ui`, starting the render cadence at `now`.
    pub fn new(mut ui: Ui, platform: P, glyphs: G, now: Instant) -> Self {
        ui.advance_clock(now);
        let interval = ui.config().frame_interval_ms();
        let render_task = ui.recurrent_invoke(interval, 0, |ui| ui.request_frame());
        ui.request_frame();

        let size = platform.screen_size();
        info!(
            "Main loop started: {}x{} screen, frame every {} ms",
            size.width, size.height, interval
        );

        Self {
            ui,
            platform,
            glyphs,
            pointer: Position::new(-1, -1),
            last_pointer: Position::new(-1, -1),
            drag_target: None,
            render_task,
            frames: 0,
        }
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Position {
        self.pointer
    }

    pub fn drag_target(&self) -> Option<ElementId> {
        self.drag_target
    }

    /// Advance the loop by one step at time `now`.
    pub fn tick(&mut self, now: Instant) {
        self.ui.advance_clock(now);

        if self.ui.take_frame_request() && self.ui.is_invalidated() {
            self.paint();
        }

        let click = self.platform.poll_click();
        if let Some(position) = click.position {
            self.pointer = position;
        }
        if let Some(delta) = self.platform.poll_move() {
            self.pointer += delta;
        }

        if let Some(target) = self.drag_target {
            if self.ui.contains(target) {
                let offset = self.pointer - self.last_pointer;
                self.ui.raise_drag(target, self.pointer, offset);
            } else {
                self.drag_target = None;
            }
        }

        match click.state {
            ClickState::Released => {
                self.drag_target = None;
                if let Some(target) = self.ui.resolve_target(self.pointer) {
                    debug!("Click on {:?}", target);
                    self.ui.raise_click(target, self.pointer);
                }
            }
            ClickState::Pressed if self.drag_target.is_none() => {
                self.drag_target = self.ui.resolve_target(self.pointer);
                debug!("Drag target {:?}", self.drag_target);
            }
            _ => {}
        }

        self.last_pointer = self.pointer;
        self.ui.sync(now);
    }

    /// Tick until `keep_running` says stop, reading the time from `clock`.
    pub fn run<C, K>(&mut self, mut clock: C, mut keep_running: K)
    where
        C: FnMut() -> Instant,
        K: FnMut(&mut Self) -> bool,
    {
        while keep_running(self) {
            let now = clock();
            self.tick(now);
        }
        info!("Main loop stopped after {} frames", self.frames);
    }

    fn paint(&mut self) {
        let size = self.platform.screen_size();
        if let Some(root) = self.ui.root() {
            self.ui.layout(size);
            self.ui.raise_enter_frame(root);
        }

        let clear: Rgb888 = self.ui.config().clear_color.into();
        let mut canvas = Canvas::new(self.platform.pixel_buffer(), size);
        let Ok(()) = canvas.clear(clear);
        if let Some(root) = self.ui.root() {
            let Ok(()) = self.ui.render(root, &mut canvas, &self.glyphs);
        }

        self.platform.present();
        self.ui.mark_clean();
        self.frames += 1;
    }
}

impl<P, G> Drop for MainLoop<P, G> {
    fn drop(&mut self) {
        self.render_task.stop();
    }
}
