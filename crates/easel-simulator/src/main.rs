//! Desktop simulator for the easel UI toolkit.
//!
//! Renders an easel-core element tree in an SDL2 window via
//! `embedded-graphics-simulator`. The demo is a small calculator-style keypad
//! plus a square that can be dragged around.
//!
//! # Key bindings
//!
//! | Key      | Action |
//! |----------|--------|
//! | Q / Esc  | Quit   |
//!
//! Mouse presses, releases and motion are forwarded as touch input.

extern crate alloc;

use alloc::collections::VecDeque;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use easel_core::animation::{AnimationOptions, Easing, property};
use easel_core::font::{FontSize, MonoGlyphs};
use easel_core::framebuffer::BYTES_PER_PIXEL;
use easel_core::main_loop::MainLoop;
use easel_core::platform::{ClickSample, Platform};
use easel_core::ui::layouts::HorizontalAlignment;
use easel_core::ui::styling::{BLACK, BLUE, PURPLE, Style, WHITE, YELLOW};
use easel_core::ui::{ElementId, Position, Size as UiSize, Thickness, Ui, UiError};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: i32 = 320;
const DISPLAY_HEIGHT_PX: i32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Keypad legend, row-major.
const KEYS: [[&str; 3]; 4] = [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"], ["C", "0", "<"]];

// ---------------------------------------------------------------------------
// SDL platform
// ---------------------------------------------------------------------------

/// [`Platform`] backed by an SDL2 window.
struct SdlPlatform {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
    pixels: Vec<u8>,
    clicks: VecDeque<ClickSample>,
    moved: Option<Position>,
    mouse: Option<Point>,
    /// The SDL window is created on the first `update()`; polling events
    /// before that panics.
    shown: bool,
    quit: bool,
}

impl SdlPlatform {
    fn new() -> Self {
        let display = SimulatorDisplay::<Rgb888>::new(Size::new(
            DISPLAY_WIDTH_PX as u32,
            DISPLAY_HEIGHT_PX as u32,
        ));
        let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
        Self {
            display,
            window: Window::new("Easel Simulator", &output_settings),
            pixels: vec![0; (DISPLAY_WIDTH_PX * DISPLAY_HEIGHT_PX) as usize * BYTES_PER_PIXEL],
            clicks: VecDeque::new(),
            moved: None,
            mouse: None,
            shown: false,
            quit: false,
        }
    }

    /// Translate pending SDL events into click samples and motion.
    fn pump_events(&mut self) {
        if !self.shown {
            return;
        }
        for event in self.window.events() {
            match event {
                SimulatorEvent::Quit => self.quit = true,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        self.quit = true;
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    self.mouse = Some(point);
                    self.clicks.push_back(ClickSample::pressed(point.x, point.y));
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    self.mouse = Some(point);
                    self.clicks.push_back(ClickSample::released(point.x, point.y));
                }
                SimulatorEvent::MouseMove { point } => {
                    if let Some(last) = self.mouse {
                        let delta = Position::new(point.x - last.x, point.y - last.y);
                        self.moved = Some(self.moved.unwrap_or_default() + delta);
                    }
                    self.mouse = Some(point);
                }
                _ => {}
            }
        }
    }
}

impl Platform for SdlPlatform {
    fn screen_size(&self) -> UiSize {
        UiSize::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
    }

    fn pixel_buffer(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn present(&mut self) {
        let area = Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
        );
        let colors = self
            .pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| Rgb888::new(px[0], px[1], px[2]));
        let Ok(()) = self.display.fill_contiguous(&area, colors);
        self.window.update(&self.display);
        self.shown = true;
    }

    fn poll_click(&mut self) -> ClickSample {
        self.pump_events();
        self.clicks.pop_front().unwrap_or_default()
    }

    fn poll_move(&mut self) -> Option<Position> {
        self.moved.take()
    }
}

// ---------------------------------------------------------------------------
// Demo tree
// ---------------------------------------------------------------------------

/// Build the keypad demo and return its root.
fn build_demo(ui: &mut Ui) -> Result<ElementId, UiError> {
    let root = ui.create_overlay();
    let layout = ui.create_grid(&[56, 0], &[0]);
    ui.add_child(root, layout)?;

    let readout = ui.create_label("0")?;
    {
        let e = ui.element_mut(readout).ok_or(UiError::StaleElement)?;
        e.margin = Thickness::uniform(4);
        e.requested_size = UiSize::new(0, 48);
        e.style = Style::new().with_background(BLACK);
    }
    {
        let label = ui.label_mut(readout)?;
        label.font_size = FontSize::Large;
        label.font_color = WHITE;
        label.font_horizontal_alignment = HorizontalAlignment::Right;
    }
    ui.set_child(layout, 0, 0, readout)?;

    let keypad = ui.create_grid(&[0; 4], &[0; 3]);
    ui.set_child(layout, 1, 0, keypad)?;

    for (row, keys) in KEYS.iter().enumerate() {
        for (col, key) in keys.iter().enumerate() {
            let id = ui.create_label(key)?;
            {
                let e = ui.element_mut(id).ok_or(UiError::StaleElement)?;
                e.margin = Thickness::uniform(3);
                e.style = Style::new()
                    .with_background(WHITE)
                    .with_border(BLUE, Thickness::uniform(1));
            }
            ui.label_mut(id)?.font_size = FontSize::MediumLarge;

            let key = *key;
            ui.element_mut(id)
                .ok_or(UiError::StaleElement)?
                .events
                .click
                .add(move |ui, target, _| {
                    press_key(ui, readout, key);
                    let flash = AnimationOptions::default().with_easing(Easing::CubicOut);
                    if let Err(e) = ui.begin_animation(target, property::BACKGROUND, YELLOW, WHITE, 300, flash) {
                        warn!("Key flash failed: {}", e);
                    }
                });
            ui.set_child(keypad, row, col, id)?;
        }
    }

    // Free-floating square; drag it around
    let square = ui.create_element();
    {
        let e = ui.element_mut(square).ok_or(UiError::StaleElement)?;
        e.requested_size = UiSize::new(32, 32);
        e.margin = Thickness::new(270, 8, 0, 0);
        e.style = Style::new().with_background(PURPLE);
        e.events.drag.add(|ui, id, args| {
            if let Some(e) = ui.element_mut(id) {
                e.margin.left += args.offset.x;
                e.margin.top += args.offset.y;
                ui.invalidate();
            }
        });
    }
    ui.add_child(root, square)?;

    Ok(root)
}

/// Apply one keypad press to the readout label.
fn press_key(ui: &mut Ui, readout: ElementId, key: &str) {
    let Ok(label) = ui.label_mut(readout) else {
        return;
    };
    let mut text = String::from(label.text());
    match key {
        "C" => text = String::from("0"),
        "<" => {
            text.pop();
            if text.is_empty() {
                text.push('0');
            }
        }
        digit if text == "0" => text = String::from(digit),
        digit => text.push_str(digit),
    }
    if let Err(e) = label.set_text(&text) {
        warn!("Readout full: {}", e);
        return;
    }
    info!("Readout: {}", text);
    ui.invalidate();
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting easel simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Q=Quit");

    let mut ui = Ui::new();
    let root = match build_demo(&mut ui) {
        Ok(root) => root,
        Err(e) => {
            log::error!("Failed to build demo tree: {}", e);
            return;
        }
    };
    ui.set_root(root);

    let mut main_loop = MainLoop::new(ui, SdlPlatform::new(), MonoGlyphs, Instant::now());
    main_loop.run(
        || {
            std::thread::sleep(std::time::Duration::from_millis(1));
            Instant::now()
        },
        |main_loop| !main_loop.platform().quit,
    );

    info!("Simulator exiting");
}
