//! Analog watch face simulator for desktop platforms.
//!
//! Plays the host shell: owns the window, feeds lifecycle events into the
//! engine from the keyboard, and renders only when the engine asks for it.
//!
//! | Key | Event |
//! |-----|-------|
//! | A | Toggle ambient mode |
//! | M | Toggle mute (interruption filter) |
//! | L | Toggle low-bit ambient capability |
//! | B | Toggle burn-in protection capability |
//! | V | Toggle visibility |
//! | T | Shift system timezone one hour east |
//! | S | Time sync correction |
//! | Esc | Quit |

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod host;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use watchface_common::colors::BLACK;
use watchface_common::{
    Clock,
    DisplayCanvas,
    DisplayProperties,
    FaceConfig,
    InterruptionFilter,
    WatchFaceEngine,
};

use crate::host::{HostZones, SystemClock};
use crate::timing::{FRAME_TIME, TICK_INTERVAL_MS};

/// Simulated round display edge length in pixels.
const FACE_SIZE: u32 = 400;

type Engine = WatchFaceEngine<SystemClock, HostZones>;

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(FACE_SIZE, FACE_SIZE));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Analog Face Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let mut engine = Engine::new(SystemClock, HostZones::new());
    engine.on_surface_ready(FaceConfig::default());
    engine.on_surface_resized(FACE_SIZE as i32, FACE_SIZE as i32);
    engine.on_visibility_changed(true);

    let mut ambient = false;
    let mut muted = false;
    let mut visible = true;
    let mut properties = DisplayProperties::default();
    let mut last_minute = SystemClock.now_ms().div_euclid(TICK_INTERVAL_MS);

    println!("A ambient | M mute | L low-bit | B burn-in | V visibility | T timezone | S sync | Esc quit");

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Escape => return,
                        Keycode::A => {
                            ambient = !ambient;
                            engine.on_ambient_changed(ambient);
                        }
                        Keycode::M => {
                            muted = !muted;
                            let filter = if muted { InterruptionFilter::Silent } else { InterruptionFilter::All };
                            engine.on_interruption_filter_changed(filter);
                        }
                        Keycode::L => {
                            properties.low_bit_ambient = !properties.low_bit_ambient;
                            engine.on_properties_changed(properties);
                        }
                        Keycode::B => {
                            properties.burn_in_protection = !properties.burn_in_protection;
                            engine.on_properties_changed(properties);
                        }
                        Keycode::V => {
                            visible = !visible;
                            engine.on_visibility_changed(visible);
                            if !visible {
                                display.clear(BLACK).ok();
                            }
                        }
                        Keycode::T => {
                            if engine.zones_mut().shift_east() {
                                engine.on_timezone_changed();
                            }
                        }
                        Keycode::S => engine.on_time_synced(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let minute = SystemClock.now_ms().div_euclid(TICK_INTERVAL_MS);
        if minute != last_minute {
            last_minute = minute;
            engine.on_time_tick();
        }

        if visible && engine.take_redraw_request() {
            engine.render(&mut DisplayCanvas::new(&mut display));
        }

        flush_log(&mut engine);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

/// Print and drop engine log lines accumulated since the last frame.
fn flush_log(engine: &mut Engine) {
    for entry in engine.log().iter() {
        println!("[{}] {}", entry.level.prefix(), entry.message);
    }
    engine.clear_log();
}
