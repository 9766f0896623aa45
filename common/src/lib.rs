//! Analog watch face engine.
//!
//! Platform-agnostic core shared by the desktop simulator and device shells:
//!
//! - [`clock`]: Current instant, timezone and local time of day
//! - [`geometry`]: Hand angles, dial proportions and tick endpoints
//! - [`transform`]: Affine transforms used to place the hands
//! - [`style`]: Ambient/mute aware paint derivation
//! - [`background`]: Scaled background image asset
//! - [`render`]: Frame layout and layered drawing
//! - [`surface`]: Canvas trait, draw lists and the embedded-graphics adapter
//! - [`engine`]: Host lifecycle callbacks tying it all together
//! - [`colors`], [`config`]: Palette and configuration constants
//! - [`log`]: Engine event log
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation free outside of tests. Trigonometry
//! goes through `micromath`, collections through `heapless`.
//!
//! # Testing
//!
//! ```bash
//! cargo test -p watchface-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
pub mod log;

pub mod background;
pub mod clock;
pub mod colors;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod render;
pub mod style;
pub mod surface;
pub mod transform;

// Re-export commonly used items
pub use clock::{Clock, LocalTime, TimeZone, TimeZoneSource};
pub use config::FaceConfig;
pub use engine::{DisplayProperties, InterruptionFilter, WatchFaceEngine};
pub use render::FrameLayout;
pub use surface::{Canvas, DisplayCanvas, DrawList};
