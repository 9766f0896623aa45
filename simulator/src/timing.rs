//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which the `no_std` core crate avoids.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Milliseconds in one minute, the ambient tick granularity.
pub const TICK_INTERVAL_MS: i64 = 60_000;
