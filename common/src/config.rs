//! Face configuration.
//!
//! Stroke widths, hand proportions and alpha levels are compile-time constants
//! with `const` assertions guarding their relationships. [`FaceConfig`] holds
//! the few values the host shell may choose when the surface becomes ready.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{BACKGROUND_PURPLE, BLACK, WHITE};

// =============================================================================
// Stroke Configuration
// =============================================================================

/// Hour hand stroke width in pixels.
pub const HOUR_STROKE_WIDTH: f32 = 7.0;

/// Minute hand stroke width in pixels.
pub const MINUTE_STROKE_WIDTH: f32 = 6.0;

/// Tick mark stroke width in pixels.
pub const TICK_STROKE_WIDTH: f32 = 4.0;

/// Blur radius of the minute hand shadow in interactive mode.
pub const SHADOW_RADIUS: f32 = 6.0;

const _: () = assert!(TICK_STROKE_WIDTH < MINUTE_STROKE_WIDTH);
const _: () = assert!(MINUTE_STROKE_WIDTH < HOUR_STROKE_WIDTH);

// =============================================================================
// Dial Geometry
// =============================================================================

/// Number of hour tick marks around the dial.
pub const TICK_COUNT: usize = 12;

/// Radial length of each tick mark; inner radius is `center_x - TICK_LENGTH`.
pub const TICK_LENGTH: f32 = 10.0;

/// Distance from the exact center at which both hands start.
pub const CENTER_GAP_RADIUS: f32 = 1.0;

/// Minute hand length as a fraction of `center_x`.
pub const MINUTE_HAND_FRACTION: f32 = 0.75;

/// Hour hand length as a fraction of `center_x`.
pub const HOUR_HAND_FRACTION: f32 = 0.5;

const _: () = assert!(HOUR_HAND_FRACTION < MINUTE_HAND_FRACTION);
const _: () = assert!(MINUTE_HAND_FRACTION < 1.0);

/// Degrees per minute for the minute hand (360 / 60).
pub const DEGREES_PER_MINUTE: f32 = 6.0;

/// Degrees per hour for the hour hand (360 / 12).
pub const DEGREES_PER_HOUR: f32 = 30.0;

/// Extra hour hand creep per minute (30 / 60).
pub const HOUR_DEGREES_PER_MINUTE: f32 = 0.5;

/// Angle between neighbouring tick marks.
pub const DEGREES_PER_TICK: f32 = 360.0 / TICK_COUNT as f32;

// =============================================================================
// Opacity
// =============================================================================

/// Full opacity.
pub const OPAQUE_ALPHA: u8 = 255;

/// Hand opacity while the interruption filter mutes the face.
pub const MUTED_ALPHA: u8 = 100;

const _: () = assert!(MUTED_ALPHA < OPAQUE_ALPHA);

// =============================================================================
// Background Asset
// =============================================================================

/// Edge length of the unscaled square background image.
pub const BACKGROUND_SOURCE_SIZE: u32 = 200;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Values the host shell supplies when the surface becomes ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceConfig {
    /// Accent color of both hands in interactive mode.
    pub hand_color: Rgb565,
    /// Color of the minute hand shadow.
    pub hand_shadow_color: Rgb565,
    /// Fill color of the background image.
    pub background_color: Rgb565,
    /// Width and height of the unscaled background image.
    pub background_size: (u32, u32),
    /// Host hint: show the unread notification count indicator.
    pub show_unread_count_indicator: bool,
}

impl FaceConfig {
    pub const fn new() -> Self {
        Self {
            hand_color: WHITE,
            hand_shadow_color: BLACK,
            background_color: BACKGROUND_PURPLE,
            background_size: (BACKGROUND_SOURCE_SIZE, BACKGROUND_SOURCE_SIZE),
            show_unread_count_indicator: true,
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_rates_cover_full_turn() {
        assert!((DEGREES_PER_MINUTE * 60.0 - 360.0).abs() < f32::EPSILON);
        assert!((DEGREES_PER_HOUR * 12.0 - 360.0).abs() < f32::EPSILON);
        assert!((HOUR_DEGREES_PER_MINUTE * 60.0 - DEGREES_PER_HOUR).abs() < f32::EPSILON);
        assert!((DEGREES_PER_TICK - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_config() {
        let config = FaceConfig::default();
        assert_eq!(config.hand_color, WHITE);
        assert_eq!(config.hand_shadow_color, BLACK);
        assert_eq!(config.background_color, BACKGROUND_PURPLE);
        assert_eq!(config.background_size, (200, 200));
        assert!(config.show_unread_count_indicator);
    }
}
