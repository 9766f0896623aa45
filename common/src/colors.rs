//! Color constants and RGB565 channel helpers for the watch face.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! Colors picked from 24-bit design values are pre-converted by dropping the
//! low bits of each channel (`r >> 3`, `g >> 2`, `b >> 3`), so they stay `const`.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::IntoStorage;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Constrained ambient background and default hand shadow.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Default hand accent and the ambient-safe hand color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Custom Colors (face palette)
// =============================================================================

/// Dark purple tick accent, `#3A2D43`.
/// RGB565: (7, 11, 8).
pub const TICK_ACCENT: Rgb565 = Rgb565::new(7, 11, 8);

/// Background image fill, `#834C9E`.
/// RGB565: (16, 19, 19).
pub const BACKGROUND_PURPLE: Rgb565 = Rgb565::new(16, 19, 19);

// =============================================================================
// Channel Helpers
// =============================================================================

#[inline]
fn channels(color: Rgb565) -> (u32, u32, u32) {
    let raw = color.into_storage();
    (
        u32::from((raw >> 11) & 0x1F),
        u32::from((raw >> 5) & 0x3F),
        u32::from(raw & 0x1F),
    )
}

/// Composite `fg` over `bg` with an 8-bit alpha (255 = opaque).
///
/// Integer math per channel, rounded to nearest.
pub fn blend_over(
    fg: Rgb565,
    bg: Rgb565,
    alpha: u8,
) -> Rgb565 {
    match alpha {
        255 => return fg,
        0 => return bg,
        _ => {}
    }

    let a = u32::from(alpha);
    let (fg_r, fg_g, fg_b) = channels(fg);
    let (bg_r, bg_g, bg_b) = channels(bg);

    let mix = |f: u32, b: u32| (f * a + b * (255 - a) + 127) / 255;

    Rgb565::new(mix(fg_r, bg_r) as u8, mix(fg_g, bg_g) as u8, mix(fg_b, bg_b) as u8)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_conversions() {
        assert_eq!(TICK_ACCENT, Rgb565::new(0x3A >> 3, 0x2D >> 2, 0x43 >> 3));
        assert_eq!(BACKGROUND_PURPLE, Rgb565::new(0x83 >> 3, 0x4C >> 2, 0x9E >> 3));
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend_over(WHITE, BLACK, 255), WHITE);
        assert_eq!(blend_over(WHITE, BLACK, 0), BLACK);
    }

    #[test]
    fn test_blend_muted_white_over_black() {
        // 100/255 of full scale: red 31 -> 12, green 63 -> 25
        let dimmed = blend_over(WHITE, BLACK, 100);
        assert_eq!(dimmed, Rgb565::new(12, 25, 12));
    }

    #[test]
    fn test_blend_over_background_stays_between() {
        let mixed = blend_over(WHITE, BACKGROUND_PURPLE, 100);
        let (r, g, b) = channels(mixed);
        assert!((16..=31).contains(&r), "red {r} should lie between bg and fg");
        assert!((19..=63).contains(&g), "green {g} should lie between bg and fg");
        assert!((19..=31).contains(&b), "blue {b} should lie between bg and fg");
    }
}
