//! Power-mode aware paint derivation.
//!
//! [`StyleState`] holds the four display flags and the configured hand
//! palette. Every drawable gets an immutable [`PaintSpec`] that is rebuilt in
//! full from those inputs, so no field can be left over from an earlier mode.
//!
//! | Mode | Hand color | Anti-alias | Minute shadow | Hand alpha |
//! |------|-----------|------------|---------------|------------|
//! | Interactive | accent | on | yes | 255 |
//! | Ambient | white | off | no | 255 |
//! | + muted | unchanged | unchanged | unchanged | 100 |
//!
//! Ticks keep the dark accent and full alpha in every mode. Low-bit and
//! burn-in flags do not touch paints; the render pipeline reads them to pick
//! the background.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{TICK_ACCENT, WHITE};
use crate::config::{
    FaceConfig,
    HOUR_STROKE_WIDTH,
    MINUTE_STROKE_WIDTH,
    MUTED_ALPHA,
    OPAQUE_ALPHA,
    SHADOW_RADIUS,
    TICK_STROKE_WIDTH,
};

// =============================================================================
// Paint Specification
// =============================================================================

/// Line end shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrokeCap {
    Butt,
    Round,
}

/// Soft drop shadow behind a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: Rgb565,
}

/// Everything needed to stroke one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintSpec {
    pub color: Rgb565,
    pub stroke_width: f32,
    pub cap: StrokeCap,
    pub anti_alias: bool,
    pub shadow: Option<Shadow>,
    /// 0 = transparent, 255 = opaque.
    pub alpha: u8,
}

/// Paints for the three drawable elements of the face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceStyle {
    pub hour: PaintSpec,
    pub minute: PaintSpec,
    pub ticks: PaintSpec,
}

/// Configured hand colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandPalette {
    pub hand: Rgb565,
    pub shadow: Rgb565,
}

impl From<&FaceConfig> for HandPalette {
    fn from(config: &FaceConfig) -> Self {
        Self {
            hand: config.hand_color,
            shadow: config.hand_shadow_color,
        }
    }
}

impl Default for HandPalette {
    fn default() -> Self { Self::from(&FaceConfig::default()) }
}

// =============================================================================
// Style State
// =============================================================================

/// Display mode flags plus the paints derived from them.
///
/// Setters return `true` only when the flag actually changed; the derived
/// [`FaceStyle`] is refreshed in the same call so it is never stale.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleState {
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    muted: bool,
    palette: HandPalette,
    current: FaceStyle,
}

impl StyleState {
    pub fn new(palette: HandPalette) -> Self {
        Self {
            ambient: false,
            low_bit_ambient: false,
            burn_in_protection: false,
            muted: false,
            palette,
            current: derive(palette, false, false),
        }
    }

    pub fn set_ambient(
        &mut self,
        ambient: bool,
    ) -> bool {
        let changed = self.ambient != ambient;
        self.ambient = ambient;
        self.rederive();
        changed
    }

    pub fn set_low_bit_ambient(
        &mut self,
        low_bit_ambient: bool,
    ) -> bool {
        let changed = self.low_bit_ambient != low_bit_ambient;
        self.low_bit_ambient = low_bit_ambient;
        changed
    }

    pub fn set_burn_in_protection(
        &mut self,
        burn_in_protection: bool,
    ) -> bool {
        let changed = self.burn_in_protection != burn_in_protection;
        self.burn_in_protection = burn_in_protection;
        changed
    }

    pub fn set_muted(
        &mut self,
        muted: bool,
    ) -> bool {
        if self.muted == muted {
            return false;
        }
        self.muted = muted;
        self.rederive();
        true
    }

    /// Swap the configured hand colors (new surface config).
    pub fn set_palette(
        &mut self,
        palette: HandPalette,
    ) {
        self.palette = palette;
        self.rederive();
    }

    #[inline]
    pub const fn is_ambient(&self) -> bool { self.ambient }

    #[inline]
    pub const fn is_low_bit_ambient(&self) -> bool { self.low_bit_ambient }

    #[inline]
    pub const fn has_burn_in_protection(&self) -> bool { self.burn_in_protection }

    #[inline]
    pub const fn is_muted(&self) -> bool { self.muted }

    #[inline]
    pub const fn palette(&self) -> HandPalette { self.palette }

    /// Paints derived at the last flag change.
    #[inline]
    pub const fn style(&self) -> &FaceStyle { &self.current }

    /// Rebuild paints from the current flags alone.
    pub fn derive_style(&self) -> FaceStyle { derive(self.palette, self.ambient, self.muted) }

    fn rederive(&mut self) { self.current = self.derive_style(); }
}

impl Default for StyleState {
    fn default() -> Self { Self::new(HandPalette::default()) }
}

fn derive(
    palette: HandPalette,
    ambient: bool,
    muted: bool,
) -> FaceStyle {
    let hand_color = if ambient { WHITE } else { palette.hand };
    let anti_alias = !ambient;
    let hand_alpha = if muted { MUTED_ALPHA } else { OPAQUE_ALPHA };

    let minute_shadow = (!ambient).then_some(Shadow {
        radius: SHADOW_RADIUS,
        dx: 0.0,
        dy: 0.0,
        color: palette.shadow,
    });

    FaceStyle {
        hour: PaintSpec {
            color: hand_color,
            stroke_width: HOUR_STROKE_WIDTH,
            cap: StrokeCap::Round,
            anti_alias,
            shadow: None,
            alpha: hand_alpha,
        },
        minute: PaintSpec {
            color: hand_color,
            stroke_width: MINUTE_STROKE_WIDTH,
            cap: StrokeCap::Round,
            anti_alias,
            shadow: minute_shadow,
            alpha: hand_alpha,
        },
        ticks: PaintSpec {
            color: TICK_ACCENT,
            stroke_width: TICK_STROKE_WIDTH,
            cap: StrokeCap::Butt,
            anti_alias,
            shadow: None,
            alpha: OPAQUE_ALPHA,
        },
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;

    fn all_states() -> impl Iterator<Item = StyleState> {
        (0..16u8).map(|bits| {
            let mut state = StyleState::new(HandPalette {
                hand: Rgb565::new(31, 40, 0),
                shadow: BLACK,
            });
            state.set_ambient(bits & 1 != 0);
            state.set_muted(bits & 2 != 0);
            state.set_low_bit_ambient(bits & 4 != 0);
            state.set_burn_in_protection(bits & 8 != 0);
            state
        })
    }

    fn paints(style: &FaceStyle) -> [&PaintSpec; 3] { [&style.hour, &style.minute, &style.ticks] }

    #[test]
    fn test_interactive_defaults() {
        let state = StyleState::default();
        let style = state.style();

        assert_eq!(style.hour.color, WHITE);
        assert_eq!(style.minute.color, WHITE);
        assert_eq!(style.ticks.color, TICK_ACCENT);
        assert!(paints(style).iter().all(|p| p.anti_alias));
        assert!(style.hour.shadow.is_none());
        assert!(style.ticks.shadow.is_none());
        assert_eq!(
            style.minute.shadow,
            Some(Shadow {
                radius: SHADOW_RADIUS,
                dx: 0.0,
                dy: 0.0,
                color: BLACK
            })
        );
        assert_eq!(style.hour.alpha, 255);
        assert_eq!(style.minute.alpha, 255);
    }

    #[test]
    fn test_accent_color_only_outside_ambient() {
        let accent = Rgb565::new(31, 40, 0);
        let mut state = StyleState::new(HandPalette { hand: accent, shadow: BLACK });
        assert_eq!(state.style().hour.color, accent);

        state.set_ambient(true);
        assert_eq!(state.style().hour.color, WHITE);
        assert_eq!(state.style().minute.color, WHITE);

        state.set_ambient(false);
        assert_eq!(state.style().minute.color, accent);
        assert!(state.style().minute.shadow.is_some(), "leaving ambient restores the shadow");
    }

    #[test]
    fn test_ambient_disables_antialias_and_shadow_for_all_flag_combinations() {
        for state in all_states().filter(StyleState::is_ambient) {
            for paint in paints(state.style()) {
                assert!(!paint.anti_alias, "ambient paint must be aliased: {state:?}");
                assert!(paint.shadow.is_none(), "ambient paint must have no shadow: {state:?}");
            }
        }
    }

    #[test]
    fn test_muted_alpha_for_all_flag_combinations() {
        for state in all_states() {
            let style = state.style();
            let expected = if state.is_muted() { 100 } else { 255 };
            assert_eq!(style.hour.alpha, expected);
            assert_eq!(style.minute.alpha, expected);
            assert_eq!(style.ticks.alpha, 255, "tick alpha never dims");
        }
    }

    #[test]
    fn test_derive_is_idempotent_and_matches_cache() {
        for state in all_states() {
            let first = state.derive_style();
            let second = state.derive_style();
            assert_eq!(first, second);
            assert_eq!(&first, state.style());
        }
    }

    #[test]
    fn test_mute_reports_only_real_changes() {
        let mut state = StyleState::default();
        assert!(!state.set_muted(false));
        assert!(state.set_muted(true));
        assert!(!state.set_muted(true));
        assert!(state.set_muted(false));
    }

    #[test]
    fn test_low_bit_and_burn_in_do_not_touch_paints() {
        let mut state = StyleState::default();
        state.set_ambient(true);
        let before = *state.style();

        assert!(state.set_low_bit_ambient(true));
        assert!(state.set_burn_in_protection(true));
        assert_eq!(*state.style(), before);
    }

    #[test]
    fn test_palette_change_rederives() {
        let mut state = StyleState::default();
        let accent = Rgb565::new(0, 63, 31);
        state.set_palette(HandPalette { hand: accent, shadow: WHITE });
        assert_eq!(state.style().hour.color, accent);
        assert_eq!(state.style().minute.shadow.map(|s| s.color), Some(WHITE));
    }
}
