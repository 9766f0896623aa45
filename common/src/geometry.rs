//! Geometry engine: hand angles from time, dial proportions from screen size.
//!
//! All angles are degrees clockwise from twelve o'clock. Screen coordinates
//! have y pointing down, so the unit vector for angle `a` is `(sin a, -cos a)`.
//!
//! Nothing here is cached between frames; callers recompute from the current
//! [`LocalTime`] and [`ScreenGeometry`] every render.

use micromath::F32;

use crate::clock::LocalTime;
use crate::config::{
    DEGREES_PER_HOUR,
    DEGREES_PER_MINUTE,
    DEGREES_PER_TICK,
    HOUR_DEGREES_PER_MINUTE,
    HOUR_HAND_FRACTION,
    MINUTE_HAND_FRACTION,
    TICK_COUNT,
    TICK_LENGTH,
};

// =============================================================================
// Points
// =============================================================================

/// Sub-pixel screen point.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }
}

/// Unit vector pointing at `degrees` clockwise from "up".
#[inline]
pub fn dial_direction(degrees: f32) -> PointF {
    let radians = F32(degrees.to_radians());
    PointF::new(radians.sin().0, -radians.cos().0)
}

// =============================================================================
// Screen Geometry
// =============================================================================

/// Surface dimensions and every length derived from them.
///
/// Only width and height are stored; center, hand lengths and tick radii are
/// computed on demand so they can never disagree with `center_x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScreenGeometry {
    width: u32,
    height: u32,
}

impl ScreenGeometry {
    pub const fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self { width, height }
    }

    /// Clamp signed host dimensions; negative sizes become zero (not drawable).
    pub fn from_signed(
        width: i32,
        height: i32,
    ) -> Self {
        Self::new(width.max(0) as u32, height.max(0) as u32)
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.height }

    /// Whether ticks and hands can be drawn. Zero-sized surfaces only get a background.
    #[inline]
    pub const fn is_drawable(&self) -> bool { self.width > 0 && self.height > 0 }

    #[inline]
    pub fn center_x(&self) -> f32 { self.width as f32 / 2.0 }

    #[inline]
    pub fn center_y(&self) -> f32 { self.height as f32 / 2.0 }

    #[inline]
    pub fn center(&self) -> PointF { PointF::new(self.center_x(), self.center_y()) }

    #[inline]
    pub fn minute_hand_length(&self) -> f32 { self.center_x() * MINUTE_HAND_FRACTION }

    #[inline]
    pub fn hour_hand_length(&self) -> f32 { self.center_x() * HOUR_HAND_FRACTION }

    #[inline]
    pub fn inner_tick_radius(&self) -> f32 { self.center_x() - TICK_LENGTH }

    #[inline]
    pub fn outer_tick_radius(&self) -> f32 { self.center_x() }
}

// =============================================================================
// Hand Angles
// =============================================================================

/// Hand rotations for one instant, degrees clockwise from twelve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
}

/// Hour and minute hand angles for a local time.
///
/// The minute hand steps 6 degrees per whole minute. The hour hand moves 30
/// degrees per hour on a 12-hour dial plus 0.5 degrees per minute, so it creeps
/// between hour marks.
pub fn hand_angles(time: LocalTime) -> HandAngles {
    let minute = f32::from(time.minute);
    HandAngles {
        hour: f32::from(time.hour_of_12()) * DEGREES_PER_HOUR + minute * HOUR_DEGREES_PER_MINUTE,
        minute: minute * DEGREES_PER_MINUTE,
    }
}

// =============================================================================
// Tick Marks
// =============================================================================

/// One tick mark, from the inner radius out to the dial edge.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TickMark {
    pub inner: PointF,
    pub outer: PointF,
}

/// Endpoints of the 12 hour ticks, starting at twelve o'clock and going clockwise.
pub fn tick_endpoints(geometry: &ScreenGeometry) -> [TickMark; TICK_COUNT] {
    let center = geometry.center();
    let inner_radius = geometry.inner_tick_radius();
    let outer_radius = geometry.outer_tick_radius();

    core::array::from_fn(|index| {
        let direction = dial_direction(index as f32 * DEGREES_PER_TICK);
        TickMark {
            inner: PointF::new(center.x + direction.x * inner_radius, center.y + direction.y * inner_radius),
            outer: PointF::new(center.x + direction.x * outer_radius, center.y + direction.y * outer_radius),
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
