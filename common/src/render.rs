//! Frame composition.
//!
//! One frame is laid out fresh from the local time, screen geometry and style
//! flags, then issued to a [`Canvas`] in fixed layer order:
//!
//! 1. Background: solid black in constrained ambient mode, otherwise the image
//! 2. Twelve tick marks
//! 3. Hour hand, rotated about the center by the hour angle
//! 4. Minute hand, rotated by `minute - hour` on top of the hour frame
//!
//! Hand transforms are values in [`HandPlacement`]; both hands start from
//! [`Transform::IDENTITY`] every frame, so rotations never accumulate.
//! Surfaces whose size is not known yet get a background and nothing else.

use crate::background::BackgroundAsset;
use crate::clock::LocalTime;
use crate::colors::BLACK;
use crate::config::{CENTER_GAP_RADIUS, TICK_COUNT};
use crate::geometry::{HandAngles, PointF, ScreenGeometry, TickMark, hand_angles, tick_endpoints};
use crate::style::StyleState;
use crate::surface::Canvas;
use crate::transform::Transform;

// =============================================================================
// Background Decision
// =============================================================================

/// How the bottom layer is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackgroundMode {
    /// Draw the scaled background image.
    Image,
    /// Fill with black: ambient on a low-bit or burn-in prone display.
    SolidBlack,
}

/// Pick the background for the current display flags.
pub const fn background_mode(style: &StyleState) -> BackgroundMode {
    if style.is_ambient() && (style.is_low_bit_ambient() || style.has_burn_in_protection()) {
        BackgroundMode::SolidBlack
    } else {
        BackgroundMode::Image
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Where one hand goes this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPlacement {
    /// Rotation applied on top of the enclosing frame, in degrees.
    pub rotation: f32,
    /// Full transform the hand is drawn with.
    pub transform: Transform,
    /// Start of the hand, just off center, in screen coordinates.
    pub from: PointF,
    /// Tip of the hand in screen coordinates.
    pub to: PointF,
}

impl HandPlacement {
    fn new(
        rotation: f32,
        transform: Transform,
        geometry: &ScreenGeometry,
        length: f32,
    ) -> Self {
        let center = geometry.center();
        Self {
            rotation,
            transform,
            from: transform.apply(PointF::new(center.x, center.y - CENTER_GAP_RADIUS)),
            to: transform.apply(PointF::new(center.x, center.y - length)),
        }
    }
}

/// Ticks and hands for a drawable surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialLayout {
    pub angles: HandAngles,
    pub ticks: [TickMark; TICK_COUNT],
    pub hour: HandPlacement,
    pub minute: HandPlacement,
}

/// Everything one frame draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    pub background: BackgroundMode,
    /// `None` while the surface has no usable size.
    pub dial: Option<DialLayout>,
}

/// Compute the layout for one frame. Pure; nothing is carried between calls.
pub fn layout_frame(
    time: LocalTime,
    geometry: &ScreenGeometry,
    style: &StyleState,
) -> FrameLayout {
    let background = background_mode(style);
    if !geometry.is_drawable() {
        return FrameLayout { background, dial: None };
    }

    let angles = hand_angles(time);
    let center = geometry.center();

    let hour_transform = Transform::IDENTITY.then_rotate(angles.hour, center);
    let minute_rotation = angles.minute - angles.hour;
    let minute_transform = hour_transform.then_rotate(minute_rotation, center);

    FrameLayout {
        background,
        dial: Some(DialLayout {
            angles,
            ticks: tick_endpoints(geometry),
            hour: HandPlacement::new(angles.hour, hour_transform, geometry, geometry.hour_hand_length()),
            minute: HandPlacement::new(minute_rotation, minute_transform, geometry, geometry.minute_hand_length()),
        }),
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Lay out and draw one frame onto `canvas`.
///
/// Returns the layout that was drawn.
pub fn render_frame<C: Canvas>(
    time: LocalTime,
    geometry: &ScreenGeometry,
    style: &StyleState,
    background: &BackgroundAsset,
    canvas: &mut C,
) -> FrameLayout {
    let layout = layout_frame(time, geometry, style);
    draw_layout(&layout, style, background, canvas);
    layout
}

/// Issue a precomputed layout to `canvas` with the current paints.
pub fn draw_layout<C: Canvas>(
    layout: &FrameLayout,
    style: &StyleState,
    background: &BackgroundAsset,
    canvas: &mut C,
) {
    match layout.background {
        BackgroundMode::SolidBlack => canvas.fill(BLACK),
        BackgroundMode::Image => canvas.draw_background(background),
    }

    let Some(dial) = &layout.dial else {
        return;
    };
    let paints = style.style();

    for tick in &dial.ticks {
        canvas.draw_line(tick.inner, tick.outer, &paints.ticks);
    }
    canvas.draw_line(dial.hour.from, dial.hour.to, &paints.hour);
    canvas.draw_line(dial.minute.from, dial.minute.to, &paints.minute);
}

// =============================================================================
// Tests
// =============================================================================
