//! Drawing surface abstraction.
//!
//! The render pipeline decides what goes where and hands it to a [`Canvas`].
//! Two canvases are provided:
//!
//! - [`DrawList`]: records the frame as a list of [`DrawOp`]s (tests, replay)
//! - [`DisplayCanvas`]: strokes into any `DrawTarget<Color = Rgb565>`
//!
//! `DisplayCanvas` notes:
//! - Alpha is composited against the frame backdrop (the last fill or
//!   background color), since RGB565 targets have no alpha channel.
//! - Anti-aliasing is a hint; embedded-graphics strokes are always aliased.
//! - Shadows are drawn first as a wider stroke in the shadow color.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use heapless::Vec;
use micromath::F32;

use crate::background::BackgroundAsset;
use crate::colors::{BLACK, blend_over};
use crate::config::TICK_COUNT;
use crate::geometry::PointF;
use crate::style::{PaintSpec, StrokeCap};

/// Most draw operations a single frame issues: background, ticks, two hands.
pub const FRAME_OP_CAPACITY: usize = 1 + TICK_COUNT + 2;

/// Target the render pipeline draws into.
pub trait Canvas {
    /// Fill the whole surface with one color.
    fn fill(
        &mut self,
        color: Rgb565,
    );

    /// Draw the (already scaled) background image at the origin.
    fn draw_background(
        &mut self,
        background: &BackgroundAsset,
    );

    /// Stroke a line segment.
    fn draw_line(
        &mut self,
        from: PointF,
        to: PointF,
        paint: &PaintSpec,
    );
}

// =============================================================================
// Recording Canvas
// =============================================================================

/// One recorded drawing call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Fill(Rgb565),
    Background(BackgroundAsset),
    Line { from: PointF, to: PointF, paint: PaintSpec },
}

/// Fixed-capacity list of draw operations for one frame.
///
/// A frame always opens with its background layer, so `fill` and
/// `draw_background` start a new recording. Reusing one list across frames
/// leaves only the latest frame in `ops()`.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    ops: Vec<DrawOp, FRAME_OP_CAPACITY>,
}

impl DrawList {
    pub const fn new() -> Self { Self { ops: Vec::new() } }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] { &self.ops }

    #[inline]
    pub fn len(&self) -> usize { self.ops.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.ops.is_empty() }

    pub fn clear(&mut self) { self.ops.clear(); }

    /// Issue the recorded operations, in order, against another canvas.
    pub fn replay<C: Canvas>(
        &self,
        canvas: &mut C,
    ) {
        for op in &self.ops {
            match op {
                DrawOp::Fill(color) => canvas.fill(*color),
                DrawOp::Background(background) => canvas.draw_background(background),
                DrawOp::Line { from, to, paint } => canvas.draw_line(*from, *to, paint),
            }
        }
    }
}

impl Canvas for DrawList {
    fn fill(
        &mut self,
        color: Rgb565,
    ) {
        self.ops.clear();
        self.ops.push(DrawOp::Fill(color)).ok();
    }

    fn draw_background(
        &mut self,
        background: &BackgroundAsset,
    ) {
        self.ops.clear();
        self.ops.push(DrawOp::Background(*background)).ok();
    }

    fn draw_line(
        &mut self,
        from: PointF,
        to: PointF,
        paint: &PaintSpec,
    ) {
        self.ops.push(DrawOp::Line { from, to, paint: *paint }).ok();
    }
}

// =============================================================================
// embedded-graphics Canvas
// =============================================================================

/// Canvas over an embedded-graphics draw target.
pub struct DisplayCanvas<'a, D> {
    display: &'a mut D,
    backdrop: Rgb565,
}

impl<'a, D> DisplayCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(display: &'a mut D) -> Self { Self { display, backdrop: BLACK } }

    /// Color translucent strokes are composited against.
    #[inline]
    pub const fn backdrop(&self) -> Rgb565 { self.backdrop }

    fn stroke(
        &mut self,
        from: Point,
        to: Point,
        width: u32,
        color: Rgb565,
        cap: StrokeCap,
    ) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.display)
            .ok();

        if cap == StrokeCap::Round && width > 1 {
            let cap_style = PrimitiveStyle::with_fill(color);
            for end in [from, to] {
                Circle::with_center(end, width).into_styled(cap_style).draw(self.display).ok();
            }
        }
    }
}

impl<D> Canvas for DisplayCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill(
        &mut self,
        color: Rgb565,
    ) {
        self.display.clear(color).ok();
        self.backdrop = color;
    }

    fn draw_background(
        &mut self,
        background: &BackgroundAsset,
    ) {
        self.backdrop = background.color();
        if background.width() == 0 || background.height() == 0 {
            return;
        }
        Rectangle::new(Point::zero(), Size::new(background.width(), background.height()))
            .into_styled(PrimitiveStyle::with_fill(background.color()))
            .draw(self.display)
            .ok();
    }

    fn draw_line(
        &mut self,
        from: PointF,
        to: PointF,
        paint: &PaintSpec,
    ) {
        let width = pixels(paint.stroke_width).max(1) as u32;

        if let Some(shadow) = paint.shadow {
            let offset = |p: PointF| to_point(PointF::new(p.x + shadow.dx, p.y + shadow.dy));
            let shadow_color = blend_over(shadow.color, self.backdrop, paint.alpha);
            let shadow_width = width + pixels(shadow.radius).max(0) as u32;
            self.stroke(offset(from), offset(to), shadow_width, shadow_color, paint.cap);
        }

        let color = blend_over(paint.color, self.backdrop, paint.alpha);
        self.stroke(to_point(from), to_point(to), width, color, paint.cap);
    }
}

#[inline]
fn pixels(value: f32) -> i32 { F32(value).round().0 as i32 }

#[inline]
fn to_point(p: PointF) -> Point { Point::new(pixels(p.x), pixels(p.y)) }

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::colors::{BACKGROUND_PURPLE, TICK_ACCENT, WHITE};

    /// Minimal in-memory framebuffer.
    struct Framebuffer {
        width: u32,
        height: u32,
        pixels: std::vec::Vec<Rgb565>,
    }

    impl Framebuffer {
        fn new(
            width: u32,
            height: u32,
        ) -> Self {
            Self {
                width,
                height,
                pixels: std::vec![Rgb565::new(1, 1, 1); (width * height) as usize],
            }
        }

        fn pixel(
            &self,
            x: i32,
            y: i32,
        ) -> Rgb565 {
            self.pixels[(y as u32 * self.width + x as u32) as usize]
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size { Size::new(self.width, self.height) }
    }

    impl DrawTarget for Framebuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0 && point.y >= 0 && (point.x as u32) < self.width && (point.y as u32) < self.height {
                    let index = (point.y as u32 * self.width + point.x as u32) as usize;
                    self.pixels[index] = color;
                }
            }
            Ok(())
        }
    }

    fn paint(
        color: Rgb565,
        alpha: u8,
    ) -> PaintSpec {
        PaintSpec {
            color,
            stroke_width: 3.0,
            cap: StrokeCap::Butt,
            anti_alias: true,
            shadow: None,
            alpha,
        }
    }

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.fill(BLACK);
        list.draw_line(PointF::new(0.0, 0.0), PointF::new(1.0, 1.0), &paint(TICK_ACCENT, 255));

        assert_eq!(list.len(), 2);
        assert_eq!(list.ops()[0], DrawOp::Fill(BLACK));
        assert!(matches!(list.ops()[1], DrawOp::Line { paint, .. } if paint.color == TICK_ACCENT));
    }

    #[test]
    fn test_draw_list_capacity_is_bounded() {
        let mut list = DrawList::new();
        list.fill(BLACK);
        for _ in 0..(FRAME_OP_CAPACITY + 5) {
            list.draw_line(PointF::new(0.0, 0.0), PointF::new(1.0, 1.0), &paint(WHITE, 255));
        }
        assert_eq!(list.len(), FRAME_OP_CAPACITY);
    }

    #[test]
    fn test_background_layer_starts_new_frame() {
        let mut list = DrawList::new();
        list.fill(BLACK);
        list.draw_line(PointF::new(0.0, 0.0), PointF::new(1.0, 1.0), &paint(WHITE, 255));

        let asset = BackgroundAsset::new(BACKGROUND_PURPLE, 4, 4);
        list.draw_background(&asset);
        assert_eq!(list.ops(), &[DrawOp::Background(asset)]);

        list.fill(BLACK);
        assert_eq!(list.ops(), &[DrawOp::Fill(BLACK)]);
    }

    #[test]
    fn test_fill_clears_whole_target() {
        let mut fb = Framebuffer::new(8, 8);
        DisplayCanvas::new(&mut fb).fill(BLACK);
        assert!(fb.pixels.iter().all(|&p| p == BLACK));
    }

    #[test]
    fn test_background_covers_scaled_area_only() {
        let mut fb = Framebuffer::new(10, 10);
        let asset = BackgroundAsset::new(BACKGROUND_PURPLE, 4, 2).scaled_to_width(8);
        let mut canvas = DisplayCanvas::new(&mut fb);
        canvas.draw_background(&asset);
        assert_eq!(canvas.backdrop(), BACKGROUND_PURPLE);

        assert_eq!(fb.pixel(0, 0), BACKGROUND_PURPLE);
        assert_eq!(fb.pixel(7, 3), BACKGROUND_PURPLE);
        assert_ne!(fb.pixel(8, 0), BACKGROUND_PURPLE);
        assert_ne!(fb.pixel(0, 4), BACKGROUND_PURPLE);
    }

    #[test]
    fn test_line_composited_against_backdrop() {
        let mut fb = Framebuffer::new(20, 20);
        let mut canvas = DisplayCanvas::new(&mut fb);
        canvas.fill(BLACK);
        canvas.draw_line(PointF::new(10.0, 2.0), PointF::new(10.0, 18.0), &paint(WHITE, 100));

        assert_eq!(fb.pixel(10, 10), blend_over(WHITE, BLACK, 100));
        assert_eq!(fb.pixel(2, 10), BLACK);
    }

    #[test]
    fn test_shadow_drawn_under_stroke() {
        let mut fb = Framebuffer::new(40, 40);
        let mut canvas = DisplayCanvas::new(&mut fb);
        canvas.fill(BACKGROUND_PURPLE);

        let mut spec = paint(WHITE, 255);
        spec.shadow = Some(crate::style::Shadow {
            radius: 6.0,
            dx: 0.0,
            dy: 0.0,
            color: BLACK,
        });
        canvas.draw_line(PointF::new(20.0, 5.0), PointF::new(20.0, 35.0), &spec);

        assert_eq!(fb.pixel(20, 20), WHITE, "hand on top");
        assert_eq!(fb.pixel(23, 20), BLACK, "shadow visible beside the hand");
        assert_eq!(fb.pixel(30, 20), BACKGROUND_PURPLE);
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut fb = Framebuffer::new(30, 30);
        let mut canvas = DisplayCanvas::new(&mut fb);
        canvas.fill(BLACK);

        let mut spec = paint(WHITE, 255);
        spec.stroke_width = 7.0;
        spec.cap = StrokeCap::Round;
        canvas.draw_line(PointF::new(15.0, 10.0), PointF::new(15.0, 20.0), &spec);

        assert_eq!(fb.pixel(15, 8), WHITE, "cap covers above the start point");
        assert_eq!(fb.pixel(15, 22), WHITE, "cap covers below the end point");
    }

    #[test]
    fn test_replay_matches_direct_drawing() {
        let mut list = DrawList::new();
        list.fill(BLACK);
        list.draw_line(PointF::new(2.0, 2.0), PointF::new(12.0, 12.0), &paint(WHITE, 255));

        let mut replayed = Framebuffer::new(16, 16);
        list.replay(&mut DisplayCanvas::new(&mut replayed));

        let mut direct = Framebuffer::new(16, 16);
        let mut canvas = DisplayCanvas::new(&mut direct);
        canvas.fill(BLACK);
        canvas.draw_line(PointF::new(2.0, 2.0), PointF::new(12.0, 12.0), &paint(WHITE, 255));

        assert_eq!(replayed.pixels, direct.pixels);
    }
}
