//! Background image asset.
//!
//! The face background is a solid-color image of a fixed source size. On each
//! resize a new asset is produced, uniformly scaled so its width matches the
//! surface; the old one is simply replaced.

use embedded_graphics::pixelcolor::Rgb565;

use crate::config::FaceConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundAsset {
    color: Rgb565,
    source_size: (u32, u32),
    width: u32,
    height: u32,
    scale: f32,
}

impl BackgroundAsset {
    /// Unscaled asset of `source_width` x `source_height` filled with `color`.
    pub const fn new(
        color: Rgb565,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        Self {
            color,
            source_size: (source_width, source_height),
            width: source_width,
            height: source_height,
            scale: 1.0,
        }
    }

    pub fn from_config(config: &FaceConfig) -> Self {
        let (width, height) = config.background_size;
        Self::new(config.background_color, width, height)
    }

    /// New asset scaled uniformly from the source so that its width equals `target_width`.
    ///
    /// A zero-width source cannot be scaled and yields an empty image.
    pub fn scaled_to_width(
        &self,
        target_width: u32,
    ) -> Self {
        let (source_width, source_height) = self.source_size;
        let scale = if source_width == 0 {
            0.0
        } else {
            target_width as f32 / source_width as f32
        };

        Self {
            color: self.color,
            source_size: self.source_size,
            width: (source_width as f32 * scale) as u32,
            height: (source_height as f32 * scale) as u32,
            scale,
        }
    }

    #[inline]
    pub const fn color(&self) -> Rgb565 { self.color }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.height }

    /// Scale factor relative to the source image.
    #[inline]
    pub const fn scale(&self) -> f32 { self.scale }

    #[inline]
    pub const fn source_size(&self) -> (u32, u32) { self.source_size }
}

impl Default for BackgroundAsset {
    fn default() -> Self { Self::from_config(&FaceConfig::default()) }
}
