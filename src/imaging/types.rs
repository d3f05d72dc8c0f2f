use std::ops::Range;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{Result, ShapeError};

/// Fixed-point BT.601 luma weights (14 fractional bits) for R, G and B
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// An immutable, decoded image held as interleaved 8-bit samples
///
/// Samples are stored row-major from the top-left corner, `channels`
/// samples per pixel. Analyzers only ever derive new buffers from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Wrap raw interleaved samples, returning `None` when the length does not match
    pub fn from_raw(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Option<Self> {
        if channels == 0 || channels > 4 {
            return None;
        }
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(channels)?;
        if data.len() != expected {
            return None;
        }
        Some(Self { width, height, channels, data })
    }

    /// Narrow any decoded image to 8-bit samples, keeping its channel layout
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let channels = image.color().channel_count() as usize;

        let data = match (channels, image) {
            (_, DynamicImage::ImageLuma8(buffer)) => buffer.into_raw(),
            (_, DynamicImage::ImageLumaA8(buffer)) => buffer.into_raw(),
            (_, DynamicImage::ImageRgb8(buffer)) => buffer.into_raw(),
            (_, DynamicImage::ImageRgba8(buffer)) => buffer.into_raw(),
            (1, other) => other.to_luma8().into_raw(),
            (2, other) => other.to_luma_alpha8().into_raw(),
            (3, other) => other.to_rgb8().into_raw(),
            (_, other) => other.to_rgba8().into_raw(),
        };

        Self {
            width,
            height,
            channels: channels.clamp(1, 4),
            data,
        }
    }

    /// Create an RGB image from an `image` buffer
    pub fn from_rgb(buffer: RgbImage) -> Self {
        Self::from_dynamic(DynamicImage::ImageRgb8(buffer))
    }

    /// Create an RGBA image from an `image` buffer
    pub fn from_rgba(buffer: RgbaImage) -> Self {
        Self::from_dynamic(DynamicImage::ImageRgba8(buffer))
    }

    /// Create an image of the given size where every pixel is `pixel`
    ///
    /// Returns `None` unless `pixel` holds between 1 and 4 samples.
    pub fn new_filled(width: u32, height: u32, pixel: &[u8]) -> Option<Self> {
        let count = (width as usize).checked_mul(height as usize)?;
        let data = pixel.iter().copied().cycle().take(count * pixel.len()).collect();
        Self::from_raw(width, height, pixel.len(), data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples per pixel (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA)
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Samples of the pixel at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.channels)
    }

    /// Fail with a shape error unless the image carries RGB channels
    pub fn require_color(&self, operation: &str) -> Result<()> {
        if self.channels < 3 {
            return Err(ShapeError::ChannelCount {
                operation: operation.to_string(),
                expected: "3 or 4".to_string(),
                actual: self.channels,
            }
            .into());
        }
        Ok(())
    }

    /// Single-channel luma plane, `width * height` bytes, alpha ignored
    pub fn luma_plane(&self) -> Result<Vec<u8>> {
        self.require_color("luma conversion")?;
        Ok(self
            .pixels()
            .map(|px| luma(px[0], px[1], px[2]))
            .collect())
    }

    /// Every sample (all channels) inside the half-open pixel rectangle
    pub fn region_samples(
        &self,
        xs: Range<u32>,
        ys: Range<u32>,
    ) -> impl Iterator<Item = u8> + '_ {
        let row_len = self.width as usize * self.channels;
        let start_col = xs.start as usize * self.channels;
        let end_col = xs.end.max(xs.start) as usize * self.channels;

        ys.flat_map(move |y| {
            let row = &self.data[y as usize * row_len..(y as usize + 1) * row_len];
            row[start_col..end_col].iter().copied()
        })
    }
}

/// BT.601 luma with round-half-up in 14-bit fixed point
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}
