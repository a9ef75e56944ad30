//! Texture buffers.
//!
//! This module provides the [`Texture`] type, a dense `height x width x channels`
//! array of `f32` samples. Textures are owned by the caller and mutated in place
//! by the synthesis stages.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// A 2D image with interleaved channels.
///
/// Samples are stored row-major: the sample for channel `k` of pixel `(row, col)`
/// lives at `(row * width + col) * channels + k`. Values are nominally in
/// `[0, 1]`, but nothing in the crate enforces that range.
///
/// # Example
///
/// ```
/// use seamweave::texture::Texture;
///
/// let mut tex = Texture::new(4, 8, 3);
/// tex.pixel_mut(1, 2).copy_from_slice(&[0.25, 0.5, 0.75]);
/// assert_eq!(tex.pixel(1, 2), &[0.25, 0.5, 0.75]);
/// assert_eq!(tex.shape(), (4, 8, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TextureData")]
pub struct Texture {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<f32>,
}

/// Unchecked serialized form, validated through [`Texture::from_raw`].
#[derive(Deserialize)]
struct TextureData {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<f32>,
}

impl TryFrom<TextureData> for Texture {
    type Error = SynthError;

    fn try_from(raw: TextureData) -> Result<Self> {
        Texture::from_raw(raw.height, raw.width, raw.channels, raw.data)
    }
}

impl Texture {
    /// Create a texture filled with zeros.
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self::filled(height, width, channels, 0.0)
    }

    /// Create a texture with every sample set to `value`.
    ///
    /// # Panics
    /// Panics if `height * width * channels` overflows `usize`.
    pub fn filled(height: usize, width: usize, channels: usize, value: f32) -> Self {
        let len = sample_count(height, width, channels)
            .unwrap_or_else(|| panic!("texture shape {}x{}x{} overflows usize", height, width, channels));
        Self {
            height,
            width,
            channels,
            data: vec![value; len],
        }
    }

    /// Create a texture from raw interleaved samples.
    ///
    /// Fails if `channels` is zero or `data.len()` does not equal
    /// `height * width * channels`.
    pub fn from_raw(height: usize, width: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        if channels == 0 {
            return Err(SynthError::invalid_param("channels", channels, "must be at least 1"));
        }
        let expected = sample_count(height, width, channels).ok_or_else(|| {
            SynthError::invalid_param(
                "shape",
                format!("{}x{}x{}", height, width, channels),
                "sample count overflows usize",
            )
        })?;
        if data.len() != expected {
            return Err(SynthError::invalid_param(
                "data.len()",
                data.len(),
                "does not match height * width * channels",
            ));
        }
        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(height, width, channels)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// Check if the texture has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        (row * self.width + col) * self.channels
    }

    /// Get the samples of a pixel.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> &[f32] {
        let start = self.offset(row, col);
        &self.data[start..start + self.channels]
    }

    /// Get the samples of a pixel mutably.
    #[inline]
    pub fn pixel_mut(&mut self, row: usize, col: usize) -> &mut [f32] {
        let start = self.offset(row, col);
        let channels = self.channels;
        &mut self.data[start..start + channels]
    }

    /// Get a pixel with coordinates clamped to the texture bounds.
    ///
    /// # Panics
    ///
    /// Panics if the texture is empty.
    #[inline]
    pub fn pixel_clamped(&self, row: isize, col: isize) -> &[f32] {
        let r = row.clamp(0, self.height as isize - 1) as usize;
        let c = col.clamp(0, self.width as isize - 1) as usize;
        self.pixel(r, c)
    }

    /// Get the raw sample slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get a mutable slice of the raw samples.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the texture and return its samples.
    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }

    /// Minimum and maximum sample value, or `None` for an empty texture.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

/// `height * width * channels`, or `None` on overflow.
fn sample_count(height: usize, width: usize, channels: usize) -> Option<usize> {
    height.checked_mul(width)?.checked_mul(channels)
}
