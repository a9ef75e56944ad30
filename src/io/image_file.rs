//! Loading and saving textures as image files.
//!
//! Samples are mapped between `[0, 1]` floats and 8-bit image channels.
//! Channel counts 1 to 4 map to grayscale, grayscale + alpha, RGB and RGBA.

use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{Result, SynthError};
use crate::texture::Texture;

/// Load an image file as a texture.
///
/// The channel count follows the file's color type; 16-bit and float images
/// are converted to `[0, 1]` floats as well.
pub fn load_texture<P: AsRef<Path>>(path: P) -> Result<Texture> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| SynthError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    texture_from_image(&img)
}

/// Convert a decoded image to a texture.
pub fn texture_from_image(img: &DynamicImage) -> Result<Texture> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let (channels, data) = match img.color().channel_count() {
        1 => (1, img.to_luma32f().into_raw()),
        2 => (2, img.to_luma_alpha32f().into_raw()),
        3 => (3, img.to_rgb32f().into_raw()),
        _ => (4, img.to_rgba32f().into_raw()),
    };
    Texture::from_raw(h, w, channels, data)
}

/// Save a texture as an image file. The format follows the file extension.
///
/// Samples are clamped to `[0, 1]` and quantized to 8 bits.
pub fn save_texture<P: AsRef<Path>>(texture: &Texture, path: P) -> Result<()> {
    let path = path.as_ref();
    let img = texture_to_image(texture)?;
    img.save(path).map_err(|e| SynthError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Convert a texture to an 8-bit image.
pub fn texture_to_image(texture: &Texture) -> Result<DynamicImage> {
    let (h, w, channels) = texture.shape();
    let bytes: Vec<u8> = texture
        .as_slice()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    let (w, h) = (w as u32, h as u32);

    let img = match channels {
        1 => GrayImage::from_raw(w, h, bytes).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(w, h, bytes).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(w, h, bytes).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, bytes).map(DynamicImage::ImageRgba8),
        n => return Err(SynthError::invalid_param("channels", n, "images support 1 to 4 channels")),
    };
    img.ok_or_else(|| SynthError::invalid_param("texture", format!("{}x{}", h, w), "buffer size mismatch"))
}
