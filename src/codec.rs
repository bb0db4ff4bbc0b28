//! Image encoding and decoding.
//!
//! Bridges [`BitGrid`] and the image formats the outside world speaks:
//! - Loading: any format the `image` crate reads, binarized by luminance
//!   threshold (dark pixels become ink)
//! - Saving: grayscale PNG where ink is pure black on pure white
//! - Transport: base64-wrapped PNG bytes for embedding in JSON
//!
//! Rendering and binarization are inverses at scale 1: a grid saved as
//! PNG and loaded back under any threshold from 1 to 255 is the same
//! grid, because the renderer only emits luminance values 0 and 255.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use crate::grid::BitGrid;

/// Luminance cutoff used when no threshold is given: {0..=127} is ink.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Errors that can occur while converting between grids and images.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    #[error("Scale factor must be at least 1")]
    ZeroScale,

    #[error("Image of {width}x{height} cells at scale {scale} exceeds the maximum pixel dimensions")]
    OversizedImage {
        width: usize,
        height: usize,
        scale: u32,
    },
}

/// Converts an image to a binary grid by luminance threshold.
///
/// The image is first flattened to 8-bit grayscale. Pixels with luminance
/// strictly below `threshold` become ink; everything else becomes
/// background. There is no dithering, so mid-gray regions binarize to
/// flat areas rather than speckle.
///
/// # Arguments
/// * `image` - The source image in any color model
/// * `threshold` - Luminance cutoff, typically [`DEFAULT_THRESHOLD`]
///
/// # Returns
/// The binarized grid, or [`CodecError::EmptyImage`] for zero-sized input.
pub fn binarize(image: &DynamicImage, threshold: u8) -> Result<BitGrid, CodecError> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(CodecError::EmptyImage {
            width: width as usize,
            height: height as usize,
        });
    }

    Ok(BitGrid::from_fn(width as usize, height as usize, |x, y| {
        gray.get_pixel(x as u32, y as u32).0[0] < threshold
    }))
}

/// Decodes image bytes (PNG, JPEG, ...) and binarizes them.
pub fn binarize_bytes(bytes: &[u8], threshold: u8) -> Result<BitGrid, CodecError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| CodecError::ImageLoadError(e.to_string()))?;
    binarize(&image, threshold)
}

/// Loads an image file and binarizes it.
pub fn load_binary<P: AsRef<Path>>(path: P, threshold: u8) -> Result<BitGrid, CodecError> {
    let image = image::open(path).map_err(|e| CodecError::ImageLoadError(e.to_string()))?;
    binarize(&image, threshold)
}

/// Renders a grid as a grayscale image.
///
/// Ink cells become pure black (0), background cells pure white (255).
/// Each grid cell covers a `scale` x `scale` pixel square, which keeps
/// shares legible when viewers resample small images.
///
/// # Arguments
/// * `grid` - The grid to render
/// * `scale` - Output pixels per grid cell, at least 1
///
/// # Returns
/// The rendered image, or an error when the grid is empty, the scale is
/// zero, or the pixel dimensions would overflow `u32`.
pub fn to_image(grid: &BitGrid, scale: u32) -> Result<GrayImage, CodecError> {
    if scale == 0 {
        return Err(CodecError::ZeroScale);
    }
    if grid.is_empty() {
        return Err(CodecError::EmptyImage {
            width: grid.width(),
            height: grid.height(),
        });
    }

    // Pixel dimensions are u32 in the image crate.
    let px_width = grid.width() as u64 * u64::from(scale);
    let px_height = grid.height() as u64 * u64::from(scale);
    let (width, height) = match (u32::try_from(px_width), u32::try_from(px_height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(CodecError::OversizedImage {
                width: grid.width(),
                height: grid.height(),
                scale,
            });
        }
    };

    Ok(GrayImage::from_fn(width, height, |px, py| {
        let x = (px / scale) as usize;
        let y = (py / scale) as usize;
        Luma([if grid.get(x, y) { 0 } else { 255 }])
    }))
}

/// Renders a grid and encodes it as PNG bytes.
pub fn to_png_bytes(grid: &BitGrid, scale: u32) -> Result<Vec<u8>, CodecError> {
    let image = to_image(grid, scale)?;
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CodecError::ImageSaveError(e.to_string()))?;
    Ok(bytes)
}

/// Renders a grid and writes it to a PNG file.
pub fn save_png<P: AsRef<Path>>(grid: &BitGrid, path: P, scale: u32) -> Result<(), CodecError> {
    let image = to_image(grid, scale)?;
    image
        .save(path)
        .map_err(|e| CodecError::ImageSaveError(e.to_string()))
}

/// Renders a grid as a base64-encoded PNG string.
pub fn to_base64_png(grid: &BitGrid, scale: u32) -> Result<String, CodecError> {
    Ok(BASE64.encode(to_png_bytes(grid, scale)?))
}

/// Decodes a base64-encoded image and binarizes it.
///
/// Surrounding whitespace in the encoded text is ignored.
pub fn from_base64_png(encoded: &str, threshold: u8) -> Result<BitGrid, CodecError> {
    let bytes = BASE64.decode(encoded.trim())?;
    binarize_bytes(&bytes, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> BitGrid {
        BitGrid::from_fn(6, 4, |x, y| (x + y) % 3 == 0)
    }

    #[test]
    fn test_binarize_splits_at_threshold() {
        let mut gray = GrayImage::new(3, 1);
        gray.put_pixel(0, 0, Luma([0]));
        gray.put_pixel(1, 0, Luma([127]));
        gray.put_pixel(2, 0, Luma([128]));

        let grid = binarize(&DynamicImage::ImageLuma8(gray), DEFAULT_THRESHOLD).unwrap();
        assert!(grid.get(0, 0));
        assert!(grid.get(1, 0));
        assert!(!grid.get(2, 0));
    }

    #[test]
    fn test_binarize_rejects_empty_image() {
        let gray = GrayImage::new(0, 5);
        assert!(matches!(
            binarize(&DynamicImage::ImageLuma8(gray), DEFAULT_THRESHOLD),
            Err(CodecError::EmptyImage { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_render_uses_pure_black_and_white() {
        let grid = sample_grid();
        let image = to_image(&grid, 1).unwrap();
        for y in 0..4 {
            for x in 0..6 {
                let expected = if grid.get(x, y) { 0 } else { 255 };
                assert_eq!(image.get_pixel(x as u32, y as u32).0[0], expected);
            }
        }
    }

    #[test]
    fn test_render_scales_cells_to_squares() {
        let grid = BitGrid::from_fn(2, 1, |x, _| x == 0);
        let image = to_image(&grid, 3).unwrap();
        assert_eq!(image.dimensions(), (6, 3));
        for py in 0..3 {
            for px in 0..3 {
                assert_eq!(image.get_pixel(px, py).0[0], 0);
                assert_eq!(image.get_pixel(px + 3, py).0[0], 255);
            }
        }
    }

    #[test]
    fn test_render_rejects_zero_scale() {
        assert!(matches!(
            to_image(&sample_grid(), 0),
            Err(CodecError::ZeroScale)
        ));
    }

    #[test]
    fn test_render_rejects_oversized_output() {
        // Two cells per side at the maximum scale would need more pixels
        // than u32 can address.
        assert!(matches!(
            to_image(&BitGrid::new(2, 2), u32::MAX),
            Err(CodecError::OversizedImage {
                width: 2,
                height: 2,
                scale: u32::MAX,
            })
        ));
    }

    #[test]
    fn test_png_roundtrip_preserves_the_grid() {
        let grid = sample_grid();
        let bytes = to_png_bytes(&grid, 1).unwrap();
        let restored = binarize_bytes(&bytes, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_base64_roundtrip_preserves_the_grid() {
        let grid = sample_grid();
        let encoded = to_base64_png(&grid, 1).unwrap();
        let restored = from_base64_png(&encoded, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_base64_decode_ignores_surrounding_whitespace() {
        let grid = sample_grid();
        let encoded = format!("  {}\n", to_base64_png(&grid, 1).unwrap());
        let restored = from_base64_png(&encoded, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        assert!(matches!(
            from_base64_png("not base64!!!", DEFAULT_THRESHOLD),
            Err(CodecError::Base64Error(_))
        ));
    }
}
