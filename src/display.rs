use image::{ImageResult, Rgb, RgbImage};
use ndarray::ArrayView2;
use std::path::Path;

/// Bytes in one row of a packed RGB8 bitmap
pub fn bytes_per_line(width: u32) -> usize {
    3 * width as usize
}

/// Replicate a grayscale composite into the three channels of an RGB bitmap
pub fn to_rgb_image(composite: ArrayView2<'_, u8>) -> RgbImage {
    let (height, width) = composite.dim();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let value = composite[[y as usize, x as usize]];
        Rgb([value, value, value])
    })
}

pub fn save_png(composite: ArrayView2<'_, u8>, path: impl AsRef<Path>) -> ImageResult<()> {
    to_rgb_image(composite).save_with_format(path, image::ImageFormat::Png)
}
