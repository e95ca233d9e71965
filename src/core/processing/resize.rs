use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbImage;
use tracing::trace;

use crate::error::{Error, Result};

/// Resize to exactly `target_cols`x`target_rows` with Lanczos3.
/// Aspect ratio is not preserved; a card whose proportions differ from the
/// target is stretched to fit.
pub fn resize_rgb(image: &RgbImage, target_cols: u32, target_rows: u32) -> Result<RgbImage> {
    let (cols, rows) = image.dimensions();
    if (cols, rows) == (target_cols, target_rows) {
        return Ok(image.clone());
    }
    if target_cols == 0 || target_rows == 0 || cols == 0 || rows == 0 {
        return Err(Error::InvalidArgument {
            arg: "size",
            value: format!("{}x{} -> {}x{}", cols, rows, target_cols, target_rows),
        });
    }
    trace!(
        "Resizing {}x{} -> {}x{} (Lanczos3)",
        cols, rows, target_cols, target_rows
    );

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(cols, rows, image.as_raw().to_vec(), PixelType::U8x3)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    RgbImage::from_raw(target_cols, target_rows, dst_image.into_vec())
        .ok_or_else(|| Error::Resize("resized buffer has unexpected length".to_string()))
}
