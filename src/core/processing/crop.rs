use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::core::params::CropParams;

/// Centered crop rectangle `(left, top, right, bottom)` for a `w`x`h` image.
/// Half of each border fraction is removed from either side, floored.
pub fn crop_rect(width: u32, height: u32, params: &CropParams) -> (u32, u32, u32, u32) {
    let left = (width as f64 * params.width_fraction / 2.0).floor() as u32;
    let top = (height as f64 * params.height_fraction / 2.0).floor() as u32;
    // Never cross over for tiny images or fractions >= 1.0
    let left = left.min(width / 2);
    let top = top.min(height / 2);
    (left, top, width - left, height - top)
}

pub fn crop_card(image: &DynamicImage, params: &CropParams) -> DynamicImage {
    let (w, h) = image.dimensions();
    let (left, top, right, bottom) = crop_rect(w, h, params);
    debug!(
        "Cropping {}x{} -> {}x{} (margins {}px / {}px)",
        w,
        h,
        right - left,
        bottom - top,
        left,
        top
    );
    image.crop_imm(left, top, right - left, bottom - top)
}
