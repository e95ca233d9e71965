//! Heuristic tone adjustments for card images.
//!
//! Stages always run in this order: saturation, brightness, contrast, gamma,
//! black-point, warmth. They do not commute, so callers must not reorder them.
//! Every stage is a no-op at its neutral value.
//!
//! Saturation, brightness and contrast blend the image with a degenerate version
//! of itself: `out = degenerate + factor * (in - degenerate)`. The degenerate image
//! is the luma grayscale for saturation, black for brightness, and a flat gray at
//! the mean luma for contrast.
use image::RgbImage;
use tracing::trace;

use crate::core::params::AdjustmentParams;

/// How strongly one unit of warmth scales the red and blue channels.
pub const WARMTH_SCALE: f64 = 0.3;

pub fn adjust_card_image(image: &RgbImage, params: &AdjustmentParams) -> RgbImage {
    let mut out = image.clone();
    if params.is_neutral() {
        return out;
    }
    trace!("Adjusting {}x{} card: {:?}", out.width(), out.height(), params);

    enhance_color(&mut out, params.saturation);
    enhance_brightness(&mut out, params.brightness);
    enhance_contrast(&mut out, params.contrast);
    apply_gamma(&mut out, params.gamma);
    shift_blackpoint(&mut out, params.blackpoint);
    apply_warmth(&mut out, params.warmth);
    out
}

/// ITU-R 601 luma in 16-bit fixed point.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

#[inline]
fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let d = degenerate as f32;
    (d + factor * (value as f32 - d)).round().clamp(0.0, 255.0) as u8
}

/// Saturation: 0.0 is grayscale, 1.0 unchanged, 2.0 doubles chroma.
pub fn enhance_color(image: &mut RgbImage, factor: f64) {
    if factor == 1.0 {
        return;
    }
    let f = factor as f32;
    for px in image.pixels_mut() {
        let [r, g, b] = px.0;
        let l = luma(r, g, b);
        px.0 = [blend(l, r, f), blend(l, g, f), blend(l, b, f)];
    }
}

/// Brightness: scales every channel towards or away from black.
pub fn enhance_brightness(image: &mut RgbImage, factor: f64) {
    if factor == 1.0 {
        return;
    }
    let f = factor as f32;
    for v in image.iter_mut() {
        *v = blend(0, *v, f);
    }
}

/// Contrast: scales every channel around the image's mean luma.
pub fn enhance_contrast(image: &mut RgbImage, factor: f64) {
    if factor == 1.0 {
        return;
    }
    let mean = mean_luma(image);
    let f = factor as f32;
    for v in image.iter_mut() {
        *v = blend(mean, *v, f);
    }
}

/// Mean luma rounded half up; 0 for an empty image.
pub fn mean_luma(image: &RgbImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = image
        .pixels()
        .map(|px| luma(px.0[0], px.0[1], px.0[2]) as u64)
        .sum();
    ((sum as f64 / count as f64) + 0.5) as u8
}

/// Lookup table for `255 * (v / 255) ^ (1 / gamma)`.
pub fn gamma_lut(gamma: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let inv = 1.0 / gamma;
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = ((i as f64 / 255.0).powf(inv) * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    lut
}

pub fn apply_gamma(image: &mut RgbImage, gamma: f64) {
    if gamma == 1.0 || gamma <= 0.0 {
        return;
    }
    let lut = gamma_lut(gamma);
    for v in image.iter_mut() {
        *v = lut[*v as usize];
    }
}

/// Adds a signed offset to every channel, clamped to `0..=255`.
pub fn shift_blackpoint(image: &mut RgbImage, offset: i32) {
    if offset == 0 {
        return;
    }
    for v in image.iter_mut() {
        *v = (*v as i32 + offset).clamp(0, 255) as u8;
    }
}

/// Red is scaled by `1 + warmth * 0.3` and blue by `1 - warmth * 0.3`; green is
/// left alone. One signed formula covers both directions.
pub fn apply_warmth(image: &mut RgbImage, warmth: f64) {
    if warmth == 0.0 {
        return;
    }
    let red_gain = 1.0 + warmth * WARMTH_SCALE;
    let blue_gain = 1.0 - warmth * WARMTH_SCALE;
    for px in image.pixels_mut() {
        px.0[0] = (px.0[0] as f64 * red_gain).round().clamp(0.0, 255.0) as u8;
        px.0[2] = (px.0[2] as f64 * blue_gain).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> RgbImage {
        RgbImage::from_fn(16, 9, |x, y| {
            Rgb([(x * 16) as u8, (y * 28) as u8, ((x * 7 + y * 11) % 256) as u8])
        })
    }

    fn flat(v: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(4, 4, Rgb(v))
    }

    #[test]
    fn neutral_settings_are_identity() {
        let img = sample();
        assert_eq!(adjust_card_image(&img, &AdjustmentParams::default()), img);
    }

    #[test]
    fn every_stage_is_identity_at_neutral() {
        let img = sample();
        let mut out = img.clone();
        enhance_color(&mut out, 1.0);
        enhance_brightness(&mut out, 1.0);
        enhance_contrast(&mut out, 1.0);
        apply_gamma(&mut out, 1.0);
        shift_blackpoint(&mut out, 0);
        apply_warmth(&mut out, 0.0);
        assert_eq!(out, img);
    }

    #[test]
    fn gamma_two_brightens_midtones() {
        // 255 * (64 / 255) ^ 0.5 = 127.75
        let lut = gamma_lut(2.0);
        assert_eq!(lut[64], 128);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);

        let mut img = flat([64, 64, 64]);
        apply_gamma(&mut img, 2.0);
        assert_eq!(img.get_pixel(0, 0), &Rgb([128, 128, 128]));
    }

    #[test]
    fn gamma_lut_is_identity_at_one() {
        let lut = gamma_lut(1.0);
        assert!(lut.iter().enumerate().all(|(i, &v)| v as usize == i));
    }

    #[test]
    fn blackpoint_offsets_and_clamps() {
        let mut img = flat([10, 128, 250]);
        shift_blackpoint(&mut img, 20);
        assert_eq!(img.get_pixel(1, 1), &Rgb([30, 148, 255]));
        shift_blackpoint(&mut img, -50);
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 98, 205]));
    }

    #[test]
    fn warmth_is_one_signed_formula() {
        let mut warm = flat([100, 100, 100]);
        apply_warmth(&mut warm, 1.0);
        assert_eq!(warm.get_pixel(0, 0), &Rgb([130, 100, 70]));

        let mut cool = flat([100, 100, 100]);
        apply_warmth(&mut cool, -1.0);
        assert_eq!(cool.get_pixel(0, 0), &Rgb([70, 100, 130]));

        let mut hot = flat([250, 5, 250]);
        apply_warmth(&mut hot, 1.0);
        assert_eq!(hot.get_pixel(0, 0), &Rgb([255, 5, 175]));
    }

    #[test]
    fn zero_saturation_is_grayscale() {
        let mut img = sample();
        enhance_color(&mut img, 0.0);
        for px in img.pixels() {
            assert_eq!(px.0[0], px.0[1]);
            assert_eq!(px.0[1], px.0[2]);
        }
    }

    #[test]
    fn brightness_scales_towards_black() {
        let mut img = flat([100, 50, 200]);
        enhance_brightness(&mut img, 0.5);
        assert_eq!(img.get_pixel(0, 0), &Rgb([50, 25, 100]));
        enhance_brightness(&mut img, 4.0);
        assert_eq!(img.get_pixel(0, 0), &Rgb([200, 100, 255]));
    }

    #[test]
    fn zero_contrast_flattens_to_mean_luma() {
        let mut img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgb([0, 0, 0]) } else { Rgb([200, 200, 200]) }
        });
        enhance_contrast(&mut img, 0.0);
        assert_eq!(img.get_pixel(0, 0), &Rgb([100, 100, 100]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([100, 100, 100]));
    }

    #[test]
    fn stage_order_matters() {
        let params = AdjustmentParams {
            brightness: 2.0,
            blackpoint: -50,
            ..Default::default()
        };
        let out = adjust_card_image(&flat([100, 100, 100]), &params);
        // brightness first: 100 * 2 - 50; the reverse order would give 100
        assert_eq!(out.get_pixel(0, 0), &Rgb([150, 150, 150]));
    }

    #[test]
    fn luma_of_gray_is_gray() {
        for v in [0u8, 1, 64, 128, 254, 255] {
            assert_eq!(luma(v, v, v), v);
        }
    }
}
