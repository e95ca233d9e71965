use image::{Rgb, RgbImage};
use tracing::trace;

/// Extend `image` by `bleed` pixels on every side.
///
/// The interior at `(bleed, bleed)` is the untouched input. Edge strips repeat the
/// outermost row or column outward; each `bleed`x`bleed` corner is filled with the
/// matching corner pixel. No new scene content ever enters the margin.
pub fn add_bleed(image: &RgbImage, bleed: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    if bleed == 0 || w == 0 || h == 0 {
        return image.clone();
    }

    let out_w = w + 2 * bleed;
    let out_h = h + 2 * bleed;
    trace!("Adding {}px bleed: {}x{} -> {}x{}", bleed, w, h, out_w, out_h);

    let src = image.as_raw();
    let src_stride = w as usize * 3;
    let dst_stride = out_w as usize * 3;
    let pad = bleed as usize * 3;
    let mut out = vec![0u8; dst_stride * out_h as usize];

    // Interior rows with their left/right strips, copied per row
    for row in 0..h as usize {
        let src_row = &src[row * src_stride..(row + 1) * src_stride];
        let dst_offset = (row + bleed as usize) * dst_stride;
        let dst_row = &mut out[dst_offset..dst_offset + dst_stride];

        let first = &src_row[..3];
        let last = &src_row[src_stride - 3..];
        for px in dst_row[..pad].chunks_exact_mut(3) {
            px.copy_from_slice(first);
        }
        dst_row[pad..pad + src_stride].copy_from_slice(src_row);
        for px in dst_row[pad + src_stride..].chunks_exact_mut(3) {
            px.copy_from_slice(last);
        }
    }

    // Top and bottom margins repeat the first and last extended rows; since those
    // rows already carry the corner pixel in their side strips, the corners come
    // out as solid blocks of the matching corner color.
    let first_row_offset = bleed as usize * dst_stride;
    let last_row_offset = (h + bleed - 1) as usize * dst_stride;
    let first_row = out[first_row_offset..first_row_offset + dst_stride].to_vec();
    let last_row = out[last_row_offset..last_row_offset + dst_stride].to_vec();
    for row in 0..bleed as usize {
        let top = row * dst_stride;
        out[top..top + dst_stride].copy_from_slice(&first_row);
        let bottom = (h as usize + bleed as usize + row) * dst_stride;
        out[bottom..bottom + dst_stride].copy_from_slice(&last_row);
    }

    RgbImage::from_raw(out_w, out_h, out).unwrap_or_else(|| RgbImage::new(out_w, out_h))
}

/// Corner pixels in top-left, top-right, bottom-left, bottom-right order.
pub fn corner_pixels(image: &RgbImage) -> [Rgb<u8>; 4] {
    let (w, h) = image.dimensions();
    [
        *image.get_pixel(0, 0),
        *image.get_pixel(w - 1, 0),
        *image.get_pixel(0, h - 1),
        *image.get_pixel(w - 1, h - 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, ((x + y) * 3) as u8]))
    }

    #[test]
    fn output_size_grows_by_twice_the_bleed() {
        let out = add_bleed(&gradient(7, 5), 3);
        assert_eq!(out.dimensions(), (13, 11));
    }

    #[test]
    fn interior_is_pixel_identical() {
        let img = gradient(9, 4);
        let b = 4;
        let out = add_bleed(&img, b);
        for (x, y, px) in img.enumerate_pixels() {
            assert_eq!(out.get_pixel(x + b, y + b), px);
        }
    }

    #[test]
    fn corners_are_solid_corner_colors() {
        let img = gradient(6, 8);
        let b = 5;
        let out = add_bleed(&img, b);
        let [tl, tr, bl, br] = corner_pixels(&img);
        let (ow, oh) = out.dimensions();
        for dy in 0..b {
            for dx in 0..b {
                assert_eq!(out.get_pixel(dx, dy), &tl);
                assert_eq!(out.get_pixel(ow - 1 - dx, dy), &tr);
                assert_eq!(out.get_pixel(dx, oh - 1 - dy), &bl);
                assert_eq!(out.get_pixel(ow - 1 - dx, oh - 1 - dy), &br);
            }
        }
    }

    #[test]
    fn edges_repeat_outermost_pixels() {
        let img = gradient(6, 8);
        let b = 2;
        let out = add_bleed(&img, b);
        for x in 0..6 {
            for dy in 0..b {
                assert_eq!(out.get_pixel(x + b, dy), img.get_pixel(x, 0));
                assert_eq!(out.get_pixel(x + b, 8 + b + dy), img.get_pixel(x, 7));
            }
        }
        for y in 0..8 {
            for dx in 0..b {
                assert_eq!(out.get_pixel(dx, y + b), img.get_pixel(0, y));
                assert_eq!(out.get_pixel(6 + b + dx, y + b), img.get_pixel(5, y));
            }
        }
    }

    #[test]
    fn zero_bleed_is_a_copy() {
        let img = gradient(3, 3);
        assert_eq!(add_bleed(&img, 0), img);
    }
}
