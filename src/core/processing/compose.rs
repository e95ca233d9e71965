use image::{RgbImage, imageops};
use tracing::{debug, trace};

use crate::core::layout::{PageLayout, Slot};
use crate::core::params::AdjustmentParams;
use crate::core::processing::adjust::adjust_card_image;
use crate::core::processing::bleed::add_bleed;
use crate::core::processing::resize::resize_rgb;
use crate::error::Result;
use crate::types::Orientation;

/// Turn the card a quarter counter-clockwise when its orientation differs from
/// the slot's. The canvas grows to fit, nothing is cropped.
pub fn orient_for_slot(card: &RgbImage, slot: &Slot) -> RgbImage {
    let (w, h) = card.dimensions();
    if Orientation::of(w, h) != slot.orientation() {
        trace!(
            "Rotating {}x{} card to match {} slot",
            w,
            h,
            slot.orientation()
        );
        imageops::rotate270(card)
    } else {
        card.clone()
    }
}

/// Orient, resize to the slot, adjust tone, then extend by `bleed`.
pub fn prepare_card(
    card: &RgbImage,
    slot: &Slot,
    params: &AdjustmentParams,
    bleed: u32,
) -> Result<RgbImage> {
    let oriented = orient_for_slot(card, slot);
    let resized = resize_rgb(&oriented, slot.width(), slot.height())?;
    let adjusted = adjust_card_image(&resized, params);
    Ok(add_bleed(&adjusted, bleed))
}

/// Compose one page: cards fill slots in order on a fresh copy of `template`.
/// Extra cards beyond the slot count are ignored; unfilled slots keep the
/// template's pixels.
pub fn build_page(
    template: &RgbImage,
    cards: &[&RgbImage],
    layout: &PageLayout,
    params: &AdjustmentParams,
) -> Result<RgbImage> {
    let mut page = template.clone();
    let bleed = layout.bleed_px;

    for (i, (card, slot)) in cards.iter().zip(&layout.slots).enumerate() {
        let prepared = prepare_card(card, slot, params, bleed)?;
        let x = slot.x1 as i64 - bleed as i64;
        let y = slot.y1 as i64 - bleed as i64;
        // replace() clips anything that falls outside the page
        imageops::replace(&mut page, &prepared, x, y);
        trace!("Placed card {} at ({}, {})", i, x, y);
    }

    debug!(
        "Composed page with {}/{} slots filled",
        cards.len().min(layout.slots.len()),
        layout.slots.len()
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn mini_layout() -> PageLayout {
        PageLayout {
            template: "mini.png".to_string(),
            bleed_px: 2,
            slots: vec![
                Slot::at(4, 4, (12, 8)),
                Slot::at(24, 4, (12, 8)),
                Slot::at(4, 20, (8, 12)),
            ],
        }
    }

    fn template() -> RgbImage {
        RgbImage::from_fn(48, 40, |x, y| Rgb([x as u8, y as u8, 200]))
    }

    #[test]
    fn orientation_mismatch_rotates_counter_clockwise() {
        let slot = Slot::at(0, 0, (10, 4));
        let portrait = RgbImage::from_fn(2, 3, |x, y| Rgb([x as u8, y as u8, 0]));
        let out = orient_for_slot(&portrait, &slot);
        assert_eq!(out.dimensions(), (3, 2));
        // Counter-clockwise: the top-right source pixel lands top-left
        assert_eq!(out.get_pixel(0, 0), portrait.get_pixel(1, 0));
        assert_eq!(out.get_pixel(2, 1), portrait.get_pixel(0, 2));
    }

    #[test]
    fn matching_orientation_is_untouched() {
        let slot = Slot::at(0, 0, (10, 4));
        let landscape = RgbImage::from_pixel(6, 2, Rgb([1, 2, 3]));
        assert_eq!(orient_for_slot(&landscape, &slot), landscape);
    }

    #[test]
    fn prepared_card_is_slot_plus_bleed() {
        let slot = Slot::at(0, 0, (12, 8));
        let card = RgbImage::from_pixel(30, 60, Rgb([9, 9, 9]));
        let out = prepare_card(&card, &slot, &AdjustmentParams::default(), 3).unwrap();
        assert_eq!(out.dimensions(), (18, 14));
    }

    #[test]
    fn unfilled_slots_show_template() {
        let layout = mini_layout();
        let tmpl = template();
        let red = RgbImage::from_pixel(12, 8, Rgb([255, 0, 0]));
        let page = build_page(&tmpl, &[&red], &layout, &AdjustmentParams::default()).unwrap();

        assert_eq!(page.dimensions(), tmpl.dimensions());
        // First slot and its bleed margin are red
        for y in 2..14 {
            for x in 2..18 {
                assert_eq!(page.get_pixel(x, y), &Rgb([255, 0, 0]));
            }
        }
        // Second and third slots (and their bleed areas) are raw template
        for (x1, y1, x2, y2) in [(22, 2, 38, 14), (2, 18, 14, 34)] {
            for y in y1..y2 {
                for x in x1..x2 {
                    assert_eq!(page.get_pixel(x, y), tmpl.get_pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn template_is_never_mutated() {
        let layout = mini_layout();
        let tmpl = template();
        let before = tmpl.clone();
        let card = RgbImage::from_pixel(12, 8, Rgb([0, 255, 0]));
        let _ = build_page(&tmpl, &[&card, &card, &card], &layout, &AdjustmentParams::default())
            .unwrap();
        assert_eq!(tmpl, before);
    }

    #[test]
    fn bleed_past_page_edge_is_clipped() {
        let layout = PageLayout {
            template: "edge.png".to_string(),
            bleed_px: 6,
            slots: vec![Slot::at(0, 0, (10, 6))],
        };
        let tmpl = RgbImage::new(20, 20);
        let card = RgbImage::from_pixel(10, 6, Rgb([5, 6, 7]));
        let page = build_page(&tmpl, &[&card], &layout, &AdjustmentParams::default()).unwrap();
        assert_eq!(page.get_pixel(0, 0), &Rgb([5, 6, 7]));
        assert_eq!(page.get_pixel(15, 11), &Rgb([5, 6, 7]));
        assert_eq!(page.get_pixel(16, 12), &Rgb([0, 0, 0]));
    }
}
