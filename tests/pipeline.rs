use std::fs;
use std::path::{Path, PathBuf};

use cardprint::core::processing::paginate::page_count;
use cardprint::{
    AdjustmentParams, CardEntry, CopyCount, CropParams, Error, GenerationRequest, PageLayout,
    Slot, compose_pages, crop_files, generate_document, load_cards,
};
use image::{GenericImageView, Rgb, RgbImage};
use rstest::rstest;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([200, 20, 20]);

/// Six 30x20 landscape slots on a 200x200 sheet.
fn small_layout() -> PageLayout {
    let slots = (0..6)
        .map(|i| Slot::at(10 + (i % 2) * 100, 10 + (i / 2) * 60, (30, 20)))
        .collect();
    PageLayout {
        template: "sheet.png".to_string(),
        bleed_px: 2,
        slots,
    }
}

fn write_card(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(w, h, INK).save(&path).unwrap();
    path
}

fn slot_center(slot: &Slot) -> (u32, u32) {
    ((slot.x1 + slot.x2) / 2, (slot.y1 + slot.y2) / 2)
}

fn close(a: Rgb<u8>, b: Rgb<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

#[test]
fn crop_batch_writes_beside_first_input_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("bolt.png");
    RgbImage::from_pixel(1000, 1400, INK).save(&scan).unwrap();
    let broken = dir.path().join("broken.png");
    fs::write(&broken, b"\x89PNG but not really").unwrap();

    let report = crop_files(&[scan, broken.clone()], &CropParams::default()).unwrap();

    assert_eq!(report.output_dir, dir.path().join("cropped"));
    assert_eq!(report.processed(), 1);
    assert_eq!(report.errors(), 1);
    assert_eq!(report.failures[0].0, broken);

    let out = image::open(dir.path().join("cropped").join("bolt.png")).unwrap();
    assert_eq!(out.dimensions(), (906, 1306));
}

#[test]
fn crop_keeps_jpeg_format() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("island.jpg");
    RgbImage::from_pixel(200, 300, INK).save(&scan).unwrap();

    let report = crop_files(&[scan], &CropParams::default()).unwrap();
    let written = &report.written[0];
    assert_eq!(written.file_name().unwrap(), "island.jpg");
    assert_eq!(
        image::ImageFormat::from_path(written).unwrap(),
        image::ImageFormat::Jpeg
    );
    assert_eq!(image::open(written).unwrap().dimensions(), (182, 280));
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(6, 1)]
#[case(7, 2)]
#[case(12, 2)]
#[case(13, 3)]
fn six_up_page_count(#[case] copies: usize, #[case] pages: usize) {
    assert_eq!(page_count(copies, 6), pages);
}

#[test]
fn seven_copies_fill_one_page_and_start_another() {
    let dir = tempfile::tempdir().unwrap();
    let card = write_card(dir.path(), "portrait.png", 20, 30);
    let layout = small_layout();
    let template = RgbImage::from_pixel(200, 200, PAPER);

    let copies = vec![card; 7];
    let (cache, failures) = load_cards(&copies);
    assert!(failures.is_empty());

    let pages = compose_pages(
        &copies,
        &cache,
        &template,
        &layout,
        &AdjustmentParams::default(),
    )
    .unwrap();
    assert_eq!(pages.len(), 2);

    for slot in &layout.slots {
        let (x, y) = slot_center(slot);
        assert!(close(*pages[0].get_pixel(x, y), INK));
    }
    let (x, y) = slot_center(&layout.slots[0]);
    assert!(close(*pages[1].get_pixel(x, y), INK));
    for slot in &layout.slots[1..] {
        let (x, y) = slot_center(slot);
        assert_eq!(*pages[1].get_pixel(x, y), PAPER);
    }
}

#[test]
fn bleed_spills_past_the_slot_edge() {
    let dir = tempfile::tempdir().unwrap();
    let card = write_card(dir.path(), "c.png", 30, 20);
    let layout = small_layout();
    let template = RgbImage::from_pixel(200, 200, PAPER);
    let (cache, _) = load_cards(std::slice::from_ref(&card));

    let pages = compose_pages(&[card], &cache, &template, &layout, &AdjustmentParams::default())
        .unwrap();
    let slot = layout.slots[0];
    assert!(close(*pages[0].get_pixel(slot.x1 - 2, slot.y1 - 2), INK));
    assert_eq!(*pages[0].get_pixel(slot.x1 - 3, slot.y1 - 3), PAPER);
}

#[test]
fn export_writes_one_pdf_page_per_six_cards() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_card(dir.path(), "a.png", 20, 30);
    let b = write_card(dir.path(), "b.png", 30, 20);
    let out = dir.path().join("deck.pdf");

    let request = GenerationRequest::new(
        vec![
            CardEntry::with_copies(&a, CopyCount::new(4)),
            CardEntry::with_copies(&b, CopyCount::parse("3")),
        ],
        AdjustmentParams {
            saturation: 1.3,
            warmth: -0.2,
            ..Default::default()
        },
    );
    let template = RgbImage::from_pixel(200, 200, PAPER);
    let report = generate_document(&request, &template, &small_layout(), &out).unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.copies, 7);
    assert!(report.skipped.is_empty());

    let doc = lopdf::Document::load(&out).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn unreadable_cards_are_dropped_from_pagination() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_card(dir.path(), "good.png", 20, 30);
    let bad = dir.path().join("bad.png");
    fs::write(&bad, b"garbage").unwrap();
    let out = dir.path().join("deck.pdf");

    let request = GenerationRequest::new(
        vec![
            CardEntry::with_copies(&bad, CopyCount::new(5)),
            CardEntry::with_copies(&good, CopyCount::new(2)),
        ],
        AdjustmentParams::default(),
    );
    let template = RgbImage::from_pixel(200, 200, PAPER);
    let report = generate_document(&request, &template, &small_layout(), &out).unwrap();

    assert_eq!(report.pages, 1);
    assert_eq!(report.copies, 2);
    assert_eq!(report.skipped, vec![bad]);
}

#[rstest]
#[case::no_cards(vec![])]
#[case::zero_copies(vec![CardEntry::with_copies("a.png", CopyCount::parse("0"))])]
#[case::negative_copies(vec![CardEntry::with_copies("a.png", CopyCount::parse("-4"))])]
fn invalid_requests_write_nothing(#[case] cards: Vec<CardEntry>) {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("deck.pdf");
    let request = GenerationRequest::new(cards, AdjustmentParams::default());
    let template = RgbImage::from_pixel(200, 200, PAPER);

    let err = generate_document(&request, &template, &small_layout(), &out).unwrap_err();
    assert!(matches!(err, Error::NoCards | Error::NoCopies));
    assert!(!out.exists());
}

#[test]
fn nothing_decodable_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.png");
    fs::write(&bad, b"garbage").unwrap();
    let out = dir.path().join("deck.pdf");

    let request = GenerationRequest::new(
        vec![CardEntry::with_copies(&bad, CopyCount::new(3))],
        AdjustmentParams::default(),
    );
    let template = RgbImage::from_pixel(200, 200, PAPER);
    let err = generate_document(&request, &template, &small_layout(), &out).unwrap_err();

    assert!(matches!(err, Error::NoDecodableCards { failed: 1 }));
    assert!(!out.exists());
}

#[test]
fn layout_outside_template_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let card = write_card(dir.path(), "a.png", 20, 30);
    let out = dir.path().join("deck.pdf");
    let request = GenerationRequest::new(vec![CardEntry::new(&card)], AdjustmentParams::default());
    let tiny = RgbImage::from_pixel(50, 50, PAPER);

    let err = generate_document(&request, &tiny, &small_layout(), &out).unwrap_err();
    assert!(matches!(err, Error::InvalidLayout(_)));
    assert!(!out.exists());
}

#[test]
fn typed_copy_counts_are_capped_before_expansion() {
    let request = GenerationRequest::new(
        vec![
            CardEntry::with_copies("a.png", CopyCount::parse("99999999999")),
            CardEntry::with_copies("b.png", CopyCount::parse("150")),
        ],
        AdjustmentParams::default(),
    );
    let copies = request.expanded().unwrap();
    assert_eq!(copies.len(), 2 * CopyCount::MAX as usize);
    assert_eq!(page_count(copies.len(), 6), 33);
}
