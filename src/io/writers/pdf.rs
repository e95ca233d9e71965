//! Multi-page PDF output for composed pages.
//!
//! Each page is one full-bleed RGB image XObject. The page box is sized from the
//! pixel dimensions and the DPI tag (`points = px * 72 / dpi`), so a 300 DPI page
//! prints at its native size. Streams are Flate-compressed and the file is written
//! to a temporary sibling first and renamed into place, so a failure never leaves
//! a partial document behind.
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_DPI: f32 = 300.0;
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone)]
pub struct PdfStats {
    pub pages: usize,
    pub file_size: u64,
    pub output_path: PathBuf,
}

/// Page size in PDF points for a `px` wide/high image at `dpi`.
pub fn page_size_points(width_px: u32, height_px: u32, dpi: f32) -> (f32, f32) {
    (
        width_px as f32 * POINTS_PER_INCH / dpi,
        height_px as f32 * POINTS_PER_INCH / dpi,
    )
}

/// Build an in-memory document with one page per image.
pub fn build_document(pages: &[RgbImage], dpi: f32) -> Result<Document> {
    if pages.is_empty() {
        return Err(Error::NoCopies);
    }
    if !(dpi > 0.0) {
        return Err(Error::InvalidArgument {
            arg: "dpi",
            value: dpi.to_string(),
        });
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        let (w_px, h_px) = page.dimensions();
        let (w_pt, h_pt) = page_size_points(w_px, h_px, dpi);

        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => w_px as i64,
                "Height" => h_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            page.as_raw().clone(),
        );
        let image_id = doc.add_object(image_stream);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        w_pt.into(),
                        0.into(),
                        0.into(),
                        h_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), w_pt.into(), h_pt.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
        });
        kids.push(page_id.into());
        debug!(
            "Added page {} ({}x{} px, {:.1}x{:.1} pt)",
            index + 1,
            w_px,
            h_px,
            w_pt,
            h_pt
        );
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

/// Write `pages` as one PDF at `path`, replacing any existing file.
pub fn write_pdf(pages: &[RgbImage], dpi: f32, path: &Path) -> Result<PdfStats> {
    let mut doc = build_document(pages, dpi)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".cardprint-")
        .suffix(".pdf.tmp")
        .tempfile_in(&dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    info!(
        "Wrote {} page(s) to {:?} ({} bytes, {} DPI)",
        pages.len(),
        path,
        file_size,
        dpi
    );
    Ok(PdfStats {
        pages: pages.len(),
        file_size,
        output_path: path.to_path_buf(),
    })
}
