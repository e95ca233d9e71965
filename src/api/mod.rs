//! High-level library API: crop a batch of scans, and turn a card list into a
//! multi-page print document. Both GUIs call these; prefer them over the
//! low-level processing modules when embedding the pipeline.
//!
//! A bad input file never aborts a run. The cropper skips it and carries on; the
//! composer drops every copy of it before pagination. Both report what was
//! skipped so the caller can tell the user.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::core::layout::PageLayout;
use crate::core::params::{AdjustmentParams, CropParams};
use crate::core::processing::compose::build_page;
use crate::core::processing::crop::crop_card;
use crate::core::processing::paginate::{expand_copies, page_count, paginate};
use crate::error::{Error, Result};
use crate::io::writers::raster::save_cropped;
use crate::io::writers::pdf::{DEFAULT_DPI, write_pdf};
use crate::types::CardEntry;

/// Name of the directory the cropper writes into.
pub const CROPPED_DIR_NAME: &str = "cropped";

#[derive(Debug, Default)]
pub struct CropReport {
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

impl CropReport {
    pub fn processed(&self) -> usize {
        self.written.len()
    }

    pub fn errors(&self) -> usize {
        self.failures.len()
    }
}

/// `cropped/` beside the first selected file.
pub fn cropped_dir_for(first_input: &Path) -> PathBuf {
    first_input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CROPPED_DIR_NAME)
}

/// Crop one file into `out_dir`, keeping its name and format.
pub fn crop_file(input: &Path, params: &CropParams, out_dir: &Path) -> Result<PathBuf> {
    let img = image::open(input).map_err(|e| Error::decode(input, e))?;
    let cropped = crop_card(&img, params);
    save_cropped(&cropped, input, out_dir)
}

/// Crop every file in `inputs` into `cropped/` beside the first one.
/// Fails only when nothing was selected or the output directory cannot be made.
pub fn crop_files(inputs: &[PathBuf], params: &CropParams) -> Result<CropReport> {
    let first = inputs.first().ok_or(Error::NoInputs)?;
    let output_dir = cropped_dir_for(first);
    fs::create_dir_all(&output_dir)?;
    info!(
        "Cropping {} file(s) into {:?} ({:.1}% / {:.1}%)",
        inputs.len(),
        output_dir,
        params.width_fraction * 100.0,
        params.height_fraction * 100.0
    );

    let mut report = CropReport {
        output_dir,
        ..Default::default()
    };
    for input in inputs {
        match crop_file(input, params, &report.output_dir) {
            Ok(out) => {
                debug!("Cropped {:?} -> {:?}", input, out);
                report.written.push(out);
            }
            Err(e) => {
                warn!("Failed to process {:?}: {}", input, e);
                report.failures.push((input.clone(), e.to_string()));
            }
        }
    }

    info!(
        "Cropping complete! Processed: {}, Errors: {}",
        report.processed(),
        report.errors()
    );
    Ok(report)
}

/// Everything the composer needs besides the template and layout.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub cards: Vec<CardEntry>,
    pub adjustments: AdjustmentParams,
    pub dpi: f32,
}

impl GenerationRequest {
    pub fn new(cards: Vec<CardEntry>, adjustments: AdjustmentParams) -> Self {
        Self {
            cards,
            adjustments,
            dpi: DEFAULT_DPI,
        }
    }

    /// The flat copy sequence, or the validation failure to show the user.
    pub fn expanded(&self) -> Result<Vec<PathBuf>> {
        if self.cards.is_empty() {
            return Err(Error::NoCards);
        }
        let expanded = expand_copies(&self.cards);
        if expanded.is_empty() {
            return Err(Error::NoCopies);
        }
        Ok(expanded)
    }
}

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub pages: usize,
    pub copies: usize,
    pub skipped: Vec<PathBuf>,
    pub output: PathBuf,
}

pub type CardCache = HashMap<PathBuf, RgbImage>;

/// Decode each distinct card once, as 8-bit RGB. Failures are returned
/// alongside the cache rather than aborting.
pub fn load_cards(paths: &[PathBuf]) -> (CardCache, Vec<(PathBuf, Error)>) {
    let mut cache = CardCache::new();
    let mut failures: Vec<(PathBuf, Error)> = Vec::new();
    for path in paths {
        if cache.contains_key(path) || failures.iter().any(|(p, _)| p == path) {
            continue;
        }
        match image::open(path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                debug!("Decoded {:?} ({}x{})", path, rgb.width(), rgb.height());
                cache.insert(path.clone(), rgb);
            }
            Err(e) => {
                warn!("Skipping card {:?}: {}", path, e);
                failures.push((path.clone(), Error::decode(path, e)));
            }
        }
    }
    (cache, failures)
}

/// Compose every page for an already-decoded copy sequence.
pub fn compose_pages(
    copies: &[PathBuf],
    cache: &CardCache,
    template: &RgbImage,
    layout: &PageLayout,
    params: &AdjustmentParams,
) -> Result<Vec<RgbImage>> {
    let cards: Vec<&RgbImage> = copies.iter().filter_map(|p| cache.get(p)).collect();
    let per_page = layout.cards_per_page();
    let total = page_count(cards.len(), per_page);

    let mut pages = Vec::with_capacity(total);
    for (i, group) in paginate(&cards, per_page).into_iter().enumerate() {
        info!("Composing page {}/{} ({} card(s))", i + 1, total, group.len());
        pages.push(build_page(template, group, layout, params)?);
    }
    Ok(pages)
}

/// Validate, compose and export `request` as one PDF at `output`.
/// All validation happens before the output file is touched.
pub fn generate_document(
    request: &GenerationRequest,
    template: &RgbImage,
    layout: &PageLayout,
    output: &Path,
) -> Result<ExportReport> {
    let expanded = request.expanded()?;
    layout.validate(template.dimensions())?;

    let (cache, failures) = load_cards(&expanded);
    if cache.is_empty() {
        return Err(Error::NoDecodableCards {
            failed: failures.len(),
        });
    }
    let copies: Vec<PathBuf> = expanded
        .into_iter()
        .filter(|p| cache.contains_key(p))
        .collect();

    let pages = compose_pages(
        &copies,
        &cache,
        template,
        layout,
        &request.adjustments.clamped(),
    )?;
    let stats = write_pdf(&pages, request.dpi, output)?;

    Ok(ExportReport {
        pages: stats.pages,
        copies: copies.len(),
        skipped: failures.into_iter().map(|(p, _)| p).collect(),
        output: stats.output_path,
    })
}
