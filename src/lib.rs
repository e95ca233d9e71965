#![doc = r#"
CARDPRINT: prepare trading-card scans for print.

This crate powers two small desktop tools. `cardcrop` trims a fixed-percentage
border from card scans. `cardgrid` places up to six tone-adjusted cards per page on
a background template, extends each with a printer bleed, and exports every page
into one 300 DPI PDF. The pixel transforms are plain functions over `image`
buffers and can be used without the GUI.

Add dependency
--------------
```toml
[dependencies]
cardprint = { version = "0.1", default-features = false }
```

Crop a batch of scans
---------------------
```rust,no_run
use std::path::PathBuf;
use cardprint::{crop_files, CropParams};

fn main() -> cardprint::Result<()> {
    let inputs = vec![PathBuf::from("/scans/bolt.png"), PathBuf::from("/scans/island.jpg")];
    let report = crop_files(&inputs, &CropParams::default())?;
    println!("wrote {} file(s) into {:?}", report.processed(), report.output_dir);
    for (path, reason) in &report.failures {
        eprintln!("skipped {path:?}: {reason}");
    }
    Ok(())
}
```

Compose and export pages
------------------------
```rust,no_run
use std::path::Path;
use cardprint::{
    generate_document, load_template, AdjustmentParams, CardEntry, CopyCount,
    GenerationRequest, PageLayout,
};

fn main() -> cardprint::Result<()> {
    let template = load_template(Path::new("CricutTMPL.png"))?;
    let request = GenerationRequest::new(
        vec![
            CardEntry::with_copies("/cards/bolt.png", CopyCount::new(4)),
            CardEntry::with_copies("/cards/island.png", CopyCount::new(3)),
        ],
        AdjustmentParams { saturation: 1.2, warmth: 0.1, ..Default::default() },
    );
    let report = generate_document(
        &request,
        &template,
        &PageLayout::cricut_six(),
        Path::new("/out/deck.pdf"),
    )?;
    assert_eq!(report.pages, 2);
    Ok(())
}
```

Pure transforms
---------------
```rust
use image::{Rgb, RgbImage};
use cardprint::core::processing::{adjust::adjust_card_image, bleed::add_bleed};
use cardprint::AdjustmentParams;

let card = RgbImage::from_pixel(63, 88, Rgb([200, 30, 30]));
let same = adjust_card_image(&card, &AdjustmentParams::default());
assert_eq!(same, card);

let bled = add_bleed(&card, 6);
assert_eq!(bled.dimensions(), (75, 100));
```

Feature flags
-------------
- `gui` (default): builds the `gui` module and the `cardcrop` / `cardgrid` binaries.
- `full`: everything.

Useful modules
--------------
- [`api`]: high-level entry points used by both tools.
- [`config`]: command-line settings for both binaries.
- [`core`]: parameters, page layout, and the pixel transforms.
- [`io`]: template loading and the image/PDF writers.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// GUI module (only available with gui feature)
#[cfg(feature = "gui")]
pub mod gui;

// Curated public API surface
// Types
pub use crate::core::layout::{PageLayout, Slot};
pub use crate::core::params::{AdjustmentParams, CropParams};
pub use crate::core::processing::paginate::CopyCount;
pub use error::{Error, Result};
pub use types::{CardEntry, ImageKind, Orientation};

// I/O
pub use io::template::{load_template, resource_path};
pub use io::writers::pdf::{DEFAULT_DPI, PdfStats, write_pdf};

// High-level API re-exports
pub use api::{
    CropReport, ExportReport, GenerationRequest, compose_pages, crop_file, crop_files,
    generate_document, load_cards,
};
