//! Shared types used across the cropper and the page composer.
//! Includes `Orientation`, the `CardEntry` held by the composer's card list, and
//! `ImageKind`, the set of raster formats accepted by the file pickers.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::processing::paginate::CopyCount;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Landscape only when strictly wider than tall; squares count as portrait.
    pub fn of(width: u32, height: u32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "Landscape"),
            Orientation::Portrait => write!(f, "Portrait"),
        }
    }
}

/// One row of the composer's card list: a file and how many copies to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub path: PathBuf,
    pub copies: CopyCount,
}

impl CardEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            copies: CopyCount::default(),
        }
    }

    pub fn with_copies(path: impl Into<PathBuf>, copies: CopyCount) -> Self {
        Self {
            path: path.into(),
            copies,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ImageKind {
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl ImageKind {
    /// Formats the composer accepts.
    pub const CARD_INPUTS: &'static [ImageKind] = &[ImageKind::Png, ImageKind::Jpeg, ImageKind::Bmp];
    /// Formats the cropper accepts.
    pub const CROP_INPUTS: &'static [ImageKind] = &[
        ImageKind::Png,
        ImageKind::Jpeg,
        ImageKind::Bmp,
        ImageKind::Tiff,
    ];

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ImageKind::Png => &["png"],
            ImageKind::Jpeg => &["jpg", "jpeg"],
            ImageKind::Bmp => &["bmp"],
            ImageKind::Tiff => &["tif", "tiff"],
        }
    }

    /// Flattened extension list for a file-dialog filter.
    pub fn filter_extensions(kinds: &[ImageKind]) -> Vec<&'static str> {
        kinds.iter().flat_map(|k| k.extensions().iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_portrait() {
        assert_eq!(Orientation::of(100, 100), Orientation::Portrait);
        assert_eq!(Orientation::of(101, 100), Orientation::Landscape);
        assert_eq!(Orientation::of(99, 100), Orientation::Portrait);
    }

    #[test]
    fn card_inputs_exclude_tiff() {
        let exts = ImageKind::filter_extensions(ImageKind::CARD_INPUTS);
        assert!(exts.contains(&"jpeg"));
        assert!(!exts.contains(&"tiff"));
    }
}
