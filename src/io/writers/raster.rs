use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat};

use crate::error::{Error, Result};

/// Write `image` into `out_dir` under the source file's name. The encoder is
/// picked from the extension, so the output keeps the input's format.
pub fn save_cropped(image: &DynamicImage, source: &Path, out_dir: &Path) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| Error::InvalidArgument {
        arg: "input",
        value: source.to_string_lossy().into_owned(),
    })?;
    let output = out_dir.join(name);

    match ImageFormat::from_path(&output) {
        Ok(ImageFormat::Jpeg) => match jpeg_compatible(image) {
            Some(converted) => converted.save(&output)?,
            None => image.save(&output)?,
        },
        _ => image.save(&output)?,
    }
    Ok(output)
}

/// JPEG stores 8-bit gray or RGB only. Alpha and 16-bit variants are narrowed
/// to the matching 8-bit layout; `None` when the image is already encodable.
fn jpeg_compatible(image: &DynamicImage) -> Option<DynamicImage> {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => None,
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Some(DynamicImage::ImageLuma8(image.to_luma8()))
        }
        _ => Some(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}
