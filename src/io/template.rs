use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Resolve a bundled asset by file name: next to the running executable first,
/// then the current directory.
pub fn resource_path(name: &str) -> PathBuf {
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let candidate = dir.join(name);
        if candidate.exists() {
            return candidate;
        }
        debug!("{:?} not found beside executable", candidate);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(name))
        .unwrap_or_else(|_| PathBuf::from(name))
}

/// Decode the background template as 8-bit RGB.
pub fn load_template(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| Error::TemplateUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgb = img.to_rgb8();
    info!(
        "Loaded background template {:?} ({}x{})",
        path,
        rgb.width(),
        rgb.height()
    );
    Ok(rgb)
}
