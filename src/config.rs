//! Command-line configuration for the two desktop tools.
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::core::layout::{CRICUT_TEMPLATE, PageLayout};
use crate::core::params::CropParams;
use crate::error::{Error, Result};
use crate::io::template::resource_path;
use crate::io::writers::pdf::DEFAULT_DPI;

#[derive(Parser, Debug, Clone)]
#[command(name = "cardcrop", version, about = "Trim the scanner border from card images")]
pub struct CropperArgs {
    /// Fraction of the width removed, split evenly between left and right
    #[arg(long, default_value_t = 0.095)]
    pub width_fraction: f64,

    /// Fraction of the height removed, split evenly between top and bottom
    #[arg(long, default_value_t = 0.068)]
    pub height_fraction: f64,

    /// Mirror log output to the console
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CropperArgs {
    pub fn crop_params(&self) -> Result<CropParams> {
        let check = |arg: &'static str, v: f64| {
            if (0.0..1.0).contains(&v) {
                Ok(v)
            } else {
                Err(Error::InvalidArgument {
                    arg,
                    value: v.to_string(),
                })
            }
        };
        Ok(CropParams {
            width_fraction: check("width-fraction", self.width_fraction)?,
            height_fraction: check("height-fraction", self.height_fraction)?,
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cardgrid", version, about = "Lay out cards on print pages and export a PDF")]
pub struct GridArgs {
    /// Background template image. Defaults to the layout's template beside the executable
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// JSON page layout (template name, bleed, slot rectangles). Defaults to the six-slot Cricut sheet
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Output resolution used to size PDF pages
    #[arg(long, default_value_t = DEFAULT_DPI)]
    pub dpi: f32,

    /// Mirror log output to the console
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

/// Resolved settings for the page composer window.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub template_path: PathBuf,
    pub layout: PageLayout,
    pub dpi: f32,
}

impl GridArgs {
    pub fn resolve(&self) -> Result<GridConfig> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(Error::InvalidArgument {
                arg: "dpi",
                value: self.dpi.to_string(),
            });
        }
        let layout = match &self.layout {
            Some(path) => {
                info!("Loading page layout from {:?}", path);
                PageLayout::from_json_file(path)?
            }
            None => PageLayout::cricut_six(),
        };
        let template_path = match &self.template {
            Some(path) => path.clone(),
            None if layout.template.is_empty() => resource_path(CRICUT_TEMPLATE),
            None => resource_path(&layout.template),
        };
        Ok(GridConfig {
            template_path,
            layout,
            dpi: self.dpi,
        })
    }
}
