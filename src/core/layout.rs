//! Page layout as data: the slot rectangles of a background template plus the
//! bleed used when pasting cards into them. Slot coordinates are pixel positions
//! keyed to one template image, so a layout names the template it belongs to.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Orientation;

/// File name of the built-in background template.
pub const CRICUT_TEMPLATE: &str = "CricutTMPL.png";

/// Card size at 300 DPI, portrait (63mm x 88mm with trim).
pub const PORTRAIT_CARD: (u32, u32) = (763, 1058);
pub const LANDSCAPE_CARD: (u32, u32) = (PORTRAIT_CARD.1, PORTRAIT_CARD.0);

/// 0.5 mm at 300 DPI
pub const DEFAULT_BLEED_PX: u32 = 6;

/// Rectangle on the template, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Slot {
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn at(x: u32, y: u32, size: (u32, u32)) -> Self {
        Self::new(x, y, x + size.0, y + size.1)
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.width(), self.height())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Template file name this layout was measured against
    pub template: String,
    #[serde(default = "default_bleed")]
    pub bleed_px: u32,
    pub slots: Vec<Slot>,
}

fn default_bleed() -> u32 {
    DEFAULT_BLEED_PX
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::cricut_six()
    }
}

impl PageLayout {
    /// Six landscape cards on the Cricut print-then-cut template.
    pub fn cricut_six() -> Self {
        Self {
            template: CRICUT_TEMPLATE.to_string(),
            bleed_px: DEFAULT_BLEED_PX,
            slots: vec![
                // left column
                Slot::at(165, 552, LANDSCAPE_CARD),
                Slot::at(165, 1412, LANDSCAPE_CARD),
                Slot::at(268, 2274, LANDSCAPE_CARD),
                // right column
                Slot::at(1224, 262, LANDSCAPE_CARD),
                Slot::at(1327, 1122, LANDSCAPE_CARD),
                Slot::at(1327, 1983, LANDSCAPE_CARD),
            ],
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let layout: PageLayout = serde_json::from_str(&content)?;
        info!(
            "Loaded layout for {} from {:?} ({} slots, bleed {}px)",
            layout.template,
            path,
            layout.slots.len(),
            layout.bleed_px
        );
        Ok(layout)
    }

    pub fn cards_per_page(&self) -> usize {
        self.slots.len()
    }

    /// Check the slot table against the template it will be pasted onto.
    pub fn validate(&self, template_dims: (u32, u32)) -> Result<()> {
        let (tw, th) = template_dims;
        if self.slots.is_empty() {
            return Err(Error::InvalidLayout("layout has no slots".to_string()));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.x2 <= slot.x1 || slot.y2 <= slot.y1 {
                return Err(Error::InvalidLayout(format!(
                    "slot {} is empty: {:?}",
                    i, slot
                )));
            }
            if slot.x2 > tw || slot.y2 > th {
                return Err(Error::InvalidLayout(format!(
                    "slot {} {:?} exceeds template {}x{}",
                    i, slot, tw, th
                )));
            }
            debug!(
                "Slot {}: {}x{} {} at ({}, {})",
                i,
                slot.width(),
                slot.height(),
                slot.orientation(),
                slot.x1,
                slot.y1
            );
        }
        Ok(())
    }
}
