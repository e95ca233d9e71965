use serde::{Deserialize, Serialize};

/// Inclusive bounds and spin step of one adjustment control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const SATURATION_RANGE: ParamRange = ParamRange::new(0.0, 2.0, 0.1);
pub const GAMMA_RANGE: ParamRange = ParamRange::new(0.1, 3.0, 0.1);
pub const BRIGHTNESS_RANGE: ParamRange = ParamRange::new(0.0, 2.0, 0.1);
pub const CONTRAST_RANGE: ParamRange = ParamRange::new(0.0, 2.0, 0.1);
pub const BLACKPOINT_RANGE: ParamRange = ParamRange::new(-50.0, 50.0, 1.0);
pub const WARMTH_RANGE: ParamRange = ParamRange::new(-1.0, 1.0, 0.05);

/// Tone adjustments applied to every card of a generation run.
/// There is no per-card override; the composer session owns one instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentParams {
    pub saturation: f64,
    pub gamma: f64,
    pub brightness: f64,
    pub contrast: f64,
    /// Signed offset added to every channel
    pub blackpoint: i32,
    /// -1.0 is coolest, +1.0 warmest
    pub warmth: f64,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            gamma: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            blackpoint: 0,
            warmth: 0.0,
        }
    }
}

impl AdjustmentParams {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Copy with every field forced into the range its control allows.
    pub fn clamped(&self) -> Self {
        Self {
            saturation: SATURATION_RANGE.clamp(self.saturation),
            gamma: GAMMA_RANGE.clamp(self.gamma),
            brightness: BRIGHTNESS_RANGE.clamp(self.brightness),
            contrast: CONTRAST_RANGE.clamp(self.contrast),
            blackpoint: BLACKPOINT_RANGE.clamp(self.blackpoint as f64) as i32,
            warmth: WARMTH_RANGE.clamp(self.warmth),
        }
    }
}

/// Border fractions removed by the cropper; half of each goes to either side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropParams {
    pub width_fraction: f64,
    pub height_fraction: f64,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            width_fraction: 0.095,
            height_fraction: 0.068,
        }
    }
}
