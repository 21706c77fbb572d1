//! Atlas configuration
//!
//! Controls where sheets are persisted, how they are encoded and how
//! incoming bitmaps are treated before they are placed.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resampling filter applied to bitmaps that are not 48x48
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Nearest neighbour; keeps pixel art crisp
    #[default]
    Nearest,
    /// Linear interpolation
    Triangle,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Icon atlas configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Directory holding `iconsN.png` and `iconsN.jpg`
    pub sheet_dir: PathBuf,
    /// JPEG quality for the lossy copy (1-100)
    pub jpeg_quality: u8,
    /// Filter used when an added bitmap must be resized
    pub resample: ResampleFilter,
    /// Compare pixels on a hash hit before reusing a slot
    pub verify_pixels: bool,
    /// Also write the lossy JPEG copy of each sheet
    pub write_lossy: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            sheet_dir: PathBuf::from("icons"),
            jpeg_quality: 85,
            resample: ResampleFilter::Nearest,
            verify_pixels: false,
            write_lossy: true,
        }
    }
}

impl AtlasConfig {
    /// Create a configuration persisting into `sheet_dir`
    pub fn new<P: Into<PathBuf>>(sheet_dir: P) -> Self {
        Self {
            sheet_dir: sheet_dir.into(),
            ..Self::default()
        }
    }

    /// Set JPEG quality
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Set the resampling filter
    #[must_use]
    pub fn with_resample(mut self, filter: ResampleFilter) -> Self {
        self.resample = filter;
        self
    }

    /// Enable or disable pixel verification on hash hits
    #[must_use]
    pub fn with_verify_pixels(mut self, enable: bool) -> Self {
        self.verify_pixels = enable;
        self
    }

    /// Enable or disable the lossy JPEG copy
    #[must_use]
    pub fn with_lossy_output(mut self, enable: bool) -> Self {
        self.write_lossy = enable;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }

        if self.sheet_dir.as_os_str().is_empty() {
            return Err("sheet_dir must not be empty".to_string());
        }

        Ok(())
    }
}
