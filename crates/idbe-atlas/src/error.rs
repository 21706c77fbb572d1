//! Error types for atlas operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, loading or persisting an atlas
#[derive(Debug, Error)]
pub enum AtlasError {
    /// IO error while reading or writing sheet files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encode or decode failure
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A loaded sheet does not have the fixed sheet dimensions
    #[error("Sheet {index} is {width}x{height}, expected 1024x1024")]
    InvalidSheetSize {
        /// Sheet index
        index: usize,
        /// Actual width
        width: u32,
        /// Actual height
        height: u32,
    },

    /// The cursor points past the cells the supplied sheets can hold
    #[error("Cursor {cursor} needs more than the {sheets} sheet(s) supplied")]
    InsufficientSheets {
        /// Requested cursor
        cursor: u32,
        /// Number of sheets supplied
        sheets: usize,
    },

    /// A sheet file expected on disk is missing
    #[error("Missing sheet file: {}", .0.display())]
    MissingSheet(PathBuf),

    /// Invalid atlas configuration
    #[error("Invalid atlas configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;
