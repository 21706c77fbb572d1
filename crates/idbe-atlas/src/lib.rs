//! Deduplicating icon atlas for decoded IDBE icons
//!
//! Storefront icons are packed into 1024x1024 sheets of 48x48 cells. Every
//! distinct bitmap gets a stable integer slot; adding the same pixels again
//! returns the slot it already has. Sheets are written as lossless PNG (the
//! copy that is reloaded) plus an optional JPEG for delivery.
//!
//! # Architecture
//!
//! ```text
//! blob ──► IconDecoder ──► RgbImage ──► IconAtlas::add ──► Slot
//!                                          │
//!                              AtlasIndex (MD5 → slot)
//!                              Vec<Sheet> (21x21 cells each)
//! ```
//!
//! # Example
//!
//! ```
//! use idbe_atlas::{AtlasConfig, IconAtlas, Slot};
//! use image::{Rgb, RgbImage};
//!
//! let mut atlas = IconAtlas::new(AtlasConfig::default())?;
//! let icon = RgbImage::from_pixel(48, 48, Rgb([200, 40, 40]));
//!
//! assert_eq!(atlas.add(&icon), Slot::new(0));
//! assert_eq!(atlas.add(&icon), Slot::new(0));
//! assert_eq!(atlas.cursor(), 1);
//! # Ok::<(), idbe_atlas::AtlasError>(())
//! ```

#![warn(missing_docs)]

pub mod atlas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod index;
pub mod pipeline;
pub mod sheet;

pub use atlas::IconAtlas;
pub use config::{AtlasConfig, ResampleFilter};
pub use error::{AtlasError, Result};
pub use geometry::{CELL_DIM, GRID_DIM, SHEET_DIM, SLOTS_PER_SHEET, Slot, SlotPosition};
pub use index::AtlasIndex;
pub use pipeline::{BatchStats, IconOutcome, IconPipeline};
pub use sheet::Sheet;
