//! File format parsers and builders for storefront icon data
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::doc_markdown)] // Format terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate provides symmetric (parser and builder) implementations for the
//! IDBE container the vendor CDN serves per title: an encrypted bundle of
//! localized names, region flags and two tiled RGB565 icons.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Fixed Layout**: Offsets are named constants, checked by tests
//! - **Round-Trip Guarantee**: parse(build(data)) == data
//!
//! # Example
//!
//! ```
//! use idbe_formats::idbe::{IdbeBuilder, Language, TitleEntry, decode};
//!
//! let blob = IdbeBuilder::new()
//!     .with_key_index(2)
//!     .with_title(Language::English, TitleEntry::new("Demo", "Demo Title", "Studio"))
//!     .build()?;
//!
//! let icon = decode(&blob)?;
//! assert_eq!(icon.name, "Demo Title");
//! assert_eq!(icon.bitmap.dimensions(), (48, 48));
//! # Ok::<(), idbe_formats::idbe::IdbeError>(())
//! ```

#![warn(missing_docs)]

/// IDBE icon container: header, payload layout, titles, regions and tiling
pub mod idbe;

pub use idbe::{DecodedIcon, IconDecoder, IdbeError, IdbeFile, IdbeResult};
