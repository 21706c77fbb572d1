//! Icon atlas manager
//!
//! Maps bitmaps to stable slots in a set of paged sheets. Identical bitmaps
//! share a slot; new content is appended at the cursor and never moves.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{RgbImage, imageops};
use idbe_crypto::ContentHash;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::geometry::{CELL_DIM, SLOTS_PER_SHEET, Slot, sheets_for};
use crate::index::AtlasIndex;
use crate::sheet::Sheet;

/// Path of the lossless copy of sheet `index`
pub fn png_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("icons{index}.png"))
}

/// Path of the lossy copy of sheet `index`
pub fn jpeg_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("icons{index}.jpg"))
}

/// Paged, content-deduplicated icon atlas
///
/// Lifecycle is `new`/`open`, then any number of `add`, then `persist`.
/// Nothing is written until `persist` is called.
#[derive(Debug, Clone)]
pub struct IconAtlas {
    config: AtlasConfig,
    index: AtlasIndex,
    sheets: Vec<Sheet>,
}

impl IconAtlas {
    /// Create an empty atlas
    pub fn new(config: AtlasConfig) -> Result<Self> {
        config.validate().map_err(AtlasError::InvalidConfiguration)?;
        Ok(Self {
            config,
            index: AtlasIndex::new(),
            sheets: Vec::new(),
        })
    }

    /// Load the sheets needed for `cursor` slots from the configured directory
    ///
    /// Reads the lossless copies `icons0.png` onwards and rebuilds the index
    /// from their cells.
    pub fn open(config: AtlasConfig, cursor: u32) -> Result<Self> {
        let mut atlas = Self::new(config)?;
        let dir = atlas.config.sheet_dir.clone();

        let mut sheets = Vec::with_capacity(sheets_for(cursor));
        for index in 0..sheets_for(cursor) {
            let path = png_path(&dir, index);
            if !path.is_file() {
                return Err(AtlasError::MissingSheet(path));
            }
            debug!("Loading sheet {}", path.display());
            let image = image::open(&path)?.into_rgb8();
            sheets.push(Sheet::from_image(index, image)?);
        }

        atlas.initialize(sheets, cursor)?;
        Ok(atlas)
    }

    /// Adopt `sheets` holding `cursor` occupied slots
    ///
    /// The index is rebuilt by hashing cells `0..cursor`. Any previous state
    /// is discarded.
    pub fn initialize(&mut self, sheets: Vec<Sheet>, cursor: u32) -> Result<()> {
        if sheets_for(cursor) > sheets.len() {
            return Err(AtlasError::InsufficientSheets {
                cursor,
                sheets: sheets.len(),
            });
        }

        let mut index = AtlasIndex::new();
        for slot in (0..cursor).map(Slot::new) {
            let position = slot.position();
            let cell = sheets[position.sheet].cell(position);
            index.push(ContentHash::from_data(cell.as_raw()));
        }

        info!(
            "Initialized icon atlas with {} sheet(s) and {} slot(s)",
            sheets.len(),
            cursor
        );
        self.sheets = sheets;
        self.index = index;
        Ok(())
    }

    /// Place `bitmap` and return its slot
    ///
    /// Bitmaps that are not 48x48 are resized first. Content already in the
    /// atlas returns its existing slot without modifying anything.
    pub fn add(&mut self, bitmap: &RgbImage) -> Slot {
        let resized;
        let bitmap = if bitmap.dimensions() == (CELL_DIM, CELL_DIM) {
            bitmap
        } else {
            debug!(
                "Resizing {}x{} bitmap to {CELL_DIM}x{CELL_DIM}",
                bitmap.width(),
                bitmap.height()
            );
            resized = imageops::resize(bitmap, CELL_DIM, CELL_DIM, self.config.resample.into());
            &resized
        };

        let hash = ContentHash::from_data(bitmap.as_raw());
        if let Some(slot) = self.find(&hash, bitmap) {
            debug!("Bitmap {hash} already stored in slot {slot}");
            return slot;
        }

        let position = Slot::new(self.cursor()).position();
        while self.sheets.len() <= position.sheet {
            debug!("Allocating sheet {}", self.sheets.len());
            self.sheets.push(Sheet::blank());
        }
        self.sheets[position.sheet].paint(position, bitmap);
        self.index.push(hash)
    }

    /// Existing slot for `bitmap`, if any
    fn find(&self, hash: &ContentHash, bitmap: &RgbImage) -> Option<Slot> {
        if !self.config.verify_pixels {
            return self.index.first(hash);
        }

        let candidates = self.index.slots(hash);
        let found = candidates
            .iter()
            .copied()
            .find(|&slot| self.cell(slot).as_ref() == Some(bitmap));
        if found.is_none() && !candidates.is_empty() {
            warn!(
                "Bitmap {hash} matches the hash of slot(s) {candidates:?} but not their pixels; storing separately"
            );
        }
        found
    }

    /// Write every sheet to `dir`
    ///
    /// Each sheet becomes `iconsN.png` and, unless disabled, `iconsN.jpg`.
    /// Files are written one at a time; a failure leaves earlier files in
    /// place.
    pub fn persist(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;

        for (index, sheet) in self.sheets.iter().enumerate() {
            let path = png_path(dir, index);
            let mut writer = BufWriter::new(File::create(&path)?);
            let encoder =
                PngEncoder::new_with_quality(&mut writer, CompressionType::Best, PngFilter::Adaptive);
            sheet.image().write_with_encoder(encoder)?;
            writer.flush()?;

            if self.config.write_lossy {
                let path = jpeg_path(dir, index);
                let mut writer = BufWriter::new(File::create(&path)?);
                let encoder = JpegEncoder::new_with_quality(&mut writer, self.config.jpeg_quality);
                sheet.image().write_with_encoder(encoder)?;
                writer.flush()?;
            }
        }

        info!(
            "Persisted {} sheet(s) with {} slot(s) to {}",
            self.sheets.len(),
            self.cursor(),
            dir.display()
        );
        Ok(())
    }

    /// Write every sheet to the configured directory
    pub fn save(&self) -> Result<()> {
        self.persist(&self.config.sheet_dir)
    }

    /// Pixels stored in `slot`
    pub fn cell(&self, slot: Slot) -> Option<RgbImage> {
        if slot.get() >= self.cursor() {
            return None;
        }
        let position = slot.position();
        self.sheets.get(position.sheet).map(|sheet| sheet.cell(position))
    }

    /// Next slot to be assigned
    pub fn cursor(&self) -> u32 {
        self.index.len() as u32
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Free cells left before the next sheet is allocated
    pub fn remaining_in_sheet(&self) -> u32 {
        let capacity = self.sheets.len() as u32 * SLOTS_PER_SHEET;
        capacity.saturating_sub(self.cursor())
    }

    /// Allocated sheets
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Content hash index
    pub fn index(&self) -> &AtlasIndex {
        &self.index
    }

    /// Active configuration
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }
}
