//! IDBE blob builder

use idbe_crypto::IdbeKeyTable;
use image::RgbImage;

use super::error::{IdbeError, IdbeResult};
use super::header::IdbeHeader;
use super::region::RegionMask;
use super::tile::tile_rgb565;
use super::title::{Language, RawTitle, TitleEntry};
use super::{IdbeFile, IdbePayload, LARGE_ICON_DIM, SMALL_ICON_DIM};

/// Builder for creating IDBE blobs
///
/// Unset titles and icons are left zeroed, matching what the parser reads
/// as empty strings and black pixels.
#[derive(Debug, Clone, Default)]
pub struct IdbeBuilder {
    format: u8,
    key_index: u8,
    regions: RegionMask,
    titles: Vec<(Language, TitleEntry)>,
    small_icon: Option<RgbImage>,
    large_icon: Option<RgbImage>,
}

impl IdbeBuilder {
    /// Create a new builder using key 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header format byte
    #[must_use]
    pub fn with_format(mut self, format: u8) -> Self {
        self.format = format;
        self
    }

    /// Select the encryption key; checked at build time
    #[must_use]
    pub fn with_key_index(mut self, key_index: u8) -> Self {
        self.key_index = key_index;
        self
    }

    /// Set the region mask
    #[must_use]
    pub fn with_regions(mut self, regions: RegionMask) -> Self {
        self.regions = regions;
        self
    }

    /// Set the title for one language, replacing any earlier entry
    #[must_use]
    pub fn with_title(mut self, language: Language, entry: TitleEntry) -> Self {
        self.titles.retain(|(l, _)| *l != language);
        self.titles.push((language, entry));
        self
    }

    /// Set the 48x48 icon
    #[must_use]
    pub fn with_large_icon(mut self, icon: RgbImage) -> Self {
        self.large_icon = Some(icon);
        self
    }

    /// Set the 24x24 icon
    #[must_use]
    pub fn with_small_icon(mut self, icon: RgbImage) -> Self {
        self.small_icon = Some(icon);
        self
    }

    /// Assemble the decrypted payload
    pub fn build_payload(&self) -> IdbeResult<IdbePayload> {
        let mut payload = IdbePayload {
            regions: self.regions,
            ..IdbePayload::default()
        };

        for (language, entry) in &self.titles {
            payload.titles[language.slot()] = RawTitle::encode(entry)?;
        }
        if let Some(icon) = &self.small_icon {
            payload.small_icon = encode_icon(icon, SMALL_ICON_DIM)?;
        }
        if let Some(icon) = &self.large_icon {
            payload.large_icon = encode_icon(icon, LARGE_ICON_DIM)?;
        }

        Ok(payload)
    }

    /// Assemble the file without encrypting
    pub fn build_file(&self) -> IdbeResult<IdbeFile> {
        Ok(IdbeFile {
            header: IdbeHeader::new(self.format, self.key_index),
            payload: self.build_payload()?,
            trailing: Vec::new(),
        })
    }

    /// Build blob bytes with the fixed key table
    pub fn build(&self) -> IdbeResult<Vec<u8>> {
        self.build_file()?.build()
    }

    /// Build blob bytes with a custom key table
    pub fn build_with_keys(&self, keys: &IdbeKeyTable) -> IdbeResult<Vec<u8>> {
        self.build_file()?.build_with_keys(keys)
    }
}

fn encode_icon(icon: &RgbImage, dim: u32) -> IdbeResult<Vec<u8>> {
    if icon.dimensions() != (dim, dim) {
        return Err(IdbeError::InvalidIconDimensions {
            width: icon.width(),
            height: icon.height(),
        });
    }
    tile_rgb565(icon)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::idbe::{MIN_BLOB_SIZE, Region};
    use image::Rgb;

    #[test]
    fn test_default_blob_size() {
        let blob = IdbeBuilder::new().build().expect("valid builder");
        assert_eq!(blob.len(), MIN_BLOB_SIZE);
        assert_eq!(&blob[..2], &[0x00, 0x00]);
    }

    #[test]
    fn test_header_bytes() {
        let blob = IdbeBuilder::new()
            .with_format(0x01)
            .with_key_index(2)
            .build()
            .expect("valid builder");
        assert_eq!(&blob[..2], &[0x01, 0x02]);
    }

    #[test]
    fn test_invalid_key_index() {
        assert!(matches!(
            IdbeBuilder::new().with_key_index(4).build(),
            Err(IdbeError::UnknownKeyIndex(4))
        ));
    }

    #[test]
    fn test_wrong_icon_size() {
        let result = IdbeBuilder::new()
            .with_large_icon(RgbImage::new(24, 24))
            .build();
        assert!(matches!(
            result,
            Err(IdbeError::InvalidIconDimensions {
                width: 24,
                height: 24
            })
        ));
    }

    #[test]
    fn test_title_replacement() {
        let file = IdbeBuilder::new()
            .with_title(Language::French, TitleEntry::new("a", "b", "c"))
            .with_title(Language::French, TitleEntry::new("x", "y", "z"))
            .build_file()
            .expect("valid builder");
        assert_eq!(file.title(Language::French).long_description, "y");
        assert!(file.title(Language::German).is_empty());
    }

    #[test]
    fn test_encrypted_round_trip() {
        let small = RgbImage::from_pixel(24, 24, Rgb([0xFF, 0x00, 0x00]));
        let large = RgbImage::from_pixel(48, 48, Rgb([0x00, 0x00, 0xFF]));
        let builder = IdbeBuilder::new()
            .with_key_index(1)
            .with_regions(RegionMask::default().with(Region::Europe))
            .with_title(Language::Japanese, TitleEntry::new("ゲーム", "ゲーム", "会社"))
            .with_small_icon(small.clone())
            .with_large_icon(large.clone());

        let expected = builder.build_file().expect("valid builder");
        let parsed = IdbeFile::parse(&builder.build().expect("valid builder")).expect("parses");

        assert_eq!(parsed, expected);
        assert_eq!(parsed.small_icon().expect("decodes"), small);
        assert_eq!(parsed.large_icon().expect("decodes"), large);
        assert!(parsed.regions().contains(Region::Europe));
        assert_eq!(parsed.title(Language::Japanese).publisher, "会社");
    }
}
