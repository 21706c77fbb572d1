//! IDBE (icon data) container implementation
//!
//! IDBE blobs carry a title's storefront icon and localized names. A blob is a
//! two-byte cleartext header followed by AES-128-CBC ciphertext. Byte 1 of the
//! header picks one of four fixed keys; the IV is shared by all blobs.
//!
//! # Payload Layout
//!
//! | Offset   | Size    | Content                                   |
//! |----------|---------|-------------------------------------------|
//! | `0x0000` | `0x30`  | Leading block (checksum, flags)           |
//! | `0x0030` | `0x04`  | Region mask, little-endian                |
//! | `0x0034` | `0x1C`  | Reserved                                  |
//! | `0x0050` | `0x2000`| 16 title slots of `0x200` bytes           |
//! | `0x2050` | `0x480` | 24x24 icon, tiled RGB565                  |
//! | `0x24D0` | `0x1200`| 48x48 icon, tiled RGB565                  |
//!
//! # Features
//!
//! - Parser and builder (`parse(build(x)) == x`)
//! - Lossless tile reordering for both icon sizes
//! - Title normalization for search keys

mod builder;
mod error;
mod header;
mod region;
mod tile;
mod title;

pub use builder::IdbeBuilder;
pub use error::{IdbeError, IdbeResult};
pub use header::{HEADER_SIZE, IdbeHeader};
pub use region::{Region, RegionMask};
pub use tile::{
    TILE_DIM, TILE_ORDER, TILE_PIXELS, rgb565_to_rgb888, rgb888_to_rgb565, tile_position,
    tile_rgb565, tiled_len, untile_rgb565,
};
pub use title::{
    Language, RawTitle, TITLE_SLOT_COUNT, TITLE_SLOT_SIZE, TITLE_TABLE_OFFSET, TitleEntry,
    decode_utf16_field, encode_utf16_field, normalize_title,
};

use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use idbe_crypto::{AES_BLOCK_SIZE, IDBE_IV, IdbeKeyTable, decrypt_aes_cbc, encrypt_aes_cbc};
use image::RgbImage;

/// Payload offset of the region mask
pub const REGION_OFFSET: usize = 0x30;

/// Payload offset of the 24x24 icon
pub const SMALL_ICON_OFFSET: usize = 0x2050;

/// Edge length of the small icon
pub const SMALL_ICON_DIM: u32 = 24;

/// Byte length of the small icon
pub const SMALL_ICON_LEN: usize = 0x480;

/// Payload offset of the 48x48 icon
pub const LARGE_ICON_OFFSET: usize = SMALL_ICON_OFFSET + SMALL_ICON_LEN;

/// Edge length of the large icon
pub const LARGE_ICON_DIM: u32 = 48;

/// Byte length of the large icon
pub const LARGE_ICON_LEN: usize = 0x1200;

/// Decrypted payload size read by the parser
pub const PAYLOAD_SIZE: usize = LARGE_ICON_OFFSET + LARGE_ICON_LEN;

/// Smallest well-formed blob
pub const MIN_BLOB_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE;

/// Decrypted IDBE payload
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct IdbePayload {
    /// Leading block, kept verbatim
    pub prefix: [u8; REGION_OFFSET],
    /// Region lockout mask
    pub regions: RegionMask,
    /// Reserved bytes up to the title table
    pub reserved: [u8; TITLE_TABLE_OFFSET - REGION_OFFSET - 4],
    /// Title slots in [`Language`] order
    pub titles: [RawTitle; TITLE_SLOT_COUNT],
    /// Tiled 24x24 icon
    #[br(count = SMALL_ICON_LEN)]
    #[bw(assert(small_icon.len() == SMALL_ICON_LEN))]
    pub small_icon: Vec<u8>,
    /// Tiled 48x48 icon
    #[br(count = LARGE_ICON_LEN)]
    #[bw(assert(large_icon.len() == LARGE_ICON_LEN))]
    pub large_icon: Vec<u8>,
}

impl Default for IdbePayload {
    fn default() -> Self {
        Self {
            prefix: [0; REGION_OFFSET],
            regions: RegionMask::default(),
            reserved: [0; TITLE_TABLE_OFFSET - REGION_OFFSET - 4],
            titles: core::array::from_fn(|_| RawTitle::empty()),
            small_icon: vec![0; SMALL_ICON_LEN],
            large_icon: vec![0; LARGE_ICON_LEN],
        }
    }
}

impl IdbePayload {
    /// Serialize to plaintext bytes
    pub fn to_bytes(&self) -> IdbeResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(PAYLOAD_SIZE);
        self.write(&mut Cursor::new(&mut buffer))?;
        Ok(buffer)
    }
}

/// Complete IDBE blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdbeFile {
    /// Cleartext header
    pub header: IdbeHeader,
    /// Decrypted payload
    pub payload: IdbePayload,
    /// Decrypted bytes past the payload, preserved for round-trips
    pub trailing: Vec<u8>,
}

impl IdbeFile {
    /// Parse a blob with the fixed key table
    pub fn parse(blob: &[u8]) -> IdbeResult<Self> {
        Self::parse_with_keys(blob, &IdbeKeyTable::new())
    }

    /// Parse a blob with a custom key table
    pub fn parse_with_keys(blob: &[u8], keys: &IdbeKeyTable) -> IdbeResult<Self> {
        let header = IdbeHeader::parse(blob)?;
        let key = header.key(keys)?;

        if blob.len() < MIN_BLOB_SIZE {
            return Err(IdbeError::BlobTooShort {
                expected: MIN_BLOB_SIZE,
                actual: blob.len(),
            });
        }

        let ciphertext = &blob[HEADER_SIZE..];
        if ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(IdbeError::InvalidCiphertextLength(ciphertext.len()));
        }

        let plaintext = decrypt_aes_cbc(ciphertext, key, &IDBE_IV)?;
        let payload = IdbePayload::read(&mut Cursor::new(&plaintext[..PAYLOAD_SIZE]))?;

        Ok(Self {
            header,
            payload,
            trailing: plaintext[PAYLOAD_SIZE..].to_vec(),
        })
    }

    /// Encrypt back to blob bytes with the fixed key table
    pub fn build(&self) -> IdbeResult<Vec<u8>> {
        self.build_with_keys(&IdbeKeyTable::new())
    }

    /// Encrypt back to blob bytes with a custom key table
    pub fn build_with_keys(&self, keys: &IdbeKeyTable) -> IdbeResult<Vec<u8>> {
        let key = self.header.key(keys)?;
        let mut plaintext = self.payload.to_bytes()?;
        plaintext.extend_from_slice(&self.trailing);

        let ciphertext = encrypt_aes_cbc(&plaintext, key, &IDBE_IV)?;
        let mut blob = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
        blob.extend_from_slice(&self.header.to_bytes());
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Region lockout mask
    pub fn regions(&self) -> RegionMask {
        self.payload.regions
    }

    /// Title text for one language
    pub fn title(&self, language: Language) -> TitleEntry {
        self.payload.titles[language.slot()].decode()
    }

    /// Title text for every named language
    pub fn titles(&self) -> impl Iterator<Item = (Language, TitleEntry)> + '_ {
        Language::ALL
            .into_iter()
            .map(|language| (language, self.title(language)))
    }

    /// Display name (English long description)
    pub fn name(&self) -> String {
        self.title(Language::English).long_description
    }

    /// Decode the 48x48 icon
    pub fn large_icon(&self) -> IdbeResult<RgbImage> {
        untile_rgb565(&self.payload.large_icon, LARGE_ICON_DIM, LARGE_ICON_DIM)
    }

    /// Decode the 24x24 icon
    pub fn small_icon(&self) -> IdbeResult<RgbImage> {
        untile_rgb565(&self.payload.small_icon, SMALL_ICON_DIM, SMALL_ICON_DIM)
    }

    /// Reduce to the fields the atlas pipeline consumes
    pub fn into_decoded(self) -> IdbeResult<DecodedIcon> {
        let bitmap = self.large_icon()?;
        let name = self.name();
        Ok(DecodedIcon {
            normalized_name: normalize_title(&name),
            name,
            regions: self.regions(),
            bitmap,
        })
    }
}

/// Result of decoding one blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIcon {
    /// 48x48 icon
    pub bitmap: RgbImage,
    /// English display name
    pub name: String,
    /// Search form of `name`
    pub normalized_name: String,
    /// Region lockout mask
    pub regions: RegionMask,
}

/// Stateless blob decoder
#[derive(Debug, Clone, Default)]
pub struct IconDecoder {
    keys: IdbeKeyTable,
}

impl IconDecoder {
    /// Create a decoder with the fixed key table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom key table
    pub fn with_keys(keys: IdbeKeyTable) -> Self {
        Self { keys }
    }

    /// Decode a blob into its icon, names and regions
    pub fn decode(&self, blob: &[u8]) -> IdbeResult<DecodedIcon> {
        IdbeFile::parse_with_keys(blob, &self.keys)?.into_decoded()
    }
}

/// Decode a blob with the fixed key table
pub fn decode(blob: &[u8]) -> IdbeResult<DecodedIcon> {
    IconDecoder::new().decode(blob)
}
