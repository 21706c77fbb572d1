//! Per-language title slots
//!
//! The payload carries sixteen 0x200-byte title slots starting at 0x50. Each
//! slot holds three UTF-16LE fields: a short description, a long description
//! (the display name) and the publisher.

use binrw::{BinRead, BinWrite};
use icu_normalizer::DecomposingNormalizerBorrowed;
use icu_properties::CodePointMapData;
use icu_properties::props::CanonicalCombiningClass;

use super::error::{IdbeError, IdbeResult};

/// Offset of the first title slot in the payload
pub const TITLE_TABLE_OFFSET: usize = 0x50;

/// Size of one title slot
pub const TITLE_SLOT_SIZE: usize = 0x200;

/// Number of title slots in the payload
pub const TITLE_SLOT_COUNT: usize = 16;

const SHORT_DESCRIPTION_SIZE: usize = 0x80;
const LONG_DESCRIPTION_SIZE: usize = 0x100;
const PUBLISHER_SIZE: usize = 0x80;

/// Title slot languages in payload order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    /// Japanese
    Japanese,
    /// English
    English,
    /// French
    French,
    /// German
    German,
    /// Italian
    Italian,
    /// Spanish
    Spanish,
    /// Traditional Chinese
    Taiwanese,
    /// Korean
    Korean,
    /// Dutch
    Dutch,
    /// Portuguese
    Portuguese,
    /// Russian
    Russian,
}

impl Language {
    /// Named languages in slot order
    pub const ALL: [Self; 11] = [
        Self::Japanese,
        Self::English,
        Self::French,
        Self::German,
        Self::Italian,
        Self::Spanish,
        Self::Taiwanese,
        Self::Korean,
        Self::Dutch,
        Self::Portuguese,
        Self::Russian,
    ];

    /// Slot index in the title table
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Payload offset of this language's slot
    pub const fn offset(self) -> usize {
        self.slot() * TITLE_SLOT_SIZE + TITLE_TABLE_OFFSET
    }

    /// Two-letter code
    pub const fn code(self) -> &'static str {
        match self {
            Self::Japanese => "JP",
            Self::English => "EN",
            Self::French => "FR",
            Self::German => "DE",
            Self::Italian => "IT",
            Self::Spanish => "ES",
            Self::Taiwanese => "TW",
            Self::Korean => "KO",
            Self::Dutch => "NL",
            Self::Portuguese => "PT",
            Self::Russian => "RU",
        }
    }

    /// Parse a two-letter code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

/// Decoded text of one title slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleEntry {
    /// Short description
    pub short_description: String,
    /// Long description, used as the display name
    pub long_description: String,
    /// Publisher
    pub publisher: String,
}

impl TitleEntry {
    /// Create an entry from its three fields
    pub fn new(
        short_description: impl Into<String>,
        long_description: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            short_description: short_description.into(),
            long_description: long_description.into(),
            publisher: publisher.into(),
        }
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        self.short_description.is_empty()
            && self.long_description.is_empty()
            && self.publisher.is_empty()
    }
}

/// Raw title slot as stored in the payload
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct RawTitle {
    /// UTF-16LE short description
    pub short_description: [u8; SHORT_DESCRIPTION_SIZE],
    /// UTF-16LE long description
    pub long_description: [u8; LONG_DESCRIPTION_SIZE],
    /// UTF-16LE publisher
    pub publisher: [u8; PUBLISHER_SIZE],
}

impl RawTitle {
    /// An all-zero slot
    pub const fn empty() -> Self {
        Self {
            short_description: [0; SHORT_DESCRIPTION_SIZE],
            long_description: [0; LONG_DESCRIPTION_SIZE],
            publisher: [0; PUBLISHER_SIZE],
        }
    }

    /// Decode the three text fields
    pub fn decode(&self) -> TitleEntry {
        TitleEntry {
            short_description: decode_utf16_field(&self.short_description),
            long_description: decode_utf16_field(&self.long_description),
            publisher: decode_utf16_field(&self.publisher),
        }
    }

    /// Encode an entry, rejecting text that overflows a field
    pub fn encode(entry: &TitleEntry) -> IdbeResult<Self> {
        Ok(Self {
            short_description: encode_utf16_field("short description", &entry.short_description)?,
            long_description: encode_utf16_field("long description", &entry.long_description)?,
            publisher: encode_utf16_field("publisher", &entry.publisher)?,
        })
    }
}

impl Default for RawTitle {
    fn default() -> Self {
        Self::empty()
    }
}

/// Decode a fixed-size UTF-16LE field
///
/// Invalid surrogates become U+FFFD. NUL padding is trimmed from both ends and
/// line breaks become spaces.
pub fn decode_utf16_field(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    text.trim_matches('\0').replace('\n', " ")
}

/// Encode text into a zero-padded UTF-16LE field of `N` bytes
pub fn encode_utf16_field<const N: usize>(field: &'static str, text: &str) -> IdbeResult<[u8; N]> {
    let units: Vec<u16> = text.encode_utf16().collect();
    if units.len() * 2 > N {
        return Err(IdbeError::TitleTooLong {
            field,
            max: N / 2,
            actual: units.len(),
        });
    }

    let mut out = [0u8; N];
    for (dst, unit) in out.chunks_exact_mut(2).zip(units) {
        dst.copy_from_slice(&unit.to_le_bytes());
    }
    Ok(out)
}

/// Fold a title into its search form
///
/// Registered and trademark signs become spaces, the text is decomposed with
/// NFKD, combining marks are dropped and the result is lower-cased.
pub fn normalize_title(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if matches!(c, '\u{AE}' | '\u{2122}') { ' ' } else { c })
        .collect();

    let combining_class = CodePointMapData::<CanonicalCombiningClass>::new();
    DecomposingNormalizerBorrowed::new_nfkd()
        .normalize(&replaced)
        .chars()
        .filter(|&c| combining_class.get(c) == CanonicalCombiningClass::NotReordered)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_english_offset() {
        assert_eq!(Language::English.offset(), 0x250);
        assert_eq!(Language::Japanese.offset(), 0x50);
        assert_eq!(Language::Russian.offset(), 10 * 0x200 + 0x50);
    }

    #[test]
    fn test_raw_title_is_one_slot() {
        assert_eq!(
            SHORT_DESCRIPTION_SIZE + LONG_DESCRIPTION_SIZE + PUBLISHER_SIZE,
            TITLE_SLOT_SIZE
        );
    }

    #[test]
    fn test_decode_trims_and_joins_lines() {
        let field: [u8; 0x100] =
            encode_utf16_field("long description", "Super\nGame").expect("fits");
        assert_eq!(decode_utf16_field(&field), "Super Game");
    }

    #[test]
    fn test_decode_lone_surrogate() {
        let bytes = [0x00, 0xD8, 0x41, 0x00, 0x00, 0x00];
        assert_eq!(decode_utf16_field(&bytes), "\u{FFFD}A");
    }

    #[test]
    fn test_encode_overflow() {
        let text = "x".repeat(65);
        let err = encode_utf16_field::<0x80>("short description", &text).unwrap_err();
        assert!(matches!(
            err,
            IdbeError::TitleTooLong {
                max: 64,
                actual: 65,
                ..
            }
        ));
    }

    #[test]
    fn test_encode_decode_entry() {
        let entry = TitleEntry::new("Pokémon", "Pokémon™ Picross", "Nintendo");
        let raw = RawTitle::encode(&entry).expect("fits");
        assert_eq!(raw.decode(), entry);
        assert!(RawTitle::empty().decode().is_empty());
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Pokémon™ Picross"), "pokemon  picross");
        assert_eq!(normalize_title("Mario® Kart"), "mario  kart");
        assert_eq!(normalize_title("ÉCLAIR"), "eclair");
        // compatibility decomposition folds full-width forms
        assert_eq!(normalize_title("ＡＢＣ"), "abc");
    }

    #[test]
    fn test_language_codes() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(
            Language::ALL.iter().position(|l| l.code() == "EN"),
            Some(1)
        );
    }
}
