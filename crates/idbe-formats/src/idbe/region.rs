//! Region lockout flags

use binrw::{BinRead, BinWrite};
use std::fmt;

/// A single storefront region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Japan
    Japan,
    /// North America
    NorthAmerica,
    /// Europe
    Europe,
    /// Australia
    Australia,
    /// China
    China,
    /// Korea
    Korea,
    /// Taiwan
    Taiwan,
}

impl Region {
    /// All known regions in bit order
    pub const ALL: [Self; 7] = [
        Self::Japan,
        Self::NorthAmerica,
        Self::Europe,
        Self::Australia,
        Self::China,
        Self::Korea,
        Self::Taiwan,
    ];

    /// Bit for this region in a [`RegionMask`]
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Short storefront code
    pub const fn code(self) -> &'static str {
        match self {
            Self::Japan => "JP",
            Self::NorthAmerica => "US",
            Self::Europe => "EU",
            Self::Australia => "AU",
            Self::China => "CN",
            Self::Korea => "KO",
            Self::Taiwan => "TW",
        }
    }

    /// Parse a storefront code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

/// Region bitmask stored at plaintext offset 0x30
#[derive(BinRead, BinWrite, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct RegionMask(pub u32);

impl RegionMask {
    /// Create a mask from raw bits
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check a single region
    pub const fn contains(self, region: Region) -> bool {
        self.0 & region.bit() != 0
    }

    /// Add a region
    #[must_use]
    pub const fn with(self, region: Region) -> Self {
        Self(self.0 | region.bit())
    }

    /// Bits that do not name a known region
    pub const fn unknown_bits(self) -> u32 {
        self.0 & !0x7F
    }

    /// Known regions present in the mask
    pub fn regions(self) -> impl Iterator<Item = Region> {
        Region::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl fmt::Display for RegionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for region in self.regions() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(region.code())?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

impl From<u32> for RegionMask {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<RegionMask> for u32 {
    fn from(mask: RegionMask) -> Self {
        mask.0
    }
}

impl FromIterator<Region> for RegionMask {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bits() {
        assert_eq!(Region::Japan.bit(), 1);
        assert_eq!(Region::NorthAmerica.bit(), 2);
        assert_eq!(Region::Europe.bit(), 4);
        assert_eq!(Region::Taiwan.bit(), 1 << 6);
    }

    #[test]
    fn test_mask_display() {
        let mask: RegionMask = [Region::Japan, Region::NorthAmerica].into_iter().collect();
        assert_eq!(mask.bits(), 3);
        assert_eq!(mask.to_string(), "JP|US");
        assert_eq!(RegionMask::default().to_string(), "none");
    }

    #[test]
    fn test_unknown_bits_are_kept() {
        let region_free = RegionMask::new(0x7FFF_FFFF);
        assert_eq!(region_free.regions().count(), 7);
        assert_eq!(region_free.unknown_bits(), 0x7FFF_FF80);
        assert_eq!(u32::from(region_free), 0x7FFF_FFFF);
    }

    #[test]
    fn test_codes_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_code(region.code()), Some(region));
        }
        assert_eq!(Region::from_code("GB"), None);
    }

    #[test]
    fn test_mask_binrw_little_endian() {
        use binrw::io::Cursor;

        let mut buffer = Vec::new();
        RegionMask::new(0x0000_0006)
            .write(&mut Cursor::new(&mut buffer))
            .expect("Write to in-memory buffer should succeed");
        assert_eq!(buffer, vec![0x06, 0x00, 0x00, 0x00]);

        let parsed = RegionMask::read(&mut Cursor::new(&buffer)).expect("Read should succeed");
        assert!(parsed.contains(Region::NorthAmerica));
        assert!(parsed.contains(Region::Europe));
        assert!(!parsed.contains(Region::Japan));
    }
}
