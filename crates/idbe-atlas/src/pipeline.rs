//! Batch ingestion of IDBE blobs into an atlas
//!
//! A crawl yields, per title, either the fetched blob or nothing. Each blob
//! is decoded and its icon placed in the atlas. A missing blob and a blob
//! that fails to decode are reported separately; neither stops the batch.

use idbe_formats::idbe::{DecodedIcon, IconDecoder, IdbeError};
use tracing::{debug, warn};

use crate::atlas::IconAtlas;
use crate::geometry::Slot;

/// Title id prefix of DSiWare titles, which have no icon data
pub const DSIWARE_PREFIX: &str = "00048004";

/// Whether `title_id` names a DSiWare title
pub fn is_dsiware(title_id: &str) -> bool {
    title_id
        .get(..DSIWARE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DSIWARE_PREFIX))
}

/// Result of processing one title
#[derive(Debug)]
pub enum IconOutcome {
    /// Icon decoded and placed
    Added {
        /// Assigned slot
        slot: Slot,
        /// Decoded names and regions
        icon: DecodedIcon,
        /// Whether the slot already held identical content
        deduplicated: bool,
    },
    /// No blob was available for the title
    Unavailable,
    /// The blob was malformed
    Failed(IdbeError),
}

impl IconOutcome {
    /// Assigned slot, if the icon was placed
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Self::Added { slot, .. } => Some(*slot),
            Self::Unavailable | Self::Failed(_) => None,
        }
    }
}

/// Counters for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Icons that took a new slot
    pub added: u64,
    /// Icons that matched an existing slot
    pub deduplicated: u64,
    /// Titles without a blob
    pub unavailable: u64,
    /// Blobs that failed to decode
    pub failed: u64,
}

impl BatchStats {
    /// Titles processed
    pub fn total(&self) -> u64 {
        self.added + self.deduplicated + self.unavailable + self.failed
    }
}

/// Decodes blobs and feeds their icons to an atlas
#[derive(Debug)]
pub struct IconPipeline<'a> {
    atlas: &'a mut IconAtlas,
    decoder: IconDecoder,
    stats: BatchStats,
}

impl<'a> IconPipeline<'a> {
    /// Create a pipeline using the fixed key table
    pub fn new(atlas: &'a mut IconAtlas) -> Self {
        Self {
            atlas,
            decoder: IconDecoder::new(),
            stats: BatchStats::default(),
        }
    }

    /// Use a custom decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: IconDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Process one title
    pub fn process(&mut self, title_id: &str, blob: Option<&[u8]>) -> IconOutcome {
        let Some(blob) = blob else {
            if is_dsiware(title_id) {
                debug!("No icon for DSiWare title {title_id}");
            } else {
                warn!("No icon available for title {title_id}");
            }
            self.stats.unavailable += 1;
            return IconOutcome::Unavailable;
        };

        let icon = match self.decoder.decode(blob) {
            Ok(icon) => icon,
            Err(e) => {
                warn!("Failed to decode icon for title {title_id}: {e}");
                self.stats.failed += 1;
                return IconOutcome::Failed(e);
            }
        };

        let before = self.atlas.cursor();
        let slot = self.atlas.add(&icon.bitmap);
        let deduplicated = self.atlas.cursor() == before;
        if deduplicated {
            self.stats.deduplicated += 1;
        } else {
            self.stats.added += 1;
        }
        debug!("Title {title_id} ({}) -> slot {slot}", icon.name);

        IconOutcome::Added {
            slot,
            icon,
            deduplicated,
        }
    }

    /// Process a sequence of titles in order
    pub fn process_all<'b, I>(&mut self, titles: I) -> Vec<(&'b str, IconOutcome)>
    where
        I: IntoIterator<Item = (&'b str, Option<&'b [u8]>)>,
    {
        titles
            .into_iter()
            .map(|(title_id, blob)| (title_id, self.process(title_id, blob)))
            .collect()
    }

    /// Counters so far
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    /// Release the atlas and return the final counters
    pub fn finish(self) -> BatchStats {
        self.stats
    }
}
