//! Content hash index
//!
//! The index records the content hash of every occupied slot in slot order
//! and maps each hash back to the slots holding it. Without pixel
//! verification a hash maps to exactly one slot.

use idbe_crypto::ContentHash;
use std::collections::HashMap;

use crate::geometry::Slot;

/// Ordered content hashes with reverse lookup
#[derive(Debug, Clone, Default)]
pub struct AtlasIndex {
    hashes: Vec<ContentHash>,
    lookup: HashMap<ContentHash, Vec<Slot>>,
}

impl AtlasIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// First slot holding `hash`
    pub fn first(&self, hash: &ContentHash) -> Option<Slot> {
        self.lookup.get(hash).and_then(|slots| slots.first().copied())
    }

    /// Every slot holding `hash`, in slot order
    pub fn slots(&self, hash: &ContentHash) -> &[Slot] {
        self.lookup.get(hash).map_or(&[], Vec::as_slice)
    }

    /// Append `hash` as the next slot and return that slot
    pub fn push(&mut self, hash: ContentHash) -> Slot {
        let slot = Slot::new(self.hashes.len() as u32);
        self.hashes.push(hash);
        self.lookup.entry(hash).or_default().push(slot);
        slot
    }

    /// Hashes in slot order
    pub fn iter(&self) -> impl Iterator<Item = &ContentHash> {
        self.hashes.iter()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequential_slots() {
        let mut index = AtlasIndex::new();
        let a = ContentHash::from_data(b"a");
        let b = ContentHash::from_data(b"b");

        assert_eq!(index.push(a), Slot::new(0));
        assert_eq!(index.push(b), Slot::new(1));
        assert_eq!(index.len(), 2);
        assert_eq!(index.first(&b), Some(Slot::new(1)));
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![&a, &b]);
    }

    #[test]
    fn test_duplicate_hashes_keep_every_slot() {
        let mut index = AtlasIndex::new();
        let a = ContentHash::from_data(b"a");
        index.push(a);
        index.push(ContentHash::from_data(b"b"));
        index.push(a);

        assert_eq!(index.slots(&a), &[Slot::new(0), Slot::new(2)]);
        assert_eq!(index.first(&a), Some(Slot::new(0)));
        assert!(index.slots(&ContentHash::from_data(b"c")).is_empty());
        assert_eq!(index.iter().count(), 3);
    }
}
