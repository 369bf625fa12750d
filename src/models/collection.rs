//! The ordered, shuffle-once item collection a gallery session browses.

use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::MediaItem;

/// An ordered sequence of media items, fixed after construction.
///
/// Linear indices into the collection are stable for its entire lifetime;
/// the window engine keys rendered elements and cached handles by them.
/// There is deliberately no mutating API.
#[derive(Debug, Clone, Default)]
pub struct MediaCollection {
    items: Vec<MediaItem>,
}

impl MediaCollection {
    /// Wraps an already-ordered list of items without reordering.
    pub fn from_items(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Builds a collection by Fisher-Yates shuffling the given items.
    ///
    /// Generic over the RNG so tests can pass a seeded `StdRng`.
    pub fn shuffled<R: Rng + ?Sized>(mut items: Vec<MediaItem>, rng: &mut R) -> Self {
        items.shuffle(rng);
        debug!(count = items.len(), "Shuffled media collection");
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// Returns the items in `range`. The caller is expected to pass a range
    /// already clamped to the collection length (see `gallery::batch`).
    pub fn slice(&self, range: Range<usize>) -> &[MediaItem] {
        &self.items[range]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn items(count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| MediaItem::from_path(Path::new(&format!("/pics/img_{i:03}.jpg"))).unwrap())
            .collect()
    }

    #[test]
    fn test_shuffle_preserves_contents() {
        let original = items(50);
        let mut rng = StdRng::seed_from_u64(7);
        let collection = MediaCollection::shuffled(original.clone(), &mut rng);

        assert_eq!(collection.len(), 50);
        let before: HashSet<_> = original.iter().map(|i| i.path.clone()).collect();
        let after: HashSet<_> = collection.iter().map(|i| i.path.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let source = items(30);
        let a = MediaCollection::shuffled(source.clone(), &mut StdRng::seed_from_u64(42));
        let b = MediaCollection::shuffled(source, &mut StdRng::seed_from_u64(42));
        assert!(a.iter().eq(b.iter()));
    }

    #[test]
    fn test_slice_and_get() {
        let collection = MediaCollection::from_items(items(10));
        assert_eq!(collection.slice(2..5).len(), 3);
        assert_eq!(collection.get(9).unwrap().name, "img_009.jpg");
        assert!(collection.get(10).is_none());
    }
}
