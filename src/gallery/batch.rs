//! Pure arithmetic between linear item indices and batch numbers.
//!
//! Batches are derived, never stored: a batch is just the half-open index
//! range `[batch * batch_size, batch * batch_size + batch_size)` clamped to
//! the collection length.

use std::ops::Range;

/// A half-open `[start, end)` slice of the item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    pub start: usize,
    pub end: usize,
}

impl BatchRange {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Batch number owning the given linear index.
pub fn batch_of(index: usize, batch_size: usize) -> usize {
    index / batch_size
}

/// Item range covered by `batch`, clamped to `total` items.
///
/// A batch entirely past the end of the collection yields an empty range
/// (`start == end == total`); that is the normal "reached the end" shape,
/// not an error.
pub fn range_of(batch: usize, batch_size: usize, total: usize) -> BatchRange {
    let start = (batch * batch_size).min(total);
    let end = (start + batch_size).min(total);
    BatchRange { start, end }
}
