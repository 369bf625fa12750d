//! State machine for the contiguous range of materialized batches.
//!
//! The window is the pair `(start_batch, end_batch)` plus a single-load
//! latch and the direction of the last completed extension. It is the sole
//! authority on whether a batch is currently materialized.

use tracing::trace;

/// Direction a window extension grows towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The contiguous range of materialized batches.
///
/// `end_batch == start_batch - 1` encodes the empty window, so both fields
/// are signed even though committed batch numbers are never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    start_batch: isize,
    end_batch: isize,
    loading: bool,
    last_direction: Option<Direction>,
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowState {
    pub fn new() -> Self {
        Self {
            start_batch: 0,
            end_batch: -1,
            loading: false,
            last_direction: None,
        }
    }

    /// Restores the initial empty-window state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_empty(&self) -> bool {
        self.end_batch < self.start_batch
    }

    /// Number of batches currently materialized.
    pub fn batch_count(&self) -> usize {
        (self.end_batch - self.start_batch + 1).max(0) as usize
    }

    pub fn contains(&self, batch: usize) -> bool {
        let batch = batch as isize;
        batch >= self.start_batch && batch <= self.end_batch
    }

    /// First materialized batch, when the window is non-empty.
    pub fn first_batch(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.start_batch as usize)
    }

    /// Last materialized batch, when the window is non-empty.
    pub fn last_batch(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.end_batch as usize)
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The batch an extension in `direction` would materialize next.
    ///
    /// `None` for a backward extension already at batch 0. Forward targets
    /// past the end of the collection are only discovered by the caller when
    /// the batch range turns out empty.
    pub fn next_batch(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward => Some((self.end_batch + 1) as usize),
            Direction::Backward => {
                let prev = self.start_batch - 1;
                (prev >= 0).then_some(prev as usize)
            }
        }
    }

    /// Acquires the single-load latch. Returns `false` when a load is
    /// already in flight; the caller drops the request (no queue — the next
    /// visibility signal retries if still relevant).
    pub fn try_begin(&mut self) -> bool {
        if self.loading {
            trace!("Load already in flight, dropping extend request");
            return false;
        }
        self.loading = true;
        true
    }

    /// Releases the latch without committing (empty-range no-op path).
    pub fn abort(&mut self) {
        self.loading = false;
    }

    /// Commits a completed extension: advances the pointer on the extended
    /// side, records the direction, releases the latch.
    pub fn commit(&mut self, direction: Direction) {
        debug_assert!(self.loading, "commit without begin");
        match direction {
            Direction::Forward => self.end_batch += 1,
            Direction::Backward => self.start_batch -= 1,
        }
        self.last_direction = Some(direction);
        self.loading = false;
        trace!(
            start = self.start_batch,
            end = self.end_batch,
            "Window extended"
        );
    }

    /// Names the batch to evict when the window exceeds `window_size`.
    ///
    /// Eviction always comes from the side opposite the last extension, so
    /// just-requested content stays intact and the window slides instead of
    /// growing. `None` when within budget or no extension happened yet.
    pub fn over_budget(&self, window_size: usize) -> Option<usize> {
        if self.batch_count() <= window_size {
            return None;
        }
        match self.last_direction? {
            Direction::Forward => Some(self.start_batch as usize),
            Direction::Backward => Some(self.end_batch as usize),
        }
    }

    /// Shrinks the window from the front (after evicting the start batch).
    pub fn drop_front(&mut self) {
        debug_assert!(!self.is_empty());
        self.start_batch += 1;
    }

    /// Shrinks the window from the back (after evicting the end batch).
    pub fn drop_back(&mut self) {
        debug_assert!(!self.is_empty());
        self.end_batch -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let window = WindowState::new();
        assert!(window.is_empty());
        assert_eq!(window.batch_count(), 0);
        assert_eq!(window.first_batch(), None);
        assert!(!window.contains(0));
        assert_eq!(window.last_direction(), None);
    }

    #[test]
    fn test_forward_commit_advances_end() {
        let mut window = WindowState::new();
        assert_eq!(window.next_batch(Direction::Forward), Some(0));
        assert!(window.try_begin());
        window.commit(Direction::Forward);

        assert_eq!(window.batch_count(), 1);
        assert!(window.contains(0));
        assert_eq!(window.last_direction(), Some(Direction::Forward));
        assert!(!window.is_loading());
    }

    #[test]
    fn test_backward_blocked_at_zero() {
        let mut window = WindowState::new();
        assert!(window.try_begin());
        window.commit(Direction::Forward);
        assert_eq!(window.next_batch(Direction::Backward), None);
    }

    #[test]
    fn test_latch_drops_second_begin() {
        let mut window = WindowState::new();
        assert!(window.try_begin());
        // A second extend arriving mid-load is dropped, not queued.
        assert!(!window.try_begin());
        window.commit(Direction::Forward);
        assert!(window.try_begin());
    }

    #[test]
    fn test_abort_releases_latch_without_moving() {
        let mut window = WindowState::new();
        assert!(window.try_begin());
        window.abort();
        assert!(window.is_empty());
        assert!(window.try_begin());
    }

    #[test]
    fn test_over_budget_evicts_opposite_side() {
        let mut window = WindowState::new();
        for _ in 0..4 {
            assert!(window.try_begin());
            window.commit(Direction::Forward);
        }
        // Window is {0..3}; budget of 3 names batch 0, never batch 3.
        assert_eq!(window.over_budget(3), Some(0));
        window.drop_front();
        assert_eq!(window.over_budget(3), None);
        assert_eq!(window.first_batch(), Some(1));
        assert_eq!(window.last_batch(), Some(3));

        assert!(window.try_begin());
        window.commit(Direction::Backward);
        // Window is {0..3} again, last grown backward: evict from the end.
        assert_eq!(window.over_budget(3), Some(3));
        window.drop_back();
        assert_eq!(window.last_batch(), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut window = WindowState::new();
        assert!(window.try_begin());
        window.commit(Direction::Forward);
        window.reset();
        assert_eq!(window, WindowState::new());
    }
}
