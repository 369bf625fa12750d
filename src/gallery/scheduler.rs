//! Trailing-edge debounce for boundary signals.
//!
//! A fast fling-scroll can fire dozens of sentinel intersections; only the
//! last one should turn into an extension. The debouncer holds at most one
//! pending extend and reschedules it on every new signal, firing once the
//! delay elapses quietly. It keeps no timer of its own — callers inject
//! `Instant`s, so tests drive a virtual clock.

use std::time::{Duration, Instant};

use tracing::trace;

use super::window::Direction;

/// Cancellable deferred extend call.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(Direction, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a boundary signal. Any pending extend is cancelled and the
    /// deadline restarts from `now`; the newest direction wins.
    pub fn signal(&mut self, direction: Direction, now: Instant) {
        if self.pending.is_some() {
            trace!(?direction, "Rescheduling pending extend");
        }
        self.pending = Some((direction, now + self.delay));
    }

    /// Takes the pending extend if its deadline has passed.
    pub fn due(&mut self, now: Instant) -> Option<Direction> {
        match self.pending {
            Some((direction, deadline)) if now >= deadline => {
                self.pending = None;
                Some(direction)
            }
            _ => None,
        }
    }

    /// Drops any pending extend (session reset).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_fires_after_quiet_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.signal(Direction::Forward, t0);
        assert_eq!(debouncer.due(t0 + DELAY / 2), None);
        assert_eq!(debouncer.due(t0 + DELAY), Some(Direction::Forward));
        // One shot: nothing left afterwards.
        assert_eq!(debouncer.due(t0 + DELAY * 2), None);
    }

    #[test]
    fn test_rapid_signals_collapse_to_one() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        // Ten signals inside half the delay window.
        let mut fired = 0;
        for i in 0..10u32 {
            let now = t0 + DELAY / 20 * i;
            debouncer.signal(Direction::Forward, now);
            if debouncer.due(now).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);

        let last = t0 + DELAY / 20 * 9;
        assert_eq!(debouncer.due(last + DELAY), Some(Direction::Forward));
        assert_eq!(fired, 0);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_newest_direction_wins() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.signal(Direction::Forward, t0);
        debouncer.signal(Direction::Backward, t0 + DELAY / 2);

        // The original deadline no longer fires; the rescheduled one does.
        assert_eq!(debouncer.due(t0 + DELAY), None);
        assert_eq!(
            debouncer.due(t0 + DELAY / 2 + DELAY),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.signal(Direction::Forward, t0);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.due(t0 + DELAY), None);
    }
}
