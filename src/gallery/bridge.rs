//! Translates raw proximity signals into serialized engine commands.
//!
//! Two signal classes are handled differently: boundary signals (a sentinel
//! entering the observation region) are routed through the debounce gate,
//! because a fling-scroll fires them in bursts; content signals (an
//! element's own node entering) map directly to a one-time handle attach
//! and skip the gate entirely.

use std::time::{Duration, Instant};

use super::scheduler::Debouncer;
use super::surface::{ElementId, ObserveTarget};
use super::window::Direction;

/// A raw visibility event delivered by the host's observation source.
#[derive(Debug, Clone, Copy)]
pub struct ObserverEvent {
    pub target: ObserveTarget,
    pub is_intersecting: bool,
    /// How far outside the viewport the target sits, in pixels (0 when it
    /// intersects). Stands in for the bounding rect of a real observer.
    pub viewport_distance: f64,
}

impl ObserverEvent {
    /// Convenience constructor for a target entering the region.
    pub fn entered(target: ObserveTarget) -> Self {
        Self {
            target,
            is_intersecting: true,
            viewport_distance: 0.0,
        }
    }

    /// Convenience constructor for a target leaving, `distance` px out.
    pub fn exited(target: ObserveTarget, distance: f64) -> Self {
        Self {
            target,
            is_intersecting: false,
            viewport_distance: distance,
        }
    }
}

/// A command for the load orchestrator, produced by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    Extend(Direction),
    /// Attach the element's display handle (it came near the viewport).
    Attach(ElementId),
    /// Clear the element's content source (it scrolled far away). The
    /// cached handle stays; re-attaching is a cache hit.
    Detach(ElementId),
}

/// Debouncing adapter between the observation source and the orchestrator.
#[derive(Debug)]
pub struct VisibilityBridge {
    debouncer: Debouncer,
}

impl VisibilityBridge {
    pub fn new(load_debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(load_debounce),
        }
    }

    /// Feeds one raw event through the bridge.
    ///
    /// Boundary signals return `None` here and surface later via
    /// [`poll`](Self::poll) once the debounce delay elapses. Content signals
    /// return their command immediately.
    pub fn on_event(
        &mut self,
        event: &ObserverEvent,
        now: Instant,
        unload_distance: f64,
    ) -> Option<GalleryCommand> {
        match event.target {
            ObserveTarget::RearSentinel if event.is_intersecting => {
                self.debouncer.signal(Direction::Forward, now);
                None
            }
            ObserveTarget::FrontSentinel if event.is_intersecting => {
                self.debouncer.signal(Direction::Backward, now);
                None
            }
            ObserveTarget::Element(id) if event.is_intersecting => {
                Some(GalleryCommand::Attach(id))
            }
            ObserveTarget::Element(id) if event.viewport_distance > unload_distance => {
                Some(GalleryCommand::Detach(id))
            }
            _ => None,
        }
    }

    /// Degraded-path boundary signal (manual scroll-position check). Shares
    /// the same debounce gate as observer-driven signals.
    pub fn boundary(&mut self, direction: Direction, now: Instant) {
        self.debouncer.signal(direction, now);
    }

    /// Returns the debounced extend once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<GalleryCommand> {
        self.debouncer.due(now).map(GalleryCommand::Extend)
    }

    /// Cancels any pending debounced extend (session reset).
    pub fn reset(&mut self) {
        self.debouncer.cancel();
    }

    pub fn has_pending_extend(&self) -> bool {
        self.debouncer.is_pending()
    }
}
