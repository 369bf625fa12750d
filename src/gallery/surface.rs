//! Host-facing seams: the rendering surface and the proximity observer.
//!
//! The engine never touches a real widget tree. It asks a [`RenderSurface`]
//! to insert and remove nodes at the two sentinel anchors bounding the
//! materialized region, and registers interest in targets with a
//! [`ProximityObserver`]. Test doubles for both live in `manager::tests`.

use crate::models::MediaItem;

use super::handles::DisplayHandle;

/// Identifies a rendered element by its stable linear item index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

/// Opaque identifier for a node owned by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Insertion position relative to the sentinels bounding the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Just after the front sentinel (backward extension).
    FrontSentinel,
    /// Just before the rear sentinel (forward extension).
    RearSentinel,
}

/// What a node should display. The source handle is deliberately absent:
/// it is attached later, when the element itself reports proximity.
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec<'a> {
    pub id: ElementId,
    pub item: &'a MediaItem,
}

/// Scroll geometry for the degraded (observer-less) path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance in pixels from the current position to the top of the
    /// scrollable content.
    pub distance_to_top: f64,
    /// Distance in pixels from the current position to the bottom.
    pub distance_to_bottom: f64,
}

/// The host component that owns the visual tree.
pub trait RenderSurface {
    /// Inserts one node per spec at `anchor`, preserving spec order, and
    /// returns their node ids in the same order.
    fn insert(&mut self, anchor: Anchor, specs: &[ElementSpec<'_>]) -> Vec<NodeId>;

    /// Removes a node. Must be idempotent against already-removed nodes.
    fn remove(&mut self, node: NodeId);

    /// Attaches a display handle as the node's content source.
    fn attach_source(&mut self, node: NodeId, handle: &DisplayHandle);

    /// Clears the node's content source (the handle itself stays cached).
    fn detach_source(&mut self, node: NodeId);

    /// Current scroll geometry, or `None` when the surface cannot report
    /// it. Only consulted on the degraded path.
    fn scroll_metrics(&self) -> Option<ScrollMetrics> {
        None
    }
}

/// A target the proximity source can be asked to watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserveTarget {
    /// Sentinel marking the front edge of the materialized region.
    FrontSentinel,
    /// Sentinel marking the rear edge of the materialized region.
    RearSentinel,
    /// A rendered element's own node.
    Element(ElementId),
}

/// The host component that reports when targets approach the viewport.
pub trait ProximityObserver {
    /// Registers interest in a target. Observing a target that is already
    /// observed must be a no-op (sentinels are re-observed on session reset).
    fn observe(&mut self, target: ObserveTarget);

    /// Must be a no-op for targets that were never observed or were
    /// already unobserved.
    fn unobserve(&mut self, target: ObserveTarget);
}
