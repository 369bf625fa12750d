//! The load orchestrator: one `GalleryManager` per gallery session.
//!
//! The manager owns the collection, the window state, the rendered-element
//! table and the handle cache, and drives the host's rendering surface and
//! proximity observer through their trait seams. All window mutations go
//! through `&mut self`, so a multi-threaded host must route events onto a
//! single owner of the manager to keep the single-writer invariant.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::models::MediaCollection;

use super::batch::range_of;
use super::bridge::{GalleryCommand, ObserverEvent, VisibilityBridge};
use super::handles::{DisplayHandle, FileUriAllocator, HandleAllocator, HandleCache};
use super::surface::{
    Anchor, ElementId, ElementSpec, NodeId, ObserveTarget, ProximityObserver, RenderSurface,
};
use super::window::{Direction, WindowState};

/// One materialized item: the engine-side record behind a surface node.
///
/// The node is only a projection; the record is the model. Its handle stays
/// `None` until the element itself (not just its batch) reports proximity.
#[derive(Debug, Clone)]
pub struct RenderedElement {
    /// Linear index of the source item in the collection.
    pub index: usize,
    /// The surface node projecting this record.
    pub node: NodeId,
    /// Display handle, attached lazily on the element's content signal.
    pub handle: Option<DisplayHandle>,
}

/// Sliding-window batch manager for one gallery session.
pub struct GalleryManager<S, O, A: HandleAllocator> {
    config: GalleryConfig,
    collection: MediaCollection,
    window: WindowState,
    /// Materialized elements keyed by linear index. Contiguous by
    /// construction: exactly the indices of the window's batches.
    elements: BTreeMap<usize, RenderedElement>,
    cache: HandleCache<A>,
    bridge: VisibilityBridge,
    surface: S,
    observer: O,
}

impl<S, O> GalleryManager<S, O, FileUriAllocator>
where
    S: RenderSurface,
    O: ProximityObserver,
{
    /// Manager with the default `file://` handle allocator.
    pub fn new(config: GalleryConfig, surface: S, observer: O) -> Self {
        Self::with_allocator(config, surface, observer, FileUriAllocator)
    }
}

impl<S, O, A> GalleryManager<S, O, A>
where
    S: RenderSurface,
    O: ProximityObserver,
    A: HandleAllocator,
{
    /// Manager with a host-provided handle allocator. The session starts
    /// empty; call [`open`](Self::open) with a collection to begin.
    pub fn with_allocator(config: GalleryConfig, surface: S, observer: O, alloc: A) -> Self {
        let config = config.sanitized();
        let bridge = VisibilityBridge::new(config.load_debounce);
        Self {
            config,
            collection: MediaCollection::default(),
            window: WindowState::new(),
            elements: BTreeMap::new(),
            cache: HandleCache::new(alloc),
            bridge,
            surface,
            observer,
        }
    }

    /// Starts browsing a collection (the folder-selection path).
    ///
    /// Discards the previous session wholesale: cancels any pending
    /// debounced load, evicts every element, releases all cached handles and
    /// resets the window, then observes the sentinels and materializes the
    /// first batch.
    pub fn open(&mut self, collection: MediaCollection) {
        self.bridge.reset();
        self.clear_elements();
        self.cache.release_all();
        self.window.reset();
        self.collection = collection;

        info!(items = self.collection.len(), "Opened gallery session");
        self.observer.observe(ObserveTarget::FrontSentinel);
        self.observer.observe(ObserveTarget::RearSentinel);
        self.extend(Direction::Forward);
    }

    /// Feeds one raw visibility event from the host's observation source.
    pub fn handle_event(&mut self, event: &ObserverEvent, now: Instant) {
        if let Some(command) = self.bridge.on_event(event, now, self.config.unload_distance) {
            self.apply(command);
        }
    }

    /// Fires the pending debounced extension once its delay has elapsed.
    /// Hosts call this from their timer or frame callback.
    pub fn tick(&mut self, now: Instant) {
        if let Some(command) = self.bridge.poll(now) {
            self.apply(command);
        }
    }

    /// Degraded path for hosts without an observation source: compares the
    /// surface's scroll position against the buffer distance and routes the
    /// resulting boundary signals through the same debounce gate.
    pub fn check_scroll(&mut self, now: Instant) {
        let Some(metrics) = self.surface.scroll_metrics() else {
            return;
        };
        if metrics.distance_to_top <= self.config.buffer_px
            && self.window.next_batch(Direction::Backward).is_some()
        {
            self.bridge.boundary(Direction::Backward, now);
        }
        if metrics.distance_to_bottom <= self.config.buffer_px && self.has_items_ahead() {
            self.bridge.boundary(Direction::Forward, now);
        }
    }

    /// Extends the window by one batch in `direction`.
    ///
    /// Returns `true` when a batch was materialized. Both failure modes are
    /// silent no-ops by design: a load already in flight drops the request
    /// (the next signal retries), and an empty target range is the normal
    /// end-of-collection condition.
    pub fn extend(&mut self, direction: Direction) -> bool {
        if !self.window.try_begin() {
            return false;
        }
        let Some(batch) = self.window.next_batch(direction) else {
            self.window.abort();
            return false;
        };
        let range = range_of(batch, self.config.batch_size, self.collection.len());
        if range.is_empty() {
            self.window.abort();
            return false;
        }
        debug_assert!(!self.window.contains(batch), "batch already materialized");

        let items = self.collection.slice(range.as_range());
        let specs: Vec<ElementSpec<'_>> = items
            .iter()
            .enumerate()
            .map(|(offset, item)| ElementSpec {
                id: ElementId(range.start + offset),
                item,
            })
            .collect();
        let anchor = match direction {
            Direction::Forward => Anchor::RearSentinel,
            Direction::Backward => Anchor::FrontSentinel,
        };
        let nodes = self.surface.insert(anchor, &specs);
        debug_assert_eq!(nodes.len(), specs.len());

        for (spec, node) in specs.iter().zip(nodes) {
            let index = spec.id.0;
            self.elements.insert(
                index,
                RenderedElement {
                    index,
                    node,
                    handle: None,
                },
            );
            self.observer.observe(ObserveTarget::Element(spec.id));
        }

        self.window.commit(direction);
        debug!(batch, ?direction, count = range.len(), "Materialized batch");
        self.adjust_window();
        true
    }

    /// Evicts one batch from the opposite side when the window has grown
    /// past its size bound, keeping just-requested content intact.
    fn adjust_window(&mut self) {
        let Some(batch) = self.window.over_budget(self.config.window_size) else {
            return;
        };
        self.evict_batch(batch);
        if self.window.first_batch() == Some(batch) {
            self.window.drop_front();
        } else {
            self.window.drop_back();
        }
    }

    /// Dematerializes every element in `batch`: unobserve, remove the node,
    /// release the handle if one was created. Idempotent against elements
    /// already removed.
    fn evict_batch(&mut self, batch: usize) {
        let range = range_of(batch, self.config.batch_size, self.collection.len());
        let indices: Vec<usize> = self.elements.range(range.as_range()).map(|(i, _)| *i).collect();
        for index in &indices {
            if let Some(element) = self.elements.remove(index) {
                self.observer.unobserve(ObserveTarget::Element(ElementId(*index)));
                self.surface.remove(element.node);
                self.cache.release(*index);
            }
        }
        debug!(batch, count = indices.len(), "Evicted batch");
    }

    fn apply(&mut self, command: GalleryCommand) {
        match command {
            GalleryCommand::Extend(direction) => {
                self.extend(direction);
            }
            GalleryCommand::Attach(id) => {
                if let Err(err) = self.attach_handle(id) {
                    // Recoverable: the element stays without a source and
                    // retries on its next visibility signal.
                    warn!(error = %err, "Handle allocation failed, element left unloaded");
                }
            }
            GalleryCommand::Detach(id) => self.detach_source(id),
        }
    }

    /// Attaches the element's display handle, allocating it on first use.
    /// Stale ids (already-evicted elements) are ignored.
    fn attach_handle(&mut self, id: ElementId) -> Result<(), GalleryError> {
        let index = id.0;
        let Some(element) = self.elements.get(&index) else {
            return Ok(());
        };
        if element.handle.is_some() {
            return Ok(());
        }
        let node = element.node;
        let Some(item) = self.collection.get(index) else {
            return Ok(());
        };
        let handle = self.cache.get_or_create(index, item)?;
        self.surface.attach_source(node, &handle);
        if let Some(element) = self.elements.get_mut(&index) {
            element.handle = Some(handle);
        }
        Ok(())
    }

    /// Clears the element's content source after it scrolled far away. The
    /// cached handle is kept so re-attaching is a cache hit, and release
    /// still happens exactly once, at eviction or teardown.
    fn detach_source(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id.0) {
            if element.handle.take().is_some() {
                self.surface.detach_source(element.node);
            }
        }
    }

    fn clear_elements(&mut self) {
        let indices: Vec<usize> = self.elements.keys().copied().collect();
        for index in indices {
            if let Some(element) = self.elements.remove(&index) {
                self.observer.unobserve(ObserveTarget::Element(ElementId(index)));
                self.surface.remove(element.node);
            }
        }
    }

    fn has_items_ahead(&self) -> bool {
        self.window
            .next_batch(Direction::Forward)
            .map(|batch| {
                !range_of(batch, self.config.batch_size, self.collection.len()).is_empty()
            })
            .unwrap_or(false)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn collection(&self) -> &MediaCollection {
        &self.collection
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    /// Materialized elements in linear order.
    pub fn elements(&self) -> impl Iterator<Item = &RenderedElement> {
        self.elements.values()
    }

    pub fn element(&self, id: ElementId) -> Option<&RenderedElement> {
        self.elements.get(&id.0)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// The handle cache; clonable, so a host viewer can share it.
    pub fn cache(&self) -> &HandleCache<A> {
        &self.cache
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}
