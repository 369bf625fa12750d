//! Lazily-created display handles, cached per item.
//!
//! A handle is whatever the host needs to actually show an item's content
//! (a blob URL equivalent). Handles are allocated at most once per item,
//! cached by linear index, and released exactly once — at eviction of the
//! owning batch or at session teardown, whichever comes first.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::GalleryError;
use crate::models::MediaItem;

/// A reference-stable display handle for one item's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayHandle(Arc<str>);

impl DisplayHandle {
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Host seam for allocating and freeing the resource behind a handle.
///
/// Allocation is expected to be synchronous and cheap (a local handle, not
/// I/O). Failures are recoverable: the element stays without a source and
/// retries on its next visibility signal.
pub trait HandleAllocator {
    fn allocate(&mut self, item: &MediaItem) -> Result<DisplayHandle>;

    /// Frees the underlying resource. Called exactly once per live handle.
    fn free(&mut self, handle: DisplayHandle);
}

/// Default allocator: `file://` URIs straight from the item path. Nothing
/// to free on release.
#[derive(Debug, Default, Clone)]
pub struct FileUriAllocator;

impl HandleAllocator for FileUriAllocator {
    fn allocate(&mut self, item: &MediaItem) -> Result<DisplayHandle> {
        Ok(DisplayHandle::new(format!(
            "file://{}",
            item.path.to_string_lossy()
        )))
    }

    fn free(&mut self, _handle: DisplayHandle) {}
}

struct CacheInner<A> {
    alloc: A,
    entries: HashMap<usize, DisplayHandle>,
}

/// Create-once, release-once cache of display handles, keyed by linear
/// item index.
///
/// Clonable and internally locked so a host can hold a second reference
/// (e.g. for a full-screen viewer) while the window engine owns the first.
pub struct HandleCache<A> {
    inner: Arc<Mutex<CacheInner<A>>>,
}

impl<A> Clone for HandleCache<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: HandleAllocator> HandleCache<A> {
    pub fn new(alloc: A) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                alloc,
                entries: HashMap::new(),
            })),
        }
    }

    /// Returns the cached handle for `index`, allocating one on first use.
    ///
    /// The presence check and the allocation happen under one lock, so no
    /// item can ever end up with two live handles.
    pub fn get_or_create(&self, index: usize, item: &MediaItem) -> Result<DisplayHandle, GalleryError> {
        let mut inner = self.inner.lock();
        if let Some(handle) = inner.entries.get(&index) {
            trace!(index, "Handle cache hit");
            return Ok(handle.clone());
        }
        let handle = inner
            .alloc
            .allocate(item)
            .map_err(|source| GalleryError::HandleAllocation {
                index,
                path: item.path.clone(),
                source,
            })?;
        inner.entries.insert(index, handle.clone());
        trace!(index, "Allocated display handle");
        Ok(handle)
    }

    /// Returns the cached handle without allocating.
    pub fn get(&self, index: usize) -> Option<DisplayHandle> {
        self.inner.lock().entries.get(&index).cloned()
    }

    /// Releases the handle for `index`, freeing the underlying resource.
    /// No-op (not an error) when no handle was ever created.
    pub fn release(&self, index: usize) {
        let mut inner = self.inner.lock();
        if let Some(handle) = inner.entries.remove(&index) {
            inner.alloc.free(handle);
            trace!(index, "Released display handle");
        }
    }

    /// Releases every cached handle (session teardown).
    pub fn release_all(&self) {
        let mut inner = self.inner.lock();
        let entries = std::mem::take(&mut inner.entries);
        let count = entries.len();
        for (_, handle) in entries {
            inner.alloc.free(handle);
        }
        if count > 0 {
            debug!(count, "Released all display handles");
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.inner.lock().entries.contains_key(&index)
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}

impl HandleCache<FileUriAllocator> {
    /// Cache backed by the default `file://` allocator.
    pub fn new_default() -> Self {
        Self::new(FileUriAllocator)
    }
}
