//! Error types for the gallery engine.
//!
//! Nothing in the window engine is fatal: every failure degrades to "this
//! element or batch stays unmaterialized, retry on the next signal".

use std::path::PathBuf;

use thiserror::Error;

/// Recoverable failures surfaced by the gallery engine.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The host allocator failed to produce a display handle. The affected
    /// element is left without a source and retried on its next visibility
    /// signal.
    #[error("failed to allocate display handle for item {index} ({path:?})")]
    HandleAllocation {
        index: usize,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
