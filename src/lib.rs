//! Windowed, bidirectional, resource-bounded rendering over a large ordered
//! media collection.
//!
//! The crate partitions a shuffled collection of local image/video files into
//! fixed-size batches and keeps only a contiguous window of batches
//! materialized at any time. Proximity signals from the host grow the window
//! in either direction; batches falling off the far side are evicted and
//! their display handles released. Rendering and visibility observation are
//! host concerns, represented here by the [`gallery::RenderSurface`] and
//! [`gallery::ProximityObserver`] traits.

pub mod config;
pub mod error;
pub mod gallery;
pub mod models;
pub mod scanner;

pub use config::GalleryConfig;
pub use error::GalleryError;
pub use gallery::GalleryManager;
pub use models::{MediaCollection, MediaItem, MediaType};
