//! The sliding-window batch engine.
//!
//! `batch` is pure index arithmetic, `window` tracks the materialized range,
//! `handles` owns the lazily-created display handles, `scheduler` and
//! `bridge` turn raw proximity signals into serialized engine commands, and
//! `manager` ties everything to the host's rendering surface.

pub mod batch;
pub mod bridge;
pub mod handles;
pub mod manager;
pub mod scheduler;
pub mod surface;
pub mod window;

pub use batch::{batch_of, range_of, BatchRange};
pub use bridge::{GalleryCommand, ObserverEvent, VisibilityBridge};
pub use handles::{DisplayHandle, FileUriAllocator, HandleAllocator, HandleCache};
pub use manager::{GalleryManager, RenderedElement};
pub use scheduler::Debouncer;
pub use surface::{
    Anchor, ElementId, ElementSpec, NodeId, ObserveTarget, ProximityObserver, RenderSurface,
    ScrollMetrics,
};
pub use window::{Direction, WindowState};
