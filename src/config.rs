//! Tunables for the gallery window engine.

use std::time::Duration;

/// Default number of items per batch.
const DEFAULT_BATCH_SIZE: usize = 20;

/// Default maximum number of batches kept materialized.
const DEFAULT_WINDOW_SIZE: usize = 3;

/// Default proximity margin around the viewport, in pixels.
const DEFAULT_BUFFER_PX: f64 = 300.0;

/// Default trailing-edge debounce delay for boundary signals.
const DEFAULT_LOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Default distance beyond the viewport at which an element's source is
/// detached (the cached handle itself is kept).
const DEFAULT_UNLOAD_DISTANCE: f64 = 500.0;

/// Configuration for a gallery session.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Items per batch (the unit of materialization).
    pub batch_size: usize,
    /// Maximum batches retained in the window.
    pub window_size: usize,
    /// Proximity margin in pixels for the degraded scroll-position path.
    pub buffer_px: f64,
    /// Debounce delay applied to boundary signals.
    pub load_debounce: Duration,
    /// Distance in pixels past the viewport before a source is detached.
    pub unload_distance: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            buffer_px: DEFAULT_BUFFER_PX,
            load_debounce: DEFAULT_LOAD_DEBOUNCE,
            unload_distance: DEFAULT_UNLOAD_DISTANCE,
        }
    }
}

impl GalleryConfig {
    /// Clamps degenerate values to the smallest workable configuration.
    pub fn sanitized(mut self) -> Self {
        self.batch_size = self.batch_size.max(1);
        self.window_size = self.window_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.window_size, 3);
    }

    #[test]
    fn test_sanitize_clamps_zeroes() {
        let config = GalleryConfig {
            batch_size: 0,
            window_size: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.window_size, 1);
    }
}
