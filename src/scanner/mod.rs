//! Folder scanner for discovering browsable media files.
//!
//! Walks a directory with walkdir, keeps files whose extension maps to a
//! known image or video type, and skips everything else. Unreadable entries
//! are logged and skipped; they never fail the scan.

use std::path::Path;

use anyhow::{ensure, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::models::MediaItem;

/// Configuration for the folder scanner.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to scan directories recursively.
    pub recursive: bool,
    /// Maximum directory depth (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: 0, // unlimited
            follow_symlinks: false,
        }
    }
}

/// Scans a folder with the default configuration.
pub fn scan(dir: &Path) -> Result<Vec<MediaItem>> {
    scan_with(dir, &ScanConfig::default())
}

/// Scans a folder for media files, in stable walk order.
///
/// The returned list is unshuffled; callers build a
/// [`MediaCollection`](crate::models::MediaCollection) from it.
pub fn scan_with(dir: &Path, config: &ScanConfig) -> Result<Vec<MediaItem>> {
    ensure!(dir.is_dir(), "scan root {:?} is not a directory", dir);
    info!("Starting scan of {:?}", dir);

    let mut walker = WalkDir::new(dir)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();
    if !config.recursive {
        walker = walker.max_depth(1);
    } else if config.max_depth > 0 {
        walker = walker.max_depth(config.max_depth);
    }

    let mut items = Vec::new();
    let mut skipped = 0usize;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = ?e, "Skipping unreadable entry");
                skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match MediaItem::from_path(entry.path()) {
            Some(item) => items.push(item),
            None => skipped += 1,
        }
    }

    info!("Discovered {} media files", items.len());
    debug!(skipped, "Scan finished");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::tempdir;

    use super::*;
    use crate::models::MediaType;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "b.mp4");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "noext");

        let items = scan(dir.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].media_type, MediaType::Image);
        assert_eq!(items[1].media_type, MediaType::Video);
    }

    #[test]
    fn test_scan_recurses_into_subfolders() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        touch(dir.path(), "top.png");
        touch(&sub, "deep.webm");

        let items = scan(dir.path()).unwrap();
        assert_eq!(items.len(), 2);

        let flat = scan_with(
            dir.path(),
            &ScanConfig {
                recursive: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].name, "top.png");
    }

    #[test]
    fn test_scan_rejects_non_directory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        assert!(scan(&dir.path().join("a.jpg")).is_err());
    }
}
