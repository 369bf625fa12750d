use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tiff" | "tif" => Some(Self::Image),
            "webm" | "mp4" | "mkv" | "avi" | "mov" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A single browsable media file. Immutable for the life of the collection;
/// the window logic depends on items never changing under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub media_type: MediaType,
    /// Stable display name (the file name component of the path).
    pub name: String,
}

impl MediaItem {
    /// Builds an item from a path, or `None` when the extension is not a
    /// recognized image or video format.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        let media_type = MediaType::from_extension(ext)?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            media_type,
            name,
        })
    }

    /// Check if this is a video file based on media type
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}
