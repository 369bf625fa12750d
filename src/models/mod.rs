pub mod collection;
pub mod media_item;

pub use collection::MediaCollection;
pub use media_item::{MediaItem, MediaType};
