pub mod media;

pub use media::{
    AdminUploadResponse, ContentEntry, DeleteResponse, MediaItem, MobileUploadResponse,
    UpdateResponse, UpdateStatus,
};
