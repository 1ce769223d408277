//! Storage abstraction trait
//!
//! This module defines the Storage trait the blob store backend implements.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Keys are flat generated filenames (see the `keys` module) and must not
/// contain `..` or a leading `/`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file under the given key. The write is fully completed (and
    /// synced) before this returns; callers persist metadata only afterwards.
    async fn upload(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a file back by its key.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its key. A missing file is not an error; the
    /// metadata row is the authoritative record.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL under which the key is served.
    fn public_url(&self, key: &str) -> String;
}
