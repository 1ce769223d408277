//! Veritas Storage Library
//!
//! This crate provides the blob store abstraction and its local filesystem
//! implementation. Uploaded files live under generated names so a stored key
//! never equals a caller-supplied filename.
//!
//! # Storage key format
//!
//! Keys are flat generated filenames: `{uuid-v4}{original extension}`. Keys
//! must not contain `..` or a leading `/`. Key generation is centralized in
//! the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::generated_filename;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
