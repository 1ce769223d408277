//! Database repositories for data access layer
//!
//! This crate contains the repository implementation for database operations
//! on media item rows. Queries with optional predicates are assembled by pure
//! fragment builders that track positional parameter indices; user-supplied
//! values are only ever bound, never concatenated into SQL text.

pub mod db;

pub use db::media_items::MediaItemRepository;
