//! Application state for dependency injection.
//!
//! The pool, repository, and blob store are constructed once at startup and
//! handed to request handlers through `State<Arc<AppState>>` - never as
//! ambient globals.

use sqlx::PgPool;
use std::sync::Arc;
use veritas_core::Config;
use veritas_db::MediaItemRepository;
use veritas_storage::Storage;

/// Main application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub repository: MediaItemRepository,
    pub storage: Arc<dyn Storage>,
    /// Public base URL for uploaded files, trailing slash included.
    pub files_base: String,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
