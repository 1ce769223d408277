//! Blob store setup

use anyhow::Result;
use std::sync::Arc;
use veritas_core::Config;
use veritas_storage::{LocalStorage, Storage};

/// Create the local blob store rooted at the configured upload directory.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.upload_dir.clone(), config.public_files_base()).await?;

    tracing::info!(
        upload_dir = %config.upload_dir,
        files_base = %config.public_files_base(),
        "Blob store ready"
    );

    Ok(Arc::new(storage))
}
