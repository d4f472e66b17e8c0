use crate::{LocalStorage, MediaStore, StorageResult};
use std::sync::Arc;
use tamed_core::Config;

/// Create the media store described by the configuration
pub async fn create_media_store(config: &Config) -> StorageResult<Arc<dyn MediaStore>> {
    let storage = LocalStorage::new(&config.fs_media_path, config.media_base_url.clone()).await?;

    tracing::info!(
        path = %config.fs_media_path.display(),
        base_url = %config.media_base_url,
        "Media store ready"
    );

    Ok(Arc::new(storage))
}
