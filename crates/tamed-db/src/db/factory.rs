use std::sync::Arc;
use tamed_core::{AppError, Config, PostStoreBackend};

use super::{FsPostStore, PgPostStore, PostStore, ViewStore};

/// The post and view stores of one backend
#[derive(Clone)]
pub struct PostStores {
    pub posts: Arc<dyn PostStore>,
    pub views: Arc<dyn ViewStore>,
}

/// Create the post database described by the configuration
pub async fn create_post_stores(config: &Config) -> Result<PostStores, AppError> {
    match config.post_store_backend {
        PostStoreBackend::Fs => {
            let store = Arc::new(FsPostStore::new(&config.fs_postdb_path).await?);
            tracing::info!(
                path = %config.fs_postdb_path.display(),
                "Filesystem post database ready"
            );
            Ok(PostStores {
                posts: store.clone(),
                views: store,
            })
        }
        PostStoreBackend::Postgres => {
            let url = config.pg_url.as_deref().ok_or_else(|| {
                AppError::BadRequest("PG_URL not configured".to_string())
            })?;
            let store =
                Arc::new(PgPostStore::connect(url, config.db_max_connections, config.pg_reset).await?);
            Ok(PostStores {
                posts: store.clone(),
                views: store,
            })
        }
    }
}
