//! Services and their wiring.

pub mod post;
pub mod upload;
pub mod view;

use std::sync::Arc;

use tamed_core::constants::DEFAULT_UPLOAD_CONCURRENCY;
use tamed_core::{AppError, Config, IdGenerator, UuidGenerator};
use tamed_db::{create_post_stores, PostStore, ViewStore};
use tamed_storage::{create_media_store, MediaStore};

use post::PostService;
use view::ViewService;

/// Everything the services need from the outside world
#[derive(Clone)]
pub struct Stores {
    pub media: Arc<dyn MediaStore>,
    pub posts: Arc<dyn PostStore>,
    pub views: Arc<dyn ViewStore>,
    pub ids: Arc<dyn IdGenerator>,
    pub upload_concurrency: usize,
}

impl Stores {
    /// Bundle stores with random ids and sequential uploads
    pub fn new(
        media: Arc<dyn MediaStore>,
        posts: Arc<dyn PostStore>,
        views: Arc<dyn ViewStore>,
    ) -> Self {
        Self {
            media,
            posts,
            views,
            ids: Arc::new(UuidGenerator),
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
        }
    }

    /// Open the stores selected by `config`
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let media = create_media_store(config).await?;
        let stores = create_post_stores(config).await?;
        Ok(Self {
            upload_concurrency: config.upload_concurrency,
            ..Self::new(media, stores.posts, stores.views)
        })
    }
}

/// The application's services
#[derive(Clone)]
pub struct Services {
    pub posts: PostService,
    pub views: ViewService,
}

impl Services {
    pub fn new(stores: Stores) -> Self {
        Self {
            posts: PostService::new(stores.media, stores.posts, stores.ids)
                .with_concurrency(stores.upload_concurrency),
            views: ViewService::new(stores.views),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        tracing::info!(
            post_store = %config.post_store_backend,
            media_path = %config.fs_media_path.display(),
            "Initializing services"
        );
        Ok(Self::new(Stores::from_config(config).await?))
    }
}
