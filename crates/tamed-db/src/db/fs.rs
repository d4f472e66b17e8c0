//! Filesystem post database: one pretty-printed JSON document per record.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/
//! ├── posts/{post_id}.json
//! ├── arts/{art_id}.json
//! └── users/{user_name}.json
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tamed_core::models::{Art, Post, User};
use tamed_core::AppError;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::traits::{check_post_id, PostStore, ViewStore};

const POSTS_DIR: &str = "posts";
const ARTS_DIR: &str = "arts";
const USERS_DIR: &str = "users";

/// Post and view store backed by a directory of JSON files
#[derive(Clone, Debug)]
pub struct FsPostStore {
    root: PathBuf,
}

impl FsPostStore {
    /// Open (and create, if needed) the post database rooted at `root`
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        for dir in [POSTS_DIR, ARTS_DIR, USERS_DIR] {
            fs::create_dir_all(root.join(dir)).await.map_err(|e| {
                AppError::Database(format!(
                    "Failed to create post database directory {}: {}",
                    root.join(dir).display(),
                    e
                ))
            })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for `key` inside `dir`.
    ///
    /// Keys become file names, so anything that is not a plain name is rejected.
    fn record_path(&self, dir: &str, key: &str) -> Result<PathBuf, AppError> {
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
        {
            return Err(AppError::InvalidInput(format!("invalid record key: {:?}", key)));
        }
        Ok(self.root.join(dir).join(format!("{}.json", key)))
    }

    async fn read_record<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, AppError> {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Database(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let record = serde_json::from_slice(&data).map_err(|e| {
            AppError::Database(format!("Corrupt record {}: {}", path.display(), e))
        })?;
        Ok(Some(record))
    }
}

/// Remove a record whose write failed; a failed removal is only logged
async fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        tracing::warn!(
            error = %e,
            path = %path.display(),
            "Failed to remove partially written post record"
        );
    }
}

#[async_trait]
impl PostStore for FsPostStore {
    #[tracing::instrument(skip(self, post), fields(db.table = "posts"))]
    async fn create(&self, id: &str, post: &Post) -> Result<(), AppError> {
        check_post_id(id, post)?;
        let path = self.record_path(POSTS_DIR, id)?;
        let body = serde_json::to_vec_pretty(post)
            .map_err(|e| AppError::Internal(format!("Failed to encode post {}: {}", id, e)))?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    AppError::Conflict(format!("post '{}' already exists", id))
                }
                _ => AppError::Database(format!("Failed to create {}: {}", path.display(), e)),
            })?;

        let written = async {
            file.write_all(&body).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            remove_partial(&path).await;
            return Err(AppError::Database(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(post_id = %id, "Post record written");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts"))]
    async fn get(&self, id: &str) -> Result<Option<Post>, AppError> {
        let path = self.record_path(POSTS_DIR, id)?;
        self.read_record(&path).await
    }
}

#[async_trait]
impl ViewStore for FsPostStore {
    #[tracing::instrument(skip(self), fields(db.table = "arts"))]
    async fn get_art(&self, art_id: &str) -> Result<Option<Art>, AppError> {
        let path = self.record_path(ARTS_DIR, art_id)?;
        self.read_record(&path).await
    }

    #[tracing::instrument(skip(self), fields(db.table = "users"))]
    async fn get_user(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let path = self.record_path(USERS_DIR, user_name)?;
        self.read_record(&path).await
    }
}
