//! Media store abstraction trait
//!
//! This module defines the MediaStore trait that all media backends must implement.

use async_trait::async_trait;
use std::pin::Pin;
use tamed_core::AppError;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Media store operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for media store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Readable byte stream handed to [`MediaStore::upload`]
pub type MediaReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("Media '{}' not found", key)),
            StorageError::AlreadyExists(key) => {
                AppError::Conflict(format!("Media '{}' already exists", key))
            }
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Media store abstraction trait
///
/// Stores raw uploaded bytes under a key derived from the post id and the file
/// extension, and hands back a link that can later be used to retrieve them.
/// Implementations are shared across concurrent uploads; distinct ids never touch
/// the same key.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write the whole stream under `{id}.{extension}` and return its link.
    ///
    /// The reader is consumed until EOF and dropped before returning, whatever the
    /// outcome. An existing key is never overwritten.
    async fn upload(&self, id: &str, extension: &str, reader: MediaReader) -> StorageResult<String>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Link handed out for a storage key
    fn link_for(&self, storage_key: &str) -> String;
}
