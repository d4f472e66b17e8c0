//! Mock store implementations for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tamed_core::models::{Art, Post, User};
use tamed_core::{AppError, IdGenerator};
use tamed_db::{PostStore, ViewStore};
use tamed_storage::{MediaReader, MediaStore, StorageError, StorageResult};
use tokio::io::AsyncReadExt;

/// Media store keeping uploads in memory; links look like `mock://{key}`
#[derive(Clone, Default)]
pub struct MockMediaStore {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    uploads: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail
    pub fn fail_uploads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of upload attempts that reached the store
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn stored(&self, key: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(
        &self,
        id: &str,
        extension: &str,
        mut reader: MediaReader,
    ) -> StorageResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("mock upload failure".to_string()));
        }

        let key = format!("{}.{}", id, extension);
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;

        let mut files = self.files.lock().unwrap();
        if files.contains_key(&key) {
            return Err(StorageError::AlreadyExists(key));
        }
        files.insert(key.clone(), data);
        Ok(self.link_for(&key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.stored(storage_key)
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(storage_key))
    }

    fn link_for(&self, storage_key: &str) -> String {
        format!("mock://{}", storage_key)
    }
}

/// Post store keeping records in memory
#[derive(Clone, Default)]
pub struct MockPostStore {
    posts: Arc<Mutex<HashMap<String, Post>>>,
    fail: Arc<AtomicBool>,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following create fail
    pub fn fail_creates(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn create(&self, id: &str, post: &Post) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database("mock create failure".to_string()));
        }
        let mut posts = self.posts.lock().unwrap();
        if posts.contains_key(id) {
            return Err(AppError::Conflict(format!("post '{}' already exists", id)));
        }
        posts.insert(id.to_string(), post.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.posts.lock().unwrap().get(id).cloned())
    }
}

/// View store seeded by the test
#[derive(Clone, Default)]
pub struct MockViewStore {
    arts: Arc<Mutex<HashMap<String, Art>>>,
    users: Arc<Mutex<HashMap<String, User>>>,
    fail: Arc<AtomicBool>,
}

impl MockViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_art(&self, art: Art) {
        self.arts.lock().unwrap().insert(art.art_id.clone(), art);
    }

    pub fn add_user(&self, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(user.user_name.clone(), user);
    }

    /// Make every following read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database("mock read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ViewStore for MockViewStore {
    async fn get_art(&self, art_id: &str) -> Result<Option<Art>, AppError> {
        self.check()?;
        Ok(self.arts.lock().unwrap().get(art_id).cloned())
    }

    async fn get_user(&self, user_name: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(user_name).cloned())
    }
}

/// Ids `{prefix}-0001`, `{prefix}-0002`, ...
pub struct SequentialIds {
    prefix: String,
    next: AtomicUsize,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicUsize::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{:04}", self.prefix, n)
    }
}
