//! Post creation service
//!
//! Turns a batch of uploaded files into stored media plus post records:
//! size check → open → sniff → accept → extension → id → store → persist.

use std::io;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tamed_core::constants::DEFAULT_UPLOAD_CONCURRENCY;
use tamed_core::mime::is_accepted;
use tamed_core::models::{Post, PostCreate};
use tamed_core::{AppError, IdGenerator};
use tamed_db::PostStore;
use tamed_storage::{MediaStore, StorageError};
use thiserror::Error;

use super::upload::{resolve_extension, DetectError, ExtensionError, PeekedReader, UploadedFile};

/// Why a single file of a batch could not become a post
#[derive(Debug, Error)]
pub enum CreateFileError {
    #[error("open: {0}")]
    Open(#[source] io::Error),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("bad upload type {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error("upload: {0}")]
    Upload(#[from] StorageError),

    #[error("persist: {0}")]
    Persist(#[source] AppError),
}

/// Creates posts from uploaded files
#[derive(Clone)]
pub struct PostService {
    media: Arc<dyn MediaStore>,
    posts: Arc<dyn PostStore>,
    ids: Arc<dyn IdGenerator>,
    concurrency: usize,
}

impl PostService {
    pub fn new(
        media: Arc<dyn MediaStore>,
        posts: Arc<dyn PostStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            media,
            posts,
            ids,
            concurrency: DEFAULT_UPLOAD_CONCURRENCY,
        }
    }

    /// Number of files of a batch processed at once (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Create one post per file.
    ///
    /// The whole call fails only when a file declares a zero size; every other
    /// failure is reported in that file's entry. Results are in input order.
    pub async fn create(&self, files: &[UploadedFile]) -> Result<Vec<PostCreate>, AppError> {
        if let Some(index) = files.iter().position(|file| file.size == 0) {
            tracing::warn!(
                index,
                filename = %files[index].filename,
                "Rejecting batch with empty file"
            );
            return Err(AppError::BadRequest(format!(
                "postsrv.create: empty data inside {} file",
                index
            )));
        }

        tracing::info!(
            files = files.len(),
            concurrency = self.concurrency,
            "Creating posts"
        );

        let results: Vec<PostCreate> = stream::iter(files)
            .map(|file| self.create_file(file))
            .buffered(self.concurrency)
            .collect()
            .await;

        let created = results.iter().filter(|r| r.is_created()).count();
        tracing::info!(
            created,
            failed = results.len() - created,
            "Post batch finished"
        );

        Ok(results)
    }

    /// Create the post for a single file, folding any failure into the result
    pub async fn create_file(&self, file: &UploadedFile) -> PostCreate {
        match self.try_create_file(file).await {
            Ok(post) => PostCreate::Created(post),
            Err(e) => {
                tracing::warn!(
                    filename = %file.filename,
                    error = %e,
                    "Post creation failed"
                );
                PostCreate::failed(format!("postsrv.create({}): {}", file.filename, e))
            }
        }
    }

    async fn try_create_file(&self, file: &UploadedFile) -> Result<Post, CreateFileError> {
        // 1. Open and sniff the first bytes
        let reader = file.open().await.map_err(CreateFileError::Open)?;
        let peeked = PeekedReader::peek(reader).await?;
        let content_type = peeked.content_type().to_string();

        // 2. Only accepted types are stored
        if !is_accepted(&content_type) {
            return Err(CreateFileError::UnsupportedType(content_type));
        }

        // 3. Extension from the filename, else from the content type
        let extension = resolve_extension(&file.filename, &content_type)?;

        // 4. Store the bytes under a fresh id
        let post_id = self.ids.next_id();
        tracing::info!(
            post_id = %post_id,
            filename = %file.filename,
            content_type = %content_type,
            extension = %extension,
            file_size = file.size,
            "Processing upload"
        );

        let link = self
            .media
            .upload(&post_id, &extension, peeked.rewind())
            .await?;

        // 5. Persist the post record
        let post = Post::new(post_id, self.ids.now(), link);
        if let Err(e) = self.posts.create(&post.post_id, &post).await {
            // The stored bytes stay where they are
            tracing::warn!(
                post_id = %post.post_id,
                link = %post.link,
                error = %e,
                "Stored media left without a post record"
            );
            return Err(CreateFileError::Persist(e));
        }

        tracing::info!(post_id = %post.post_id, link = %post.link, "Post created");
        Ok(post)
    }

    /// Look up a stored post
    pub async fn get(&self, post_id: &str) -> Result<Post, AppError> {
        self.posts
            .get(post_id)
            .await
            .map_err(|e| e.context("srv.post.get"))?
            .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found!", post_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        fixtures, BrokenSource, MockMediaStore, MockPostStore, SequentialIds,
    };

    struct Harness {
        media: Arc<MockMediaStore>,
        posts: Arc<MockPostStore>,
        service: PostService,
    }

    fn harness() -> Harness {
        let media = Arc::new(MockMediaStore::new());
        let posts = Arc::new(MockPostStore::new());
        let service = PostService::new(
            media.clone(),
            posts.clone(),
            Arc::new(SequentialIds::new("post")),
        );
        Harness {
            media,
            posts,
            service,
        }
    }

    fn jpeg(name: &str) -> UploadedFile {
        UploadedFile::from_bytes(name.to_string(), fixtures::jpeg_bytes())
    }

    #[tokio::test]
    async fn creates_posts_for_accepted_files() {
        let h = harness();
        let results = h.service.create(&[jpeg("a.jpg"), jpeg("b")]).await.unwrap();

        assert_eq!(results.len(), 2);
        let a = results[0].post().unwrap();
        let b = results[1].post().unwrap();
        assert_eq!(a.post_id, "post-0001");
        assert_eq!(b.post_id, "post-0002");
        assert!(a.tags.is_empty());
        assert_eq!(a.link, "mock://post-0001.jpg");
        assert_eq!(b.link, "mock://post-0002.jpg");

        assert_eq!(h.posts.get(&a.post_id).await.unwrap().as_ref(), Some(a));
        assert_eq!(
            h.media.stored("post-0002.jpg"),
            Some(fixtures::jpeg_bytes())
        );
    }

    #[tokio::test]
    async fn empty_file_fails_whole_batch() {
        let h = harness();
        let files = vec![
            jpeg("a.jpg"),
            UploadedFile::from_bytes("empty.jpg", Vec::new()),
        ];

        let err = h.service.create(&files).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Bad request: postsrv.create: empty data inside 1 file");
        assert_eq!(h.media.upload_count(), 0);
        assert_eq!(h.posts.len(), 0);
    }

    #[tokio::test]
    async fn disallowed_type_does_not_stop_the_batch() {
        let h = harness();
        let files = vec![
            UploadedFile::from_bytes("notes.txt", &b"plain old text"[..]),
            jpeg("a.jpg"),
        ];

        let results = h.service.create(&files).await.unwrap();
        assert_eq!(
            results[0].error(),
            Some("postsrv.create(notes.txt): bad upload type text/plain; charset=utf-8")
        );
        assert!(results[1].is_created());
        assert_eq!(h.media.upload_count(), 1);
        assert_eq!(h.posts.len(), 1);
    }

    #[tokio::test]
    async fn upload_failure_is_reported_per_file() {
        let h = harness();
        h.media.fail_uploads(true);

        let results = h.service.create(&[jpeg("a.jpg")]).await.unwrap();
        let error = results[0].error().unwrap();
        assert!(error.starts_with("postsrv.create(a.jpg): upload: "));
        assert_eq!(h.posts.len(), 0);
    }

    #[tokio::test]
    async fn persist_failure_keeps_stored_media() {
        let h = harness();
        h.posts.fail_creates(true);

        let results = h.service.create(&[jpeg("a.jpg")]).await.unwrap();
        let error = results[0].error().unwrap();
        assert!(error.starts_with("postsrv.create(a.jpg): persist: "));
        assert!(h.media.stored("post-0001.jpg").is_some());
    }

    #[tokio::test]
    async fn open_failure_is_reported_per_file() {
        let h = harness();
        let missing = UploadedFile::new(
            "gone.png",
            10,
            Arc::new(crate::services::upload::PathSource::new("/nonexistent/gone.png")),
        );

        let results = h.service.create(&[missing, jpeg("a.jpg")]).await.unwrap();
        assert!(results[0]
            .error()
            .unwrap()
            .starts_with("postsrv.create(gone.png): open: "));
        assert!(results[1].is_created());
    }

    #[tokio::test]
    async fn stream_breaking_after_header_fails_only_that_file() {
        let h = harness();
        let broken = UploadedFile::new(
            "cut.jpg",
            4096,
            Arc::new(BrokenSource::new(fixtures::jpeg_bytes())),
        );

        let results = h.service.create(&[broken, jpeg("b.jpg")]).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0]
            .error()
            .unwrap()
            .starts_with("postsrv.create(cut.jpg): upload: "));
        assert!(results[1].is_created());
        assert_eq!(h.media.upload_count(), 2);
        assert_eq!(h.posts.len(), 1);
    }

    #[tokio::test]
    async fn declared_size_mismatch_with_empty_content() {
        let h = harness();
        let lying = UploadedFile::new(
            "ghost.jpg",
            42,
            Arc::new(crate::services::upload::BytesSource::new(Vec::new())),
        );

        let results = h.service.create(&[lying]).await.unwrap();
        assert_eq!(
            results[0].error(),
            Some("postsrv.create(ghost.jpg): guessmime: empty stream")
        );
    }

    #[tokio::test]
    async fn concurrent_batches_keep_input_order() {
        let h = harness();
        let service = h.service.clone().with_concurrency(4);
        let files: Vec<UploadedFile> = (0..10)
            .map(|i| {
                if i % 3 == 0 {
                    UploadedFile::from_bytes(format!("bad{}", i), &b"text"[..])
                } else {
                    jpeg(&format!("img{}", i))
                }
            })
            .collect();

        let results = service.create(&files).await.unwrap();
        assert_eq!(results.len(), files.len());
        for (i, result) in results.iter().enumerate() {
            if i % 3 == 0 {
                assert!(result.error().unwrap().contains(&format!("(bad{})", i)));
            } else {
                assert!(result.is_created());
            }
        }
    }

    #[tokio::test]
    async fn with_concurrency_floors_at_one() {
        let h = harness();
        assert_eq!(h.service.concurrency(), 1);
        assert_eq!(h.service.clone().with_concurrency(0).concurrency(), 1);
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let h = harness();
        let err = h.service.get("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
