//! Upload input types.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tamed_storage::MediaReader;

/// Something that can hand out a readable byte stream for an uploaded file.
#[async_trait]
pub trait UploadSource: Send + Sync {
    async fn open(&self) -> io::Result<MediaReader>;
}

/// A file on the local filesystem
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UploadSource for PathSource {
    async fn open(&self) -> io::Result<MediaReader> {
        let file = tokio::fs::File::open(&self.path).await?;
        Ok(Box::pin(file))
    }
}

/// Bytes already held in memory
#[derive(Debug, Clone)]
pub struct BytesSource {
    data: Bytes,
}

impl BytesSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl UploadSource for BytesSource {
    async fn open(&self) -> io::Result<MediaReader> {
        Ok(Box::pin(io::Cursor::new(self.data.clone())))
    }
}

/// One file of an upload batch: the client's file name, its declared size and
/// where to read it from.
#[derive(Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub size: u64,
    pub source: Arc<dyn UploadSource>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, size: u64, source: Arc<dyn UploadSource>) -> Self {
        Self {
            filename: filename.into(),
            size,
            source,
        }
    }

    /// In-memory upload; the declared size is the length of `data`
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        Self::new(filename, size, Arc::new(BytesSource::new(data)))
    }

    /// Upload of a local file, named after its final path component
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(
            filename,
            metadata.len(),
            Arc::new(PathSource::new(path)),
        ))
    }

    pub async fn open(&self) -> io::Result<MediaReader> {
        self.source.open().await
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
