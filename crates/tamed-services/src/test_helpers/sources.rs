//! Upload sources whose streams break partway.

use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tamed_storage::MediaReader;
use tokio::io::{AsyncRead, ReadBuf};

use crate::services::upload::UploadSource;

/// Yields `data`, then fails every later read.
pub struct BrokenReader {
    data: Vec<u8>,
    pos: usize,
}

impl BrokenReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl AsyncRead for BrokenReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.pos >= self.data.len() {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "connection reset",
            )));
        }
        let n = buf.remaining().min(self.data.len() - self.pos);
        let start = self.pos;
        buf.put_slice(&self.data[start..start + n]);
        self.pos += n;
        Poll::Ready(Ok(()))
    }
}

/// Upload source opening a fresh [`BrokenReader`] each time
pub struct BrokenSource {
    data: Vec<u8>,
}

impl BrokenSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl UploadSource for BrokenSource {
    async fn open(&self) -> io::Result<MediaReader> {
        Ok(Box::pin(BrokenReader::new(self.data.clone())))
    }
}
