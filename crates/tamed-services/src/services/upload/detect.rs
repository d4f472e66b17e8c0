//! Content-type sniffing from the first bytes of a stream.

use std::io;
use tamed_core::constants::SNIFF_LEN;
use tamed_storage::MediaReader;
use thiserror::Error;
use tokio::io::AsyncReadExt;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("guessmime: {0}")]
    Read(#[from] io::Error),

    #[error("guessmime: empty stream")]
    Empty,
}

/// Sniff the MIME type of a content prefix.
///
/// Magic numbers first; otherwise text vs. opaque binary.
pub fn detect_content_type(prefix: &[u8]) -> String {
    if let Some(kind) = infer::get(prefix) {
        return kind.mime_type().to_string();
    }
    if looks_like_text(prefix) {
        TEXT_PLAIN.to_string()
    } else {
        OCTET_STREAM.to_string()
    }
}

fn looks_like_text(prefix: &[u8]) -> bool {
    let valid = match std::str::from_utf8(prefix) {
        Ok(_) => prefix,
        // A multi-byte character cut off by the prefix limit is fine
        Err(e) if e.error_len().is_none() => &prefix[..e.valid_up_to()],
        Err(_) => return false,
    };
    !valid
        .iter()
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F))
}

/// Read up to `SNIFF_LEN` bytes.
///
/// A read error after some bytes arrived ends the prefix early; it only fails when
/// nothing could be read at all.
async fn read_prefix(reader: &mut MediaReader) -> Result<Vec<u8>, DetectError> {
    let mut prefix = vec![0u8; SNIFF_LEN];
    let mut filled = 0;
    while filled < SNIFF_LEN {
        match reader.read(&mut prefix[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if filled == 0 => return Err(DetectError::Read(e)),
            Err(e) => {
                tracing::debug!(error = %e, read = filled, "Stream failed mid-prefix");
                break;
            }
        }
    }
    if filled == 0 {
        return Err(DetectError::Empty);
    }
    prefix.truncate(filled);
    Ok(prefix)
}

/// Sniff the content type of a stream, then drop it.
pub async fn sniff_content_type(mut reader: MediaReader) -> Result<String, DetectError> {
    let prefix = read_prefix(&mut reader).await?;
    Ok(detect_content_type(&prefix))
}

/// A stream whose first bytes have been read for sniffing.
///
/// [`PeekedReader::rewind`] gives back a reader that replays those bytes before the
/// rest of the stream, so the content can be checked before it is stored without
/// opening the source twice.
pub struct PeekedReader {
    prefix: Vec<u8>,
    content_type: String,
    rest: MediaReader,
}

impl PeekedReader {
    pub async fn peek(mut reader: MediaReader) -> Result<Self, DetectError> {
        let prefix = read_prefix(&mut reader).await?;
        let content_type = detect_content_type(&prefix);
        Ok(Self {
            prefix,
            content_type,
            rest: reader,
        })
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// The whole stream again, positioned at its first byte
    pub fn rewind(self) -> MediaReader {
        Box::pin(io::Cursor::new(self.prefix).chain(self.rest))
    }
}
