//! Accepted content types and their default file extensions.
//!
//! Membership in [`ACCEPTED_MIME`] gates whether an upload is stored at all. The
//! extension column is used when the uploaded filename carries none.

/// Allowed content types, as produced by the content sniffer, mapped to the
/// extension a stored file gets when its filename has none.
pub const ACCEPTED_MIME: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/bmp", "bmp"),
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("audio/mpeg", "mp3"),
    ("audio/x-wav", "wav"),
];

/// Whether uploads of this content type are accepted
pub fn is_accepted(content_type: &str) -> bool {
    ACCEPTED_MIME.iter().any(|(mime, _)| *mime == content_type)
}

/// Default extension for an accepted content type, `None` if it is not in the table
pub fn default_extension(content_type: &str) -> Option<&'static str> {
    ACCEPTED_MIME
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_types_have_extensions() {
        for (mime, ext) in ACCEPTED_MIME {
            assert!(is_accepted(mime));
            assert_eq!(default_extension(mime), Some(*ext));
            assert!(!ext.is_empty());
            assert!(!ext.starts_with('.'));
        }
    }

    #[test]
    fn jpeg_defaults_to_jpg() {
        assert_eq!(default_extension("image/jpeg"), Some("jpg"));
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(!is_accepted("application/x-executable"));
        assert!(!is_accepted("text/plain; charset=utf-8"));
        assert_eq!(default_extension("application/octet-stream"), None);
    }

    #[test]
    fn lookup_is_exact() {
        assert!(!is_accepted("IMAGE/JPEG"));
        assert!(!is_accepted("image/jpeg; charset=binary"));
    }
}
