//! File extension resolution for stored media.

use tamed_core::mime::default_extension;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("cant detect extension for {content_type}")]
    Unresolved { content_type: String },
}

/// Text after the last `.` of the final `/`-separated component of `filename`.
///
/// A leading dot counts, so `.bashrc` yields `bashrc`; `photo.` yields an empty one.
pub fn filename_extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    name.rfind('.').map(|dot| &name[dot + 1..])
}

/// The filename's own extension when it has a non-empty one, else the default
/// extension of `content_type`.
pub fn resolve_extension(filename: &str, content_type: &str) -> Result<String, ExtensionError> {
    if let Some(ext) = filename_extension(filename).filter(|ext| !ext.is_empty()) {
        return Ok(ext.to_string());
    }
    default_extension(content_type)
        .map(str::to_string)
        .ok_or_else(|| ExtensionError::Unresolved {
            content_type: content_type.to_string(),
        })
}
