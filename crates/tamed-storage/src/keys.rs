//! Shared key generation for media stores.
//!
//! Key format: `{id}.{ext}`.

use crate::traits::{StorageError, StorageResult};

/// Generate the storage key for a post id and file extension.
///
/// Rejects empty parts and anything that could escape the storage root.
pub fn generate_storage_key(id: &str, extension: &str) -> StorageResult<String> {
    if id.is_empty() {
        return Err(StorageError::InvalidKey("empty id".to_string()));
    }
    if extension.is_empty() {
        return Err(StorageError::InvalidKey("empty extension".to_string()));
    }

    let key = format!("{}.{}", id, extension);
    validate_key(&key)?;
    Ok(key)
}

/// Keys are flat file names inside the storage root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty()
        || key.contains("..")
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0')
    {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {:?}",
            key
        )));
    }
    Ok(())
}
