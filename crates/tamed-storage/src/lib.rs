//! Tamed Storage Library
//!
//! This crate provides the media store abstraction and its local filesystem
//! implementation.
//!
//! # Storage key format
//!
//! Every stored file is keyed `{id}.{ext}`, where `id` is the post id assigned by the
//! upload pipeline. Keys never contain path separators or `..`. Key generation is
//! centralized in the `keys` module.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_media_store;
pub use local::LocalStorage;
pub use traits::{MediaReader, MediaStore, StorageError, StorageResult};
