//! Tamed Core Library
//!
//! This crate provides the domain models, error type, configuration and ID/time
//! generation shared by every Tamed component.

pub mod config;
pub mod constants;
pub mod error;
pub mod id;
pub mod mime;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use id::{IdGenerator, UuidGenerator};
pub use mime::{default_extension, is_accepted, ACCEPTED_MIME};
pub use models::{Art, Post, PostCreate, Tags, User};
pub use storage_types::PostStoreBackend;
