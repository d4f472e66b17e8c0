//! Store contracts consumed by the service layer.

use async_trait::async_trait;
use tamed_core::models::{Art, Post, User};
use tamed_core::AppError;

/// Persists post metadata keyed by post id.
///
/// Creation is the only write: an id that already exists is a write conflict
/// (`AppError::Conflict`), never an update.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist `post` under `id`. `id` must equal `post.post_id`.
    async fn create(&self, id: &str, post: &Post) -> Result<(), AppError>;

    /// Fetch a post, `None` if no record exists for `id`
    async fn get(&self, id: &str) -> Result<Option<Post>, AppError>;
}

/// Read access to the art and user view records.
///
/// A missing record is `Ok(None)`; errors are reserved for the backend itself.
#[async_trait]
pub trait ViewStore: Send + Sync {
    async fn get_art(&self, art_id: &str) -> Result<Option<Art>, AppError>;

    async fn get_user(&self, user_name: &str) -> Result<Option<User>, AppError>;
}

/// Reject a record key whose id does not match the record itself
pub(crate) fn check_post_id(id: &str, post: &Post) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::InvalidInput("post id must not be empty".to_string()));
    }
    if id != post.post_id {
        return Err(AppError::InvalidInput(format!(
            "post id mismatch: key '{}' but record '{}'",
            id, post.post_id
        )));
    }
    Ok(())
}
