//! ID and timestamp generation for new records.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of identifiers and creation times for new posts.
///
/// Implementations must never hand out the same id twice; id uniqueness is what
/// keeps concurrent uploads from colliding in the stores.
pub trait IdGenerator: Send + Sync {
    /// A fresh, non-empty, unique identifier
    fn next_id(&self) -> String;

    /// The current time
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 UUIDs rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
