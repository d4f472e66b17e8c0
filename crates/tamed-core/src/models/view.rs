//! View records served read-only by the view service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tags;

/// A published artwork built on top of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Art {
    pub art_id: String,
    pub post_id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub tags: Tags,
    pub create_time: DateTime<Utc>,
}

/// A user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_name: String,
    pub display_name: String,
    pub create_time: DateTime<Utc>,
}
