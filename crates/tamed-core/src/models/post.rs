//! Post models: the stored-media record and the per-file upload outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unordered set of tags attached to a post.
///
/// Backed by a `BTreeSet` so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    /// An empty tag set (the state of every freshly created post)
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Identity record for a stored media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub create_time: DateTime<Utc>,
    pub tags: Tags,
    /// Locator returned by the media store for the underlying bytes
    pub link: String,
}

impl Post {
    /// Build the record for a freshly uploaded file: no tags yet.
    pub fn new(post_id: impl Into<String>, create_time: DateTime<Utc>, link: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            create_time,
            tags: Tags::new(),
            link: link.into(),
        }
    }
}

/// Outcome of creating a post from one uploaded file.
///
/// Serialized untagged: a success is the post's four fields, a failure is
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostCreate {
    Created(Post),
    Failed { error: String },
}

impl PostCreate {
    pub fn failed(error: impl ToString) -> Self {
        PostCreate::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, PostCreate::Created(_))
    }

    pub fn post(&self) -> Option<&Post> {
        match self {
            PostCreate::Created(post) => Some(post),
            PostCreate::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PostCreate::Created(_) => None,
            PostCreate::Failed { error } => Some(error),
        }
    }
}

impl From<Post> for PostCreate {
    fn from(post: Post) -> Self {
        PostCreate::Created(post)
    }
}
