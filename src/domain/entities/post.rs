//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

use super::Comment;

/// Represents a post that comments attach to.
///
/// Maps to the `posts` table:
/// - id: TEXT PRIMARY KEY (opaque, server-generated UUID)
/// - title: TEXT NOT NULL
/// - content: TEXT NOT NULL
/// - author: TEXT NOT NULL
/// - comments_allowed: BOOLEAN NOT NULL DEFAULT TRUE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// A post is immutable once created except for `comments_allowed`, which is
/// toggled through a dedicated operation. `comments` is derived state: it is
/// never persisted and is populated at read time with the materialized
/// comment tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier (primary key)
    pub id: String,

    /// Post title
    pub title: String,

    /// Post body content
    pub content: String,

    /// Author identifier
    pub author: String,

    /// Whether new comments are accepted. OPEN (true) and CLOSED (false)
    /// are freely reversible.
    pub comments_allowed: bool,

    /// Timestamp when the post was created
    pub created_at: DateTime<Utc>,

    /// Top-level comments with their children attached, populated at read
    /// time. Not persisted.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Check whether the post currently accepts new comments.
    pub fn accepts_comments(&self) -> bool {
        self.comments_allowed
    }
}

/// Repository trait for Post data access operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post. The `comments` field is ignored.
    async fn create(&self, post: &Post) -> Result<(), AppError>;

    /// Find a post by id. Returns None if it does not exist. The returned
    /// post carries no comments.
    async fn get(&self, id: &str) -> Result<Option<Post>, AppError>;

    /// List all posts, newest first. Posts carry no comments.
    async fn list(&self) -> Result<Vec<Post>, AppError>;

    /// Update the comments-allowed flag. Returns false when no row matched
    /// the id, so callers can distinguish a missing post.
    async fn set_comments_allowed(&self, id: &str, allowed: bool) -> Result<bool, AppError>;
}
