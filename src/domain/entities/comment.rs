//! Comment entity and repository trait.
//!
//! Maps to the `comments` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a single comment in a post's reply thread.
///
/// Maps to the `comments` table:
/// - id: TEXT PRIMARY KEY (opaque, server-generated UUID)
/// - post_id: TEXT NOT NULL REFERENCES posts(id)
/// - parent_id: TEXT NULL -- NULL means top-level comment
/// - author: TEXT NOT NULL
/// - text: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// A comment belongs to exactly one post for its lifetime and is immutable
/// once created. `children` is derived state populated by the tree builder
/// at read time; it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Opaque identifier (primary key)
    pub id: String,

    /// Owning post identifier (required, immutable)
    pub post_id: String,

    /// Parent comment identifier. None means this is a root comment.
    /// A parent, if present, is trusted to belong to the same post; storage
    /// is the authority here and no independent check is performed.
    pub parent_id: Option<String>,

    /// Author identifier
    pub author: String,

    /// Comment body
    pub text: String,

    /// Timestamp when the comment was created. Sibling order is creation
    /// time ascending.
    pub created_at: DateTime<Utc>,

    /// Child comments in creation order, populated at read time.
    /// Not persisted.
    #[serde(default)]
    pub children: Vec<Comment>,
}

impl Comment {
    /// Check if this is a top-level comment.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Repository trait for Comment data access operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Persist a new comment. The `children` field is ignored.
    async fn create(&self, comment: &Comment) -> Result<(), AppError>;

    /// List a post's comments ordered by creation time ascending.
    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>, AppError>;

    /// List comments for a set of posts in one batched fetch, same ordering.
    /// An empty id list yields an empty result, not an error.
    async fn list_by_posts(&self, post_ids: &[String]) -> Result<Vec<Comment>, AppError>;
}
